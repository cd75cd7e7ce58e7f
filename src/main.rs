use std::env;
use std::io::{self, Write};
use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size},
};
use log::{error, info};

mod board;
mod constants;
mod difficulty;
mod entities;
mod game;
mod rendering;
mod rng;
mod session;
mod terminal_io;
mod types;

use constants::*;
use game::Game;
use rendering::{OutputTarget, ScreenBuffer};
use terminal_io::SimulatedInput;
use types::SlotLayout;

fn main() -> io::Result<()> {
    if let Err(e) = simple_logging::log_to_file(LOG_FILE, log::LevelFilter::Info) {
        eprintln!("Logging disabled, cannot open {}: {}", LOG_FILE, e);
    }
    info!("Starting Game Engine Development Simulator.");

    let args: Vec<String> = env::args().collect();
    let debug_mode_active = args.len() > 1 && args[1] == "--debug";

    if debug_mode_active {
        return run_headless(&args);
    }

    info!("Attempting to enable raw mode.");
    enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
    let (terminal_width, terminal_height) = size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
    info!("Terminal size: {}x{}", terminal_width, terminal_height);

    let mut stdout = io::stdout();
    let result = execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)
        .map_err(|e| { error!("Failed to prepare terminal: {}", e); e })
        .and_then(|_| {
            let mut game = Game::new(
                terminal_width,
                terminal_height,
                OutputTarget::Stdout(io::stdout()),
                None,
                false,
                None,
            );
            game.run()
        });

    // Restore the terminal whatever happened above.
    let _ = execute!(stdout, Show, DisableMouseCapture, LeaveAlternateScreen);
    let _ = stdout.flush();
    disable_raw_mode().map_err(|e| { error!("Failed to disable raw mode: {}", e); e })?;
    info!("Terminal restored.");
    result
}

/// `--debug [W H [FRAMES]]`: plays a scripted session into a ScreenBuffer.
fn run_headless(args: &[String]) -> io::Result<()> {
    info!("Debug mode enabled.");
    let terminal_width = args.get(2).and_then(|a| a.parse::<u16>().ok()).unwrap_or(DEBUG_WIDTH);
    let terminal_height = args.get(3).and_then(|a| a.parse::<u16>().ok()).unwrap_or(DEBUG_HEIGHT);
    let max_frames = args.get(4).and_then(|a| a.parse::<u64>().ok()).unwrap_or(DEBUG_FRAMES);
    info!("Debug resolution set to {}x{}, {} frames", terminal_width, terminal_height, max_frames);

    let layout = SlotLayout::new(GRID_ROWS, GRID_COLS, terminal_width, terminal_height);
    let simulated_input = SimulatedInput::click_through(layout, TICKS_PER_SECOND / 2, max_frames);
    let stdout_target = OutputTarget::ScreenBuffer(ScreenBuffer::new(terminal_width, terminal_height));
    let mut game = Game::new(
        terminal_width,
        terminal_height,
        stdout_target,
        Some(simulated_input),
        true,
        Some(max_frames),
    );
    game.run()
}

use std::io::{self, Write};
use std::time::{Duration, Instant};
use crossterm::{
    event::{self, Event},
    terminal::{Clear, ClearType},
};
use log::{error, info};

use crate::constants::*;
use crate::rendering::{self, GameGrid, OutputTarget, TextBounds};
use crate::session::{GameSession, Phase};
use crate::terminal_io::{InputTracker, SimulatedInput};
use crate::types::SlotLayout;

pub struct Game {
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub stdout_target: OutputTarget,
    simulated_input: Option<SimulatedInput>,
    debug_mode_active: bool,
    max_frames: Option<u64>,
}

impl Game {
    pub fn new(
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        simulated_input: Option<SimulatedInput>,
        debug_mode_active: bool,
        max_frames: Option<u64>,
    ) -> Self {
        Game {
            terminal_width,
            terminal_height,
            stdout_target,
            simulated_input,
            debug_mode_active,
            max_frames,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        let layout = SlotLayout::new(GRID_ROWS, GRID_COLS, self.terminal_width, self.terminal_height);
        let mut session = GameSession::new(layout);
        let mut tracker = InputTracker::new();
        let mut game_grid = GameGrid::new(self.terminal_width, self.terminal_height);
        let mut rng = rand::thread_rng();
        let frame_time = Duration::from_micros(1_000_000 / TICKS_PER_SECOND);

        let mut frame_count = 0;
        let mut best_score = 0;
        while !tracker.quit_requested() && self.max_frames.map_or(true, |max| frame_count < max) {
            let deadline = Instant::now() + frame_time;
            self.collect_input(&mut tracker, &mut session, frame_count, deadline)?;

            let input = tracker.snapshot();
            session.update(&input, &TextBounds, &mut rng);
            if session.phase == Phase::GameOver {
                best_score = best_score.max(session.score);
            }

            if game_grid.width != self.terminal_width || game_grid.height != self.terminal_height {
                game_grid = GameGrid::new(self.terminal_width, self.terminal_height);
                self.stdout_target.execute_other_command(Clear(ClearType::All))?;
            }
            rendering::draw_frame(&mut game_grid, &session, tracker.pointer());
            self.render(&game_grid, &session, frame_count)?;

            frame_count += 1;
        }

        info!("Leaving after {} frames, best run {} stars.", frame_count, best_score);
        Ok(())
    }

    fn collect_input(
        &mut self,
        tracker: &mut InputTracker,
        session: &mut GameSession,
        frame_count: u64,
        deadline: Instant,
    ) -> io::Result<()> {
        if self.debug_mode_active {
            let mut scripted = None;
            if let Some(sim_input) = &mut self.simulated_input {
                if sim_input.poll(frame_count)? {
                    scripted = Some(sim_input.read()?);
                }
            }
            if let Some(event) = scripted {
                self.handle_event(&event, tracker, session);
            }
            return Ok(());
        }

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(());
            }
            if !event::poll(remaining).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
                return Ok(());
            }
            let event = event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?;
            self.handle_event(&event, tracker, session);
        }
    }

    fn handle_event(&mut self, event: &Event, tracker: &mut InputTracker, session: &mut GameSession) {
        if let Event::Resize(new_width, new_height) = *event {
            info!("Terminal resized to {}x{}", new_width, new_height);
            self.terminal_width = new_width;
            self.terminal_height = new_height;
            session.board.set_layout(new_width, new_height);
        }
        tracker.handle(event);
    }

    fn render(&mut self, game_grid: &GameGrid, session: &GameSession, frame_count: u64) -> io::Result<()> {
        let background = session.tint().map(rendering::tint_color);
        game_grid.render(&mut self.stdout_target, background)
            .map_err(|e| { error!("Failed to render frame {}: {}", frame_count, e); e })?;
        self.stdout_target.flush()?;

        if let OutputTarget::ScreenBuffer(ref sb) = self.stdout_target {
            if frame_count % TICKS_PER_SECOND == 0 {
                sb.print_to_log();
            }
        }
        Ok(())
    }
}

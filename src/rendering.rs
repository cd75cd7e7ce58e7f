use std::io::{self, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Color, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::entities::{BoundsProvider, Item, ItemKind};
use crate::session::{CursorShape, GameSession, Phase, Tint};
use crate::types::{Point, Rect};

// --- ScreenBuffer for headless rendering ---
pub struct ScreenBuffer {
    buffer: Vec<Vec<char>>,
    width: u16,
    height: u16,
    cursor_x: u16,
    cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_char(&mut self, c: char) {
        if self.cursor_y < self.height && self.cursor_x < self.width {
            self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
        }
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.write_char(c);
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn row(&self, y: usize) -> String {
        self.buffer.get(y).map(|r| r.iter().collect()).unwrap_or_default()
    }

    #[cfg(test)]
    pub fn contains_text(&self, text: &str) -> bool {
        (0..self.height as usize).any(|y| self.row(y).contains(text))
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for y in 0..self.height as usize {
            info!("{}", self.row(y));
        }
        info!("---------------------");
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            },
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Colours and modes mean nothing headless
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => {
                let s = String::from_utf8_lossy(buf);
                sb.write_str(&s);
                Ok(buf.len())
            },
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

// --- Label geometry ---

pub struct TextBounds;

impl BoundsProvider for TextBounds {
    fn bounds(&self, kind: &ItemKind, anchor: Point) -> Rect {
        let lines = kind.label_lines();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
        let height = lines.len() as i32;
        let min = Point::new(anchor.x - width / 2, anchor.y - height / 2);
        Rect::new(min, Point::new(min.x + width, min.y + height))
    }
}

// --- GameGrid: one frame of coloured cells ---
#[derive(Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Option<Color>,
}

const BLANK: Cell = Cell { ch: ' ', color: None };

pub struct GameGrid {
    cells: Vec<Vec<Cell>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            cells: vec![vec![BLANK; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn clear(&mut self) {
        for row in self.cells.iter_mut() {
            row.fill(BLANK);
        }
    }

    pub fn set_char(&mut self, x: i32, y: i32, ch: char, color: Option<Color>) {
        if x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32 {
            self.cells[y as usize][x as usize] = Cell { ch, color };
        }
    }

    pub fn write_str(&mut self, x: i32, y: i32, s: &str, color: Option<Color>) {
        for (i, ch) in s.chars().enumerate() {
            self.set_char(x + i as i32, y, ch, color);
        }
    }

    pub fn write_centered(&mut self, y: i32, s: &str, color: Option<Color>) {
        let x = (self.width as i32 - s.chars().count() as i32) / 2;
        self.write_str(x, y, s, color);
    }

    pub fn render(&self, stdout: &mut OutputTarget, background: Option<Color>) -> io::Result<()> {
        if let Some(bg) = background {
            stdout.execute_other_command(SetBackgroundColor(bg))?;
        }
        for (y, row) in self.cells.iter().enumerate() {
            stdout.execute_move_to(MoveTo(0, y as u16))?;
            let mut run = String::new();
            let mut run_color = None;
            for cell in row {
                if cell.color != run_color {
                    write!(stdout, "{}", run)?;
                    run.clear();
                    stdout.execute_other_command(SetForegroundColor(cell.color.unwrap_or(Color::Reset)))?;
                    run_color = cell.color;
                }
                run.push(cell.ch);
            }
            write!(stdout, "{}", run)?;
            stdout.execute_other_command(SetForegroundColor(Color::Reset))?;
        }
        stdout.execute_other_command(ResetColor)?;
        Ok(())
    }
}

// --- Scene drawing ---

const TITLE_LINES: [&str; 4] = ["GAME", "ENGINE", "DEVELOPMENT", "SIMULATOR"];
const HOVER_COLOR: Color = Color::Rgb { r: 0xff, g: 0xff, b: 0x00 };

pub fn draw_frame(grid: &mut GameGrid, session: &GameSession, pointer: Option<Point>) {
    grid.clear();
    match session.phase {
        Phase::Title => draw_title(grid),
        Phase::Playing => draw_game(grid, session, pointer),
        Phase::GameOver => {
            draw_game(grid, session, None);
            draw_game_over(grid, session.score);
        }
    }
}

fn draw_centered_block(grid: &mut GameGrid, lines: &[String], color: Option<Color>) {
    let top = (grid.height as i32 - lines.len() as i32) / 2;
    for (i, line) in lines.iter().enumerate() {
        grid.write_centered(top + i as i32, line, color);
    }
}

fn draw_title(grid: &mut GameGrid) {
    let mut lines: Vec<String> = TITLE_LINES.iter().map(|l| l.to_string()).collect();
    lines.push(String::new());
    lines.push("Click to start".to_string());
    draw_centered_block(grid, &lines, None);
}

fn draw_game(grid: &mut GameGrid, session: &GameSession, pointer: Option<Point>) {
    grid.write_str(2, 0, &format!("GitHub Stars: {}", session.score), None);
    let life = format!("Life: {}", session.lives);
    grid.write_str(grid.width as i32 - 2 - life.chars().count() as i32, 0, &life, None);

    for item in session.board.items() {
        draw_item(grid, item);
    }

    if let (CursorShape::Pointer, Some(p)) = (session.cursor, pointer) {
        grid.set_char(p.x, p.y, '+', Some(HOVER_COLOR));
    }
}

fn draw_item(grid: &mut GameGrid, item: &Item) {
    let rect = TextBounds.bounds(&item.kind, item.anchor);
    let color = Some(item_color(item));
    for (i, line) in item.kind.label_lines().iter().enumerate() {
        let x = item.anchor.x - line.chars().count() as i32 / 2;
        grid.write_str(x, rect.min.y + i as i32, line, color);
    }
}

/// Hovered items turn yellow, recovery items green; the rest fade from
/// white to red as they run out of time.
pub fn item_color(item: &Item) -> Color {
    let v = (255.0 * item.urgency()) as u8;
    if item.hovered {
        HOVER_COLOR
    } else if item.is_recovery() {
        Color::Rgb { r: v / 2, g: v, b: v / 2 }
    } else {
        Color::Rgb { r: 0xff, g: v, b: v }
    }
}

pub fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Recovery(a) => Color::Rgb { r: 0, g: (255.0 * a) as u8, b: 0 },
        Tint::Damage(a) => Color::Rgb { r: (255.0 * a) as u8, g: 0, b: 0 },
    }
}

pub fn stars_text(score: u32) -> String {
    if score == 1 {
        "1 STAR".to_string()
    } else {
        format!("{} STARS", score)
    }
}

fn draw_game_over(grid: &mut GameGrid, score: u32) {
    let lines = vec!["GAME OVER".to_string(), "YOU GOT".to_string(), stars_text(score)];
    draw_centered_block(grid, &lines, None);
}

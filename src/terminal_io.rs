use std::collections::HashMap;
use std::io;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::types::{InputSnapshot, Point, SlotLayout};

// --- SimulatedInput for debugging ---
pub struct SimulatedInput {
    events: HashMap<u64, Event>,
    current_frame: u64,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Event>) -> Self {
        SimulatedInput { events, current_frame: 0 }
    }

    /// Starts the game on frame 1, then clicks the slots in turn every
    /// `interval` frames with a hover move a few frames before each click.
    pub fn click_through(layout: SlotLayout, interval: u64, frames: u64) -> Self {
        let mut events = HashMap::new();
        events.insert(1, mouse(MouseEventKind::Down(MouseButton::Left), Point::new(0, 0)));
        let slots = (layout.rows * layout.cols).max(1) as u64;
        let mut frame = 2 + interval;
        while frame < frames {
            let n = (frame / interval) % slots;
            let anchor = layout.anchor((n / layout.cols as u64) as usize, (n % layout.cols as u64) as usize);
            events.insert(frame - 3, mouse(MouseEventKind::Moved, anchor));
            events.insert(frame, mouse(MouseEventKind::Down(MouseButton::Left), anchor));
            frame += interval;
        }
        SimulatedInput::new(events)
    }

    pub fn poll(&mut self, frame_count: u64) -> io::Result<bool> {
        self.current_frame = frame_count;
        Ok(self.events.contains_key(&frame_count))
    }

    pub fn read(&mut self) -> io::Result<Event> {
        if let Some(event) = self.events.remove(&self.current_frame) {
            Ok(event)
        } else {
            Ok(Event::Key(KeyCode::Null.into()))
        }
    }
}

fn mouse(kind: MouseEventKind, at: Point) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column: at.x.max(0) as u16,
        row: at.y.max(0) as u16,
        modifiers: KeyModifiers::NONE,
    })
}

// --- InputTracker: folds a frame's events into one snapshot ---
#[derive(Default)]
pub struct InputTracker {
    pointer: Option<Point>,
    pressed_at: Option<Point>, // where this frame's activation began
    activated: bool,
    quit: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: &Event) {
        match event {
            Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                let at = Point::new(*column as i32, *row as i32);
                match kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => self.pointer = Some(at),
                    MouseEventKind::Down(MouseButton::Left) => {
                        self.pointer = Some(at);
                        if !self.activated {
                            self.pressed_at = Some(at);
                        }
                        self.activated = true;
                    }
                    _ => {}
                }
            }
            Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) => match code {
                KeyCode::Enter | KeyCode::Char(' ') => self.activated = true,
                KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
                _ => {}
            },
            _ => {}
        }
    }

    // Re-arms the activation edge. On the edge tick the press position is
    // reported alongside the current pointer.
    pub fn snapshot(&mut self) -> InputSnapshot {
        let just_activated = std::mem::take(&mut self.activated);
        let mut pointers: Vec<Point> = self.pressed_at.take().into_iter().collect();
        if let Some(p) = self.pointer.filter(|p| !pointers.contains(p)) {
            pointers.push(p);
        }
        InputSnapshot { pointers, just_activated }
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

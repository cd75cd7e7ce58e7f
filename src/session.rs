use log::info;

use crate::board::{Board, BoardEvent};
use crate::constants::*;
use crate::entities::BoundsProvider;
use crate::rng::RandomSource;
use crate::types::{InputSnapshot, SlotLayout};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Title,
    Playing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorShape {
    Default,
    Pointer,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tint {
    Recovery(f64),
    Damage(f64),
}

pub struct GameSession {
    pub phase: Phase,
    pub score: u32,
    pub lives: u32,
    pub board: Board,
    pub recovery_time: u32,
    pub damage_time: u32,
    pub bug_counter: u32,
    pub cursor: CursorShape,
}

impl GameSession {
    pub fn new(layout: SlotLayout) -> Self {
        GameSession {
            phase: Phase::Title,
            score: 0,
            lives: INIT_PLAYER_LIFE,
            board: Board::new(layout),
            recovery_time: 0,
            damage_time: 0,
            bug_counter: 0,
            cursor: CursorShape::Default,
        }
    }

    fn reset(&mut self) {
        self.score = 0;
        self.lives = INIT_PLAYER_LIFE;
        self.board.clear();
        self.recovery_time = 0;
        self.damage_time = 0;
        self.bug_counter = 0;
        self.cursor = CursorShape::Default;
    }

    pub fn update(&mut self, input: &InputSnapshot, bounds: &impl BoundsProvider, rng: &mut impl RandomSource) {
        match self.phase {
            Phase::Title => self.update_title(input),
            Phase::Playing => self.update_playing(input, bounds, rng),
            Phase::GameOver => self.update_game_over(input),
        }
    }

    fn update_title(&mut self, input: &InputSnapshot) {
        if input.just_activated {
            self.reset();
            self.phase = Phase::Playing;
            info!("Game started with {} lives.", self.lives);
        }
    }

    fn update_playing(&mut self, input: &InputSnapshot, bounds: &impl BoundsProvider, rng: &mut impl RandomSource) {
        self.recovery_time = self.recovery_time.saturating_sub(1);
        self.damage_time = self.damage_time.saturating_sub(1);

        let events = self.board.update(self.score, self.lives, &mut self.bug_counter, input, bounds, rng);
        self.apply(&events);
    }

    // Events are applied in slot order. After the last life is lost, stars
    // from that tick still count but nothing touches lives again.
    pub fn apply(&mut self, events: &[BoardEvent]) {
        let mut hovered = false;
        for event in events {
            let over = self.phase == Phase::GameOver;
            match *event {
                BoardEvent::Resolved { score, recovery } => {
                    self.score = self.score.saturating_add(score);
                    if recovery && !over {
                        self.lives = (self.lives + 1).min(MAX_PLAYER_LIFE);
                        self.recovery_time = MAX_RECOVERY_TIME;
                    }
                }
                BoardEvent::Hovered(h) => hovered |= h,
                BoardEvent::Expired { .. } if over => {}
                BoardEvent::Expired { .. } => {
                    self.damage_time = MAX_DAMAGE_TIME;
                    self.lives = self.lives.saturating_sub(1);
                    if self.lives == 0 {
                        self.phase = Phase::GameOver;
                    }
                }
            }
        }
        if self.phase == Phase::GameOver {
            info!("Game over with {} stars, {} items left on the board.", self.score, self.board.occupied());
        }
        self.cursor = if hovered { CursorShape::Pointer } else { CursorShape::Default };
    }

    fn update_game_over(&mut self, input: &InputSnapshot) {
        self.damage_time = self.damage_time.saturating_sub(1);
        if input.just_activated {
            self.phase = Phase::Title;
            self.cursor = CursorShape::Default;
            info!("Back to title.");
        }
    }

    // glow wins over the flash
    pub fn tint(&self) -> Option<Tint> {
        if self.recovery_time > 0 {
            Some(Tint::Recovery(self.recovery_time as f64 / MAX_RECOVERY_TIME as f64 / 2.0))
        } else if self.damage_time > 0 {
            Some(Tint::Damage(self.damage_time as f64 / MAX_DAMAGE_TIME as f64 / 2.0))
        } else {
            None
        }
    }
}

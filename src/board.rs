use log::debug;

use crate::constants::RECOVERY_LIFETIME;
use crate::difficulty;
use crate::entities::{BoundsProvider, Item, ItemKind};
use crate::rng::RandomSource;
use crate::types::{InputSnapshot, SlotLayout};

/// Outcome of one occupied slot during a board tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardEvent {
    Resolved { score: u32, recovery: bool },
    Expired { kind: ItemKind },
    Hovered(bool),
}

pub struct Board {
    layout: SlotLayout,
    slots: Vec<Option<Item>>,
    cool_time: u32,
}

impl Board {
    pub fn new(layout: SlotLayout) -> Self {
        Board {
            layout,
            slots: vec![None; layout.rows * layout.cols],
            cool_time: 0,
        }
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.cool_time = 0;
    }

    /// Keeps items in place; only new spawns use the new anchors.
    pub fn set_layout(&mut self, width: u16, height: u16) {
        self.layout.width = width;
        self.layout.height = height;
    }

    #[cfg(test)]
    pub fn layout(&self) -> SlotLayout {
        self.layout
    }

    #[cfg(test)]
    pub fn cool_time(&self) -> u32 {
        self.cool_time
    }

    #[cfg(test)]
    pub fn get(&self, row: usize, col: usize) -> Option<&Item> {
        self.index(row, col).and_then(|i| self.slots[i].as_ref())
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.slots.iter().flatten()
    }

    pub fn occupied(&self) -> usize {
        self.items().count()
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.layout.rows && col < self.layout.cols).then(|| row * self.layout.cols + col)
    }

    #[cfg(test)]
    pub fn place(&mut self, row: usize, col: usize, item: Item) -> bool {
        match self.index(row, col) {
            Some(i) if self.slots[i].is_none() => {
                self.slots[i] = Some(item);
                true
            }
            _ => false,
        }
    }

    // One spawn attempt per tick once the cool time is out. A roll onto a
    // taken slot spawns nothing and leaves the cool time at zero.
    pub fn update(
        &mut self,
        score: u32,
        lives: u32,
        bug_counter: &mut u32,
        input: &InputSnapshot,
        bounds: &impl BoundsProvider,
        rng: &mut impl RandomSource,
    ) -> Vec<BoardEvent> {
        if self.cool_time > 0 {
            self.cool_time -= 1;
        }
        if self.cool_time == 0 {
            self.try_spawn(score, lives, bug_counter, rng);
        }

        let mut events = Vec::new();
        for slot in self.slots.iter_mut() {
            let Some(item) = slot else { continue };
            item.update(input, bounds);
            if item.is_resolved() {
                let score = item.score();
                debug!("Resolved {:?} for {} stars", item.kind, score);
                events.push(BoardEvent::Resolved { score, recovery: item.is_recovery() });
                *slot = None;
            } else if item.is_alive() {
                events.push(BoardEvent::Hovered(item.hovered));
            } else {
                debug!("Expired {:?}", item.kind);
                events.push(BoardEvent::Expired { kind: item.kind });
                *slot = None;
            }
        }
        events
    }

    fn try_spawn(&mut self, score: u32, lives: u32, bug_counter: &mut u32, rng: &mut impl RandomSource) {
        let row = rng.below(self.layout.rows as u32) as usize;
        let col = rng.below(self.layout.cols as u32) as usize;
        let Some(i) = self.index(row, col) else { return };
        if self.slots[i].is_some() {
            return;
        }

        let recovery = difficulty::roll_recovery(score, lives, rng);
        let kind = difficulty::pick_kind(recovery, bug_counter, rng);
        let anchor = self.layout.anchor(row, col);
        let item = if recovery {
            Item::new(kind, anchor, RECOVERY_LIFETIME, 0)
        } else {
            Item::new(kind, anchor, difficulty::item_lifetime(score), difficulty::base_reward(score))
        };
        debug!(
            "Spawned {:?} at ({}, {}) living {} ticks",
            item.kind, row, col, item.initial_lifetime
        );
        self.slots[i] = Some(item);
        self.cool_time = difficulty::spawn_cooldown(score, rng);
    }
}

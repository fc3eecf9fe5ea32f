//! Tracks which face of the card shows as the template changes.
//!
//! Picking a template flips the card in; clearing it flips back to the
//! cover, and only after the flip transition has had time to finish is the
//! displayed template forgotten, so the next selection flips in again
//! instead of appearing instantly.

use crate::data::Template;

use std::time::{Duration, Instant};

pub const FLIP_DURATION: Duration = Duration::from_millis(700);

/// What the canvas currently shows.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Face {
    Cover,
    Front(Template),
}

#[derive(Debug, Clone, Default)]
pub struct Preview {
    displayed: Option<Template>,
    flipped: bool,
    clear_at: Option<Instant>,
}

impl Preview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the current template selection into the lifecycle. Selecting a
    /// template cancels any pending forget, so a quick clear-and-reselect
    /// can never drop a card that is back on screen.
    pub fn observe(&mut self, template: Option<Template>, now: Instant) {
        self.settle(now);
        match template {
            Some(t) => {
                self.displayed = Some(t);
                self.flipped = true;
                self.clear_at = None;
            }
            None => {
                if self.flipped {
                    self.flipped = false;
                    self.clear_at = Some(now + FLIP_DURATION);
                }
            }
        }
    }

    pub fn face(&mut self, now: Instant) -> Face {
        self.settle(now);
        match self.displayed {
            Some(t) if self.flipped => Face::Front(t),
            _ => Face::Cover,
        }
    }

    pub fn flipped(&self) -> bool {
        self.flipped
    }

    pub fn displayed(&self) -> Option<Template> {
        self.displayed
    }

    fn settle(&mut self, now: Instant) {
        if self.clear_at.is_some_and(|at| now >= at) {
            self.displayed = None;
            self.clear_at = None;
        }
    }
}

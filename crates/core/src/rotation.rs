//! Cyclic slide selection for the hero carousel, quote rotator and journey stepper.

use serde::Serialize;

use crate::timer::{Tick, TickOutcome};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Rotator {
    name: String,
    len: usize,
    index: usize,
    paused: bool,
}

impl Rotator {
    pub fn new(name: impl Into<String>, len: usize) -> Self {
        Self { name: name.into(), len, index: 0, paused: false }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> usize {
        self.index
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn previous(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    /// Jumps to `index`; returns false when it is out of range or already current.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.len || index == self.index {
            return false;
        }
        self.index = index;
        true
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Share of the sequence reached so far, counting the current slide.
    pub fn progress_percent(&self) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        (self.index + 1) as f64 / self.len as f64 * 100.0
    }
}

impl Tick for Rotator {
    fn tick(&mut self) -> TickOutcome {
        if !self.paused {
            self.next();
        }
        TickOutcome::Continue
    }
}

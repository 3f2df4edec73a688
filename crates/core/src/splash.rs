//! The one-shot loading splash.
//!
//! Progress is synthetic: each tick adds a random increment until 100%, then the
//! splash holds a completion message, fades out and hides for good. Nothing else
//! waits on it.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::timer::{Tick, TickOutcome};

pub const COMPLETION_MESSAGE: &str = "Welcome to your wellness journey";

const MIN_INCREMENT: f64 = 5.0;
const MAX_INCREMENT: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SplashPhase {
    Loading,
    Complete,
    FadingOut,
    Hidden,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplashTimings {
    pub tick: Duration,
    pub complete_pause: Duration,
    pub fade_out: Duration,
}

impl Default for SplashTimings {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(200),
            complete_pause: Duration::from_millis(800),
            fade_out: Duration::from_millis(500),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SplashFrame {
    pub elapsed_ms: u64,
    pub phase: SplashPhase,
    pub progress: f64,
    pub message: &'static str,
}

#[derive(Debug)]
pub struct SplashScreen {
    phase: SplashPhase,
    progress: f64,
    timings: SplashTimings,
    rng: StdRng,
}

impl SplashScreen {
    pub fn new(timings: SplashTimings) -> Self {
        Self::with_rng(timings, StdRng::from_entropy())
    }

    pub fn seeded(timings: SplashTimings, seed: u64) -> Self {
        Self::with_rng(timings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(timings: SplashTimings, rng: StdRng) -> Self {
        Self { phase: SplashPhase::Loading, progress: 0.0, timings, rng }
    }

    pub fn phase(&self) -> SplashPhase {
        self.phase
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_visible(&self) -> bool {
        self.phase != SplashPhase::Hidden
    }

    pub fn message(&self) -> &'static str {
        match self.phase {
            SplashPhase::Loading => status_text(self.progress),
            SplashPhase::Complete | SplashPhase::FadingOut | SplashPhase::Hidden => {
                COMPLETION_MESSAGE
            }
        }
    }

    fn frame(&self, elapsed: Duration) -> SplashFrame {
        SplashFrame {
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            phase: self.phase,
            progress: self.progress,
            message: self.message(),
        }
    }

    /// Replays a seeded splash from start to hidden.
    pub fn timeline(timings: SplashTimings, seed: u64) -> Vec<SplashFrame> {
        let mut splash = Self::seeded(timings, seed);
        let mut elapsed = Duration::ZERO;
        let mut frames = vec![splash.frame(elapsed)];
        let mut wait = timings.tick;

        loop {
            elapsed += wait;
            let outcome = splash.tick();
            frames.push(splash.frame(elapsed));
            wait = match outcome {
                TickOutcome::Continue => timings.tick,
                TickOutcome::Delay(delay) => delay,
                TickOutcome::Finished => break,
            };
        }

        frames
    }
}

impl Tick for SplashScreen {
    fn tick(&mut self) -> TickOutcome {
        match self.phase {
            SplashPhase::Loading => {
                self.progress += self.rng.gen_range(MIN_INCREMENT..MAX_INCREMENT);
                if self.progress >= 100.0 {
                    self.progress = 100.0;
                    self.phase = SplashPhase::Complete;
                    TickOutcome::Delay(self.timings.complete_pause)
                } else {
                    TickOutcome::Continue
                }
            }
            SplashPhase::Complete => {
                self.phase = SplashPhase::FadingOut;
                TickOutcome::Delay(self.timings.fade_out)
            }
            SplashPhase::FadingOut | SplashPhase::Hidden => {
                self.phase = SplashPhase::Hidden;
                TickOutcome::Finished
            }
        }
    }
}

pub fn status_text(progress: f64) -> &'static str {
    if progress < 30.0 {
        "Preparing your wellness journey..."
    } else if progress < 60.0 {
        "Brewing tranquility..."
    } else if progress < 90.0 {
        "Infusing mindfulness..."
    } else {
        "Almost ready..."
    }
}

use std::time::Duration;

/// What a ticking component wants after handling one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick again after the regular period.
    Continue,
    /// Tick again after this delay instead of the regular period.
    Delay(Duration),
    /// Nothing left to do; the timer for this component can stop.
    Finished,
}

/// A component advanced by a scheduled timer rather than by rendering.
pub trait Tick: Send {
    fn tick(&mut self) -> TickOutcome;
}

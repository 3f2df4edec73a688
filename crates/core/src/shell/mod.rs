pub mod engine;
pub mod states;

pub use engine::{reduce_criteria, PresentationShell, ShellSnapshot, ShellTransitionError};
pub use states::{
    ModalCloseReason, ShellEffect, ShellEvent, ShellState, TransitionOutcome, ViewMode,
};

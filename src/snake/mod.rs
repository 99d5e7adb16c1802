//! Self-playing snake that records every simulated step as a frame.
//!
//! The simulator alternates a draw step (append a frame showing the snake and
//! fruit) with a logic step (move, eat, or shrink). Frames go into slots of at
//! most 123 frames; once the frame budget is nearly used up the snake is made
//! to die so the animation always ends on an empty board, followed by a short
//! progress bar that hides the seam when the strip loops.

mod footer;
mod simulator;
mod state;

pub use footer::{BAR_HEIGHT, BAR_ORIGIN, BAR_WIDTH, append_footer, draw_loop_bar};
pub use simulator::{
    MOVE_ATTEMPTS, Phase, SimulationOutput, SimulationSummary, SimulatorState, SlotWriter,
    SnakeSimulator, StepOutcome,
};
pub use state::{Position, Snake, Step};

use crate::frame::FrameError;
use crate::schema::ConfigError;

/// Errors that abort a simulation run.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Ran out of frame slots ({slots} x {frames_per_slot} frames)")]
    SlotsExhausted { slots: usize, frames_per_slot: usize },

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("Invalid simulator configuration: {0}")]
    Config(#[from] ConfigError),
}

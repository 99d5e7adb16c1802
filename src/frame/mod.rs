//! Frame model - single 44x11 frames and bounded frame sequences.

mod grid;
mod sequence;

pub use grid::*;
pub use sequence::*;

/// Display width in pixels.
pub const FRAME_WIDTH: usize = 44;

/// Display height in pixels.
pub const FRAME_HEIGHT: usize = 11;

/// Maximum number of frames in one sequence (one slot on the device).
pub const MAX_FRAMES: usize = 123;

/// Errors raised by frame and sequence operations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("Pixel ({x}, {y}) is outside the 44x11 frame")]
    OutOfBounds { x: usize, y: usize },
    #[error("Expected a 44x11 matrix, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("A sequence holds 1 to 123 frames, got {0}")]
    InvalidLength(usize),
}

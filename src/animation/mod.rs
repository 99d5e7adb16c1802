//! Animation encoding and persistence.
//!
//! Animations are stored twice: a JSON file that is the source of truth and
//! can be loaded back, and BMP strips that are only ever written.
//!
//! # Strip layout
//!
//! ```text
//! width  = 48 * frames, height = 11
//!
//! | frame 0 (44 px) | gap (4 px) | frame 1 (44 px) | gap (4 px) | ...
//! ```
//!
//! Lit pixels are white, unlit pixels black. The gap is black for editor
//! output and red for simulator output.
//!
//! # JSON layout
//!
//! ```text
//! [ slot ][ frame ][ x: 44 columns ][ y: 11 booleans ]
//! ```
//!
//! Older editor files without the slot level are still accepted on load.

mod format;
mod import;
mod store;

pub use format::{
    FRAME_STRIDE, GAP_WIDTH, OFF_COLOR, ON_COLOR, decode_sequence_json, decode_slots_json,
    encode_sequence_json, encode_slots_json, encode_strip, strip_dimensions,
};
pub use import::{binarize, load_frame_samples};
pub use store::AnimationStore;

use crate::frame::FrameError;

/// Errors raised while encoding, saving or loading animations.
#[derive(Debug, thiserror::Error)]
pub enum StripError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed animation JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("Animation has no slots")]
    NoSlots,
}

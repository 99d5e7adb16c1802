//! Progress bar frames appended after the snake is gone.

use super::{SimulationError, SlotWriter};
use crate::frame::{FrameError, FrameGrid};

/// Full width of the bar.
pub const BAR_WIDTH: usize = 36;

/// Height of the bar.
pub const BAR_HEIGHT: usize = 5;

/// Top-left pixel of the bar.
pub const BAR_ORIGIN: (usize, usize) = (4, 3);

/// Draw step `step` (0-based) of a bar that fills over `steps` frames.
///
/// Widths grow in whole increments of `BAR_WIDTH / steps`; the last step is
/// always full width.
pub fn draw_loop_bar(frame: &mut FrameGrid, step: usize, steps: usize) -> Result<(), FrameError> {
    let width = if step + 1 >= steps {
        BAR_WIDTH
    } else {
        BAR_WIDTH / steps * (step + 1)
    };

    let (ox, oy) = BAR_ORIGIN;
    for x in 0..width {
        for y in 0..BAR_HEIGHT {
            frame.set(ox + x, oy + y, true)?;
        }
    }
    Ok(())
}

/// Append `steps` frames of growing progress bar.
pub fn append_footer(writer: &mut SlotWriter, steps: usize) -> Result<(), SimulationError> {
    for step in 0..steps {
        draw_loop_bar(writer.push_frame()?, step, steps)?;
    }
    Ok(())
}

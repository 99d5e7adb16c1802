//! A single monochrome frame.

use image::GrayImage;
use serde::{Deserialize, Serialize};

use super::{FRAME_HEIGHT, FRAME_WIDTH, FrameError};

/// Sample value treated as a lit pixel when importing images.
pub const WHITE_SAMPLE: u8 = 255;

/// One 44x11 frame of on/off pixels.
///
/// Pixels are stored column-major (`columns[x][y]`), which is also the
/// nesting used by the JSON form: 44 arrays of 11 booleans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<bool>>", into = "Vec<Vec<bool>>")]
pub struct FrameGrid {
    columns: [[bool; FRAME_HEIGHT]; FRAME_WIDTH],
}

impl Default for FrameGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameGrid {
    /// Create a frame with every pixel off.
    pub fn new() -> Self {
        Self {
            columns: [[false; FRAME_HEIGHT]; FRAME_WIDTH],
        }
    }

    /// Build a frame from a binarized 44x11 sample image.
    ///
    /// A pixel is on exactly when its sample equals [`WHITE_SAMPLE`].
    pub fn from_samples(samples: &GrayImage) -> Result<Self, FrameError> {
        let (width, height) = samples.dimensions();
        if width as usize != FRAME_WIDTH || height as usize != FRAME_HEIGHT {
            return Err(FrameError::InvalidDimensions {
                width: width as usize,
                height: height as usize,
            });
        }

        let mut grid = Self::new();
        for (x, y, sample) in samples.enumerate_pixels() {
            grid.columns[x as usize][y as usize] = sample.0[0] == WHITE_SAMPLE;
        }
        Ok(grid)
    }

    #[inline]
    fn check(x: usize, y: usize) -> Result<(), FrameError> {
        if x < FRAME_WIDTH && y < FRAME_HEIGHT {
            Ok(())
        } else {
            Err(FrameError::OutOfBounds { x, y })
        }
    }

    /// Read a pixel.
    pub fn get(&self, x: usize, y: usize) -> Result<bool, FrameError> {
        Self::check(x, y)?;
        Ok(self.columns[x][y])
    }

    /// Write a pixel.
    pub fn set(&mut self, x: usize, y: usize, value: bool) -> Result<(), FrameError> {
        Self::check(x, y)?;
        self.columns[x][y] = value;
        Ok(())
    }

    /// Flip a pixel, returning its new value.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<bool, FrameError> {
        Self::check(x, y)?;
        let pixel = &mut self.columns[x][y];
        *pixel = !*pixel;
        Ok(*pixel)
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.columns = [[false; FRAME_HEIGHT]; FRAME_WIDTH];
    }

    /// Number of lit pixels.
    pub fn lit_count(&self) -> usize {
        self.columns.iter().flatten().filter(|&&p| p).count()
    }

    /// Rotate columns one step left; the first column wraps to the right edge.
    pub fn rotate_left(&mut self) {
        self.columns.rotate_left(1);
    }

    /// Rotate columns one step right; the last column wraps to the left edge.
    pub fn rotate_right(&mut self) {
        self.columns.rotate_right(1);
    }

    /// Move every row up by one. The top row is lost and the bottom row
    /// comes in blank.
    pub fn shift_up(&mut self) {
        for column in &mut self.columns {
            column.copy_within(1.., 0);
            column[FRAME_HEIGHT - 1] = false;
        }
    }

    /// Move every row down by one. The bottom row is lost and the top row
    /// comes in blank.
    pub fn shift_down(&mut self) {
        for column in &mut self.columns {
            column.copy_within(..FRAME_HEIGHT - 1, 1);
            column[0] = false;
        }
    }

    /// Iterate over `(x, y)` of every lit pixel, column by column.
    pub fn lit_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.columns.iter().enumerate().flat_map(|(x, column)| {
            column
                .iter()
                .enumerate()
                .filter(|(_, p)| **p)
                .map(move |(y, _)| (x, y))
        })
    }
}

impl TryFrom<Vec<Vec<bool>>> for FrameGrid {
    type Error = FrameError;

    fn try_from(columns: Vec<Vec<bool>>) -> Result<Self, Self::Error> {
        let bad_column = columns.iter().find(|c| c.len() != FRAME_HEIGHT);
        if columns.len() != FRAME_WIDTH || bad_column.is_some() {
            return Err(FrameError::InvalidDimensions {
                width: columns.len(),
                height: bad_column.or(columns.first()).map_or(0, Vec::len),
            });
        }

        let mut grid = Self::new();
        for (dst, src) in grid.columns.iter_mut().zip(&columns) {
            dst.copy_from_slice(src);
        }
        Ok(grid)
    }
}

impl From<FrameGrid> for Vec<Vec<bool>> {
    fn from(grid: FrameGrid) -> Self {
        grid.columns.iter().map(|c| c.to_vec()).collect()
    }
}

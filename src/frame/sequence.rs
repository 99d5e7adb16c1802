//! Ordered, bounded list of frames with a cursor.

use image::GrayImage;
use serde::{Deserialize, Serialize};

use super::{FrameError, FrameGrid, MAX_FRAMES};

/// Direction for [`FrameSequence::shift`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftDirection {
    Left,
    Right,
    Up,
    Down,
}

impl ShiftDirection {
    /// Map the vi-style editor keys (`h`, `j`, `k`, `l`).
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            'h' => Some(ShiftDirection::Left),
            'j' => Some(ShiftDirection::Down),
            'k' => Some(ShiftDirection::Up),
            'l' => Some(ShiftDirection::Right),
            _ => None,
        }
    }
}

/// An animation: 1 to [`MAX_FRAMES`] frames and a current-frame cursor.
///
/// The cursor is always a valid index. Adding frames past the capacity is a
/// silent no-op; the methods that add frames report whether they did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FrameGrid>", into = "Vec<FrameGrid>")]
pub struct FrameSequence {
    frames: Vec<FrameGrid>,
    current: usize,
}

impl Default for FrameSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSequence {
    /// Create a sequence holding one blank frame.
    pub fn new() -> Self {
        Self::with_frame(FrameGrid::new())
    }

    /// Create a sequence holding a single given frame.
    pub fn with_frame(frame: FrameGrid) -> Self {
        Self {
            frames: vec![frame],
            current: 0,
        }
    }

    /// Create a sequence from existing frames, cursor on the first one.
    pub fn from_frames(frames: Vec<FrameGrid>) -> Result<Self, FrameError> {
        if frames.is_empty() || frames.len() > MAX_FRAMES {
            return Err(FrameError::InvalidLength(frames.len()));
        }
        Ok(Self { frames, current: 0 })
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when the sequence holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// True when no more frames can be added.
    pub fn is_full(&self) -> bool {
        self.frames.len() >= MAX_FRAMES
    }

    /// Cursor position.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// All frames in order.
    pub fn frames(&self) -> &[FrameGrid] {
        &self.frames
    }

    /// Frame at an arbitrary index.
    pub fn frame(&self, index: usize) -> Option<&FrameGrid> {
        self.frames.get(index)
    }

    /// Frame under the cursor.
    pub fn current_frame(&self) -> &FrameGrid {
        &self.frames[self.current]
    }

    /// Mutable handle to the frame under the cursor.
    pub fn current_frame_mut(&mut self) -> &mut FrameGrid {
        &mut self.frames[self.current]
    }

    /// One-based position label, e.g. `"3/7"`.
    pub fn counter_label(&self) -> String {
        format!("{}/{}", self.current + 1, self.frames.len())
    }

    /// Append a copy of the current frame and move the cursor onto it.
    pub fn clone_current_to_end(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.frames.push(self.current_frame().clone());
        self.current = self.frames.len() - 1;
        true
    }

    /// Append a blank frame and move the cursor onto it.
    pub fn push_blank(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.frames.push(FrameGrid::new());
        self.current = self.frames.len() - 1;
        true
    }

    /// Turn off every pixel of the current frame.
    pub fn clear_current(&mut self) {
        self.current_frame_mut().clear();
    }

    /// Append a copy of the current frame, step the cursor forward by one and
    /// clear the frame now under it. Same capacity rule as
    /// [`clone_current_to_end`].
    ///
    /// With the cursor on the last frame this yields a new blank last frame.
    /// Otherwise the frame after the cursor is cleared and the copy stays at
    /// the end.
    ///
    /// [`clone_current_to_end`]: FrameSequence::clone_current_to_end
    pub fn insert_blank_after_current(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.frames.push(self.current_frame().clone());
        self.current += 1;
        self.clear_current();
        true
    }

    /// Move the cursor forward, wrapping to the first frame.
    pub fn advance(&mut self) {
        self.current = (self.current + 1) % self.frames.len();
    }

    /// Move the cursor back, wrapping to the last frame.
    pub fn retreat(&mut self) {
        self.current = (self.current + self.frames.len() - 1) % self.frames.len();
    }

    /// Remove the last frame and step the cursor back.
    ///
    /// Note this drops the *last* frame, not the one under the cursor. Does
    /// nothing when only one frame is left.
    pub fn delete_current(&mut self) -> bool {
        if self.frames.len() <= 1 {
            return false;
        }
        self.frames.pop();
        self.current = self.current.saturating_sub(1).min(self.frames.len() - 1);
        true
    }

    /// Shift the current frame by one pixel.
    ///
    /// Horizontal shifts rotate (columns wrap around). Vertical shifts drop the
    /// exiting row and bring in a blank one.
    pub fn shift(&mut self, direction: ShiftDirection) {
        let frame = self.current_frame_mut();
        match direction {
            ShiftDirection::Left => frame.rotate_left(),
            ShiftDirection::Right => frame.rotate_right(),
            ShiftDirection::Up => frame.shift_up(),
            ShiftDirection::Down => frame.shift_down(),
        }
    }

    /// Overwrite the current frame with a binarized 44x11 sample image.
    pub fn import_into_current(&mut self, samples: &GrayImage) -> Result<(), FrameError> {
        *self.current_frame_mut() = FrameGrid::from_samples(samples)?;
        Ok(())
    }
}

impl TryFrom<Vec<FrameGrid>> for FrameSequence {
    type Error = FrameError;

    fn try_from(frames: Vec<FrameGrid>) -> Result<Self, Self::Error> {
        Self::from_frames(frames)
    }
}

impl From<FrameSequence> for Vec<FrameGrid> {
    fn from(sequence: FrameSequence) -> Self {
        sequence.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked(x: usize, y: usize) -> FrameGrid {
        let mut grid = FrameGrid::new();
        grid.set(x, y, true).unwrap();
        grid
    }

    fn full_sequence() -> FrameSequence {
        FrameSequence::from_frames((0..MAX_FRAMES).map(|i| marked(i % 44, i % 11)).collect())
            .unwrap()
    }

    #[test]
    fn test_new_sequence() {
        let seq = FrameSequence::new();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.current_index(), 0);
        assert_eq!(seq.current_frame().lit_count(), 0);
        assert_eq!(seq.counter_label(), "1/1");
    }

    #[test]
    fn test_current_frame_mut_is_live() {
        let mut seq = FrameSequence::new();
        seq.current_frame_mut().set(2, 2, true).unwrap();
        assert_eq!(seq.frames()[0].get(2, 2), Ok(true));
    }

    #[test]
    fn test_clone_to_end() {
        let mut seq = FrameSequence::with_frame(marked(1, 1));
        seq.push_blank();
        seq.retreat();
        assert!(seq.clone_current_to_end());
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.current_index(), 2);
        assert_eq!(seq.current_frame(), &marked(1, 1));

        seq.current_frame_mut().clear();
        assert_eq!(seq.frames()[0], marked(1, 1));
    }

    #[test]
    fn test_clone_at_capacity_is_noop() {
        let mut seq = full_sequence();
        seq.retreat();
        let before = seq.clone();
        assert!(!seq.clone_current_to_end());
        assert_eq!(seq, before);
        assert!(!seq.insert_blank_after_current());
        assert!(!seq.push_blank());
        assert_eq!(seq, before);
    }

    #[test]
    fn test_insert_blank_on_last_frame() {
        let mut seq = FrameSequence::from_frames(vec![marked(0, 0), marked(1, 1)]).unwrap();
        seq.advance();

        assert!(seq.insert_blank_after_current());
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.current_index(), 2);
        assert_eq!(
            seq.frames(),
            &[marked(0, 0), marked(1, 1), FrameGrid::new()]
        );
    }

    #[test]
    fn test_insert_blank_mid_sequence_clears_next_and_appends_copy() {
        let (a, b, c) = (marked(0, 0), marked(1, 1), marked(2, 2));
        let mut seq = FrameSequence::from_frames(vec![a.clone(), b, c.clone()]).unwrap();

        assert!(seq.insert_blank_after_current());
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.current_index(), 1);
        assert_eq!(seq.frames(), &[a.clone(), FrameGrid::new(), c, a]);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut seq = FrameSequence::new();
        seq.push_blank();
        seq.push_blank();
        assert_eq!(seq.current_index(), 2);
        seq.advance();
        assert_eq!(seq.current_index(), 0);
        seq.retreat();
        assert_eq!(seq.current_index(), 2);
        assert_eq!(seq.counter_label(), "3/3");
    }

    #[test]
    fn test_delete_single_frame_is_noop() {
        let mut seq = FrameSequence::with_frame(marked(3, 3));
        assert!(!seq.delete_current());
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.current_frame(), &marked(3, 3));
    }

    #[test]
    fn test_delete_removes_last_and_clamps() {
        let mut seq = FrameSequence::from_frames(vec![marked(0, 0), marked(1, 1), marked(2, 2)])
            .unwrap();
        assert!(seq.delete_current());
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.current_index(), 0);
        assert_eq!(seq.frames()[1], marked(1, 1));

        seq.advance();
        assert!(seq.delete_current());
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.current_index(), 0);
        assert_eq!(seq.current_frame(), &marked(0, 0));
    }

    #[test]
    fn test_delete_from_last_position() {
        let mut seq = full_sequence();
        seq.retreat();
        assert_eq!(seq.current_index(), MAX_FRAMES - 1);
        seq.delete_current();
        assert_eq!(seq.len(), MAX_FRAMES - 1);
        assert_eq!(seq.current_index(), MAX_FRAMES - 2);
    }

    #[test]
    fn test_horizontal_shift_restores() {
        let mut seq = FrameSequence::with_frame(marked(0, 0));
        seq.current_frame_mut().set(43, 10, true).unwrap();
        let original = seq.current_frame().clone();
        seq.shift(ShiftDirection::Left);
        assert_ne!(seq.current_frame(), &original);
        seq.shift(ShiftDirection::Right);
        assert_eq!(seq.current_frame(), &original);
    }

    #[test]
    fn test_vertical_shift_loses_edge_row() {
        let mut seq = FrameSequence::with_frame(marked(10, 0));
        let original = seq.current_frame().clone();
        seq.shift(ShiftDirection::Up);
        seq.shift(ShiftDirection::Down);
        assert_ne!(seq.current_frame(), &original);
        assert_eq!(seq.current_frame().lit_count(), 0);
    }

    #[test]
    fn test_shift_keys() {
        assert_eq!(ShiftDirection::from_key('h'), Some(ShiftDirection::Left));
        assert_eq!(ShiftDirection::from_key('j'), Some(ShiftDirection::Down));
        assert_eq!(ShiftDirection::from_key('k'), Some(ShiftDirection::Up));
        assert_eq!(ShiftDirection::from_key('l'), Some(ShiftDirection::Right));
        assert_eq!(ShiftDirection::from_key('x'), None);
    }

    #[test]
    fn test_from_frames_length_checks() {
        assert_eq!(
            FrameSequence::from_frames(vec![]),
            Err(FrameError::InvalidLength(0))
        );
        assert_eq!(
            FrameSequence::from_frames(vec![FrameGrid::new(); MAX_FRAMES + 1]),
            Err(FrameError::InvalidLength(MAX_FRAMES + 1))
        );
    }
}

//! Configuration types for the snake simulator and animation storage.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::frame::{FRAME_HEIGHT, FRAME_WIDTH, MAX_FRAMES};

/// Simulator parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Playback rate of the display; converts seconds to frames.
    pub frames_per_second: usize,
    /// Upper bound on the frame budget, regardless of requested length.
    ///
    /// 4 slots is what currently flashes reliably, out of the 8 the
    /// hardware addresses.
    pub max_frames: usize,
    /// Frames in one slot.
    pub frames_per_slot: usize,
    /// Slots that may be allocated before the run aborts.
    pub max_slots: usize,
    /// Frames of progress bar appended after the snake is gone.
    pub footer_frames: usize,
    /// Starting snake, head first.
    pub initial_snake: Vec<(i32, i32)>,
    /// RNG seed for fruit placement (None = entropy).
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            frames_per_second: 15,
            max_frames: MAX_FRAMES * 4,
            frames_per_slot: MAX_FRAMES,
            max_slots: 8,
            footer_frames: 10,
            initial_snake: vec![(11, 5), (10, 5), (9, 5)],
            seed: None,
        }
    }
}

impl SimulatorConfig {
    /// Same as default, with a fixed RNG seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Frames to produce for a requested animation length.
    pub fn frame_budget(&self, seconds: u64) -> usize {
        let requested = usize::try_from(seconds)
            .unwrap_or(usize::MAX)
            .saturating_mul(self.frames_per_second);
        requested.min(self.max_frames)
    }

    /// Total frames that fit into all slots.
    #[inline]
    pub fn slot_capacity(&self) -> usize {
        self.frames_per_slot * self.max_slots
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frames_per_second == 0 {
            return Err(ConfigError::InvalidFrameRate);
        }
        if self.frames_per_slot == 0 || self.frames_per_slot > MAX_FRAMES || self.max_slots == 0
        {
            return Err(ConfigError::InvalidSlots {
                frames_per_slot: self.frames_per_slot,
                max_slots: self.max_slots,
            });
        }
        if self.max_frames > self.slot_capacity() {
            return Err(ConfigError::BudgetExceedsSlots {
                max_frames: self.max_frames,
                capacity: self.slot_capacity(),
            });
        }
        if self.initial_snake.is_empty() {
            return Err(ConfigError::EmptySnake);
        }

        let mut seen = HashSet::new();
        for &(x, y) in &self.initial_snake {
            if x < 0 || y < 0 || x as usize >= FRAME_WIDTH || y as usize >= FRAME_HEIGHT {
                return Err(ConfigError::SnakeOutOfBoard { x, y });
            }
            if !seen.insert((x, y)) {
                return Err(ConfigError::SnakeOverlaps { x, y });
            }
        }
        Ok(())
    }
}

/// How exported strips are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StripNaming {
    /// `<base>.bmp`, first slot only.
    Single,
    /// `<base>_<slot>.bmp`, one file per slot.
    PerSlot,
}

/// Fill color of the 4-pixel gap after each frame in a strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapColor {
    #[default]
    Black,
    Red,
}

impl GapColor {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            GapColor::Black => [0, 0, 0],
            GapColor::Red => [255, 0, 0],
        }
    }
}

/// Where and how animations are persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the JSON source of truth.
    pub storage_dir: PathBuf,
    /// Directory for exported BMP strips.
    pub export_dir: PathBuf,
    pub naming: StripNaming,
    #[serde(default)]
    pub gap_color: GapColor,
}

impl StorageConfig {
    /// Layout used by the frame editor.
    pub fn editor() -> Self {
        Self {
            storage_dir: PathBuf::from("bmps"),
            export_dir: PathBuf::from("."),
            naming: StripNaming::Single,
            gap_color: GapColor::Black,
        }
    }

    /// Layout used by the snake simulator.
    pub fn snake() -> Self {
        Self {
            storage_dir: PathBuf::from("snake"),
            export_dir: PathBuf::from("snake_bmps"),
            naming: StripNaming::PerSlot,
            gap_color: GapColor::Red,
        }
    }

    /// Re-root both directories under `root`.
    pub fn rooted_at(mut self, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        self.storage_dir = root.join(&self.storage_dir);
        self.export_dir = root.join(&self.export_dir);
        self
    }
}

/// Strip surrounding whitespace and a trailing `.json` from a user-supplied name.
pub fn normalize_base_name(name: &str) -> &str {
    let name = name.trim();
    name.strip_suffix(".json").unwrap_or(name)
}

/// Configuration validation errors.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Frame rate must be non-zero")]
    InvalidFrameRate,
    #[error("Invalid slot layout: {frames_per_slot} frames x {max_slots} slots")]
    InvalidSlots {
        frames_per_slot: usize,
        max_slots: usize,
    },
    #[error("Frame cap {max_frames} exceeds slot capacity {capacity}")]
    BudgetExceedsSlots { max_frames: usize, capacity: usize },
    #[error("Initial snake must have at least one segment")]
    EmptySnake,
    #[error("Initial snake segment ({x}, {y}) lies outside the board")]
    SnakeOutOfBoard { x: i32, y: i32 },
    #[error("Initial snake occupies ({x}, {y}) twice")]
    SnakeOverlaps { x: i32, y: i32 },
}

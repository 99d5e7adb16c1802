//! JSON + BMP persistence of animations.

use std::fs;
use std::path::PathBuf;

use image::ImageFormat;

use super::StripError;
use super::format::{decode_slots_json, encode_slots_json, encode_strip};
use crate::frame::FrameSequence;
use crate::schema::{StorageConfig, StripNaming};

/// Reads and writes animations according to a [`StorageConfig`].
///
/// Usage:
/// ```ignore
/// let store = AnimationStore::new(StorageConfig::editor());
/// let sequence = store.load_sequence("intro")?.unwrap_or_default();
/// store.save_sequence("intro", &sequence)?;
/// ```
#[derive(Debug, Clone)]
pub struct AnimationStore {
    config: StorageConfig,
}

impl AnimationStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Location of the JSON file for `base`.
    pub fn json_path(&self, base: &str) -> PathBuf {
        self.config.storage_dir.join(format!("{base}.json"))
    }

    /// Location of the strip exported for slot `slot`.
    pub fn strip_path(&self, base: &str, slot: usize) -> PathBuf {
        let file = match self.config.naming {
            StripNaming::Single => format!("{base}.bmp"),
            StripNaming::PerSlot => format!("{base}_{slot}.bmp"),
        };
        self.config.export_dir.join(file)
    }

    /// Whether a JSON file exists for `base`.
    pub fn exists(&self, base: &str) -> bool {
        self.json_path(base).is_file()
    }

    /// Load all slots, or `None` when nothing is stored under `base`.
    pub fn load(&self, base: &str) -> Result<Option<Vec<FrameSequence>>, StripError> {
        let path = self.json_path(base);
        if !path.is_file() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        let slots = decode_slots_json(&bytes)?;
        log::info!("Loaded {} slot(s) from {}", slots.len(), path.display());
        Ok(Some(slots))
    }

    /// Load the first slot, or `None` when nothing is stored under `base`.
    pub fn load_sequence(&self, base: &str) -> Result<Option<FrameSequence>, StripError> {
        let Some(mut slots) = self.load(base)? else {
            return Ok(None);
        };
        if slots.is_empty() {
            return Err(StripError::NoSlots);
        }
        if slots.len() > 1 {
            log::warn!(
                "{} holds {} slots, only the first is loaded",
                base,
                slots.len()
            );
        }
        Ok(Some(slots.swap_remove(0)))
    }

    /// Write the JSON file and the BMP strip(s). Returns the strip paths.
    pub fn save(&self, base: &str, slots: &[FrameSequence]) -> Result<Vec<PathBuf>, StripError> {
        if slots.is_empty() {
            return Err(StripError::NoSlots);
        }

        fs::create_dir_all(&self.config.storage_dir)?;
        fs::create_dir_all(&self.config.export_dir)?;

        let exported = match self.config.naming {
            StripNaming::Single => {
                if slots.len() > 1 {
                    log::warn!(
                        "Single-strip export keeps only the first of {} slots",
                        slots.len()
                    );
                }
                &slots[..1]
            }
            StripNaming::PerSlot => slots,
        };

        let mut paths = Vec::with_capacity(exported.len());
        for (index, slot) in exported.iter().enumerate() {
            let path = self.strip_path(base, index);
            encode_strip(slot, self.config.gap_color).save_with_format(&path, ImageFormat::Bmp)?;
            log::debug!("Wrote {} frames to {}", slot.len(), path.display());
            paths.push(path);
        }

        let json_path = self.json_path(base);
        fs::write(&json_path, encode_slots_json(slots)?)?;
        log::info!("Saved {} slot(s) to {}", slots.len(), json_path.display());

        Ok(paths)
    }

    /// Save a single sequence as a one-slot animation.
    pub fn save_sequence(
        &self,
        base: &str,
        sequence: &FrameSequence,
    ) -> Result<Vec<PathBuf>, StripError> {
        self.save(base, std::slice::from_ref(sequence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::GapColor;
    use tempfile::tempdir;

    #[test]
    fn test_paths() {
        let store = AnimationStore::new(StorageConfig::snake());
        assert_eq!(store.json_path("run"), PathBuf::from("snake/run.json"));
        assert_eq!(store.strip_path("run", 2), PathBuf::from("snake_bmps/run_2.bmp"));

        let store = AnimationStore::new(StorageConfig::editor());
        assert_eq!(store.strip_path("intro", 0), PathBuf::from("./intro.bmp"));
    }

    #[test]
    fn test_load_missing_returns_none() {
        let dir = tempdir().unwrap();
        let store = AnimationStore::new(StorageConfig::editor().rooted_at(dir.path()));
        assert!(!store.exists("nothing"));
        assert!(store.load("nothing").unwrap().is_none());
        assert!(store.load_sequence("nothing").unwrap().is_none());
    }

    #[test]
    fn test_save_creates_directories_and_strips() {
        let dir = tempdir().unwrap();
        let store = AnimationStore::new(StorageConfig::snake().rooted_at(dir.path()));

        let mut first = FrameSequence::new();
        first.push_blank();
        let second = FrameSequence::new();
        let paths = store.save("run", &[first, second]).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.is_file()));
        assert!(store.exists("run"));

        let strip = image::open(&paths[0]).unwrap().into_rgb8();
        assert_eq!(strip.dimensions(), (96, 11));
        assert_eq!(strip.get_pixel(45, 0).0, GapColor::Red.rgb());
    }

    #[test]
    fn test_save_then_load_sequence() {
        let dir = tempdir().unwrap();
        let store = AnimationStore::new(StorageConfig::editor().rooted_at(dir.path()));

        let mut sequence = FrameSequence::new();
        sequence.current_frame_mut().set(10, 3, true).unwrap();
        sequence.insert_blank_after_current();
        store.save_sequence("intro", &sequence).unwrap();

        let loaded = store.load_sequence("intro").unwrap().unwrap();
        assert_eq!(loaded.frames(), sequence.frames());
        assert_eq!(loaded.current_index(), 0);
    }

    #[test]
    fn test_save_without_slots_fails() {
        let dir = tempdir().unwrap();
        let store = AnimationStore::new(StorageConfig::editor().rooted_at(dir.path()));
        assert!(matches!(store.save("x", &[]), Err(StripError::NoSlots)));
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempdir().unwrap();
        let store = AnimationStore::new(StorageConfig::editor().rooted_at(dir.path()));
        fs::create_dir_all(&store.config().storage_dir).unwrap();
        fs::write(store.json_path("bad"), b"{not json").unwrap();
        assert!(matches!(store.load("bad"), Err(StripError::Json(_))));
    }
}

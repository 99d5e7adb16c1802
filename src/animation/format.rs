//! Strip and JSON encodings of frame sequences.

use image::{Rgb, RgbImage};
use serde::Deserialize;

use super::StripError;
use crate::frame::{FRAME_HEIGHT, FRAME_WIDTH, FrameSequence};
use crate::schema::GapColor;

/// Width of the separator after every frame.
pub const GAP_WIDTH: usize = 4;

/// Horizontal distance between frame origins in a strip.
pub const FRAME_STRIDE: usize = FRAME_WIDTH + GAP_WIDTH;

pub const ON_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
pub const OFF_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Pixel size of a strip holding `frame_count` frames.
pub fn strip_dimensions(frame_count: usize) -> (u32, u32) {
    ((FRAME_STRIDE * frame_count) as u32, FRAME_HEIGHT as u32)
}

/// Lay the frames of a sequence side by side into one image.
pub fn encode_strip(sequence: &FrameSequence, gap: GapColor) -> RgbImage {
    let (width, height) = strip_dimensions(sequence.len());
    let mut image = RgbImage::from_pixel(width, height, OFF_COLOR);
    let gap = Rgb(gap.rgb());

    for (k, frame) in sequence.frames().iter().enumerate() {
        let origin = k * FRAME_STRIDE;
        for (x, y) in frame.lit_pixels() {
            image.put_pixel((origin + x) as u32, y as u32, ON_COLOR);
        }
        for x in origin + FRAME_WIDTH..origin + FRAME_STRIDE {
            for y in 0..FRAME_HEIGHT {
                image.put_pixel(x as u32, y as u32, gap);
            }
        }
    }

    image
}

/// Serialize one sequence as nested boolean arrays.
pub fn encode_sequence_json(sequence: &FrameSequence) -> Result<Vec<u8>, StripError> {
    Ok(serde_json::to_vec(sequence)?)
}

/// Parse one sequence from nested boolean arrays. The cursor starts at 0.
pub fn decode_sequence_json(bytes: &[u8]) -> Result<FrameSequence, StripError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Serialize a list of slots.
pub fn encode_slots_json(slots: &[FrameSequence]) -> Result<Vec<u8>, StripError> {
    Ok(serde_json::to_vec(slots)?)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredAnimation {
    Slots(Vec<FrameSequence>),
    Legacy(FrameSequence),
}

/// Parse a list of slots, also accepting a bare frame list as one slot.
pub fn decode_slots_json(bytes: &[u8]) -> Result<Vec<FrameSequence>, StripError> {
    match serde_json::from_slice(bytes)? {
        StoredAnimation::Slots(slots) => Ok(slots),
        StoredAnimation::Legacy(sequence) => {
            log::warn!("Loaded animation without slot level, treating it as one slot");
            Ok(vec![sequence])
        }
    }
}

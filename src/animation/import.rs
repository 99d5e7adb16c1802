//! Importing arbitrary images as a single frame.

use std::path::Path;

use image::imageops::{self, BiLevel, FilterType};
use image::{GrayImage, RgbImage};

use super::StripError;
use crate::frame::{FRAME_HEIGHT, FRAME_WIDTH};

/// Scale an RGB image to the display size and reduce it to pure black/white.
///
/// Uses Floyd-Steinberg dithering, so every output sample is 0 or 255.
pub fn binarize(rgb: &RgbImage) -> GrayImage {
    let resized = imageops::resize(
        rgb,
        FRAME_WIDTH as u32,
        FRAME_HEIGHT as u32,
        FilterType::CatmullRom,
    );
    let mut gray = imageops::grayscale(&resized);
    imageops::dither(&mut gray, &BiLevel);
    gray
}

/// Open an image file and turn it into 44x11 binarized samples.
pub fn load_frame_samples<P: AsRef<Path>>(path: P) -> Result<GrayImage, StripError> {
    let path = path.as_ref();
    let rgb = image::open(path)?.into_rgb8();
    log::debug!(
        "Importing {} ({}x{})",
        path.display(),
        rgb.width(),
        rgb.height()
    );
    Ok(binarize(&rgb))
}

//! Brightness and contrast adjustment.
//!
//! Both controls run 10–200 with 100 meaning "unchanged". Each RGB channel
//! value `v` goes through:
//!
//! ```text
//! v1 = v * brightness / 100
//! v2 = (v1 - 128) * contrast / 100 + 128
//! out = round(clamp(v2, 0, 255))
//! ```
//!
//! Alpha is never touched. Because the map depends only on the input value,
//! it is computed once into a 256-entry table and applied to every pixel.

use image::RgbaImage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::codec::{ImageCodec, StandardCodec};
use super::rotation::Rotation;
use crate::error::Result;

/// Value of either control that leaves pixels unchanged.
pub const NEUTRAL_LEVEL: u16 = 100;
pub const MIN_LEVEL: u16 = 10;
pub const MAX_LEVEL: u16 = 200;

/// Clamp a slider value into `MIN_LEVEL..=MAX_LEVEL`.
pub fn clamp_level(level: u16) -> u16 {
    level.clamp(MIN_LEVEL, MAX_LEVEL)
}

/// Current editor controls for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentState {
    pub brightness: u16,
    pub contrast: u16,
    pub rotation: Rotation,
}

impl Default for AdjustmentState {
    fn default() -> Self {
        Self {
            brightness: NEUTRAL_LEVEL,
            contrast: NEUTRAL_LEVEL,
            rotation: Rotation::Deg0,
        }
    }
}

impl AdjustmentState {
    /// True when brightness and contrast both sit at 100.
    pub fn is_neutral_tone(&self) -> bool {
        self.brightness == NEUTRAL_LEVEL && self.contrast == NEUTRAL_LEVEL
    }
}

/// Build the per-value lookup table for a brightness/contrast pair.
pub fn tone_table(brightness: u16, contrast: u16) -> [u8; 256] {
    let contrast = clamp_level(contrast);
    let brightness_ratio = clamp_level(brightness) as f32 / 100.0;
    let contrast_gain = contrast as f32 / 100.0;

    let mut table = [0u8; 256];
    for (v, out) in table.iter_mut().enumerate() {
        let v1 = v as f32 * brightness_ratio;
        let v2 = if contrast == NEUTRAL_LEVEL {
            v1
        } else {
            ((v1 - 128.0) * contrast_gain + 128.0).clamp(0.0, 255.0)
        };
        *out = v2.round().clamp(0.0, 255.0) as u8;
    }
    table
}

/// Apply brightness/contrast to RGBA pixels in place. Alpha is untouched.
pub fn adjust_pixels(pixels: &mut RgbaImage, brightness: u16, contrast: u16) {
    let table = tone_table(brightness, contrast);
    pixels.par_chunks_mut(4).for_each(|px| {
        px[0] = table[px[0] as usize];
        px[1] = table[px[1] as usize];
        px[2] = table[px[2] as usize];
    });
}

/// Adjust encoded image bytes, re-encoding in the same format.
///
/// `brightness == contrast == 100` returns the input bytes unchanged (after
/// checking they decode).
pub fn adjust(bytes: &[u8], brightness: u16, contrast: u16) -> Result<Vec<u8>> {
    adjust_with(&StandardCodec, bytes, brightness, contrast)
}

/// [`adjust`] with an explicit codec.
pub fn adjust_with(
    codec: &dyn ImageCodec,
    bytes: &[u8],
    brightness: u16,
    contrast: u16,
) -> Result<Vec<u8>> {
    let mut decoded = codec.decode(bytes)?;
    let brightness = clamp_level(brightness);
    let contrast = clamp_level(contrast);
    if brightness == NEUTRAL_LEVEL && contrast == NEUTRAL_LEVEL {
        return Ok(bytes.to_vec());
    }

    log::debug!(
        "[photo] Adjusting {}x{} image: brightness={} contrast={}",
        decoded.width(),
        decoded.height(),
        brightness,
        contrast
    );
    adjust_pixels(&mut decoded.pixels, brightness, contrast);
    codec.encode(&decoded)
}

//! Letterbox-aware, rotation-aware cropping.
//!
//! The user draws the crop box over a preview that aspect-fits the source
//! image into its container. The box is mapped back onto source pixels, the
//! region is cut out, and any pending rotation is applied to the result:
//!
//! ```text
//! display rect ──(minus letterbox offset, times source/displayed scale)──▶ source rect
//! source rect ──(crop)──▶ region ──(rotate about its centre)──▶ output
//! ```
//!
//! For 90° and 270° the output's width and height are the region's height and
//! width.

use image::{RgbaImage, imageops};
use serde::{Deserialize, Serialize};

use super::codec::{ImageCodec, StandardCodec};
use super::rotation::Rotation;
use crate::error::{FolioError, Result};
use crate::geometry::{CropRect, PixelRect, Size, fit_contain};

/// A crop as drawn in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRequest {
    /// Crop box in display space.
    pub rect: CropRect,
    /// Rendered size of the preview container.
    pub display: Size,
    /// Pending rotation, applied to the cropped region.
    #[serde(default)]
    pub rotation: Rotation,
}

impl CropRequest {
    pub fn new(rect: CropRect, display: Size) -> Self {
        Self {
            rect,
            display,
            rotation: Rotation::Deg0,
        }
    }

    pub fn rotated(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Source pixels covered by the crop box in an image of `width × height`.
    pub fn source_region(&self, width: u32, height: u32) -> PixelRect {
        let letterbox = fit_contain(Size::new(width as f32, height as f32), self.display);
        let source = letterbox.display_to_source(&self.rect);
        PixelRect::from_source_rect(&source, width, height)
    }
}

/// Crop (and rotate) decoded pixels.
pub fn crop_pixels(pixels: &RgbaImage, request: &CropRequest) -> Result<RgbaImage> {
    let region = request.source_region(pixels.width(), pixels.height());
    if region.is_empty() {
        return Err(FolioError::DegenerateCrop {
            width: region.width,
            height: region.height,
        });
    }

    log::debug!(
        "[photo] Crop {:?} in {}x{} display -> source {}x{}+{}+{}, rotation {}",
        request.rect,
        request.display.width,
        request.display.height,
        region.width,
        region.height,
        region.x,
        region.y,
        request.rotation.degrees()
    );

    let cropped = imageops::crop_imm(pixels, region.x, region.y, region.width, region.height).to_image();
    Ok(request.rotation.apply(&cropped))
}

/// Crop encoded image bytes, re-encoding in the same format.
pub fn crop(bytes: &[u8], request: &CropRequest) -> Result<Vec<u8>> {
    crop_with(&StandardCodec, bytes, request)
}

/// [`crop`] with an explicit codec.
pub fn crop_with(codec: &dyn ImageCodec, bytes: &[u8], request: &CropRequest) -> Result<Vec<u8>> {
    let decoded = codec.decode(bytes)?;
    let cropped = crop_pixels(&decoded.pixels, request)?;
    codec.encode(&decoded.with_pixels(cropped))
}

//! Editing state for one image.
//!
//! A session keeps the original decoded image and a working *base*: the
//! original, or the result of the last crop. Brightness and contrast are
//! always recomputed from the base, never stacked on a previous preview, so
//! moving a slider back to 100 really restores the base.
//!
//! Rotation is a preview accumulator. It is burned into the pixels only when
//! a crop is applied (and then resets to 0) or when the session renders its
//! final bytes.

use image::RgbaImage;

use super::adjust::{AdjustmentState, adjust_pixels, clamp_level};
use super::codec::{DecodedImage, ImageCodec, StandardCodec};
use super::crop::{CropRequest, crop_pixels};
use super::store::ImageStore;
use crate::document::{Canvas, ImageRef, ItemId};
use crate::error::{FolioError, Result};
use crate::geometry::{CropRect, Size};

pub struct ImageEditSession<C: ImageCodec = StandardCodec> {
    codec: C,
    original_bytes: Vec<u8>,
    original: DecodedImage,
    base: DecodedImage,
    cropped: bool,
    state: AdjustmentState,
    committed: Option<ImageRef>,
}

impl ImageEditSession<StandardCodec> {
    /// Start editing encoded image bytes.
    pub fn open(bytes: Vec<u8>) -> Result<Self> {
        Self::with_codec(StandardCodec, bytes)
    }
}

impl<C: ImageCodec> ImageEditSession<C> {
    /// Start editing with a specific codec. Fails if the bytes do not decode.
    pub fn with_codec(codec: C, bytes: Vec<u8>) -> Result<Self> {
        let original = codec.decode(&bytes)?;
        log::debug!(
            "[photo] Opened {}x{} {:?} for editing",
            original.width(),
            original.height(),
            original.format
        );
        Ok(Self {
            codec,
            original_bytes: bytes,
            base: original.clone(),
            original,
            cropped: false,
            state: AdjustmentState::default(),
            committed: None,
        })
    }

    pub fn state(&self) -> AdjustmentState {
        self.state
    }

    /// Size of the working base in source pixels.
    pub fn base_size(&self) -> (u32, u32) {
        (self.base.width(), self.base.height())
    }

    /// Reference written by the last successful [`commit`](Self::commit).
    pub fn committed(&self) -> Option<&ImageRef> {
        self.committed.as_ref()
    }

    pub fn rotate_cw(&mut self) {
        self.state.rotation = self.state.rotation.rotate_cw();
    }

    pub fn rotate_ccw(&mut self) {
        self.state.rotation = self.state.rotation.rotate_ccw();
    }

    pub fn set_brightness(&mut self, level: u16) {
        self.state.brightness = clamp_level(level);
    }

    pub fn set_contrast(&mut self, level: u16) {
        self.state.contrast = clamp_level(level);
    }

    /// Base pixels with the current adjustments, unrotated.
    ///
    /// The editor shows rotation as a view transform over this buffer.
    pub fn preview(&self) -> RgbaImage {
        let mut pixels = self.base.pixels.clone();
        if !self.state.is_neutral_tone() {
            adjust_pixels(&mut pixels, self.state.brightness, self.state.contrast);
        }
        pixels
    }

    /// Crop the base using a box drawn over a `display`-sized preview.
    ///
    /// The pending rotation is applied to the cropped region and then reset.
    /// On failure the session is left as it was.
    pub fn apply_crop(&mut self, rect: CropRect, display: Size) -> Result<()> {
        let request = CropRequest::new(rect, display).rotated(self.state.rotation);
        let pixels = crop_pixels(&self.base.pixels, &request)?;
        self.base = self.base.with_pixels(pixels);
        self.cropped = true;
        self.state.rotation = Default::default();
        Ok(())
    }

    /// Back to the original image with neutral controls.
    pub fn reset(&mut self) {
        self.base = self.original.clone();
        self.cropped = false;
        self.state = AdjustmentState::default();
    }

    /// Encoded bytes of the edited image.
    ///
    /// An untouched session returns the original bytes.
    pub fn render(&self) -> Result<Vec<u8>> {
        let rotation = self.state.rotation;
        if !self.cropped && self.state.is_neutral_tone() && rotation == Default::default() {
            return Ok(self.original_bytes.clone());
        }
        let pixels = rotation.apply(&self.preview());
        self.codec.encode(&self.base.with_pixels(pixels))
    }

    /// Store the rendered image and point `item` at it.
    ///
    /// The item must exist and carry an image source. Nothing on the canvas
    /// changes unless the store write succeeds.
    pub fn commit(
        &mut self,
        store: &mut dyn ImageStore,
        canvas: &mut Canvas,
        item: ItemId,
    ) -> Result<ImageRef> {
        match canvas.get(item) {
            Some(existing) if existing.kind.has_image_source() => {}
            _ => return Err(FolioError::UnknownItem(item)),
        }

        let bytes = self.render()?;
        let source = store.put(bytes)?;
        canvas.set_image_source(item, source.clone());
        log::info!("[photo] Committed {} to {}", source, item);
        self.committed = Some(source.clone());
        Ok(source)
    }
}

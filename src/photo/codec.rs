//! Image decode/encode boundary.
//!
//! The photo engine works on RGBA8 buffers and is codec-agnostic: anything
//! that decodes to RGBA and encodes back with the same dimensions and channel
//! order can implement [`ImageCodec`].

use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;

use crate::error::{FolioError, Result};

/// A decoded image plus the container format it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub pixels: RgbaImage,
    pub format: ImageFormat,
}

impl DecodedImage {
    pub fn new(pixels: RgbaImage, format: ImageFormat) -> Self {
        Self { pixels, format }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Same format, different pixels.
    pub fn with_pixels(&self, pixels: RgbaImage) -> Self {
        Self {
            pixels,
            format: self.format,
        }
    }
}

/// Decode bytes into pixels and encode them back.
pub trait ImageCodec: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage>;
    fn encode(&self, image: &DecodedImage) -> Result<Vec<u8>>;
}

/// Codec backed by the `image` crate. Output keeps the input's format.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCodec;

impl ImageCodec for StandardCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage> {
        let format = image::guess_format(bytes)
            .map_err(|e| FolioError::Decode(format!("Unrecognized image format: {}", e)))?;
        let img = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| FolioError::Decode(format!("Failed to decode image: {}", e)))?;
        Ok(DecodedImage::new(img.to_rgba8(), format))
    }

    fn encode(&self, image: &DecodedImage) -> Result<Vec<u8>> {
        let rgba = DynamicImage::ImageRgba8(image.pixels.clone());
        // JPEG has no alpha channel
        let out_image = match image.format {
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(rgba.to_rgb8()),
            _ => rgba,
        };

        let mut bytes: Vec<u8> = Vec::new();
        out_image
            .write_to(&mut Cursor::new(&mut bytes), image.format)
            .map_err(|e| FolioError::Encode(format!("Failed to encode {:?}: {}", image.format, e)))?;
        Ok(bytes)
    }
}

/// Encode RGBA pixels as PNG.
pub fn encode_png(pixels: &RgbaImage) -> Result<Vec<u8>> {
    StandardCodec.encode(&DecodedImage::new(pixels.clone(), ImageFormat::Png))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_png_roundtrip_preserves_pixels() {
        let mut img = RgbaImage::new(7, 3);
        img.put_pixel(2, 1, Rgba([10, 20, 30, 40]));
        let bytes = encode_png(&img).unwrap();

        let decoded = StandardCodec.decode(&bytes).unwrap();
        assert_eq!(decoded.format, ImageFormat::Png);
        assert_eq!(decoded.pixels, img);
    }

    #[test]
    fn test_jpeg_encodes_without_alpha() {
        let img = RgbaImage::from_pixel(16, 8, Rgba([200, 100, 50, 255]));
        let bytes = StandardCodec
            .encode(&DecodedImage::new(img, ImageFormat::Jpeg))
            .unwrap();
        let decoded = StandardCodec.decode(&bytes).unwrap();
        assert_eq!(decoded.format, ImageFormat::Jpeg);
        assert_eq!((decoded.width(), decoded.height()), (16, 8));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let result = StandardCodec.decode(b"definitely not an image");
        assert!(matches!(result, Err(FolioError::Decode(_))));
    }
}

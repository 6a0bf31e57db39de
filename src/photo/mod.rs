//! # Photo Engine
//!
//! Pixel operations on encoded source images: crop, rotate and
//! brightness/contrast. Every operation decodes to RGBA8, works on the
//! buffer and re-encodes in the input's format.
//!
//! | Operation | Entry point | Notes |
//! |-----------|-------------|-------|
//! | Crop | [`crop`] | letterbox-aware, applies pending rotation |
//! | Adjust | [`adjust`] | 100/100 returns the input untouched |
//! | Rotate | [`Rotation`] | 90° steps, burned in by crop or render |
//! | Edit | [`ImageEditSession`] | base + controls, commit to an [`ImageStore`] |
//!
//! ## Example
//!
//! ```
//! use folio::photo::{adjust, encode_png};
//! use image::{Rgba, RgbaImage};
//!
//! let png = encode_png(&RgbaImage::from_pixel(4, 4, Rgba([200, 100, 50, 255])))?;
//! let darker = adjust(&png, 50, 100)?;
//! let img = image::load_from_memory(&darker).unwrap().to_rgba8();
//! assert_eq!(img.get_pixel(0, 0), &Rgba([100, 50, 25, 255]));
//! # Ok::<(), folio::FolioError>(())
//! ```

pub mod adjust;
pub mod codec;
pub mod crop;
pub mod rotation;
pub mod session;
pub mod store;
pub mod worker;

pub use adjust::{AdjustmentState, MAX_LEVEL, MIN_LEVEL, NEUTRAL_LEVEL, adjust, adjust_pixels, adjust_with};
pub use codec::{DecodedImage, ImageCodec, StandardCodec, encode_png};
pub use crop::{CropRequest, crop, crop_pixels, crop_with};
pub use rotation::Rotation;
pub use session::ImageEditSession;
pub use store::{DirImageStore, ImageStore, MemoryImageStore};
pub use worker::{spawn_adjust, spawn_crop};

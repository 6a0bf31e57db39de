//! Quarter-turn rotation accumulator.

use image::{RgbaImage, imageops};
use serde::{Deserialize, Serialize};

use crate::error::FolioError;
use crate::geometry::Size;

/// Clockwise rotation in 90° steps.
///
/// ```
/// use folio::photo::Rotation;
///
/// let r = Rotation::default().rotate_ccw();
/// assert_eq!(r.degrees(), 270);
/// assert_eq!(r.rotate_cw(), Rotation::Deg0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Only 0, 90, 180 and 270 are valid.
    pub fn from_degrees(degrees: i32) -> Result<Self, FolioError> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(FolioError::InvalidRotation(other)),
        }
    }

    /// `(current + delta + 360) mod 360` for a ±90 step.
    fn step(self, delta: i32) -> Self {
        match (self.degrees() + delta + 360) % 360 {
            90 => Rotation::Deg90,
            180 => Rotation::Deg180,
            270 => Rotation::Deg270,
            _ => Rotation::Deg0,
        }
    }

    pub fn rotate_cw(self) -> Self {
        self.step(90)
    }

    pub fn rotate_ccw(self) -> Self {
        self.step(-90)
    }

    /// Quarter and three-quarter turns exchange width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Output size of a `size` region after this rotation.
    pub fn rotated_size(self, size: Size) -> Size {
        if self.swaps_axes() { size.swapped() } else { size }
    }

    /// Rotate pixels clockwise by this amount.
    pub fn apply(self, pixels: &RgbaImage) -> RgbaImage {
        match self {
            Rotation::Deg0 => pixels.clone(),
            Rotation::Deg90 => imageops::rotate90(pixels),
            Rotation::Deg180 => imageops::rotate180(pixels),
            Rotation::Deg270 => imageops::rotate270(pixels),
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = FolioError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Rotation::from_degrees(degrees)
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

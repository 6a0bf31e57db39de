//! # Geometry
//!
//! Rectangle and point math shared by the item model, the layout engine and
//! the photo engine.
//!
//! ## Coordinate spaces
//!
//! ```text
//! display space: the preview container the user drags a crop box in
//! ┌──────────────────────────────┐
//! │        offset.y (letterbox)  │
//! ├──────────────────────────────┤ ─┐
//! │                              │  │ displayed.height
//! │     image, aspect-fitted     │  │
//! ├──────────────────────────────┤ ─┘
//! │                              │
//! └──────────────────────────────┘
//! source space: the image's native pixel grid, 0..src_w × 0..src_h
//! ```
//!
//! [`fit_contain`] computes the letterbox; [`Letterbox::display_to_source`]
//! maps a display-space rectangle onto source pixels.

use serde::{Deserialize, Serialize};

/// A point in document or display units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height. Zero height yields 0 rather than infinity.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            0.0
        }
    }

    /// Same size with the axes exchanged (quarter-turn rotation).
    pub fn swapped(&self) -> Self {
        Self::new(self.height, self.width)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// True when `other` lies entirely inside `self` (edges inclusive).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Smallest side a crop box may have in display space.
pub const MIN_CROP_SIDE: f32 = 50.0;

/// A crop selection in display space.
pub type CropRect = Rect;

/// Constrain a crop box the way the editor does while dragging: at least
/// [`MIN_CROP_SIDE`] on each side and fully inside `bounds`.
///
/// When `bounds` itself is smaller than the minimum the box collapses to
/// `bounds`.
pub fn constrain_crop(rect: CropRect, bounds: Rect) -> CropRect {
    let width = rect.width.max(MIN_CROP_SIDE).min(bounds.width);
    let height = rect.height.max(MIN_CROP_SIDE).min(bounds.height);
    let x = rect.x.clamp(bounds.x, bounds.right() - width);
    let y = rect.y.clamp(bounds.y, bounds.bottom() - height);
    Rect::new(x, y, width, height)
}

/// Result of aspect-fitting ("contain") a source image into a container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    /// Intrinsic source dimensions in pixels.
    pub source: Size,
    /// Size the image is drawn at inside the container.
    pub displayed: Size,
    /// Top-left of the drawn image inside the container.
    pub offset: Point,
}

/// Fit `source` inside `container` preserving its aspect ratio.
///
/// Wider-than-container images are letterboxed top/bottom, everything else
/// left/right.
pub fn fit_contain(source: Size, container: Size) -> Letterbox {
    if source.is_empty() || container.is_empty() {
        return Letterbox {
            source,
            displayed: Size::default(),
            offset: Point::default(),
        };
    }

    let img_ratio = source.aspect_ratio();
    let container_ratio = container.aspect_ratio();

    let (displayed, offset) = if img_ratio > container_ratio {
        let displayed_h = container.width / img_ratio;
        (
            Size::new(container.width, displayed_h),
            Point::new(0.0, (container.height - displayed_h) / 2.0),
        )
    } else {
        let displayed_w = container.height * img_ratio;
        (
            Size::new(displayed_w, container.height),
            Point::new((container.width - displayed_w) / 2.0, 0.0),
        )
    };

    Letterbox {
        source,
        displayed,
        offset,
    }
}

impl Letterbox {
    /// Source pixels per display unit along each axis.
    pub fn scale(&self) -> (f32, f32) {
        if self.displayed.is_empty() {
            return (0.0, 0.0);
        }
        (
            self.source.width / self.displayed.width,
            self.source.height / self.displayed.height,
        )
    }

    /// Where the image is actually drawn, in display space.
    pub fn image_bounds(&self) -> Rect {
        Rect::from_origin_size(self.offset, self.displayed)
    }

    /// Map a display-space rectangle onto the source pixel grid.
    ///
    /// Both edges are clamped into `[0, src_w] × [0, src_h]`, so the result is
    /// always contained in the source image even when the box overlaps the
    /// letterbox bars.
    pub fn display_to_source(&self, rect: &Rect) -> Rect {
        let (scale_x, scale_y) = self.scale();
        let src_w = self.source.width;
        let src_h = self.source.height;

        let left = ((rect.x - self.offset.x) * scale_x).clamp(0.0, src_w);
        let top = ((rect.y - self.offset.y) * scale_y).clamp(0.0, src_h);
        let right = ((rect.right() - self.offset.x) * scale_x).clamp(0.0, src_w);
        let bottom = ((rect.bottom() - self.offset.y) * scale_y).clamp(0.0, src_h);

        Rect::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
    }
}

/// Slack allowed on pixel edges before snapping outward.
pub const PIXEL_EDGE_EPSILON: f32 = 1e-3;

/// Integer pixel rectangle inside an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Snap a source-space rectangle outward to whole pixels, staying inside
    /// a `bound_w × bound_h` image.
    ///
    /// The leading edge is floored and the trailing edge ceiled, so any
    /// rectangle with real area covers at least one pixel. Float noise up to
    /// [`PIXEL_EDGE_EPSILON`] is ignored on both edges.
    pub fn from_source_rect(rect: &Rect, bound_w: u32, bound_h: u32) -> Self {
        let x0 = ((rect.x + PIXEL_EDGE_EPSILON).floor().max(0.0) as u32).min(bound_w);
        let y0 = ((rect.y + PIXEL_EDGE_EPSILON).floor().max(0.0) as u32).min(bound_h);
        let x1 = ((rect.right() - PIXEL_EDGE_EPSILON).ceil().max(0.0) as u32).min(bound_w);
        let y1 = ((rect.bottom() - PIXEL_EDGE_EPSILON).ceil().max(0.0) as u32).min(bound_h);
        Self {
            x: x0,
            y: y0,
            width: x1.saturating_sub(x0),
            height: y1.saturating_sub(y0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_fit_wide_image_letterboxes_top_bottom() {
        // 2:1 image in a 400x400 box: drawn 400x200, 100 units of bar above and below
        let lb = fit_contain(Size::new(2000.0, 1000.0), Size::new(400.0, 400.0));
        assert!(approx(lb.displayed.width, 400.0));
        assert!(approx(lb.displayed.height, 200.0));
        assert!(approx(lb.offset.x, 0.0));
        assert!(approx(lb.offset.y, 100.0));
    }

    #[test]
    fn test_fit_tall_image_letterboxes_left_right() {
        let lb = fit_contain(Size::new(500.0, 1000.0), Size::new(400.0, 400.0));
        assert!(approx(lb.displayed.width, 200.0));
        assert!(approx(lb.displayed.height, 400.0));
        assert!(approx(lb.offset.x, 100.0));
        assert!(approx(lb.offset.y, 0.0));
    }

    #[test]
    fn test_full_preview_maps_to_full_source() {
        let lb = fit_contain(Size::new(1200.0, 800.0), Size::new(600.0, 600.0));
        let src = lb.display_to_source(&Rect::new(0.0, 0.0, 600.0, 600.0));
        assert!(approx(src.x, 0.0));
        assert!(approx(src.y, 0.0));
        assert!(approx(src.width, 1200.0));
        assert!(approx(src.height, 800.0));
    }

    #[test]
    fn test_inner_rect_scales() {
        // Exact fit, 2x scale
        let lb = fit_contain(Size::new(800.0, 600.0), Size::new(400.0, 300.0));
        let src = lb.display_to_source(&Rect::new(100.0, 50.0, 100.0, 100.0));
        assert!(approx(src.x, 200.0));
        assert!(approx(src.y, 100.0));
        assert!(approx(src.width, 200.0));
        assert!(approx(src.height, 200.0));
    }

    #[test]
    fn test_crop_containment_over_grid() {
        let sources = [(1920.0, 1080.0), (600.0, 900.0), (333.0, 333.0), (50.0, 4000.0)];
        let container = Size::new(640.0, 480.0);
        for &(w, h) in &sources {
            let lb = fit_contain(Size::new(w, h), container);
            let bounds = Rect::new(0.0, 0.0, container.width, container.height);
            let mut y = 0.0;
            while y < container.height {
                let mut x = 0.0;
                while x < container.width {
                    let rect = constrain_crop(Rect::new(x, y, 120.0, 90.0), bounds);
                    assert!(bounds.contains_rect(&rect));
                    let src = lb.display_to_source(&rect);
                    let contained = src.x >= 0.0
                        && src.y >= 0.0
                        && src.right() <= w + 1e-3
                        && src.bottom() <= h + 1e-3;
                    assert!(contained, "{:?} escapes {}x{}", src, w, h);
                    x += 37.0;
                }
                y += 41.0;
            }
        }
    }

    #[test]
    fn test_rect_in_letterbox_bar_collapses() {
        let lb = fit_contain(Size::new(2000.0, 1000.0), Size::new(400.0, 400.0));
        // Entirely inside the top bar
        let src = lb.display_to_source(&Rect::new(0.0, 0.0, 400.0, 60.0));
        assert_eq!(src.height, 0.0);
    }

    #[test]
    fn test_constrain_crop_enforces_minimum() {
        let bounds = Rect::new(0.0, 0.0, 300.0, 200.0);
        let r = constrain_crop(Rect::new(290.0, 190.0, 10.0, 10.0), bounds);
        assert_eq!(r, Rect::new(250.0, 150.0, 50.0, 50.0));
    }

    #[test]
    fn test_pixel_rect_rounding_stays_in_bounds() {
        let px = PixelRect::from_source_rect(&Rect::new(99.6, 0.2, 1.0, 49.9), 100, 50);
        assert_eq!(px, PixelRect { x: 99, y: 0, width: 1, height: 50 });
        assert!(!px.is_empty());
    }

    #[test]
    fn test_pixel_rect_snaps_outward() {
        let px = PixelRect::from_source_rect(&Rect::new(10.4, 20.6, 0.2, 0.3), 100, 100);
        assert_eq!(px, PixelRect { x: 10, y: 20, width: 1, height: 1 });
    }

    #[test]
    fn test_pixel_rect_ignores_float_noise() {
        let px = PixelRect::from_source_rect(&Rect::new(0.00002, 9.99998, 49.99997, 40.00003), 100, 100);
        assert_eq!(px, PixelRect { x: 0, y: 10, width: 50, height: 40 });
    }

    #[test]
    fn test_pixel_rect_zero_area_is_empty() {
        let px = PixelRect::from_source_rect(&Rect::new(42.0, 10.0, 0.0, 30.0), 100, 100);
        assert_eq!(px.width, 0);
        assert!(px.is_empty());
    }
}

//! # Wireframe Page Renderer
//!
//! Rasterises a page's items onto an RGBA bitmap the size of the page (one
//! pixel per document unit) and encodes it as PNG.
//!
//! ```text
//! items_for_page ──▶ WireframeRenderer ──▶ PageSnapshot { nodes, raster: PNG }
//!                        │
//!                        ├─ every item: tinted box + outline, in paint order
//!                        └─ Image/Logo: source from the ImageStore, fitted into its box
//! ```
//!
//! Text is not typeset; text items show as tinted boxes. An Image item whose
//! source cannot be loaded fails the whole page.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::document::{CanvasItem, ItemKind};
use crate::export::{PageRenderer, PageSnapshot, RenderError, RenderedItem, SnapshotNode};
use crate::geometry::{Rect, Size, fit_contain};
use crate::layout::PageBoundary;
use crate::photo::{ImageCodec, ImageStore, StandardCodec, encode_png};

const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);
const OUTLINE: Rgba<u8> = Rgba([60, 60, 60, 255]);
const PLACEHOLDER: Rgba<u8> = Rgba([180, 180, 180, 255]);

fn fill_for(kind: ItemKind) -> Rgba<u8> {
    match kind {
        ItemKind::Heading => Rgba([220, 230, 245, 255]),
        ItemKind::Text => Rgba([240, 240, 240, 255]),
        ItemKind::Image | ItemKind::Logo => Rgba([230, 230, 230, 255]),
        ItemKind::PropertyField | ItemKind::PropertyInfoBlock => Rgba([235, 245, 235, 255]),
        ItemKind::RoomLabel => Rgba([250, 240, 220, 255]),
        ItemKind::Disclaimer => Rgba([245, 225, 225, 255]),
    }
}

/// Page renderer that draws item boxes and images.
pub struct WireframeRenderer<'a> {
    store: &'a dyn ImageStore,
    width: u32,
    height: u32,
}

impl<'a> WireframeRenderer<'a> {
    pub fn new(store: &'a dyn ImageStore) -> Self {
        Self::with_boundary(store, &PageBoundary::LETTER_PORTRAIT)
    }

    pub fn with_boundary(store: &'a dyn ImageStore, boundary: &PageBoundary) -> Self {
        let size = boundary.page_size();
        Self {
            store,
            width: size.width.round().max(1.0) as u32,
            height: size.height.round().max(1.0) as u32,
        }
    }

    /// Draw the items onto a fresh page bitmap.
    pub fn rasterize(&self, items: &[&CanvasItem]) -> Result<RgbaImage, RenderError> {
        let mut page = RgbaImage::from_pixel(self.width, self.height, PAPER);
        for item in items {
            let bounds = Rect::from_origin_size(item.position, item.size);
            fill_rect(&mut page, &bounds, fill_for(item.kind));
            if item.kind.has_image_source() {
                self.draw_image(&mut page, item, &bounds)?;
            }
            stroke_rect(&mut page, &bounds, OUTLINE);
        }
        Ok(page)
    }

    fn draw_image(&self, page: &mut RgbaImage, item: &CanvasItem, bounds: &Rect) -> Result<(), RenderError> {
        let Some(source) = &item.image_source else {
            draw_cross(page, bounds, PLACEHOLDER);
            return Ok(());
        };

        let bytes = self.store.get(source)?;
        let decoded = StandardCodec.decode(&bytes)?;
        let letterbox = fit_contain(
            Size::new(decoded.width() as f32, decoded.height() as f32),
            Size::new(bounds.width, bounds.height),
        );
        let w = letterbox.displayed.width.round() as u32;
        let h = letterbox.displayed.height.round() as u32;
        if w == 0 || h == 0 {
            return Ok(());
        }

        let scaled = imageops::resize(&decoded.pixels, w, h, FilterType::Triangle);
        let x = (bounds.x + letterbox.offset.x).round() as i64;
        let y = (bounds.y + letterbox.offset.y).round() as i64;
        imageops::overlay(page, &scaled, x, y);
        Ok(())
    }
}

impl PageRenderer for WireframeRenderer<'_> {
    fn render_page(&mut self, page: u32, items: &[&CanvasItem]) -> Result<PageSnapshot, RenderError> {
        let bitmap = self.rasterize(items)?;
        let png = encode_png(&bitmap)?;
        log::debug!("[preview] Page {}: {} item(s), {} PNG bytes", page, items.len(), png.len());

        let nodes = items
            .iter()
            .map(|item| SnapshotNode::Item(RenderedItem::from(*item)))
            .collect();
        Ok(PageSnapshot {
            nodes,
            raster: Some(png),
        })
    }
}

/// Clip a document-space rect to pixel bounds `(x0, y0, x1, y1)`.
fn clip(page: &RgbaImage, rect: &Rect) -> Option<(u32, u32, u32, u32)> {
    let x0 = rect.x.round().max(0.0) as u32;
    let y0 = rect.y.round().max(0.0) as u32;
    let x1 = (rect.right().round().max(0.0) as u32).min(page.width());
    let y1 = (rect.bottom().round().max(0.0) as u32).min(page.height());
    (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
}

fn fill_rect(page: &mut RgbaImage, rect: &Rect, color: Rgba<u8>) {
    if let Some((x0, y0, x1, y1)) = clip(page, rect) {
        for y in y0..y1 {
            for x in x0..x1 {
                page.put_pixel(x, y, color);
            }
        }
    }
}

fn stroke_rect(page: &mut RgbaImage, rect: &Rect, color: Rgba<u8>) {
    if let Some((x0, y0, x1, y1)) = clip(page, rect) {
        for x in x0..x1 {
            page.put_pixel(x, y0, color);
            page.put_pixel(x, y1 - 1, color);
        }
        for y in y0..y1 {
            page.put_pixel(x0, y, color);
            page.put_pixel(x1 - 1, y, color);
        }
    }
}

/// Diagonals across an empty image slot.
fn draw_cross(page: &mut RgbaImage, rect: &Rect, color: Rgba<u8>) {
    let Some((x0, y0, x1, y1)) = clip(page, rect) else {
        return;
    };
    let w = (x1 - x0) as f32;
    let h = (y1 - y0) as f32;
    let steps = w.max(h) as u32;
    for i in 0..steps {
        let t = i as f32 / steps as f32;
        let x = x0 + (t * w) as u32;
        let y = y0 + (t * h) as u32;
        let y_rev = y1 - 1 - (t * h) as u32;
        if x < x1 {
            page.put_pixel(x, y.min(y1 - 1), color);
            page.put_pixel(x, y_rev, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Canvas, ImageRef, ItemContent, ItemDraft};
    use crate::geometry::Point;
    use crate::photo::MemoryImageStore;

    fn image_canvas(source: Option<ImageRef>) -> Canvas {
        let mut canvas = Canvas::new();
        let mut draft = ItemDraft::new(ItemKind::Image, ItemContent::Empty, Size::new(400.0, 300.0))
            .at(Point::new(50.0, 100.0));
        if let Some(source) = source {
            draft = draft.image(source);
        }
        canvas.insert(draft);
        canvas
    }

    #[test]
    fn test_page_is_page_sized_png() {
        let store = MemoryImageStore::new();
        let canvas = Canvas::new();
        let mut renderer = WireframeRenderer::new(&store);
        let snapshot = renderer.render_page(1, &canvas.items_for_page(1)).unwrap();

        let png = snapshot.raster.unwrap();
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!((img.width(), img.height()), (800, 1100));
    }

    #[test]
    fn test_image_is_fitted_into_box() {
        let mut store = MemoryImageStore::new();
        let red = encode_png(&RgbaImage::from_pixel(40, 30, Rgba([255, 0, 0, 255]))).unwrap();
        store.insert(ImageRef::new("red"), red);
        let canvas = image_canvas(Some(ImageRef::new("red")));

        let renderer = WireframeRenderer::new(&store);
        let page = renderer.rasterize(&canvas.items_for_page(1)).unwrap();
        assert_eq!(page.get_pixel(250, 250), &Rgba([255, 0, 0, 255]));
        assert_eq!(page.get_pixel(600, 250), &PAPER);
    }

    #[test]
    fn test_missing_image_fails_page() {
        let store = MemoryImageStore::new();
        let canvas = image_canvas(Some(ImageRef::new("gone")));
        let mut renderer = WireframeRenderer::new(&store);
        let err = renderer.render_page(1, &canvas.items_for_page(1)).unwrap_err();
        assert!(matches!(err, RenderError::MissingImage(_)));
    }

    #[test]
    fn test_unset_image_draws_placeholder() {
        let store = MemoryImageStore::new();
        let canvas = image_canvas(None);
        let renderer = WireframeRenderer::new(&store);
        assert!(renderer.rasterize(&canvas.items_for_page(1)).is_ok());
    }
}

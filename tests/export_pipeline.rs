//! Export runs over laid-out canvases.

use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;

use folio::document::{Canvas, CanvasItem, EditorSession, ImageRef, ItemContent, ItemKind};
use folio::export::{
    Exporter, PageRenderer, PageSnapshot, RenderError, RenderedItem, SnapshotNode, TreeRenderer,
};
use folio::geometry::Size;
use folio::layout::{ComposerConfig, LayoutEngine, RoomImage, RoomSection};
use folio::photo::{MemoryImageStore, encode_png};
use folio::preview::WireframeRenderer;

fn laid_out(images: usize) -> Canvas {
    let mut canvas = Canvas::new();
    let rooms = vec![RoomSection {
        room_id: "kitchen".into(),
        name: "Kitchen".into(),
        images: (0..images)
            .map(|i| RoomImage::new(ImageRef::new(format!("kitchen-{}.png", i))))
            .collect(),
    }];
    LayoutEngine::new(ComposerConfig::default()).generate(&mut canvas, &rooms);
    canvas
}

/// Records the canvas's active page as seen through each call.
struct Recording {
    seen: Vec<(u32, usize)>,
    cancel_after: Option<(u32, CancellationToken)>,
}

impl PageRenderer for Recording {
    fn render_page(&mut self, page: u32, items: &[&CanvasItem]) -> Result<PageSnapshot, RenderError> {
        self.seen.push((page, items.len()));
        if let Some((after, token)) = &self.cancel_after {
            if page == *after {
                token.cancel();
            }
        }
        Ok(PageSnapshot::from_nodes(
            items.iter().map(|item| SnapshotNode::Item(RenderedItem::from(*item))).collect(),
        ))
    }
}

#[test]
fn every_page_in_order_with_stamps() {
    let mut canvas = laid_out(5);
    let mut renderer = TreeRenderer::new();
    let doc = Exporter::default().render_document(&mut canvas, &mut renderer, None);

    let stamps: Vec<_> = doc.pages.iter().map(|p| p.stamp.clone()).collect();
    assert_eq!(stamps, vec!["Page 1 of 3", "Page 2 of 3", "Page 3 of 3"]);
    assert!(doc.is_complete());
}

#[test]
fn active_page_is_restored() {
    let mut canvas = laid_out(5);
    canvas.set_active_page(3);
    Exporter::default().render_document(&mut canvas, &mut TreeRenderer::new(), None);
    assert_eq!(canvas.active_page(), 3);
}

#[test]
fn missing_images_fail_only_their_pages() {
    let mut canvas = laid_out(5);
    let mut store = MemoryImageStore::new();
    let png = encode_png(&image::RgbaImage::new(40, 30)).unwrap();
    // Page 2 holds kitchen-1 and kitchen-2; leave kitchen-2 out
    for name in ["kitchen-0.png", "kitchen-1.png", "kitchen-3.png", "kitchen-4.png"] {
        store.insert(ImageRef::new(name), png.clone());
    }

    let mut renderer = WireframeRenderer::new(&store);
    let doc = Exporter::default().render_document(&mut canvas, &mut renderer, None);

    assert_eq!(doc.pages.iter().map(|p| p.page_number).collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(doc.failed_page_numbers(), vec![2]);
    assert!(doc.failed_pages[0].reason.contains("kitchen-2.png"));
    assert!(doc.pages.iter().all(|p| p.snapshot.raster.is_some()));
    assert_eq!(canvas.active_page(), 1);
}

#[test]
fn cancellation_keeps_finished_pages() {
    let mut canvas = laid_out(5);
    canvas.set_active_page(3);
    let token = CancellationToken::new();
    let mut renderer = Recording {
        seen: vec![],
        cancel_after: Some((2, token.clone())),
    };

    let doc = Exporter::default().render_document(&mut canvas, &mut renderer, Some(&token));

    assert!(doc.cancelled);
    assert_eq!(doc.pages.len(), 2);
    assert_eq!(renderer.seen.iter().map(|(page, _)| *page).collect::<Vec<_>>(), vec![1, 2]);
    // Mid-flight cancellation skips restoring the active page
    assert_eq!(canvas.active_page(), 2);
}

#[test]
fn affordances_never_reach_the_export() {
    let mut canvas = laid_out(1);
    let note = canvas.create(ItemKind::Text, ItemContent::text("Call to view"), Size::new(200.0, 60.0), Some(1));
    let mut session = EditorSession::new(canvas);
    assert!(session.begin_edit(note));

    let mut renderer = TreeRenderer::for_session(&session);
    let live = renderer
        .render_page(1, &session.canvas().items_for_page(1))
        .unwrap();
    assert!(live.affordance_count() > 0);

    let mut canvas = session.into_canvas();
    let doc = Exporter::default().render_document(&mut canvas, &mut renderer, None);
    let page = &doc.pages[0].snapshot;
    assert_eq!(page.affordance_count(), 0);
    assert!(page.items().any(|item| item.id == note));
    assert!(page.items().all(|item| !item.editable));
}

#[test]
fn canvas_file_with_zero_pages_still_exports() {
    let mut json = serde_json::to_value(laid_out(0)).unwrap();
    json["total_pages"] = 0.into();
    json["active_page"] = 0.into();
    let mut canvas: Canvas = serde_json::from_value(json).unwrap();

    let doc = Exporter::default().render_document(&mut canvas, &mut TreeRenderer::new(), None);
    assert_eq!(doc.pages.len(), 1);
    assert_eq!(doc.pages[0].stamp, "Page 1 of 1");
    assert_eq!(canvas.active_page(), 1);
}

//! # Export Pipeline
//!
//! Walks every page of a canvas, asks a [`PageRenderer`] for a snapshot of
//! the page's items, strips editor affordances and wraps the result in a
//! fixed page frame with a page stamp.
//!
//! ```text
//! for page in 1..=total_pages:
//!     canvas.active_page = page
//!     items_for_page(page) ──▶ PageRenderer ──▶ PageSnapshot
//!                                                  │ strip affordances
//!                                                  ▼
//!                              PageArtifact { frame 800×1100, "Page n of N" }
//! restore canvas.active_page
//! ```
//!
//! Pages render strictly in order, one at a time: a renderer may depend on
//! the active page. A failing page is logged and recorded, and the walk goes
//! on. Cancellation is checked between pages; pages already produced stay
//! valid.

mod snapshot;
mod tree;

pub use snapshot::{Affordance, AffordanceKind, PageSnapshot, RenderedItem, SnapshotNode};
pub use tree::TreeRenderer;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::document::{Canvas, CanvasItem, ImageRef};
use crate::error::FolioError;
use crate::geometry::Size;
use crate::layout::PageBoundary;

/// Errors a page renderer can report for a single page.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Missing image: {0}")]
    MissingImage(ImageRef),

    #[error("Image error: {0}")]
    Image(String),

    #[error("{0}")]
    Failed(String),
}

impl From<FolioError> for RenderError {
    fn from(err: FolioError) -> Self {
        match err {
            FolioError::UnknownImage(name) => RenderError::MissingImage(ImageRef::new(name)),
            FolioError::Decode(msg) | FolioError::Encode(msg) => RenderError::Image(msg),
            other => RenderError::Failed(other.to_string()),
        }
    }
}

/// Produces a snapshot for one page.
///
/// `items` is the page's visible item list in paint order.
pub trait PageRenderer {
    fn render_page(&mut self, page: u32, items: &[&CanvasItem]) -> Result<PageSnapshot, RenderError>;
}

/// Fixed outer size every exported page is framed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageFrame {
    pub width: f32,
    pub height: f32,
}

impl Default for PageFrame {
    fn default() -> Self {
        Self::from_boundary(&PageBoundary::LETTER_PORTRAIT)
    }
}

impl PageFrame {
    pub fn from_boundary(boundary: &PageBoundary) -> Self {
        let Size { width, height } = boundary.page_size();
        Self { width, height }
    }
}

/// One exported page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageArtifact {
    pub page_number: u32,
    pub frame: PageFrame,
    /// "Page n of N".
    pub stamp: String,
    pub snapshot: PageSnapshot,
}

/// A page the renderer failed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFailure {
    pub page: u32,
    pub reason: String,
}

impl From<&PageFailure> for FolioError {
    fn from(failure: &PageFailure) -> Self {
        FolioError::PageRender {
            page: failure.page,
            reason: failure.reason.clone(),
        }
    }
}

/// Result of an export run.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Successfully rendered pages, in page order.
    pub pages: Vec<PageArtifact>,
    pub failed_pages: Vec<PageFailure>,
    /// True when the run stopped early on cancellation.
    pub cancelled: bool,
    pub generated_at: DateTime<Local>,
}

impl RenderedDocument {
    pub fn failed_page_numbers(&self) -> Vec<u32> {
        self.failed_pages.iter().map(|f| f.page).collect()
    }

    /// Every page rendered and the run was not cancelled.
    pub fn is_complete(&self) -> bool {
        self.failed_pages.is_empty() && !self.cancelled
    }
}

/// "Page n of N".
pub fn page_stamp(page: u32, total: u32) -> String {
    format!("Page {} of {}", page, total)
}

#[derive(Debug, Clone, Default)]
pub struct Exporter {
    frame: PageFrame,
}

impl Exporter {
    pub fn new(frame: PageFrame) -> Self {
        Self { frame }
    }

    pub fn frame(&self) -> PageFrame {
        self.frame
    }

    /// Render every page of `canvas` in order.
    ///
    /// The canvas's active page is moved as pages render and put back
    /// afterwards. A cancelled run leaves it on the last page visited.
    pub fn render_document(
        &self,
        canvas: &mut Canvas,
        renderer: &mut dyn PageRenderer,
        cancel: Option<&CancellationToken>,
    ) -> RenderedDocument {
        let original_page = canvas.active_page();
        let total = canvas.total_pages();
        let mut pages = Vec::with_capacity(total as usize);
        let mut failed_pages = Vec::new();
        let mut cancelled = false;

        log::info!("[export] Rendering {} page(s)", total);

        for page in 1..=total {
            if cancel.is_some_and(|token| token.is_cancelled()) {
                log::info!("[export] Cancelled before page {}", page);
                cancelled = true;
                break;
            }

            canvas.set_active_page(page);
            let items = canvas.items_for_page(page);
            match renderer.render_page(page, &items) {
                Ok(mut snapshot) => {
                    let stripped = snapshot.strip_affordances();
                    log::debug!(
                        "[export] Page {}: {} item(s), {} affordance(s) stripped",
                        page,
                        items.len(),
                        stripped
                    );
                    pages.push(PageArtifact {
                        page_number: page,
                        frame: self.frame,
                        stamp: page_stamp(page, total),
                        snapshot,
                    });
                }
                Err(e) => {
                    log::warn!("[export] Page {} failed to render: {}", page, e);
                    failed_pages.push(PageFailure {
                        page,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if !cancelled {
            canvas.set_active_page(original_page);
        }

        log::info!(
            "[export] Done: {} rendered, {} failed{}",
            pages.len(),
            failed_pages.len(),
            if cancelled { ", cancelled" } else { "" }
        );

        RenderedDocument {
            pages,
            failed_pages,
            cancelled,
            generated_at: Local::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ItemContent, ItemKind};
    use crate::geometry::Size;

    /// Fails on the listed pages, records the active page it was called with.
    struct Flaky {
        fail_on: Vec<u32>,
        calls: Vec<u32>,
    }

    impl PageRenderer for Flaky {
        fn render_page(&mut self, page: u32, items: &[&CanvasItem]) -> Result<PageSnapshot, RenderError> {
            self.calls.push(page);
            if self.fail_on.contains(&page) {
                return Err(RenderError::Failed("boom".into()));
            }
            Ok(PageSnapshot::from_nodes(
                items.iter().map(|item| SnapshotNode::Item(RenderedItem::from(*item))).collect(),
            ))
        }
    }

    fn three_pages() -> Canvas {
        let mut canvas = Canvas::new();
        for page in 1..=3 {
            canvas.create(ItemKind::Text, ItemContent::text(format!("p{}", page)), Size::new(100.0, 40.0), Some(page));
        }
        canvas.set_active_page(2);
        canvas
    }

    #[test]
    fn test_stamps_and_frames() {
        let mut canvas = three_pages();
        let mut renderer = Flaky { fail_on: vec![], calls: vec![] };
        let doc = Exporter::default().render_document(&mut canvas, &mut renderer, None);

        assert!(doc.is_complete());
        let stamps: Vec<_> = doc.pages.iter().map(|p| p.stamp.as_str()).collect();
        assert_eq!(stamps, vec!["Page 1 of 3", "Page 2 of 3", "Page 3 of 3"]);
        assert!(doc.pages.iter().all(|p| p.frame == PageFrame { width: 800.0, height: 1100.0 }));
        assert_eq!(renderer.calls, vec![1, 2, 3]);
    }

    #[test]
    fn test_failure_is_skipped_and_reported() {
        let mut canvas = three_pages();
        let mut renderer = Flaky { fail_on: vec![2], calls: vec![] };
        let doc = Exporter::default().render_document(&mut canvas, &mut renderer, None);

        assert_eq!(doc.pages.iter().map(|p| p.page_number).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(doc.failed_page_numbers(), vec![2]);
        assert_eq!(canvas.active_page(), 2);
    }

    #[test]
    fn test_failure_reports_as_page_render_error() {
        let mut canvas = three_pages();
        let mut renderer = Flaky { fail_on: vec![3], calls: vec![] };
        let doc = Exporter::default().render_document(&mut canvas, &mut renderer, None);

        assert_eq!(doc.failed_pages, vec![PageFailure { page: 3, reason: "boom".into() }]);
        let err = FolioError::from(&doc.failed_pages[0]);
        assert!(matches!(err, FolioError::PageRender { page: 3, ref reason } if reason == "boom"));
        assert_eq!(err.to_string(), "Page 3 failed to render: boom");
    }

    #[test]
    fn test_pre_cancelled_renders_nothing() {
        let mut canvas = three_pages();
        let token = CancellationToken::new();
        token.cancel();
        let mut renderer = Flaky { fail_on: vec![], calls: vec![] };
        let doc = Exporter::default().render_document(&mut canvas, &mut renderer, Some(&token));

        assert!(doc.cancelled);
        assert!(doc.pages.is_empty());
        assert!(renderer.calls.is_empty());
    }

    #[test]
    fn test_from_folio_error() {
        let err = RenderError::from(FolioError::UnknownImage("a.png".into()));
        assert!(matches!(err, RenderError::MissingImage(ref r) if r.as_str() == "a.png"));
    }
}

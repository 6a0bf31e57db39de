//! # Folio - Property Report Composer
//!
//! Folio is a Rust library for composing multi-page property reports on a
//! freeform canvas. It provides:
//!
//! - **Item model**: positioned, sized, z-ordered items on fixed 800×1100 pages
//! - **Layout**: greedy top-down packing of room photos with page breaks and
//!   per-page disclaimer footers
//! - **Photo engine**: letterbox-aware crop, quarter-turn rotation,
//!   brightness/contrast
//! - **Export**: page-by-page snapshots with editor affordances stripped
//!
//! ## Quick Start
//!
//! ```
//! use folio::{
//!     document::Canvas,
//!     export::{Exporter, TreeRenderer},
//!     layout::{ComposerConfig, LayoutEngine, RoomImage, RoomSection},
//!     document::ImageRef,
//! };
//!
//! let mut canvas = Canvas::new();
//! let rooms = vec![RoomSection {
//!     room_id: "kitchen".into(),
//!     name: "Kitchen".into(),
//!     images: vec![RoomImage::new(ImageRef::new("kitchen-1.jpg"))],
//! }];
//!
//! // Lay out the rooms
//! let summary = LayoutEngine::new(ComposerConfig::default()).generate(&mut canvas, &rooms);
//! assert_eq!(summary.pages, 1);
//!
//! // Export every page as a node tree
//! let doc = Exporter::default().render_document(&mut canvas, &mut TreeRenderer::new(), None);
//! assert_eq!(doc.pages[0].stamp, "Page 1 of 1");
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`geometry`] | Points, sizes, rectangles, aspect-fit math |
//! | [`document`] | Canvas items, page visibility, editor session |
//! | [`layout`] | Room layout engine and page configuration |
//! | [`photo`] | Crop, rotate, adjust, image stores |
//! | [`export`] | Page snapshot pipeline |
//! | [`preview`] | Wireframe PNG page renderer |
//! | [`error`] | Error types |

pub mod document;
pub mod error;
pub mod export;
pub mod geometry;
pub mod layout;
pub mod photo;
pub mod preview;

// Re-exports for convenience
pub use document::{Canvas, EditorSession};
pub use error::{FolioError, Result};
pub use layout::{ComposerConfig, LayoutEngine, PageBoundary};

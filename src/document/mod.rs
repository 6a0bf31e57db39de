//! # Canvas Item Model
//!
//! An arena of positioned, sized, z-ordered, typed items laid out on fixed
//! 800×1100 unit pages.
//!
//! ```
//! use folio::document::{Canvas, ItemContent, ItemKind};
//! use folio::geometry::{Point, Size};
//!
//! let mut canvas = Canvas::new();
//! let note = canvas.create(ItemKind::Text, ItemContent::text("Roof redone 2021"), Size::new(280.0, 80.0), None);
//! canvas.move_to(note, Point::new(60.0, 500.0));
//! canvas.resize(note, Size::new(20.0, 20.0)); // clamped to 50x50
//!
//! // Free-floating items show up on every page
//! assert_eq!(canvas.items_for_page(1).len(), 1);
//! ```
//!
//! ## Page visibility
//!
//! Every item carries a [`Placement`] assigned at creation time:
//!
//! | Placement | Visible on |
//! |-----------|------------|
//! | `ExplicitPage(n)` | page `n` |
//! | `FixedPage1Header` | page 1 |
//! | `EveryPageDisclaimer` | every page without its own disclaimer clone |
//! | `FreeFloating` | every page |

pub mod canvas;
pub mod session;
pub mod types;

pub use canvas::{Canvas, HeaderItems, MIN_ITEM_SIDE, PropertyHeader};
pub use session::{ActiveEdit, EditorSession};
pub use types::*;

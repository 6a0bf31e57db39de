//! # Room Layout Engine
//!
//! Packs room sections and their photos onto pages, top to bottom, one column
//! per page.
//!
//! ## Algorithm
//!
//! Greedy first fit with no backtracking. Every block has a fixed height
//! estimate; the engine never measures rendered text or images:
//!
//! | Block | Break check | Advance |
//! |-------|-------------|---------|
//! | heading (page 1 only) | - | 80 |
//! | room label | `cursor + 100 > content_end` | 60 |
//! | photo + companion text | `cursor + 330 > content_end` | 330 |
//! | "no images" placeholder | - | 40 |
//! | gap after each room | - | 40 |
//!
//! When a block does not fit, the page being closed gets its own disclaimer
//! clone in the footer slot and the cursor moves to the top of the next page.
//! The last page has no clone and shows the shared disclaimer instead.
//!
//! ## Example
//!
//! ```
//! use folio::document::{Canvas, ImageRef};
//! use folio::layout::{LayoutEngine, RoomImage, RoomSection};
//!
//! let rooms = vec![RoomSection {
//!     room_id: "kitchen".into(),
//!     name: "Kitchen".into(),
//!     images: vec![RoomImage::new(ImageRef::new("kitchen-1.jpg"))],
//! }];
//!
//! let mut canvas = Canvas::new();
//! let summary = LayoutEngine::default().generate(&mut canvas, &rooms);
//! assert_eq!(summary.pages, 1);
//! assert_eq!(canvas.active_page(), 1);
//! ```

mod config;

pub use config::{ComposerConfig, PageBoundary};

use serde::{Deserialize, Serialize};

use crate::document::{Canvas, ImageRef, ItemContent, ItemDraft, ItemKind, Origin, Placement};
use crate::geometry::{Point, Size};

/// Batch tag carried by every item this engine creates.
pub const ROOM_LAYOUT_BATCH: &str = "room-layout";

/// Space a room label needs before it is allowed on the current page.
pub const ROOM_BREAK_HEIGHT: f32 = 100.0;
/// Cursor advance after the heading.
pub const HEADING_ADVANCE: f32 = 80.0;
/// Cursor advance after a room label.
pub const ROOM_LABEL_ADVANCE: f32 = 60.0;
/// Height of one photo plus its companion text.
pub const IMAGE_BLOCK_HEIGHT: f32 = 330.0;
/// Height of the "no images" placeholder.
pub const PLACEHOLDER_HEIGHT: f32 = 40.0;
/// Gap after every room.
pub const ROOM_SPACING: f32 = 40.0;

const HEADING_POSITION_X: f32 = 100.0;
const HEADING_SIZE: Size = Size::new(600.0, 60.0);
const COLUMN_X: f32 = 50.0;
const FULL_WIDTH_SIZE: Size = Size::new(700.0, 40.0);
const IMAGE_SIZE: Size = Size::new(400.0, 300.0);
const COMPANION_X: f32 = 470.0;
const COMPANION_OFFSET_Y: f32 = 20.0;
const COMPANION_SIZE: Size = Size::new(280.0, 160.0);

/// One room and its photos, in display order. Read-only input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSection {
    pub room_id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<RoomImage>,
}

/// A photo reference supplied by the room data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomImage {
    pub source: ImageRef,
    /// Caption from the data source. The layout writes its own
    /// "{room} - Item {n}" caption onto the placed image.
    #[serde(default)]
    pub caption: Option<String>,
}

impl RoomImage {
    pub fn new(source: ImageRef) -> Self {
        Self {
            source,
            caption: None,
        }
    }
}

/// What one `generate` run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutSummary {
    /// Last page the layout reached.
    pub pages: u32,
    pub rooms: usize,
    pub images: usize,
    pub items_created: usize,
    /// Auto-generated items removed before regenerating.
    pub items_cleared: usize,
}

/// Text placed beside each photo.
pub fn companion_text(room_name: &str) -> String {
    format!(
        "A closer look at the {}. This photo shows the space as it appears today.",
        room_name
    )
}

/// Generates room pages on a [`Canvas`].
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: ComposerConfig,
}

impl LayoutEngine {
    pub fn new(config: ComposerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Lay out `rooms` onto `canvas`.
    ///
    /// Previously generated items are removed first, so running this twice
    /// with the same input yields the same items. Manually authored items are
    /// left alone. The canvas ends on page 1.
    pub fn generate(&self, canvas: &mut Canvas, rooms: &[RoomSection]) -> LayoutSummary {
        let items_cleared = canvas.remove_batch(ROOM_LAYOUT_BATCH);
        let before = canvas.len();

        let disclaimer = canvas
            .shared_disclaimer_text()
            .map(str::to_string)
            .unwrap_or_else(|| self.config.disclaimer.clone());

        let mut cursor = PageCursor {
            page: 1,
            y: self.config.page.content_start_y(1),
            boundary: self.config.page,
            disclaimer,
        };

        canvas.insert(
            auto(ItemKind::Heading, ItemContent::text(&self.config.heading), HEADING_SIZE)
                .at(Point::new(HEADING_POSITION_X, cursor.y))
                .placement(Placement::ExplicitPage(1)),
        );
        cursor.y += HEADING_ADVANCE;

        let mut image_count = 0;
        for (index, room) in rooms.iter().enumerate() {
            cursor.ensure_room(canvas, ROOM_BREAK_HEIGHT);

            canvas.insert(
                auto(
                    ItemKind::RoomLabel,
                    ItemContent::text(format!("Room {} - {}", index + 1, room.name)),
                    FULL_WIDTH_SIZE,
                )
                .at(Point::new(COLUMN_X, cursor.y))
                .placement(cursor.placement()),
            );
            cursor.y += ROOM_LABEL_ADVANCE;

            if room.images.is_empty() {
                canvas.insert(
                    auto(
                        ItemKind::Text,
                        ItemContent::text(format!("No images available for {}.", room.name)),
                        FULL_WIDTH_SIZE,
                    )
                    .at(Point::new(COLUMN_X, cursor.y))
                    .placement(cursor.placement()),
                );
                cursor.y += PLACEHOLDER_HEIGHT;
            } else {
                for (image_index, image) in room.images.iter().enumerate() {
                    cursor.ensure_room(canvas, IMAGE_BLOCK_HEIGHT);

                    canvas.insert(
                        auto(ItemKind::Image, ItemContent::Empty, IMAGE_SIZE)
                            .at(Point::new(COLUMN_X, cursor.y))
                            .placement(cursor.placement())
                            .image(image.source.clone())
                            .description(format!("{} - Item {}", room.name, image_index + 1)),
                    );
                    canvas.insert(
                        auto(ItemKind::Text, ItemContent::text(companion_text(&room.name)), COMPANION_SIZE)
                            .at(Point::new(COMPANION_X, cursor.y + COMPANION_OFFSET_Y))
                            .placement(cursor.placement()),
                    );
                    cursor.y += IMAGE_BLOCK_HEIGHT;
                    image_count += 1;
                }
            }

            cursor.y += ROOM_SPACING;
        }

        canvas.ensure_pages(cursor.page);
        canvas.set_active_page(1);

        let summary = LayoutSummary {
            pages: cursor.page,
            rooms: rooms.len(),
            images: image_count,
            items_created: canvas.len() - before,
            items_cleared,
        };
        log::info!(
            "[layout] {} rooms, {} images across {} page(s) ({} items, {} cleared)",
            summary.rooms,
            summary.images,
            summary.pages,
            summary.items_created,
            summary.items_cleared
        );
        summary
    }
}

/// Draft for an item owned by this engine.
fn auto(kind: ItemKind, content: ItemContent, size: Size) -> ItemDraft {
    ItemDraft::new(kind, content, size).origin(Origin::auto(ROOM_LAYOUT_BATCH))
}

/// Current page and vertical position.
struct PageCursor {
    page: u32,
    y: f32,
    boundary: PageBoundary,
    disclaimer: String,
}

impl PageCursor {
    fn placement(&self) -> Placement {
        Placement::ExplicitPage(self.page)
    }

    /// Break to a new page unless `height` more units fit on this one.
    fn ensure_room(&mut self, canvas: &mut Canvas, height: f32) {
        if self.y + height > self.boundary.content_end {
            self.break_page(canvas);
        }
    }

    /// Close the current page with its own disclaimer and move to the next.
    fn break_page(&mut self, canvas: &mut Canvas) {
        canvas.insert(
            auto(
                ItemKind::Disclaimer,
                ItemContent::text(&self.disclaimer),
                self.boundary.footer_size(),
            )
            .at(self.boundary.footer_position())
            .placement(Placement::ExplicitPage(self.page)),
        );
        log::debug!(
            "[layout] Page {} full at y={}, continuing on page {}",
            self.page,
            self.y,
            self.page + 1
        );
        self.page += 1;
        self.y = self.boundary.content_start_y(self.page);
    }
}

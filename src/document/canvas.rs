//! The canvas item arena.
//!
//! Items live in a `Vec` kept sorted by id (ids are allocated monotonically,
//! so appending preserves the order and lookups are a binary search).
//!
//! Mutations referencing an unknown id are silent no-ops that return `false`;
//! the host UI routinely holds stale references.
//!
//! A canvas read from JSON is normalised on the way in: items are re-sorted
//! by id, the id counter is moved past every existing id and the page count
//! covers every pinned page. Duplicate ids are rejected.

use serde::{Deserialize, Serialize};

use super::types::{
    CanvasItem, ImageRef, ItemContent, ItemDraft, ItemId, ItemKind, Placement, PropertyInfo,
};
use crate::error::FolioError;
use crate::geometry::{Point, Size};
use crate::layout::PageBoundary;

/// Smallest width/height an item can be resized to.
pub const MIN_ITEM_SIDE: f32 = 50.0;

/// Multi-page canvas: the items plus page bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCanvas")]
pub struct Canvas {
    items: Vec<CanvasItem>,
    next_id: u64,
    total_pages: u32,
    active_page: u32,
}

/// Canvas as found in a file, before its invariants are restored.
#[derive(Deserialize)]
struct RawCanvas {
    #[serde(default)]
    items: Vec<CanvasItem>,
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    active_page: u32,
}

impl TryFrom<RawCanvas> for Canvas {
    type Error = FolioError;

    fn try_from(raw: RawCanvas) -> Result<Self, Self::Error> {
        let mut items = raw.items;
        items.sort_by_key(|item| item.id);
        if let Some(pair) = items.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(FolioError::InvalidCanvas(format!("duplicate item id {}", pair[0].id)));
        }

        let next_id = items
            .last()
            .map_or(1, |item| item.id.0.saturating_add(1))
            .max(raw.next_id)
            .max(1);
        let highest_pinned = items
            .iter()
            .filter_map(|item| item.placement.explicit_page())
            .max()
            .unwrap_or(1);
        let total_pages = raw.total_pages.max(highest_pinned).max(1);

        Ok(Self {
            items,
            next_id,
            total_pages,
            active_page: raw.active_page.clamp(1, total_pages),
        })
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            total_pages: 1,
            active_page: 1,
        }
    }
}

impl Canvas {
    /// Create an empty single-page canvas.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------

    /// Create a manual item at the default position.
    ///
    /// `page` pins the item to that page; `None` leaves it free-floating
    /// (visible on every page). Page 0 is treated as page 1.
    pub fn create(
        &mut self,
        kind: ItemKind,
        content: ItemContent,
        size: Size,
        page: Option<u32>,
    ) -> ItemId {
        let placement = match page {
            Some(n) => Placement::ExplicitPage(n.max(1)),
            None => Placement::FreeFloating,
        };
        self.insert(ItemDraft::new(kind, content, size).placement(placement))
    }

    /// Insert a fully specified item. Assigns id and `z = max + 1`.
    pub fn insert(&mut self, draft: ItemDraft) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;

        let placement = match draft.placement {
            Placement::ExplicitPage(0) => Placement::ExplicitPage(1),
            other => other,
        };
        if let Some(page) = placement.explicit_page() {
            self.total_pages = self.total_pages.max(page);
        }

        let z_index = self.next_z();
        self.items.push(CanvasItem {
            id,
            kind: draft.kind,
            content: draft.content,
            position: Point::new(draft.position.x.max(0.0), draft.position.y.max(0.0)),
            size: Size::new(draft.size.width.max(1.0), draft.size.height.max(1.0)),
            z_index,
            placement,
            origin: draft.origin,
            editable: draft.kind.is_text_editable(),
            image_source: draft.image_source.filter(|_| draft.kind.has_image_source()),
            description: draft.description,
        });
        id
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Move an item; both coordinates are clamped to `>= 0`.
    pub fn move_to(&mut self, id: ItemId, position: Point) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.position = Point::new(position.x.max(0.0), position.y.max(0.0));
                true
            }
            None => false,
        }
    }

    /// Resize an item; both sides are clamped to `>= 50`.
    ///
    /// Kinds that are not resizable (room labels) are left untouched.
    pub fn resize(&mut self, id: ItemId, size: Size) -> bool {
        match self.get_mut(id) {
            Some(item) if item.kind.is_resizable() => {
                item.size = Size::new(size.width.max(MIN_ITEM_SIDE), size.height.max(MIN_ITEM_SIDE));
                true
            }
            _ => false,
        }
    }

    /// Replace an item's content. Refused when the payload does not fit the kind.
    pub fn set_content(&mut self, id: ItemId, content: ItemContent) -> bool {
        match self.get_mut(id) {
            Some(item) if item.kind.accepts_content() && content.fits(item.kind) => {
                item.content = content;
                true
            }
            Some(item) => {
                log::warn!(
                    "[canvas] Refusing content of the wrong shape for {} ({})",
                    item.id,
                    item.kind.label()
                );
                false
            }
            None => false,
        }
    }

    /// Swap the pixel reference of an Image/Logo item in one step.
    pub fn set_image_source(&mut self, id: ItemId, source: ImageRef) -> bool {
        match self.get_mut(id) {
            Some(item) if item.kind.has_image_source() => {
                item.image_source = Some(source);
                true
            }
            _ => false,
        }
    }

    pub fn set_description(&mut self, id: ItemId, description: Option<String>) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.description = description;
                true
            }
            None => false,
        }
    }

    /// Delete an item. Deleting a missing id is a no-op.
    pub fn delete(&mut self, id: ItemId) -> bool {
        match self.index_of(id) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Paint the item above everything else: `z = max(existing) + 1`.
    pub fn raise_to_front(&mut self, id: ItemId) -> bool {
        let z = self.next_z();
        match self.get_mut(id) {
            Some(item) => {
                item.z_index = z;
                true
            }
            None => false,
        }
    }

    /// Remove every item matching `predicate`. Returns how many were removed.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&CanvasItem) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !predicate(item));
        before - self.items.len()
    }

    /// Remove everything one generator produced.
    pub fn remove_batch(&mut self, batch: &str) -> usize {
        self.remove_where(|item| item.origin.is_batch(batch))
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn get(&self, id: ItemId) -> Option<&CanvasItem> {
        self.index_of(id).map(|idx| &self.items[idx])
    }

    fn get_mut(&mut self, id: ItemId) -> Option<&mut CanvasItem> {
        self.index_of(id).map(move |idx| &mut self.items[idx])
    }

    fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.binary_search_by_key(&id, |item| item.id).ok()
    }

    /// All items in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &CanvasItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Highest z-index in use, if any item exists.
    pub fn max_z(&self) -> Option<i32> {
        self.items.iter().map(|item| item.z_index).max()
    }

    fn next_z(&self) -> i32 {
        self.max_z().map_or(1, |z| z + 1)
    }

    /// Items visible on page `page`, in paint order (z, then id).
    ///
    /// An item belongs to the page when:
    /// 1. it is pinned to that page;
    /// 2. it is a fixed header item and the page is 1;
    /// 3. it is the shared disclaimer and the page has no disclaimer of its own;
    /// 4. it is free-floating.
    pub fn items_for_page(&self, page: u32) -> Vec<&CanvasItem> {
        if page == 0 {
            return Vec::new();
        }
        let has_own_disclaimer = self.has_page_disclaimer(page);

        let mut visible: Vec<&CanvasItem> = self
            .items
            .iter()
            .filter(|item| match item.placement {
                Placement::ExplicitPage(n) => n == page,
                Placement::FixedPage1Header => page == 1,
                Placement::EveryPageDisclaimer => !has_own_disclaimer,
                Placement::FreeFloating => true,
            })
            .collect();
        visible.sort_by_key(|item| (item.z_index, item.id));
        visible
    }

    /// Whether a disclaimer clone is pinned to `page`.
    pub fn has_page_disclaimer(&self, page: u32) -> bool {
        self.items.iter().any(|item| {
            item.kind == ItemKind::Disclaimer && item.placement == Placement::ExplicitPage(page)
        })
    }

    /// Text of the shared every-page disclaimer, if one exists.
    pub fn shared_disclaimer_text(&self) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.placement == Placement::EveryPageDisclaimer)
            .and_then(|item| item.content.as_text())
    }

    // ------------------------------------------------------------------
    // Pages
    // ------------------------------------------------------------------

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Grow the page count to at least `pages`.
    pub fn ensure_pages(&mut self, pages: u32) {
        self.total_pages = self.total_pages.max(pages);
    }

    pub fn active_page(&self) -> u32 {
        self.active_page
    }

    /// Switch the active page, clamped to `1..=total_pages`.
    pub fn set_active_page(&mut self, page: u32) {
        self.active_page = page.clamp(1, self.total_pages.max(1));
    }

    /// Append an empty page and return its number.
    pub fn add_page(&mut self) -> u32 {
        self.total_pages += 1;
        self.total_pages
    }

    /// Remove page `page`: items pinned to it are deleted and items pinned to
    /// later pages move up one page. The last remaining page cannot be removed.
    pub fn remove_page(&mut self, page: u32) -> bool {
        if page == 0 || page > self.total_pages || self.total_pages <= 1 {
            return false;
        }
        self.items.retain(|item| item.placement != Placement::ExplicitPage(page));
        for item in &mut self.items {
            if let Placement::ExplicitPage(n) = item.placement {
                if n > page {
                    item.placement = Placement::ExplicitPage(n - 1);
                }
            }
        }
        self.total_pages -= 1;
        self.active_page = self.active_page.clamp(1, self.total_pages.max(1));
        true
    }

    // ------------------------------------------------------------------
    // Page-1 header
    // ------------------------------------------------------------------

    /// Create the manually authored page-1 header and the shared footer.
    ///
    /// ```text
    /// ┌─────────────────────────────────────────┐
    /// │ TITLE                            [LOGO] │  y 30..90
    /// │ ┌───────────────┐  Price: ...           │
    /// │ │  property     │  Bedrooms: ...        │  y 110..410
    /// │ │  photo        │  ...                  │
    /// │ └───────────────┘  [info block]         │
    /// │                                         │  content from y 450
    /// │ disclaimer                              │  y 1030
    /// └─────────────────────────────────────────┘
    /// ```
    pub fn seed_property_header(&mut self, header: &PropertyHeader, boundary: &PageBoundary) -> HeaderItems {
        let title = self.insert(
            ItemDraft::new(ItemKind::Heading, ItemContent::text(&header.title), Size::new(540.0, 60.0))
                .at(Point::new(50.0, 30.0))
                .placement(Placement::FixedPage1Header),
        );

        let logo = header.logo.clone().map(|source| {
            self.insert(
                ItemDraft::new(ItemKind::Logo, ItemContent::Empty, Size::new(130.0, 60.0))
                    .at(Point::new(620.0, 30.0))
                    .placement(Placement::FixedPage1Header)
                    .image(source),
            )
        });

        let photo = header.photo.clone().map(|source| {
            self.insert(
                ItemDraft::new(ItemKind::Image, ItemContent::Empty, Size::new(400.0, 300.0))
                    .at(Point::new(50.0, 110.0))
                    .placement(Placement::FixedPage1Header)
                    .image(source)
                    .description(header.info.address.clone()),
            )
        });

        let fields: Vec<ItemId> = header
            .info
            .fields()
            .into_iter()
            .enumerate()
            .map(|(i, (label, value))| {
                self.insert(
                    ItemDraft::new(
                        ItemKind::PropertyField,
                        ItemContent::field(label, value),
                        Size::new(280.0, 40.0),
                    )
                    .at(Point::new(470.0, 110.0 + i as f32 * 45.0))
                    .placement(Placement::FixedPage1Header),
                )
            })
            .collect();

        let info_block = self.insert(
            ItemDraft::new(
                ItemKind::PropertyInfoBlock,
                ItemContent::PropertyInfo(header.info.clone()),
                Size::new(280.0, 110.0),
            )
            .at(Point::new(470.0, 300.0))
            .placement(Placement::FixedPage1Header),
        );

        let disclaimer = self.insert(
            ItemDraft::new(
                ItemKind::Disclaimer,
                ItemContent::text(&header.disclaimer),
                boundary.footer_size(),
            )
            .at(boundary.footer_position())
            .placement(Placement::EveryPageDisclaimer),
        );

        HeaderItems {
            title,
            logo,
            photo,
            fields,
            info_block,
            disclaimer,
        }
    }
}

/// Input for [`Canvas::seed_property_header`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyHeader {
    pub title: String,
    pub info: PropertyInfo,
    #[serde(default)]
    pub logo: Option<ImageRef>,
    #[serde(default)]
    pub photo: Option<ImageRef>,
    #[serde(default = "default_disclaimer")]
    pub disclaimer: String,
}

pub(crate) fn default_disclaimer() -> String {
    "Information deemed reliable but not guaranteed. Photos may be edited for clarity.".to_string()
}

/// Ids of the items created by [`Canvas::seed_property_header`].
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderItems {
    pub title: ItemId,
    pub logo: Option<ItemId>,
    pub photo: Option<ItemId>,
    pub fields: Vec<ItemId>,
    pub info_block: ItemId,
    pub disclaimer: ItemId,
}

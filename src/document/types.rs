//! Item types for the canvas model.
//!
//! All types derive `Serialize + Deserialize` so a canvas can be written out
//! by the CLI and read back for export.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::{Point, Size};

/// Stable identifier of a canvas item. Allocated monotonically, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

/// Opaque reference to pixel data held by an [`ImageStore`](crate::photo::ImageStore).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What an item is. Not every kind supports every capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Text,
    Heading,
    Image,
    Logo,
    PropertyField,
    PropertyInfoBlock,
    RoomLabel,
    Disclaimer,
}

impl ItemKind {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Text => "Text",
            ItemKind::Heading => "Heading",
            ItemKind::Image => "Image",
            ItemKind::Logo => "Logo",
            ItemKind::PropertyField => "Property Field",
            ItemKind::PropertyInfoBlock => "Property Info",
            ItemKind::RoomLabel => "Room Label",
            ItemKind::Disclaimer => "Disclaimer",
        }
    }

    /// Free-form text editing in place (the `editable` flag).
    pub fn is_text_editable(self) -> bool {
        matches!(self, ItemKind::Text | ItemKind::Heading)
    }

    /// Whether the item carries content that `set_content` may replace.
    pub fn accepts_content(self) -> bool {
        !self.has_image_source()
    }

    pub fn is_resizable(self) -> bool {
        !matches!(self, ItemKind::RoomLabel)
    }

    pub fn has_image_source(self) -> bool {
        matches!(self, ItemKind::Image | ItemKind::Logo)
    }
}

/// Structured listing summary shown in the page-1 info block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub address: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<f32>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub summary: String,
}

impl PropertyInfo {
    /// Label/value pairs for the page-1 field items, skipping unset values.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(price) = &self.price {
            fields.push(("Price", price.clone()));
        }
        if let Some(bedrooms) = self.bedrooms {
            fields.push(("Bedrooms", bedrooms.to_string()));
        }
        if let Some(bathrooms) = self.bathrooms {
            fields.push(("Bathrooms", bathrooms.to_string()));
        }
        if let Some(area) = &self.area {
            fields.push(("Area", area.clone()));
        }
        fields
    }
}

/// Kind-dependent payload of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemContent {
    /// Text, Heading, RoomLabel, Disclaimer.
    Text { text: String },
    /// PropertyField.
    Field { label: String, value: String },
    /// PropertyInfoBlock.
    PropertyInfo(PropertyInfo),
    /// Image, Logo.
    Empty,
}

impl ItemContent {
    pub fn text(text: impl Into<String>) -> Self {
        ItemContent::Text { text: text.into() }
    }

    pub fn field(label: impl Into<String>, value: impl Into<String>) -> Self {
        ItemContent::Field {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ItemContent::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Whether this payload shape belongs to `kind`.
    pub fn fits(&self, kind: ItemKind) -> bool {
        match self {
            ItemContent::Text { .. } => matches!(
                kind,
                ItemKind::Text | ItemKind::Heading | ItemKind::RoomLabel | ItemKind::Disclaimer
            ),
            ItemContent::Field { .. } => kind == ItemKind::PropertyField,
            ItemContent::PropertyInfo(_) => kind == ItemKind::PropertyInfoBlock,
            ItemContent::Empty => kind.has_image_source(),
        }
    }
}

/// Which pages an item shows up on. Assigned at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "placement", content = "page", rename_all = "snake_case")]
pub enum Placement {
    /// Fixed page-1 header items (title, property photo, fields, info block).
    FixedPage1Header,
    /// The shared footer disclaimer, shown on any page without its own clone.
    EveryPageDisclaimer,
    /// Pinned to one page (1-based).
    ExplicitPage(u32),
    /// Manually added item with no page; shown on every page.
    FreeFloating,
}

impl Placement {
    pub fn explicit_page(self) -> Option<u32> {
        match self {
            Placement::ExplicitPage(n) => Some(n),
            _ => None,
        }
    }
}

/// Who created an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum Origin {
    Manual,
    /// Created by the layout engine; `batch` groups one generator's output.
    AutoGenerated { batch: String },
}

impl Origin {
    pub fn auto(batch: impl Into<String>) -> Self {
        Origin::AutoGenerated {
            batch: batch.into(),
        }
    }

    pub fn is_batch(&self, name: &str) -> bool {
        matches!(self, Origin::AutoGenerated { batch } if batch == name)
    }
}

/// The atomic placeable unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasItem {
    pub id: ItemId,
    pub kind: ItemKind,
    pub content: ItemContent,
    pub position: Point,
    pub size: Size,
    pub z_index: i32,
    pub placement: Placement,
    pub origin: Origin,
    /// In-place text editing allowed (Text and Heading only).
    pub editable: bool,
    /// Pixel data reference (Image and Logo only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_source: Option<ImageRef>,
    /// Caption for Image items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CanvasItem {
    pub fn is_auto_generated(&self) -> bool {
        matches!(self.origin, Origin::AutoGenerated { .. })
    }
}

/// Everything needed to insert an item; the canvas assigns id and z-order.
///
/// ```
/// use folio::document::{ItemContent, ItemDraft, ItemKind, Placement};
/// use folio::geometry::{Point, Size};
///
/// let draft = ItemDraft::new(ItemKind::Text, ItemContent::text("Hi"), Size::new(280.0, 160.0))
///     .at(Point::new(470.0, 530.0))
///     .placement(Placement::ExplicitPage(1));
/// assert_eq!(draft.position.x, 470.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub kind: ItemKind,
    pub content: ItemContent,
    pub position: Point,
    pub size: Size,
    pub placement: Placement,
    pub origin: Origin,
    pub image_source: Option<ImageRef>,
    pub description: Option<String>,
}

/// Where new items land when the caller gives no position.
pub const DEFAULT_POSITION: Point = Point::new(100.0, 100.0);

impl ItemDraft {
    pub fn new(kind: ItemKind, content: ItemContent, size: Size) -> Self {
        Self {
            kind,
            content,
            position: DEFAULT_POSITION,
            size,
            placement: Placement::FreeFloating,
            origin: Origin::Manual,
            image_source: None,
            description: None,
        }
    }

    pub fn at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    pub fn image(mut self, source: ImageRef) -> Self {
        self.image_source = Some(source);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

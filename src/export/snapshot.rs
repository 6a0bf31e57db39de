//! Page snapshot trees.
//!
//! A renderer returns a flat, paint-ordered list of nodes per page plus an
//! optional raster. Editor-only nodes (selection outlines, resize handles,
//! edit carets) live alongside the items and are removed before a page is
//! exported.

use serde::{Deserialize, Serialize};

use crate::document::{CanvasItem, ImageRef, ItemContent, ItemId, ItemKind};
use crate::geometry::Rect;

/// A canvas item as drawn on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedItem {
    pub id: ItemId,
    pub kind: ItemKind,
    pub bounds: Rect,
    pub z_index: i32,
    pub content: ItemContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_source: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the node still accepts in-place editing.
    pub editable: bool,
}

impl From<&CanvasItem> for RenderedItem {
    fn from(item: &CanvasItem) -> Self {
        Self {
            id: item.id,
            kind: item.kind,
            bounds: Rect::from_origin_size(item.position, item.size),
            z_index: item.z_index,
            content: item.content.clone(),
            image_source: item.image_source.clone(),
            description: item.description.clone(),
            editable: item.editable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffordanceKind {
    SelectionOutline,
    ResizeHandle,
    EditCaret,
}

/// Interactive decoration attached to an item in the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affordance {
    pub item: ItemId,
    pub kind: AffordanceKind,
    pub bounds: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum SnapshotNode {
    Item(RenderedItem),
    Affordance(Affordance),
}

/// What a renderer produced for one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub nodes: Vec<SnapshotNode>,
    /// Encoded bitmap, when the renderer rasterises.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raster: Option<Vec<u8>>,
}

impl PageSnapshot {
    pub fn from_nodes(nodes: Vec<SnapshotNode>) -> Self {
        Self { nodes, raster: None }
    }

    pub fn items(&self) -> impl Iterator<Item = &RenderedItem> {
        self.nodes.iter().filter_map(|node| match node {
            SnapshotNode::Item(item) => Some(item),
            SnapshotNode::Affordance(_) => None,
        })
    }

    pub fn affordance_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, SnapshotNode::Affordance(_)))
            .count()
    }

    /// Drop editor-only nodes and clear editable flags. Returns how many
    /// affordances were removed.
    pub fn strip_affordances(&mut self) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|node| matches!(node, SnapshotNode::Item(_)));
        for node in &mut self.nodes {
            if let SnapshotNode::Item(item) = node {
                item.editable = false;
            }
        }
        before - self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Canvas, ItemKind};
    use crate::geometry::Size;

    #[test]
    fn test_strip_removes_affordances_and_flags() {
        let mut canvas = Canvas::new();
        let id = canvas.create(ItemKind::Text, ItemContent::text("hello"), Size::new(200.0, 40.0), Some(1));
        let item = RenderedItem::from(canvas.get(id).unwrap());
        assert!(item.editable);

        let mut snapshot = PageSnapshot::from_nodes(vec![
            SnapshotNode::Item(item),
            SnapshotNode::Affordance(Affordance {
                item: id,
                kind: AffordanceKind::SelectionOutline,
                bounds: Rect::new(98.0, 98.0, 204.0, 44.0),
            }),
        ]);

        assert_eq!(snapshot.strip_affordances(), 1);
        assert_eq!(snapshot.affordance_count(), 0);
        assert_eq!(snapshot.nodes.len(), 1);
        assert!(snapshot.items().all(|item| !item.editable));
    }

    #[test]
    fn test_node_json_is_tagged() {
        let node = SnapshotNode::Affordance(Affordance {
            item: ItemId(3),
            kind: AffordanceKind::ResizeHandle,
            bounds: Rect::new(0.0, 0.0, 8.0, 8.0),
        });
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["node"], "affordance");
        assert_eq!(json["kind"], "resize_handle");
    }
}

//! Serialized visual tree renderer.

use super::snapshot::{Affordance, AffordanceKind, PageSnapshot, RenderedItem, SnapshotNode};
use super::{PageRenderer, RenderError};
use crate::document::{CanvasItem, EditorSession, ItemId};
use crate::geometry::Rect;

const OUTLINE_INSET: f32 = 2.0;
const HANDLE_SIDE: f32 = 8.0;

/// Renders a page as a JSON-able node list, decorating the selected item the
/// way the editor shows it.
#[derive(Debug, Clone, Default)]
pub struct TreeRenderer {
    selected: Option<ItemId>,
    editing: Option<ItemId>,
}

impl TreeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decorations matching an editor session's pending edit.
    pub fn for_session(session: &EditorSession) -> Self {
        let editing = session.active_edit().map(|edit| edit.item);
        Self {
            selected: editing,
            editing,
        }
    }

    pub fn select(mut self, item: ItemId) -> Self {
        self.selected = Some(item);
        self
    }

    fn decorate(&self, item: &CanvasItem, nodes: &mut Vec<SnapshotNode>) {
        let bounds = Rect::from_origin_size(item.position, item.size);
        if self.selected == Some(item.id) {
            nodes.push(SnapshotNode::Affordance(Affordance {
                item: item.id,
                kind: AffordanceKind::SelectionOutline,
                bounds: Rect::new(
                    bounds.x - OUTLINE_INSET,
                    bounds.y - OUTLINE_INSET,
                    bounds.width + OUTLINE_INSET * 2.0,
                    bounds.height + OUTLINE_INSET * 2.0,
                ),
            }));
            if item.kind.is_resizable() {
                let half = HANDLE_SIDE / 2.0;
                for (x, y) in [
                    (bounds.x, bounds.y),
                    (bounds.right(), bounds.y),
                    (bounds.x, bounds.bottom()),
                    (bounds.right(), bounds.bottom()),
                ] {
                    nodes.push(SnapshotNode::Affordance(Affordance {
                        item: item.id,
                        kind: AffordanceKind::ResizeHandle,
                        bounds: Rect::new(x - half, y - half, HANDLE_SIDE, HANDLE_SIDE),
                    }));
                }
            }
        }
        if self.editing == Some(item.id) {
            nodes.push(SnapshotNode::Affordance(Affordance {
                item: item.id,
                kind: AffordanceKind::EditCaret,
                bounds: Rect::new(bounds.x, bounds.y, 1.0, bounds.height),
            }));
        }
    }
}

impl PageRenderer for TreeRenderer {
    fn render_page(&mut self, _page: u32, items: &[&CanvasItem]) -> Result<PageSnapshot, RenderError> {
        let mut nodes = Vec::with_capacity(items.len());
        for item in items {
            nodes.push(SnapshotNode::Item(RenderedItem::from(*item)));
            self.decorate(item, &mut nodes);
        }
        Ok(PageSnapshot::from_nodes(nodes))
    }
}

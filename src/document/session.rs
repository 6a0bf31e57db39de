//! Editor session: a canvas plus the single pending text edit.
//!
//! Only one item may be in edit mode at a time. Starting a new edit while one
//! is pending discards the pending draft; drafts are never merged.

use super::canvas::Canvas;
use super::types::{ItemContent, ItemId};

/// A text/field edit that has not been committed yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEdit {
    pub item: ItemId,
    pub draft: ItemContent,
}

/// Owns the canvas for one editing session.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    canvas: Canvas,
    active_edit: Option<ActiveEdit>,
}

impl EditorSession {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            active_edit: None,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Direct mutable access for move/resize/create calls from the host UI.
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }

    pub fn active_edit(&self) -> Option<&ActiveEdit> {
        self.active_edit.as_ref()
    }

    /// Put `id` into edit mode with its current content as the draft.
    ///
    /// Any pending edit is dropped first. Returns `false` (and leaves no edit
    /// pending) when the item is missing or has no editable content.
    pub fn begin_edit(&mut self, id: ItemId) -> bool {
        if let Some(previous) = self.active_edit.take() {
            log::debug!("[editor] Discarding pending edit on {}", previous.item);
        }
        match self.canvas.get(id) {
            Some(item) if item.kind.accepts_content() => {
                self.active_edit = Some(ActiveEdit {
                    item: id,
                    draft: item.content.clone(),
                });
                true
            }
            _ => false,
        }
    }

    /// Replace the pending draft. No-op without a pending edit.
    pub fn update_draft(&mut self, content: ItemContent) -> bool {
        match self.active_edit.as_mut() {
            Some(edit) => {
                edit.draft = content;
                true
            }
            None => false,
        }
    }

    /// Write the draft into the canvas and leave edit mode.
    pub fn commit_edit(&mut self) -> bool {
        match self.active_edit.take() {
            Some(edit) => self.canvas.set_content(edit.item, edit.draft),
            None => false,
        }
    }

    /// Leave edit mode without touching the canvas.
    pub fn cancel_edit(&mut self) {
        self.active_edit = None;
    }

    /// Delete an item, dropping the pending edit if it targeted that item.
    pub fn delete(&mut self, id: ItemId) -> bool {
        if self.active_edit.as_ref().is_some_and(|edit| edit.item == id) {
            self.active_edit = None;
        }
        self.canvas.delete(id)
    }
}

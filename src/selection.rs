//! Selection state for the editing surfaces.
//!
//! One object at most is selected at a time; the delete affordance is only
//! shown for the selection. A tap with no measurable movement selects without
//! committing anything.

use crate::types::ObjectId;
use tracing::debug;

/// Tracks which object (if any) is selected.
#[derive(Debug, Default)]
pub struct SelectionManager {
    selected: Option<ObjectId>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.selected == Some(id)
    }

    /// Select an object. Returns true if the selection changed.
    pub fn select(&mut self, id: ObjectId) -> bool {
        if self.selected == Some(id) {
            return false;
        }
        debug!(id, "object selected");
        self.selected = Some(id);
        true
    }

    /// Clear the selection (background tap, delete).
    pub fn clear(&mut self) -> bool {
        if self.selected.is_none() {
            return false;
        }
        debug!("selection cleared");
        self.selected = None;
        true
    }

    /// Drop the selection if it points at the given object (post-delete).
    pub fn forget(&mut self, id: ObjectId) {
        if self.selected == Some(id) {
            self.selected = None;
        }
    }
}

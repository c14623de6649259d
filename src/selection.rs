//! Selection model for the moodboard canvas.
//!
//! A plain set of item ids. Only the gesture router, the Escape handler and
//! the scene-change prune mutate it; everything else reads.

use crate::types::ItemId;
use std::collections::HashSet;

#[derive(Clone, Debug, Default)]
pub struct SelectionModel {
    items: HashSet<ItemId>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with a single item.
    pub fn select_only(&mut self, id: ItemId) {
        self.items.clear();
        self.items.insert(id);
    }

    /// Toggle an item's membership (shift-click).
    pub fn toggle(&mut self, id: ItemId) {
        if !self.items.remove(&id) {
            self.items.insert(id);
        }
    }

    /// Replace the selection outright (marquee release).
    pub fn set_all(&mut self, ids: impl IntoIterator<Item = ItemId>) {
        self.items = ids.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drop any selected id no longer present in the scene. Must be called
    /// whenever the scene's item set changes.
    pub fn prune(&mut self, valid_ids: &HashSet<ItemId>) {
        self.items.retain(|id| valid_ids.contains(id));
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

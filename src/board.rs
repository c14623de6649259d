//! Scene model: the ordered collection of items on one moodboard.
//!
//! The board is a snapshot the canvas operates on. Gesture-driven mutations
//! go through the `request_*` methods, which silently no-op when the target
//! id is absent (the item may have been removed externally mid-gesture).
//! Durable persistence is the [`BoardStore`]'s job, not the board's.

use crate::constants::MIN_ITEM_WIDTH;
use crate::types::{BoardItem, ItemId, ItemPatch};
use glam::Vec2;
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Board {
    id: String,
    items: Vec<BoardItem>,
    next_item_id: ItemId,
}

impl Board {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            items: Vec::new(),
            next_item_id: 0,
        }
    }

    pub fn with_items(id: impl Into<String>, items: Vec<BoardItem>) -> Self {
        let next_item_id = items.iter().map(|i| i.id + 1).max().unwrap_or(0);
        Self {
            id: id.into(),
            items,
            next_item_id,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn items(&self) -> &[BoardItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_item(&self, id: ItemId) -> Option<&BoardItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    pub fn item_ids(&self) -> HashSet<ItemId> {
        self.items.iter().map(|i| i.id).collect()
    }

    /// Place a new item, assigning the next id. Z-order is insertion order.
    pub fn add_item(&mut self, path: PathBuf, position: Vec2, width: f32) -> ItemId {
        let id = self.next_item_id;
        self.next_item_id += 1;
        self.items.push(BoardItem {
            id,
            path,
            x: position.x,
            y: position.y,
            width: width.max(MIN_ITEM_WIDTH),
        });
        id
    }

    /// Adopt a fresh snapshot from the owning store. Item ids stay monotonic
    /// even if the snapshot shrank.
    pub fn replace_items(&mut self, items: Vec<BoardItem>) {
        let max_next = items.iter().map(|i| i.id + 1).max().unwrap_or(0);
        self.next_item_id = self.next_item_id.max(max_next);
        self.items = items;
    }

    /// Request a position update. Returns false when the id is gone.
    pub fn request_move(&mut self, id: ItemId, x: f32, y: f32) -> bool {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.x = x;
                item.y = y;
                true
            }
            None => false,
        }
    }

    /// Request a width update, clamped to the minimum item width.
    pub fn request_resize(&mut self, id: ItemId, width: f32) -> bool {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.width = width.max(MIN_ITEM_WIDTH);
                true
            }
            None => false,
        }
    }

    /// Request removal. Returns false when the id was already gone.
    pub fn request_remove(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }
}

/// Fire-and-forget persistence channel for board-item mutations.
///
/// Implementations may no-op (e.g. the id was already removed); the canvas
/// treats every call as success.
pub trait BoardStore: Send + Sync {
    fn update_item(&self, board_id: &str, item_id: ItemId, patch: &ItemPatch);
    fn remove_item(&self, board_id: &str, item_id: ItemId);
}

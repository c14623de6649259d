//! The image library: collections, tags, taggings and moodboards.
//!
//! Everything here is CRUD over the [`KvStore`], one JSON document per
//! record family. Tag structure rules (cycles, cascading deletes) are
//! enforced at this layer with the helpers in [`crate::tags`].

use crate::store::{get_json, set_json, KvStore, StoreResult};
use crate::tags;
use crate::types::{BoardItem, Collection, Moodboard, Tag};
use glam::Vec2;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

const COLLECTIONS_KEY: &str = "library.collections";
const TAGS_KEY: &str = "library.tags";
const TAGGINGS_KEY: &str = "library.taggings";
const MOODBOARDS_KEY: &str = "library.moodboards";

fn board_items_key(board_id: &str) -> String {
    format!("board.{board_id}")
}

/// Image path -> tag ids applied to it.
pub type Taggings = HashMap<String, Vec<String>>;

pub struct Library {
    kv: Arc<dyn KvStore>,
}

impl Library {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    // ==================== Collections ====================

    pub fn collections(&self) -> StoreResult<Vec<Collection>> {
        Ok(get_json(self.kv.as_ref(), COLLECTIONS_KEY)?.unwrap_or_default())
    }

    pub fn add_collection(&self, name: &str, path: &Path) -> StoreResult<Collection> {
        let mut all = self.collections()?;
        let collection = Collection {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            path: path.to_path_buf(),
        };
        all.push(collection.clone());
        set_json(self.kv.as_ref(), COLLECTIONS_KEY, &all)?;
        info!(name, "added collection");
        Ok(collection)
    }

    pub fn rename_collection(&self, id: &str, name: &str) -> StoreResult<()> {
        let mut all = self.collections()?;
        if let Some(c) = all.iter_mut().find(|c| c.id == id) {
            c.name = name.to_string();
            set_json(self.kv.as_ref(), COLLECTIONS_KEY, &all)?;
        }
        Ok(())
    }

    pub fn remove_collection(&self, id: &str) -> StoreResult<()> {
        let mut all = self.collections()?;
        all.retain(|c| c.id != id);
        set_json(self.kv.as_ref(), COLLECTIONS_KEY, &all)
    }

    // ==================== Tags ====================

    pub fn tags(&self) -> StoreResult<Vec<Tag>> {
        Ok(get_json(self.kv.as_ref(), TAGS_KEY)?.unwrap_or_default())
    }

    pub fn add_tag(&self, name: &str, parent_id: Option<&str>) -> StoreResult<Tag> {
        let mut all = self.tags()?;
        let tag = Tag {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            parent_id: parent_id.map(|p| p.to_string()),
        };
        all.push(tag.clone());
        set_json(self.kv.as_ref(), TAGS_KEY, &all)?;
        Ok(tag)
    }

    pub fn rename_tag(&self, id: &str, name: &str) -> StoreResult<()> {
        let mut all = self.tags()?;
        if let Some(t) = all.iter_mut().find(|t| t.id == id) {
            t.name = name.to_string();
            set_json(self.kv.as_ref(), TAGS_KEY, &all)?;
        }
        Ok(())
    }

    /// Reparent a tag. Refused (returns false) when the move would make
    /// the tag its own ancestor.
    pub fn reparent_tag(&self, id: &str, new_parent_id: Option<&str>) -> StoreResult<bool> {
        let mut all = self.tags()?;
        if let Some(parent) = new_parent_id {
            if tags::would_create_cycle(&all, id, parent) {
                return Ok(false);
            }
        }
        let Some(t) = all.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        t.parent_id = new_parent_id.map(|p| p.to_string());
        set_json(self.kv.as_ref(), TAGS_KEY, &all)?;
        Ok(true)
    }

    /// Delete a tag and its whole subtree, scrubbing every tagging that
    /// referenced any of them.
    pub fn remove_tag(&self, id: &str) -> StoreResult<()> {
        let mut all = self.tags()?;
        let doomed = tags::descendant_ids(&all, id);
        all.retain(|t| !doomed.contains(&t.id));
        set_json(self.kv.as_ref(), TAGS_KEY, &all)?;

        let mut taggings = self.taggings()?;
        for tag_ids in taggings.values_mut() {
            tag_ids.retain(|t| !doomed.contains(t));
        }
        taggings.retain(|_, tag_ids| !tag_ids.is_empty());
        set_json(self.kv.as_ref(), TAGGINGS_KEY, &taggings)
    }

    // ==================== Taggings ====================

    pub fn taggings(&self) -> StoreResult<Taggings> {
        Ok(get_json(self.kv.as_ref(), TAGGINGS_KEY)?.unwrap_or_default())
    }

    pub fn tag_image(&self, image_path: &str, tag_id: &str) -> StoreResult<()> {
        let mut taggings = self.taggings()?;
        let entry = taggings.entry(image_path.to_string()).or_default();
        if !entry.iter().any(|t| t == tag_id) {
            entry.push(tag_id.to_string());
        }
        set_json(self.kv.as_ref(), TAGGINGS_KEY, &taggings)
    }

    pub fn untag_image(&self, image_path: &str, tag_id: &str) -> StoreResult<()> {
        let mut taggings = self.taggings()?;
        if let Some(entry) = taggings.get_mut(image_path) {
            entry.retain(|t| t != tag_id);
            if entry.is_empty() {
                taggings.remove(image_path);
            }
        }
        set_json(self.kv.as_ref(), TAGGINGS_KEY, &taggings)
    }

    /// Images carrying the tag or any tag below it.
    pub fn images_with_tag(&self, tag_id: &str) -> StoreResult<Vec<String>> {
        let all = self.tags()?;
        let wanted = tags::descendant_ids(&all, tag_id);
        let taggings = self.taggings()?;
        let mut paths: Vec<String> = taggings
            .into_iter()
            .filter(|(_, tag_ids)| tag_ids.iter().any(|t| wanted.contains(t)))
            .map(|(path, _)| path)
            .collect();
        paths.sort();
        Ok(paths)
    }

    // ==================== Moodboards ====================

    pub fn moodboards(&self) -> StoreResult<Vec<Moodboard>> {
        Ok(get_json(self.kv.as_ref(), MOODBOARDS_KEY)?.unwrap_or_default())
    }

    pub fn add_moodboard(&self, name: &str) -> StoreResult<Moodboard> {
        let mut all = self.moodboards()?;
        let board = Moodboard {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
        };
        all.push(board.clone());
        set_json(self.kv.as_ref(), MOODBOARDS_KEY, &all)?;
        info!(name, "added moodboard");
        Ok(board)
    }

    pub fn rename_moodboard(&self, id: &str, name: &str) -> StoreResult<()> {
        let mut all = self.moodboards()?;
        if let Some(b) = all.iter_mut().find(|b| b.id == id) {
            b.name = name.to_string();
            set_json(self.kv.as_ref(), MOODBOARDS_KEY, &all)?;
        }
        Ok(())
    }

    /// Delete a moodboard record along with its item document.
    pub fn remove_moodboard(&self, id: &str) -> StoreResult<()> {
        let mut all = self.moodboards()?;
        all.retain(|b| b.id != id);
        set_json(self.kv.as_ref(), MOODBOARDS_KEY, &all)?;
        self.kv.delete(&board_items_key(id))
    }

    // ==================== Board items ====================

    pub fn board_items(&self, board_id: &str) -> StoreResult<Vec<BoardItem>> {
        Ok(get_json(self.kv.as_ref(), &board_items_key(board_id))?.unwrap_or_default())
    }

    /// Append an image to a board at the given canvas position, with the
    /// standard placement width.
    pub fn add_board_image(
        &self,
        board_id: &str,
        path: PathBuf,
        position: Vec2,
    ) -> StoreResult<BoardItem> {
        self.add_board_item(board_id, path, position, crate::constants::DEFAULT_ITEM_WIDTH)
    }

    /// Append an image to a board at the given canvas position.
    pub fn add_board_item(
        &self,
        board_id: &str,
        path: PathBuf,
        position: Vec2,
        width: f32,
    ) -> StoreResult<BoardItem> {
        let mut items = self.board_items(board_id)?;
        let id = items.iter().map(|i| i.id).max().map_or(1, |m| m + 1);
        let item = BoardItem {
            id,
            path,
            x: position.x,
            y: position.y,
            width: width.max(crate::constants::MIN_ITEM_WIDTH),
        };
        items.push(item.clone());
        set_json(self.kv.as_ref(), &board_items_key(board_id), &items)?;
        Ok(item)
    }

    pub fn remove_board_item(&self, board_id: &str, item_id: u64) -> StoreResult<()> {
        let mut items = self.board_items(board_id)?;
        items.retain(|i| i.id != item_id);
        set_json(self.kv.as_ref(), &board_items_key(board_id), &items)
    }
}

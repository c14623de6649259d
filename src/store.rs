//! Key-value persistence for boards and library records.
//!
//! Board contents, collections, tags and taggings all live in a flat
//! string-keyed store. The canvas engine talks to it through the
//! [`KvStore`] trait; the shipped backend serializes each key to its own
//! JSON file under the platform data directory.

use crate::board::BoardStore;
use crate::constants::DATA_DIR_NAME;
use crate::types::{BoardItem, ItemId, ItemPatch};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while reading or writing the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error from serde_json
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No usable data directory on this platform
    #[error("No data directory available")]
    NoDataDir,
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Flat string-keyed persistence. Values are opaque JSON.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn delete(&self, key: &str) -> StoreResult<()>;
}

/// Typed convenience layer over any [`KvStore`].
pub fn get_json<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> StoreResult<Option<T>> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn set_json<T: Serialize>(store: &dyn KvStore, key: &str, value: &T) -> StoreResult<()> {
    store.set(key, &serde_json::to_string(value)?)
}

// ==================== File-backed store ====================

/// One JSON file per key under a root directory.
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Store rooted at the platform data directory.
    pub fn default_location() -> StoreResult<Self> {
        let base = dirs::data_dir().ok_or(StoreError::NoDataDir)?;
        Self::new(base.join(DATA_DIR_NAME))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are dotted identifiers; anything that could escape the
        // root directory is flattened.
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{safe}.json"))
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        // Write-then-rename so a crash mid-write never truncates the key.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

// ==================== In-memory store ====================

/// HashMap-backed store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

// ==================== Board persistence ====================

fn board_key(board_id: &str) -> String {
    format!("board.{board_id}")
}

/// Board-item persistence on top of a [`KvStore`]. Implements the
/// [`BoardStore`] collaborator the canvas persists through.
pub struct KvBoardStore {
    kv: Arc<dyn KvStore>,
}

impl KvBoardStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    pub fn load_items(&self, board_id: &str) -> StoreResult<Vec<BoardItem>> {
        Ok(get_json(self.kv.as_ref(), &board_key(board_id))?.unwrap_or_default())
    }

    pub fn save_items(&self, board_id: &str, items: &[BoardItem]) -> StoreResult<()> {
        set_json(self.kv.as_ref(), &board_key(board_id), &items)
    }

    fn mutate_items(&self, board_id: &str, f: impl FnOnce(&mut Vec<BoardItem>)) {
        let mut items = match self.load_items(board_id) {
            Ok(items) => items,
            Err(err) => {
                warn!(board = board_id, error = %err, "failed to load board for update");
                return;
            }
        };
        f(&mut items);
        if let Err(err) = self.save_items(board_id, &items) {
            warn!(board = board_id, error = %err, "failed to persist board update");
        }
    }
}

impl BoardStore for KvBoardStore {
    fn update_item(&self, board_id: &str, item_id: ItemId, patch: &ItemPatch) {
        self.mutate_items(board_id, |items| {
            match items.iter_mut().find(|item| item.id == item_id) {
                Some(item) => patch.apply(item),
                None => debug!(board = board_id, item = item_id, "patch for unknown item"),
            }
        });
    }

    fn remove_item(&self, board_id: &str, item_id: ItemId) {
        self.mutate_items(board_id, |items| {
            items.retain(|item| item.id != item_id);
        });
    }
}

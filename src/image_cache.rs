//! Per-board image cache.
//!
//! Lazily resolves board items to decoded image bytes (and natural
//! dimensions) on the background pool. Results are keyed by item id and
//! retained across re-renders, so panning and zooming never re-fetch.
//! Failed resolutions become placeholders and are not retried.
//!
//! All mutation happens behind one mutex; the only cross-board discipline
//! is the cancellation flag, checked before each completion merges so a
//! resolution that outlives its board can never write into a newer board's
//! cache.

use crate::background::BackgroundExecutor;
use crate::files::{FileService, FileResult};
use crate::types::{BoardItem, ItemId};
use image::GenericImageView;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Decoded result for one item.
pub struct LoadedImage {
    /// Encoded bytes as read from disk (the host view hands these to its
    /// renderer; decoding for display stays the host's concern).
    pub bytes: Vec<u8>,
    /// Natural width in pixels
    pub width: u32,
    /// Natural height in pixels
    pub height: u32,
}

impl LoadedImage {
    /// Natural width over height.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Observable state of one cache slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryState {
    Pending,
    Loaded,
    Failed,
}

enum CacheEntry {
    Pending,
    Loaded(Arc<LoadedImage>),
    Failed,
}

struct CacheInner {
    entries: Mutex<HashMap<ItemId, CacheEntry>>,
    cancelled: AtomicBool,
}

impl CacheInner {
    /// Merge one resolution result. Discards the result when the board has
    /// been closed, or when the slot is no longer Pending (the entry may
    /// have been pruned and re-requested, or filled by the host).
    fn finish(&self, id: ItemId, result: Option<LoadedImage>) {
        if self.cancelled.load(Ordering::SeqCst) {
            debug!(item = id, "dropping image result for closed board");
            return;
        }
        let mut entries = self.entries.lock();
        if !matches!(entries.get(&id), Some(CacheEntry::Pending)) {
            return;
        }
        let entry = match result {
            Some(image) => CacheEntry::Loaded(Arc::new(image)),
            None => CacheEntry::Failed,
        };
        entries.insert(id, entry);
    }
}

pub struct BoardImageCache {
    inner: Arc<CacheInner>,
}

impl Default for BoardImageCache {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardImageCache {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CacheInner {
                entries: Mutex::new(HashMap::new()),
                cancelled: AtomicBool::new(false),
            }),
        }
    }

    /// Begin resolving an item unless a slot for it already exists.
    pub fn request(
        &self,
        item: &BoardItem,
        files: &Arc<dyn FileService>,
        executor: &BackgroundExecutor,
    ) {
        {
            let mut entries = self.inner.entries.lock();
            if entries.contains_key(&item.id) {
                return;
            }
            entries.insert(item.id, CacheEntry::Pending);
        }

        let inner = Arc::clone(&self.inner);
        let files = Arc::clone(files);
        let id = item.id;
        let path = item.path.clone();
        executor.spawn(move || {
            let result = resolve(files.as_ref(), &path)
                .map_err(|e| debug!(item = id, error = %e, "image resolution failed"))
                .ok();
            inner.finish(id, result);
        });
    }

    /// Request every item that has no slot yet.
    pub fn request_missing(
        &self,
        items: &[BoardItem],
        files: &Arc<dyn FileService>,
        executor: &BackgroundExecutor,
    ) {
        for item in items {
            self.request(item, files, executor);
        }
    }

    pub fn get(&self, id: ItemId) -> Option<Arc<LoadedImage>> {
        match self.inner.entries.lock().get(&id) {
            Some(CacheEntry::Loaded(image)) => Some(Arc::clone(image)),
            _ => None,
        }
    }

    /// Natural aspect ratio, if the item's image has been decoded.
    pub fn aspect_ratio(&self, id: ItemId) -> Option<f32> {
        self.get(id).map(|image| image.aspect_ratio())
    }

    pub fn entry_state(&self, id: ItemId) -> Option<EntryState> {
        self.inner.entries.lock().get(&id).map(|e| match e {
            CacheEntry::Pending => EntryState::Pending,
            CacheEntry::Loaded(_) => EntryState::Loaded,
            CacheEntry::Failed => EntryState::Failed,
        })
    }

    /// Adopt an already-decoded image (e.g. a clipboard paste the host has
    /// in hand), bypassing the background resolution.
    pub fn insert_loaded(&self, id: ItemId, image: LoadedImage) {
        self.inner
            .entries
            .lock()
            .insert(id, CacheEntry::Loaded(Arc::new(image)));
    }

    /// Drop slots for items no longer on the board.
    pub fn retain(&self, valid_ids: &HashSet<ItemId>) {
        self.inner
            .entries
            .lock()
            .retain(|id, _| valid_ids.contains(id));
    }

    /// Mark the board closed: in-flight resolutions will discard their
    /// results rather than write into a stale cache.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.lock().is_empty()
    }
}

fn resolve(files: &dyn FileService, path: &Path) -> FileResult<LoadedImage> {
    let bytes = files.read_image(path)?;
    let decoded = image::load_from_memory(&bytes)?;
    let (width, height) = decoded.dimensions();
    Ok(LoadedImage {
        bytes,
        width,
        height,
    })
}

//! The moodboard canvas controller.
//!
//! `MoodboardCanvas` owns everything the canvas subsystem is responsible
//! for: the camera, the selection set, the gesture state machine, the
//! spatial index and the per-board image cache. It holds the latest scene
//! snapshot ([`Board`]) and forwards durable mutations to the external
//! [`BoardStore`]. Pointer handlers live in the `input` module.

use crate::background::BackgroundExecutor;
use crate::board::{Board, BoardStore};
use crate::camera::Camera;
use crate::files::FileService;
use crate::image_cache::{BoardImageCache, LoadedImage};
use crate::input::GestureState;
use crate::selection::SelectionModel;
use crate::spatial_index::SpatialIndex;
use crate::types::{BoardItem, ItemId, ItemPatch, Rect};
use glam::Vec2;
use std::sync::Arc;
use tracing::debug;

pub struct MoodboardCanvas {
    pub(crate) board: Board,
    pub camera: Camera,
    pub(crate) selection: SelectionModel,
    pub(crate) gesture: GestureState,
    /// Canvas element top-left in window coordinates
    pub(crate) origin: Vec2,
    pub(crate) index: SpatialIndex,
    pub(crate) images: BoardImageCache,
    pub(crate) store: Arc<dyn BoardStore>,
    files: Arc<dyn FileService>,
    executor: BackgroundExecutor,
}

impl MoodboardCanvas {
    pub fn new(
        board: Board,
        store: Arc<dyn BoardStore>,
        files: Arc<dyn FileService>,
        executor: BackgroundExecutor,
    ) -> Self {
        let images = BoardImageCache::new();
        images.request_missing(board.items(), &files, &executor);
        let mut canvas = Self {
            board,
            camera: Camera::default(),
            selection: SelectionModel::new(),
            gesture: GestureState::default(),
            origin: Vec2::ZERO,
            index: SpatialIndex::new(),
            images,
            store,
            files,
            executor,
        };
        canvas.rebuild_index();
        canvas
    }

    // ==================== Host-facing surface ====================

    /// Current rendered transform for background grid rendering.
    pub fn transform(&self) -> (Vec2, f32) {
        (self.camera.pan, self.camera.zoom)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn images(&self) -> &BoardImageCache {
        &self.images
    }

    /// Tell the canvas where its element sits in window coordinates.
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    /// Window coordinates -> element-local screen coordinates.
    pub(crate) fn to_local(&self, window_pos: Vec2) -> Vec2 {
        window_pos - self.origin
    }

    /// Item bounding rect in canvas space. Height comes from the decoded
    /// aspect ratio; until the image loads it is approximated by the width.
    pub fn item_rect(&self, item: &BoardItem) -> Rect {
        item.rect(self.images.aspect_ratio(item.id))
    }

    /// Item rect in element-local screen space, for host layout.
    pub fn item_screen_rect(&self, id: ItemId) -> Option<Rect> {
        let item = self.board.get_item(id)?;
        let rect = self.item_rect(item);
        Some(Rect {
            min: self.camera.canvas_to_screen(rect.min),
            max: self.camera.canvas_to_screen(rect.max),
        })
    }

    // ==================== Scene synchronization ====================

    /// Adopt a fresh snapshot from the owning store: prune the selection,
    /// rebuild the index and drop cached images for vanished items.
    pub fn sync_items(&mut self, items: Vec<BoardItem>) {
        self.board.replace_items(items);
        let ids = self.board.item_ids();
        self.selection.prune(&ids);
        self.images.retain(&ids);
        self.images
            .request_missing(self.board.items(), &self.files, &self.executor);
        self.rebuild_index();
    }

    /// Remove one item: scene, store, selection and index all updated.
    /// A no-op when the id is already gone.
    pub fn request_remove(&mut self, id: ItemId) {
        if self.board.request_remove(id) {
            self.store.remove_item(self.board.id(), id);
            self.index.remove(id);
            let ids = self.board.item_ids();
            self.selection.prune(&ids);
        }
    }

    /// Remove every selected item.
    pub fn remove_selected(&mut self) {
        let ids: Vec<ItemId> = self.selection.ids().collect();
        for id in ids {
            self.request_remove(id);
        }
    }

    /// Escape clears the selection. A mid-flight gesture is deliberately
    /// left running; it tracks its own item set.
    pub fn handle_escape(&mut self) {
        self.selection.clear();
    }

    /// Adopt an image the host already decoded (clipboard paste).
    pub fn note_loaded_image(&mut self, id: ItemId, image: LoadedImage) {
        self.images.insert_loaded(id, image);
        if let Some(item) = self.board.get_item(id) {
            let rect = self.item_rect(item);
            self.index.update(id, rect);
        }
    }

    // ==================== Internals ====================

    pub(crate) fn rebuild_index(&mut self) {
        let rects: Vec<(ItemId, Rect)> = self
            .board
            .items()
            .iter()
            .map(|item| (item.id, self.item_rect(item)))
            .collect();
        self.index.rebuild(rects);
    }

    pub(crate) fn refresh_index_entry(&mut self, id: ItemId) {
        if let Some(item) = self.board.get_item(id) {
            let rect = self.item_rect(item);
            self.index.update(id, rect);
        } else {
            self.index.remove(id);
        }
    }

    /// Topmost item whose rect contains the canvas point, by reverse
    /// z-order. The spatial index narrows the candidates; the authoritative
    /// rect check runs on the live items.
    pub(crate) fn hit_test(&self, canvas_point: Vec2) -> Option<ItemId> {
        let candidates: std::collections::HashSet<ItemId> = self
            .index
            .query_point(canvas_point.x, canvas_point.y)
            .into_iter()
            .collect();
        self.board
            .items()
            .iter()
            .rev()
            .filter(|item| candidates.contains(&item.id))
            .find(|item| self.item_rect(item).contains(canvas_point))
            .map(|item| item.id)
    }

    pub(crate) fn persist_position(&self, id: ItemId) {
        if let Some(item) = self.board.get_item(id) {
            self.store
                .update_item(self.board.id(), id, &ItemPatch::move_to(item.x, item.y));
        } else {
            debug!(item = id, "skipping position persist for removed item");
        }
    }

    pub(crate) fn persist_width(&self, id: ItemId) {
        if let Some(item) = self.board.get_item(id) {
            self.store
                .update_item(self.board.id(), id, &ItemPatch::resize_to(item.width));
        }
    }
}

impl Drop for MoodboardCanvas {
    fn drop(&mut self) {
        // Closing the board: in-flight image resolutions must not write
        // into whatever cache a reopened board builds next.
        self.images.cancel();
    }
}

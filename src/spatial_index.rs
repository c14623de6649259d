//! R-tree spatial index for canvas hit testing.
//!
//! Reduces point queries from O(n) to O(log n). The index stores item
//! bounding rectangles in canvas space; callers re-check candidates against
//! the authoritative item rects, so a slightly stale entry (an aspect ratio
//! that arrived after the last rebuild) is harmless.

use crate::types::{ItemId, Rect};
use rstar::{RTree, RTreeObject, AABB};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
struct SpatialEntry {
    item_id: ItemId,
    min: [f32; 2],
    max: [f32; 2],
}

impl SpatialEntry {
    fn new(item_id: ItemId, rect: Rect) -> Self {
        Self {
            item_id,
            min: [rect.min.x, rect.min.y],
            max: [rect.max.x, rect.max.y],
        }
    }

    fn rect(&self) -> Rect {
        Rect {
            min: self.min.into(),
            max: self.max.into(),
        }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.item_id == other.item_id
    }
}

#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<ItemId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rects<I>(rects: I) -> Self
    where
        I: IntoIterator<Item = (ItemId, Rect)>,
    {
        let entries: Vec<SpatialEntry> = rects
            .into_iter()
            .map(|(id, rect)| SpatialEntry::new(id, rect))
            .collect();
        let map = entries.iter().map(|e| (e.item_id, *e)).collect();
        Self {
            tree: RTree::bulk_load(entries),
            entries: map,
        }
    }

    pub fn insert(&mut self, item_id: ItemId, rect: Rect) {
        if let Some(old) = self.entries.remove(&item_id) {
            self.tree.remove(&old);
        }
        let entry = SpatialEntry::new(item_id, rect);
        self.tree.insert(entry);
        self.entries.insert(item_id, entry);
    }

    pub fn update(&mut self, item_id: ItemId, rect: Rect) {
        self.insert(item_id, rect);
    }

    pub fn remove(&mut self, item_id: ItemId) -> bool {
        match self.entries.remove(&item_id) {
            Some(entry) => {
                self.tree.remove(&entry);
                true
            }
            None => false,
        }
    }

    /// Ids of entries whose rectangle contains the point (closed test).
    pub fn query_point(&self, x: f32, y: f32) -> Vec<ItemId> {
        let envelope = AABB::from_point([x, y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|e| e.rect().contains([x, y].into()))
            .map(|e| e.item_id)
            .collect()
    }

    /// Ids of entries that openly intersect the rectangle. The R-tree's own
    /// envelope test is closed, so borderline candidates are re-filtered.
    pub fn query_rect(&self, rect: &Rect) -> Vec<ItemId> {
        let envelope = AABB::from_corners([rect.min.x, rect.min.y], [rect.max.x, rect.max.y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|e| e.rect().intersects(rect))
            .map(|e| e.item_id)
            .collect()
    }

    pub fn rebuild<I>(&mut self, rects: I)
    where
        I: IntoIterator<Item = (ItemId, Rect)>,
    {
        *self = Self::from_rects(rects);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

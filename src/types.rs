//! Core types for the Moodcrate data model.
//!
//! This module defines the fundamental data structures shared across the
//! application: board items placed on a moodboard canvas, the library records
//! (collections, tags, moodboards), and the small geometry helpers the canvas
//! core is built on.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Identifier for an item placed on a moodboard.
pub type ItemId = u64;

/// An image reference placed on a moodboard canvas.
///
/// Height is intentionally not stored: it is derived at render time from the
/// image's intrinsic aspect ratio scaled by `width`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardItem {
    /// Unique identifier within the board
    pub id: ItemId,
    /// Path to the backing image file
    pub path: PathBuf,
    /// X position in canvas coordinates
    pub x: f32,
    /// Y position in canvas coordinates
    pub y: f32,
    /// Width in canvas units; height follows the aspect ratio
    pub width: f32,
}

impl BoardItem {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Bounding rectangle in canvas space. `aspect_ratio` is natural
    /// width over height; when the image has not been decoded yet the
    /// height is approximated by the width (a square).
    pub fn rect(&self, aspect_ratio: Option<f32>) -> Rect {
        let height = match aspect_ratio {
            Some(ratio) if ratio > 0.0 => self.width / ratio,
            _ => self.width,
        };
        Rect::from_pos_size(self.position(), Vec2::new(self.width, height))
    }
}

/// Partial update to a board item, as sent to the persistence layer.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ItemPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
}

impl ItemPatch {
    pub fn move_to(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: None,
        }
    }

    pub fn resize_to(width: f32) -> Self {
        Self {
            x: None,
            y: None,
            width: Some(width),
        }
    }

    /// Apply this patch to an item. The width floor holds everywhere a
    /// width can be written, not just in the resize gesture.
    pub fn apply(&self, item: &mut BoardItem) {
        if let Some(x) = self.x {
            item.x = x;
        }
        if let Some(y) = self.y {
            item.y = y;
        }
        if let Some(width) = self.width {
            item.width = width.max(crate::constants::MIN_ITEM_WIDTH);
        }
    }
}

/// Axis-aligned rectangle in either canvas or screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Build from two arbitrary corners, normalizing min/max per axis.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Open intersection test: rectangles that merely touch along an edge
    /// do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Closed containment test, used for point hit testing.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

// ============================================================================
// Library records
// ============================================================================

/// A folder-backed collection of images.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Collection {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Display name
    pub name: String,
    /// Folder the collection mirrors
    pub path: PathBuf,
}

/// A node in the hierarchical tag taxonomy. The taxonomy is stored as a flat
/// table; parent/child structure lives entirely in `parent_id`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Display name
    pub name: String,
    /// Parent tag id, `None` for root tags
    pub parent_id: Option<String>,
}

/// Moodboard metadata. The board's items are stored separately, keyed by
/// the board id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Moodboard {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Display name
    pub name: String,
}

//! Application-wide constants.
//!
//! Centralizes magic numbers and layout values to make the codebase
//! more maintainable and self-documenting.

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum zoom level
pub const MIN_ZOOM: f32 = 0.1;

/// Maximum zoom level
pub const MAX_ZOOM: f32 = 5.0;

/// Default zoom level
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Zoom factor per wheel-delta unit. A typical mouse wheel notch reports a
/// delta of ~120, which steps zoom by about 24%.
pub const ZOOM_SPEED: f32 = 0.002;

// ============================================================================
// Item Defaults
// ============================================================================

/// Minimum item width in canvas units, enforced at resize
pub const MIN_ITEM_WIDTH: f32 = 50.0;

/// Width assigned to freshly placed board items
pub const DEFAULT_ITEM_WIDTH: f32 = 320.0;

// ============================================================================
// Input Handling
// ============================================================================

/// Marquee drags smaller than this (in canvas units, both dimensions) are
/// treated as a click on empty space and clear the selection
pub const MARQUEE_CLICK_THRESHOLD: f32 = 3.0;

/// Size of the resize corner area in pixels (at zoom 1.0)
pub const RESIZE_HANDLE_SIZE: f32 = 16.0;

/// Resize corner tolerance in pixels past the item edge
pub const RESIZE_HANDLE_TOLERANCE: f32 = 5.0;

// ============================================================================
// Image Loading
// ============================================================================

/// Number of background workers resolving image bytes
pub const IMAGE_LOAD_WORKERS: usize = 4;

// ============================================================================
// Persistence
// ============================================================================

/// Directory name under the platform data dir where JSON state lives
pub const DATA_DIR_NAME: &str = "moodcrate";

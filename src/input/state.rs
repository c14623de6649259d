//! Gesture state machine - unified state management for pointer interactions.
//!
//! One explicit tagged state replaces independently-toggled flags, making
//! impossible states unrepresentable and mutual exclusion a structural
//! property rather than a convention.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> PanningCamera     (middle button down anywhere on the canvas)
//! Idle -> DraggingItems     (primary down on an item body)
//! Idle -> ResizingItem      (primary down on an item's resize corner)
//! Idle -> MarqueeSelecting  (primary down on empty canvas)
//!
//! Any  -> Idle              (matching button released - finalizes)
//! ```
//!
//! Presses while any gesture is active are ignored until its originating
//! button is released.

use super::PointerButton;
use crate::types::{ItemId, Rect};
use glam::Vec2;

#[derive(Clone, Debug, Default)]
pub enum GestureState {
    /// No active pointer operation
    #[default]
    Idle,

    /// Dragging one or more items (a group drag tracks every selected item)
    DraggingItems {
        /// Pointer position at press, element-local screen space
        origin_screen: Vec2,
        /// Canvas-space position of each tracked item at press
        origins: Vec<(ItemId, Vec2)>,
    },

    /// Resizing a single item by its bottom-right corner; width only
    ResizingItem {
        item_id: ItemId,
        /// Pointer x at press, element-local screen space
        origin_screen_x: f32,
        /// Item width at press
        origin_width: f32,
    },

    /// Panning the camera with the middle button
    PanningCamera {
        origin_screen: Vec2,
        origin_pan: Vec2,
    },

    /// Rubber-band selection anchored on empty canvas
    MarqueeSelecting {
        origin_canvas: Vec2,
        current_canvas: Vec2,
    },
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging_items(&self) -> bool {
        matches!(self, Self::DraggingItems { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::ResizingItem { .. })
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Self::PanningCamera { .. })
    }

    pub fn is_marquee_selecting(&self) -> bool {
        matches!(self, Self::MarqueeSelecting { .. })
    }

    /// The button whose release finalizes this gesture.
    pub fn originating_button(&self) -> Option<PointerButton> {
        match self {
            Self::Idle => None,
            Self::PanningCamera { .. } => Some(PointerButton::Middle),
            _ => Some(PointerButton::Primary),
        }
    }

    pub fn start_dragging(&mut self, origin_screen: Vec2, origins: Vec<(ItemId, Vec2)>) {
        *self = Self::DraggingItems {
            origin_screen,
            origins,
        };
    }

    pub fn start_resizing(&mut self, item_id: ItemId, origin_screen_x: f32, origin_width: f32) {
        *self = Self::ResizingItem {
            item_id,
            origin_screen_x,
            origin_width,
        };
    }

    pub fn start_panning(&mut self, origin_screen: Vec2, origin_pan: Vec2) {
        *self = Self::PanningCamera {
            origin_screen,
            origin_pan,
        };
    }

    pub fn start_marquee(&mut self, origin_canvas: Vec2) {
        *self = Self::MarqueeSelecting {
            origin_canvas,
            current_canvas: origin_canvas,
        };
    }

    pub fn set_marquee_current(&mut self, canvas_point: Vec2) {
        if let Self::MarqueeSelecting { current_canvas, .. } = self {
            *current_canvas = canvas_point;
        }
    }

    /// The marquee rectangle in canvas space, while marquee-selecting.
    pub fn marquee_rect(&self) -> Option<Rect> {
        match self {
            Self::MarqueeSelecting {
                origin_canvas,
                current_canvas,
            } => Some(Rect::from_corners(*origin_canvas, *current_canvas)),
            _ => None,
        }
    }

    /// The item being resized, if any.
    pub fn resizing_item(&self) -> Option<ItemId> {
        match self {
            Self::ResizingItem { item_id, .. } => Some(*item_id),
            _ => None,
        }
    }

    /// Ids tracked by an active item drag.
    pub fn dragged_items(&self) -> Option<Vec<ItemId>> {
        match self {
            Self::DraggingItems { origins, .. } => {
                Some(origins.iter().map(|(id, _)| *id).collect())
            }
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}

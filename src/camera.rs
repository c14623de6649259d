//! Pan/zoom camera for the moodboard canvas.
//!
//! The camera owns the mapping between screen space (pointer coordinates,
//! local to the canvas element) and canvas space (the zoom/pan-independent
//! coordinate system items live in). Conversions are pure functions of the
//! current camera state; nothing here touches the scene.

use crate::constants::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, ZOOM_SPEED};
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Pan offset in screen pixels. Unconstrained.
    pub pan: Vec2,
    /// Zoom factor, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Camera {
    /// Convert a point local to the canvas element into canvas space.
    #[inline]
    pub fn screen_to_canvas(&self, screen: Vec2) -> Vec2 {
        (screen - self.pan) / self.zoom
    }

    /// Convert a canvas-space point into element-local screen space.
    #[inline]
    pub fn canvas_to_screen(&self, canvas: Vec2) -> Vec2 {
        canvas * self.zoom + self.pan
    }

    /// Convert a screen-space delta into canvas space (for drag operations).
    #[inline]
    pub fn delta_screen_to_canvas(&self, delta: Vec2) -> Vec2 {
        delta / self.zoom
    }

    /// Cursor-anchored zoom: rescales pan so the canvas point under `anchor`
    /// stays put on screen while the zoom changes. Returns false when the
    /// zoom is already pinned at its limit and nothing moved.
    pub fn zoom_at(&mut self, anchor: Vec2, wheel_delta: f32) -> bool {
        let new_zoom = (self.zoom * (1.0 + (-wheel_delta * ZOOM_SPEED))).clamp(MIN_ZOOM, MAX_ZOOM);
        if (new_zoom - self.zoom).abs() < f32::EPSILON {
            return false;
        }
        let scale = new_zoom / self.zoom;
        self.pan = anchor - (anchor - self.pan) * scale;
        self.zoom = new_zoom;
        true
    }

    /// Translate the camera by a screen-space delta (screen-pixel rate,
    /// independent of zoom).
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

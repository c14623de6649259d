//! Wheel and keyboard-driven view transforms.

use crate::canvas::MoodboardCanvas;
use crate::input::Modifiers;
use glam::Vec2;

impl MoodboardCanvas {
    /// Scroll wheel: zoom about the cursor so the canvas point under it
    /// stays put. Wheel events always zoom; panning is a drag gesture.
    pub fn handle_wheel(&mut self, position: Vec2, wheel_delta: f32) -> bool {
        let local = self.to_local(position);
        self.camera.zoom_at(local, wheel_delta)
    }

    /// Arrow-key nudge of the camera in screen pixels. Shift multiplies
    /// the step, matching the usual coarse-nudge convention.
    pub fn nudge_camera(&mut self, direction: Vec2, modifiers: Modifiers) {
        const STEP: f32 = 40.0;
        const COARSE: f32 = 4.0;
        let step = if modifiers.shift { STEP * COARSE } else { STEP };
        self.camera.pan_by(direction * step);
    }

    /// Reset to the default view.
    pub fn reset_view(&mut self) {
        self.camera.reset();
    }
}

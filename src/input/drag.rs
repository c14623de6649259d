//! Pointer-move handling for each in-flight gesture.

use crate::canvas::MoodboardCanvas;
use crate::constants::MIN_ITEM_WIDTH;
use crate::input::GestureState;
use glam::Vec2;

impl MoodboardCanvas {
    /// Advance whatever gesture is running. Moves with no gesture active
    /// are hover only and fall through untouched.
    pub fn handle_pointer_move(&mut self, position: Vec2) {
        let local = self.to_local(position);
        match self.gesture.clone() {
            GestureState::Idle => {}
            GestureState::DraggingItems {
                origin_screen,
                origins,
            } => {
                // Screen delta shrinks by the zoom factor so the items
                // track the cursor at any magnification.
                let delta = self.camera.delta_screen_to_canvas(local - origin_screen);
                for (id, origin) in &origins {
                    let target = *origin + delta;
                    if self.board.request_move(*id, target.x, target.y) {
                        self.refresh_index_entry(*id);
                    }
                }
            }
            GestureState::ResizingItem {
                item_id,
                origin_screen_x,
                origin_width,
            } => {
                let dx = (local.x - origin_screen_x) / self.camera.zoom;
                let width = (origin_width + dx).max(MIN_ITEM_WIDTH);
                if self.board.request_resize(item_id, width) {
                    self.refresh_index_entry(item_id);
                }
            }
            GestureState::PanningCamera {
                origin_screen,
                origin_pan,
            } => {
                // One screen pixel of cursor travel is one pixel of pan,
                // independent of zoom.
                self.camera.pan = origin_pan + (local - origin_screen);
            }
            GestureState::MarqueeSelecting { .. } => {
                let canvas_point = self.camera.screen_to_canvas(local);
                self.gesture.set_marquee_current(canvas_point);
            }
        }
    }
}

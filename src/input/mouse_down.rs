//! Pointer-press handling; gestures start here.

use crate::canvas::MoodboardCanvas;
use crate::constants::{RESIZE_HANDLE_SIZE, RESIZE_HANDLE_TOLERANCE};
use crate::input::{PointerButton, PointerEvent};
use crate::types::ItemId;
use glam::Vec2;
use tracing::trace;

impl MoodboardCanvas {
    /// A press while a gesture is active is swallowed; the active gesture
    /// keeps running until its own button is released.
    pub fn handle_pointer_down(&mut self, event: PointerEvent) {
        if !self.gesture.is_idle() {
            return;
        }
        let local = self.to_local(event.position);
        match event.button {
            PointerButton::Middle => {
                self.gesture.start_panning(local, self.camera.pan);
            }
            PointerButton::Primary => self.primary_down(local, event),
            PointerButton::Secondary => {}
        }
    }

    fn primary_down(&mut self, local: Vec2, event: PointerEvent) {
        let canvas_point = self.camera.screen_to_canvas(local);
        let Some(hit) = self.hit_test(canvas_point) else {
            // Empty canvas. The selection survives until release decides
            // between a click-clear and a marquee replace.
            trace!("marquee start at {canvas_point:?}");
            self.gesture.start_marquee(canvas_point);
            return;
        };

        // The resize handle wins over selection: grabbing a corner never
        // reshuffles which items are selected.
        if self.hits_resize_handle(hit, local) {
            let width = self
                .board
                .get_item(hit)
                .map(|item| item.width)
                .unwrap_or_default();
            self.gesture.start_resizing(hit, local.x, width);
            return;
        }

        if event.modifiers.shift {
            self.selection.toggle(hit);
            return;
        }

        if !self.selection.contains(hit) {
            self.selection.select_only(hit);
        }
        let origins: Vec<(ItemId, Vec2)> = self
            .selection
            .ids()
            .filter_map(|id| self.board.get_item(id).map(|item| (id, item.position())))
            .collect();
        self.gesture.start_dragging(local, origins);
    }

    /// The handle is a square hanging off the item's bottom-right corner,
    /// sized in screen pixels with a fixed slop band so it stays grabbable
    /// when zoomed out.
    fn hits_resize_handle(&self, id: ItemId, local: Vec2) -> bool {
        let Some(rect) = self.item_screen_rect(id) else {
            return false;
        };
        let corner = rect.max;
        let reach = RESIZE_HANDLE_SIZE + RESIZE_HANDLE_TOLERANCE;
        local.x >= corner.x - reach
            && local.x <= corner.x + RESIZE_HANDLE_TOLERANCE
            && local.y >= corner.y - reach
            && local.y <= corner.y + RESIZE_HANDLE_TOLERANCE
    }
}

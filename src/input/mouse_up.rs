//! Pointer-release handling; gestures finish and persist here.

use crate::canvas::MoodboardCanvas;
use crate::constants::MARQUEE_CLICK_THRESHOLD;
use crate::input::{GestureState, PointerEvent};
use crate::types::{ItemId, Rect};
use tracing::trace;

impl MoodboardCanvas {
    /// Only the button that started the gesture may finish it; releases of
    /// any other button mid-gesture are swallowed.
    pub fn handle_pointer_up(&mut self, event: PointerEvent) {
        if self.gesture.originating_button() != Some(event.button) {
            return;
        }
        match std::mem::take(&mut self.gesture) {
            GestureState::Idle => {}
            GestureState::DraggingItems { origins, .. } => {
                for (id, _) in origins {
                    self.persist_position(id);
                }
            }
            GestureState::ResizingItem { item_id, .. } => {
                self.persist_width(item_id);
            }
            GestureState::PanningCamera { .. } => {}
            GestureState::MarqueeSelecting {
                origin_canvas,
                current_canvas,
            } => {
                let rect = Rect::from_corners(origin_canvas, current_canvas);
                self.finish_marquee(rect);
            }
        }
    }

    /// A marquee smaller than the click threshold in both dimensions is a
    /// click on empty canvas and clears the selection. Anything larger
    /// replaces the selection with the items it crosses.
    fn finish_marquee(&mut self, rect: Rect) {
        if rect.width() < MARQUEE_CLICK_THRESHOLD && rect.height() < MARQUEE_CLICK_THRESHOLD {
            trace!("marquee collapsed to a click, clearing selection");
            self.selection.clear();
            return;
        }
        let hits: Vec<ItemId> = self
            .board
            .items()
            .iter()
            .filter(|item| self.item_rect(item).intersects(&rect))
            .map(|item| item.id)
            .collect();
        self.selection.set_all(hits);
    }
}

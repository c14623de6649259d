//! Pointer gesture state machine tests: drag, resize, pan, marquee.
//!
//! All canvases here use `NullFiles`, so every item renders as a square
//! (height falls back to width until an image decodes).

use crate::helpers::{vec2, TestCanvasBuilder};
use moodcrate::constants::MIN_ITEM_WIDTH;
use moodcrate::{GestureState, Modifiers, PointerButton, PointerEvent};

// ============================================================================
// Press and selection
// ============================================================================

#[test]
fn press_on_item_selects_and_starts_drag() {
    let (mut canvas, _store) = TestCanvasBuilder::new().with_item(0.0, 0.0, 100.0).build();
    canvas.handle_pointer_down(PointerEvent::primary(vec2(50.0, 50.0)));

    assert!(canvas.selection().contains(1));
    assert!(canvas.gesture().is_dragging_items());
}

#[test]
fn press_on_empty_canvas_starts_marquee_without_clearing_selection() {
    let (mut canvas, _store) = TestCanvasBuilder::new().with_item(0.0, 0.0, 100.0).build();
    canvas.handle_pointer_down(PointerEvent::primary(vec2(50.0, 50.0)));
    canvas.handle_pointer_up(PointerEvent::primary(vec2(50.0, 50.0)));
    assert!(canvas.selection().contains(1));

    canvas.handle_pointer_down(PointerEvent::primary(vec2(500.0, 500.0)));
    assert!(canvas.gesture().is_marquee_selecting());
    // The selection only resolves on release.
    assert!(canvas.selection().contains(1));
}

#[test]
fn shift_press_toggles_membership_without_gesture() {
    let (mut canvas, _store) = TestCanvasBuilder::new()
        .with_item(0.0, 0.0, 100.0)
        .with_item(300.0, 0.0, 100.0)
        .build();

    canvas.handle_pointer_down(PointerEvent::primary(vec2(50.0, 50.0)));
    canvas.handle_pointer_up(PointerEvent::primary(vec2(50.0, 50.0)));

    let shift_click = PointerEvent::primary(vec2(350.0, 50.0)).with_modifiers(Modifiers::shift());
    canvas.handle_pointer_down(shift_click);
    assert!(canvas.gesture().is_idle());
    assert_eq!(canvas.selection().len(), 2);

    // Shift-click again removes it.
    canvas.handle_pointer_down(shift_click);
    assert!(!canvas.selection().contains(2));
    assert!(canvas.selection().contains(1));
}

#[test]
fn press_on_already_selected_item_keeps_group() {
    let (mut canvas, _store) = TestCanvasBuilder::new()
        .with_item(0.0, 0.0, 100.0)
        .with_item(300.0, 0.0, 100.0)
        .build();

    canvas.handle_pointer_down(PointerEvent::primary(vec2(50.0, 50.0)));
    canvas.handle_pointer_up(PointerEvent::primary(vec2(50.0, 50.0)));
    let shift_click = PointerEvent::primary(vec2(350.0, 50.0)).with_modifiers(Modifiers::shift());
    canvas.handle_pointer_down(shift_click);

    // Plain press on a member of the selection must not collapse it.
    canvas.handle_pointer_down(PointerEvent::primary(vec2(50.0, 50.0)));
    assert_eq!(canvas.selection().len(), 2);
    assert_eq!(
        canvas.gesture().dragged_items().map(|ids| ids.len()),
        Some(2)
    );
}

#[test]
fn topmost_item_wins_hit_test() {
    // Items overlap; the later item is above.
    let (mut canvas, _store) = TestCanvasBuilder::new()
        .with_item(0.0, 0.0, 100.0)
        .with_item(50.0, 50.0, 100.0)
        .build();

    canvas.handle_pointer_down(PointerEvent::primary(vec2(75.0, 75.0)));
    assert!(canvas.selection().contains(2));
    assert!(!canvas.selection().contains(1));
}

#[test]
fn presses_are_ignored_while_a_gesture_runs() {
    let (mut canvas, _store) = TestCanvasBuilder::new()
        .with_item(0.0, 0.0, 100.0)
        .with_item(300.0, 0.0, 100.0)
        .build();

    canvas.handle_pointer_down(PointerEvent::primary(vec2(50.0, 50.0)));
    assert!(canvas.gesture().is_dragging_items());

    // A second press (any button) is swallowed.
    canvas.handle_pointer_down(PointerEvent::middle(vec2(350.0, 50.0)));
    canvas.handle_pointer_down(PointerEvent::primary(vec2(350.0, 50.0)));
    assert!(canvas.gesture().is_dragging_items());
    assert!(!canvas.selection().contains(2));
}

// ============================================================================
// Dragging
// ============================================================================

#[test]
fn drag_moves_selected_items_live() {
    let (mut canvas, store) = TestCanvasBuilder::new().with_item(10.0, 10.0, 100.0).build();

    canvas.handle_pointer_down(PointerEvent::primary(vec2(50.0, 50.0)));
    canvas.handle_pointer_move(vec2(80.0, 40.0));

    let item = canvas.board().get_item(1).unwrap();
    assert_eq!((item.x, item.y), (40.0, 0.0));
    // Nothing persisted mid-drag.
    assert_eq!(store.update_count(), 0);
}

#[test]
fn drag_delta_is_divided_by_zoom() {
    let (mut canvas, _store) = TestCanvasBuilder::new().with_item(0.0, 0.0, 100.0).build();
    // Zoomed 2x with no pan: screen (60,60) is canvas (30,30).
    canvas.camera.zoom = 2.0;

    canvas.handle_pointer_down(PointerEvent::primary(vec2(60.0, 60.0)));
    assert!(canvas.gesture().is_dragging_items());
    canvas.handle_pointer_move(vec2(160.0, 60.0));

    let item = canvas.board().get_item(1).unwrap();
    assert_eq!((item.x, item.y), (50.0, 0.0));
}

#[test]
fn release_persists_each_dragged_item_once() {
    let (mut canvas, store) = TestCanvasBuilder::new()
        .with_item(0.0, 0.0, 100.0)
        .with_item(300.0, 0.0, 100.0)
        .build();

    // Shift-clicks build the selection without starting a gesture.
    let shift1 = PointerEvent::primary(vec2(50.0, 50.0)).with_modifiers(Modifiers::shift());
    let shift2 = PointerEvent::primary(vec2(350.0, 50.0)).with_modifiers(Modifiers::shift());
    canvas.handle_pointer_down(shift1);
    canvas.handle_pointer_down(shift2);
    assert_eq!(canvas.selection().len(), 2);

    canvas.handle_pointer_down(PointerEvent::primary(vec2(50.0, 50.0)));
    canvas.handle_pointer_move(vec2(70.0, 50.0));
    canvas.handle_pointer_up(PointerEvent::primary(vec2(70.0, 50.0)));

    assert!(canvas.gesture().is_idle());
    let updates = store.updates.lock();
    assert_eq!(updates.len(), 2);
    assert!(updates.iter().all(|(board, _, _)| board == "test-board"));
    let moved: Vec<_> = updates.iter().map(|(_, id, _)| *id).collect();
    assert!(moved.contains(&1) && moved.contains(&2));
}

#[test]
fn group_drag_moves_every_member_by_the_same_delta() {
    let (mut canvas, _store) = TestCanvasBuilder::new()
        .with_item(0.0, 0.0, 100.0)
        .with_item(300.0, 0.0, 100.0)
        .with_item(0.0, 300.0, 100.0)
        .build();

    for point in [vec2(50.0, 50.0), vec2(350.0, 50.0), vec2(50.0, 350.0)] {
        canvas.handle_pointer_down(PointerEvent::primary(point).with_modifiers(Modifiers::shift()));
    }
    assert_eq!(canvas.selection().len(), 3);

    canvas.handle_pointer_down(PointerEvent::primary(vec2(50.0, 50.0)));
    canvas.handle_pointer_move(vec2(75.0, 40.0));

    for (id, origin) in [(1, (0.0, 0.0)), (2, (300.0, 0.0)), (3, (0.0, 300.0))] {
        let item = canvas.board().get_item(id).unwrap();
        assert_eq!((item.x, item.y), (origin.0 + 25.0, origin.1 - 10.0));
    }
}

#[test]
fn presses_during_resize_move_nothing_else() {
    let (mut canvas, _store) = TestCanvasBuilder::new()
        .with_item(0.0, 0.0, 100.0)
        .with_item(300.0, 0.0, 100.0)
        .build();

    canvas.handle_pointer_down(PointerEvent::primary(vec2(95.0, 95.0)));
    assert_eq!(canvas.gesture().resizing_item(), Some(1));

    canvas.handle_pointer_down(PointerEvent::primary(vec2(350.0, 50.0)));
    assert_eq!(canvas.gesture().resizing_item(), Some(1));
    let b = canvas.board().get_item(2).unwrap();
    assert_eq!((b.x, b.y, b.width), (300.0, 0.0, 100.0));

    canvas.handle_pointer_up(PointerEvent::primary(vec2(95.0, 95.0)));
    assert!(canvas.gesture().is_idle());
}

#[test]
fn non_originating_button_release_is_ignored() {
    let (mut canvas, store) = TestCanvasBuilder::new().with_item(0.0, 0.0, 100.0).build();

    canvas.handle_pointer_down(PointerEvent::primary(vec2(50.0, 50.0)));
    canvas.handle_pointer_up(PointerEvent::middle(vec2(50.0, 50.0)));
    assert!(canvas.gesture().is_dragging_items());
    assert_eq!(store.update_count(), 0);

    canvas.handle_pointer_up(PointerEvent::primary(vec2(50.0, 50.0)));
    assert!(canvas.gesture().is_idle());
    assert_eq!(store.update_count(), 1);
}

// ============================================================================
// Resizing
// ============================================================================

#[test]
fn corner_press_starts_resize_without_touching_selection() {
    let (mut canvas, _store) = TestCanvasBuilder::new()
        .with_item(0.0, 0.0, 100.0)
        .with_item(300.0, 0.0, 100.0)
        .build();

    // Select item 2 first.
    canvas.handle_pointer_down(PointerEvent::primary(vec2(350.0, 50.0)));
    canvas.handle_pointer_up(PointerEvent::primary(vec2(350.0, 50.0)));

    // Grab item 1's bottom-right handle.
    canvas.handle_pointer_down(PointerEvent::primary(vec2(95.0, 95.0)));
    assert_eq!(canvas.gesture().resizing_item(), Some(1));
    assert!(canvas.selection().contains(2));
    assert!(!canvas.selection().contains(1));
}

#[test]
fn resize_tracks_horizontal_delta_and_persists_on_release() {
    let (mut canvas, store) = TestCanvasBuilder::new().with_item(0.0, 0.0, 100.0).build();

    canvas.handle_pointer_down(PointerEvent::primary(vec2(95.0, 95.0)));
    canvas.handle_pointer_move(vec2(145.0, 95.0));
    assert_eq!(canvas.board().get_item(1).unwrap().width, 150.0);
    assert_eq!(store.update_count(), 0);

    canvas.handle_pointer_up(PointerEvent::primary(vec2(145.0, 95.0)));
    let updates = store.updates.lock();
    assert_eq!(updates.len(), 1);
    let (_, id, patch) = &updates[0];
    assert_eq!(*id, 1);
    assert_eq!(patch.width, Some(150.0));
    assert_eq!(patch.x, None);
}

#[test]
fn resize_clamps_at_minimum_width() {
    let (mut canvas, _store) = TestCanvasBuilder::new().with_item(0.0, 0.0, 100.0).build();

    canvas.handle_pointer_down(PointerEvent::primary(vec2(95.0, 95.0)));
    canvas.handle_pointer_move(vec2(-400.0, 95.0));
    assert_eq!(canvas.board().get_item(1).unwrap().width, MIN_ITEM_WIDTH);

    // Width recovers along the same axis.
    canvas.handle_pointer_move(vec2(115.0, 95.0));
    assert_eq!(canvas.board().get_item(1).unwrap().width, 120.0);
}

// ============================================================================
// Panning
// ============================================================================

#[test]
fn middle_drag_pans_at_pixel_rate() {
    let (mut canvas, _store) = TestCanvasBuilder::new().with_item(0.0, 0.0, 100.0).build();
    canvas.camera.zoom = 2.5;

    canvas.handle_pointer_down(PointerEvent::middle(vec2(200.0, 200.0)));
    assert!(canvas.gesture().is_panning());
    canvas.handle_pointer_move(vec2(230.0, 180.0));
    assert_eq!(canvas.camera.pan, vec2(30.0, -20.0));

    canvas.handle_pointer_up(PointerEvent::middle(vec2(230.0, 180.0)));
    assert!(canvas.gesture().is_idle());
    // Item positions untouched by a pan.
    assert_eq!(canvas.board().get_item(1).unwrap().x, 0.0);
}

// ============================================================================
// Marquee
// ============================================================================

#[test]
fn tiny_marquee_release_clears_selection() {
    let (mut canvas, _store) = TestCanvasBuilder::new().with_item(0.0, 0.0, 100.0).build();
    canvas.handle_pointer_down(PointerEvent::primary(vec2(50.0, 50.0)));
    canvas.handle_pointer_up(PointerEvent::primary(vec2(50.0, 50.0)));
    assert!(canvas.selection().contains(1));

    canvas.handle_pointer_down(PointerEvent::primary(vec2(500.0, 500.0)));
    canvas.handle_pointer_move(vec2(501.0, 501.0));
    canvas.handle_pointer_up(PointerEvent::primary(vec2(501.0, 501.0)));

    assert!(canvas.selection().is_empty());
    assert!(canvas.gesture().is_idle());
}

#[test]
fn marquee_replaces_selection_with_crossed_items() {
    let (mut canvas, _store) = TestCanvasBuilder::new()
        .with_item(0.0, 0.0, 100.0)
        .with_item(300.0, 0.0, 100.0)
        .with_item(800.0, 800.0, 100.0)
        .build();

    // Pre-select the far item so replacement is observable.
    canvas.handle_pointer_down(PointerEvent::primary(vec2(850.0, 850.0)));
    canvas.handle_pointer_up(PointerEvent::primary(vec2(850.0, 850.0)));
    assert!(canvas.selection().contains(3));

    // Sweep across the first two items.
    canvas.handle_pointer_down(PointerEvent::primary(vec2(50.0, 150.0)));
    canvas.handle_pointer_move(vec2(350.0, 50.0));
    canvas.handle_pointer_up(PointerEvent::primary(vec2(350.0, 50.0)));

    assert!(canvas.selection().contains(1));
    assert!(canvas.selection().contains(2));
    assert!(!canvas.selection().contains(3));
}

#[test]
fn marquee_edge_touch_does_not_select() {
    let (mut canvas, _store) = TestCanvasBuilder::new().with_item(100.0, 100.0, 100.0).build();

    // Marquee ends exactly at the item's left edge: open intersection
    // means no hit.
    canvas.handle_pointer_down(PointerEvent::primary(vec2(0.0, 0.0)));
    canvas.handle_pointer_move(vec2(100.0, 300.0));
    canvas.handle_pointer_up(PointerEvent::primary(vec2(100.0, 300.0)));
    assert!(canvas.selection().is_empty());

    // One unit past the edge selects.
    canvas.handle_pointer_down(PointerEvent::primary(vec2(0.0, 0.0)));
    canvas.handle_pointer_move(vec2(101.0, 300.0));
    canvas.handle_pointer_up(PointerEvent::primary(vec2(101.0, 300.0)));
    assert!(canvas.selection().contains(1));
}

#[test]
fn marquee_rect_normalizes_any_drag_direction() {
    let (mut canvas, _store) = TestCanvasBuilder::new().with_item(0.0, 0.0, 100.0).build();

    // Drag up-left across the item.
    canvas.handle_pointer_down(PointerEvent::primary(vec2(400.0, 400.0)));
    canvas.handle_pointer_move(vec2(50.0, 50.0));
    let rect = canvas.gesture().marquee_rect().unwrap();
    assert!(rect.min.x < rect.max.x && rect.min.y < rect.max.y);

    canvas.handle_pointer_up(PointerEvent::primary(vec2(50.0, 50.0)));
    assert!(canvas.selection().contains(1));
}

#[test]
fn marquee_uses_canvas_space_under_zoom_and_pan() {
    let (mut canvas, _store) = TestCanvasBuilder::new().with_item(200.0, 200.0, 100.0).build();
    canvas.camera.zoom = 2.0;
    canvas.camera.pan = vec2(-100.0, -100.0);

    // Screen (300,300) -> canvas (200,200); screen (700,700) -> (400,400).
    canvas.handle_pointer_down(PointerEvent::primary(vec2(700.0, 700.0)));
    canvas.handle_pointer_move(vec2(300.0, 300.0));
    canvas.handle_pointer_up(PointerEvent::primary(vec2(300.0, 300.0)));
    assert!(canvas.selection().contains(1));
}

// ============================================================================
// Escape and removal
// ============================================================================

#[test]
fn escape_clears_selection_but_not_the_gesture() {
    let (mut canvas, _store) = TestCanvasBuilder::new().with_item(0.0, 0.0, 100.0).build();

    canvas.handle_pointer_down(PointerEvent::primary(vec2(50.0, 50.0)));
    canvas.handle_escape();
    assert!(canvas.selection().is_empty());
    assert!(canvas.gesture().is_dragging_items());

    // The drag still tracks its own item set.
    canvas.handle_pointer_move(vec2(60.0, 50.0));
    assert_eq!(canvas.board().get_item(1).unwrap().x, 10.0);
}

#[test]
fn remove_selected_hits_store_and_prunes_selection() {
    let (mut canvas, store) = TestCanvasBuilder::new()
        .with_item(0.0, 0.0, 100.0)
        .with_item(300.0, 0.0, 100.0)
        .build();

    canvas.handle_pointer_down(PointerEvent::primary(vec2(50.0, 50.0)));
    canvas.handle_pointer_up(PointerEvent::primary(vec2(50.0, 50.0)));
    canvas.remove_selected();

    assert!(canvas.selection().is_empty());
    assert_eq!(canvas.board().len(), 1);
    assert_eq!(store.removal_count(), 1);
    assert_eq!(store.removals.lock()[0], ("test-board".to_string(), 1));
}

#[test]
fn drag_release_skips_items_removed_mid_gesture() {
    let (mut canvas, store) = TestCanvasBuilder::new().with_item(0.0, 0.0, 100.0).build();

    canvas.handle_pointer_down(PointerEvent::primary(vec2(50.0, 50.0)));
    canvas.request_remove(1);
    canvas.handle_pointer_up(PointerEvent::primary(vec2(50.0, 50.0)));

    // The removal reached the store; no position update for a dead item.
    assert_eq!(store.removal_count(), 1);
    assert_eq!(store.update_count(), 0);
}

// ============================================================================
// Droppable state sanity
// ============================================================================

#[test]
fn gesture_state_default_is_idle() {
    let state = GestureState::default();
    assert!(state.is_idle());
    assert_eq!(state.originating_button(), None);
}

#[test]
fn secondary_button_press_is_inert() {
    let (mut canvas, _store) = TestCanvasBuilder::new().with_item(0.0, 0.0, 100.0).build();
    let event = PointerEvent::new(vec2(50.0, 50.0), PointerButton::Secondary);
    canvas.handle_pointer_down(event);
    assert!(canvas.gesture().is_idle());
    assert!(canvas.selection().is_empty());
}

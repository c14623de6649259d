//! Canvas controller surface tests: wheel zoom, element origin, layout
//! rects and scene synchronization.

use crate::helpers::{loaded_image, vec2, TestCanvasBuilder};
use moodcrate::types::BoardItem;
use std::path::PathBuf;

#[test]
fn wheel_zoom_is_cursor_anchored_through_the_canvas() {
    let (mut canvas, _store) = TestCanvasBuilder::new().with_item(0.0, 0.0, 100.0).build();
    canvas.set_origin(vec2(10.0, 20.0));

    // Window (210, 220) is element-local (200, 200).
    let before = canvas.camera.screen_to_canvas(vec2(200.0, 200.0));
    assert!(canvas.handle_wheel(vec2(210.0, 220.0), -120.0));

    let (_pan, zoom) = canvas.transform();
    assert!(zoom > 1.0);
    let after = canvas.camera.screen_to_canvas(vec2(200.0, 200.0));
    assert!((after - before).length() < 1e-3);
}

#[test]
fn keyboard_nudge_and_view_reset() {
    let (mut canvas, _store) = TestCanvasBuilder::new().with_item(0.0, 0.0, 100.0).build();

    canvas.nudge_camera(vec2(1.0, 0.0), moodcrate::Modifiers::default());
    let (pan, _) = canvas.transform();
    assert!(pan.x > 0.0);

    // Shift takes the coarse step.
    canvas.nudge_camera(vec2(0.0, -1.0), moodcrate::Modifiers::shift());
    let (coarse_pan, _) = canvas.transform();
    assert!(coarse_pan.y < -pan.x);

    canvas.handle_wheel(vec2(100.0, 100.0), -120.0);
    canvas.reset_view();
    let (pan, zoom) = canvas.transform();
    assert_eq!(pan, vec2(0.0, 0.0));
    assert_eq!(zoom, 1.0);
}

#[test]
fn element_origin_offsets_every_pointer_event() {
    let (mut canvas, _store) = TestCanvasBuilder::new().with_item(0.0, 0.0, 100.0).build();
    canvas.set_origin(vec2(300.0, 0.0));

    // Window (350, 50) lands inside the item once the origin is removed.
    canvas.handle_pointer_down(moodcrate::PointerEvent::primary(vec2(350.0, 50.0)));
    assert!(canvas.selection().contains(1));
}

#[test]
fn item_screen_rect_applies_camera_and_aspect() {
    let (mut canvas, _store) = TestCanvasBuilder::new().with_item(10.0, 10.0, 100.0).build();
    canvas.camera.zoom = 2.0;
    canvas.camera.pan = vec2(5.0, 5.0);

    // Square fallback first.
    let rect = canvas.item_screen_rect(1).unwrap();
    assert_eq!(rect.min, vec2(25.0, 25.0));
    assert_eq!(rect.max, vec2(225.0, 225.0));

    // A 2:1 image halves the height.
    canvas.note_loaded_image(1, loaded_image(200, 100));
    let rect = canvas.item_screen_rect(1).unwrap();
    assert_eq!(rect.max, vec2(225.0, 125.0));

    assert!(canvas.item_screen_rect(99).is_none());
}

#[test]
fn sync_items_prunes_selection_and_images() {
    let (mut canvas, _store) = TestCanvasBuilder::new()
        .with_item(0.0, 0.0, 100.0)
        .with_item(300.0, 0.0, 100.0)
        .build();

    canvas.handle_pointer_down(moodcrate::PointerEvent::primary(vec2(50.0, 50.0)));
    canvas.handle_pointer_up(moodcrate::PointerEvent::primary(vec2(50.0, 50.0)));
    canvas.note_loaded_image(1, loaded_image(10, 10));
    assert!(canvas.selection().contains(1));

    // Item 1 vanished from the store's snapshot.
    canvas.sync_items(vec![BoardItem {
        id: 2,
        path: PathBuf::from("img-2.png"),
        x: 300.0,
        y: 0.0,
        width: 100.0,
    }]);

    assert!(canvas.selection().is_empty());
    assert_eq!(canvas.board().len(), 1);
    assert!(canvas.images().get(1).is_none());
}

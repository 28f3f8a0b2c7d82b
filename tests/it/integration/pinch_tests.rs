//! Two-finger workflows across both backends: native gesture deltas and
//! manual touch math.

use crate::helpers::TestRigBuilder;
use caseboard::input::{NativeGestureEvent, PointerEvent, TwoFingerBackend};
use caseboard::render::ManipulableSurface;
use glam::Vec2;

// ----------------------------------------------------------------------
// Native gesture backend (WebKit)
// ----------------------------------------------------------------------

#[test]
fn native_pinch_scale_clamps_at_commit() {
    // scale 45, platform reports event.scale 5.0 -> raw 225 clamps to 180
    let mut rig = TestRigBuilder::new()
        .with_backend(TwoFingerBackend::NativeGestures)
        .with_sticker(50.0, 50.0, 45.0)
        .build();
    let id = rig.ids[0];

    rig.editor.handle_gesture_begin(id, &NativeGestureEvent { scale: 1.0, rotation: 0.0 });
    rig.editor.handle_gesture_change(id, &NativeGestureEvent { scale: 2.0, rotation: 10.0 });
    rig.pump_frames();
    rig.editor.handle_gesture_end(id, &NativeGestureEvent { scale: 5.0, rotation: 10.0 });

    let updates = rig.updates_for(id);
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].scale, Some(180.0));
    // Rotation dampened to 40% of the raw platform value
    assert!((updates[0].rotation.unwrap() - 4.0).abs() < 1e-4);
}

#[test]
fn native_gesture_cancels_drag_and_keeps_baseline() {
    let mut rig = TestRigBuilder::new()
        .with_backend(TwoFingerBackend::NativeGestures)
        .with_container(250.0, 416.0)
        .with_sticker(50.0, 50.0, 45.0)
        .build();
    let id = rig.ids[0];

    // Drag 25px right, then the platform opens a gesture stream
    rig.editor.handle_pointer_down(id, &PointerEvent::touch(1, true, Vec2::new(125.0, 208.0)));
    rig.editor.handle_pointer_move(id, &PointerEvent::touch(1, true, Vec2::new(150.0, 208.0)));
    rig.editor.handle_gesture_begin(id, &NativeGestureEvent { scale: 1.0, rotation: 0.0 });

    rig.pump_frames();
    let live = rig.editor.surface().node(id).unwrap().style().live.unwrap();
    assert_eq!(live.translate, Vec2::new(25.0, 0.0), "no visual jump");

    // Drag input after the hand-off no longer moves the object
    rig.editor.handle_pointer_move(id, &PointerEvent::touch(1, true, Vec2::new(190.0, 208.0)));
    rig.pump_frames();
    let live = rig.editor.surface().node(id).unwrap().style().live.unwrap();
    assert_eq!(live.translate, Vec2::new(25.0, 0.0), "baseline held constant");

    rig.editor.handle_gesture_end(id, &NativeGestureEvent { scale: 1.5, rotation: 0.0 });
    let updates = rig.updates_for(id);
    assert_eq!(updates.len(), 1);
    // The baseline translation commits along with the pinch result
    let position = updates[0].position.unwrap();
    assert!((position.x - 60.0).abs() < 1e-3);
    assert_eq!(updates[0].scale, Some(67.5));
}

#[test]
fn native_events_ignored_on_touch_math_backend() {
    let mut rig = TestRigBuilder::new()
        .with_backend(TwoFingerBackend::TouchMath)
        .with_sticker(50.0, 50.0, 45.0)
        .build();
    let id = rig.ids[0];

    rig.editor.handle_gesture_begin(id, &NativeGestureEvent { scale: 1.0, rotation: 0.0 });
    rig.editor.handle_gesture_end(id, &NativeGestureEvent { scale: 3.0, rotation: 0.0 });
    assert!(rig.updates_for(id).is_empty());
}

#[test]
fn second_touch_ignored_on_native_backend() {
    let mut rig = TestRigBuilder::new()
        .with_backend(TwoFingerBackend::NativeGestures)
        .with_sticker(50.0, 50.0, 45.0)
        .build();
    let id = rig.ids[0];

    rig.editor.handle_pointer_down(id, &PointerEvent::touch(1, true, Vec2::new(125.0, 208.0)));
    // Touch math is not wired on this backend; the platform gesture stream
    // is the only two-finger path
    rig.editor.handle_pointer_down(id, &PointerEvent::touch(2, false, Vec2::new(225.0, 208.0)));
    assert!(rig.editor.active_object().is_some());
    rig.editor.handle_pointer_up(id, &PointerEvent::touch(1, true, Vec2::new(125.0, 208.0)));
    assert!(rig.updates_for(id).is_empty(), "tap only, no pinch started");
}

// ----------------------------------------------------------------------
// Touch-math backend (non-WebKit)
// ----------------------------------------------------------------------

#[test]
fn touch_pinch_distance_ratio_is_dampened() {
    // Distance doubles -> dampened ratio 1.4 -> 45 * 1.4 = 63
    let mut rig = TestRigBuilder::new()
        .with_backend(TwoFingerBackend::TouchMath)
        .with_sticker(50.0, 50.0, 45.0)
        .build();
    let id = rig.ids[0];

    rig.editor.handle_pointer_down(id, &PointerEvent::touch(1, true, Vec2::new(125.0, 208.0)));
    rig.editor.handle_pointer_down(id, &PointerEvent::touch(2, false, Vec2::new(225.0, 208.0)));
    rig.editor.handle_pointer_move(id, &PointerEvent::touch(2, false, Vec2::new(325.0, 208.0)));
    rig.pump_frames();
    rig.editor.handle_pointer_up(id, &PointerEvent::touch(2, false, Vec2::new(325.0, 208.0)));

    let updates = rig.updates_for(id);
    assert_eq!(updates.len(), 1);
    assert!((updates[0].scale.unwrap() - 63.0).abs() < 1e-3);
}

#[test]
fn drag_then_second_finger_has_zero_jump() {
    let mut rig = TestRigBuilder::new()
        .with_backend(TwoFingerBackend::TouchMath)
        .with_container(250.0, 416.0)
        .with_sticker(50.0, 50.0, 45.0)
        .build();
    let id = rig.ids[0];

    // Drag (25, 10), then a second finger engages
    rig.editor.handle_pointer_down(id, &PointerEvent::touch(1, true, Vec2::new(125.0, 208.0)));
    rig.editor.handle_pointer_move(id, &PointerEvent::touch(1, true, Vec2::new(150.0, 218.0)));
    rig.editor.handle_pointer_down(id, &PointerEvent::touch(2, false, Vec2::new(250.0, 218.0)));

    rig.pump_frames();
    let live = rig.editor.surface().node(id).unwrap().style().live.unwrap();
    assert_eq!(live.translate, Vec2::new(25.0, 10.0), "gesture baseline equals the drag delta");
}

#[test]
fn touch_pinch_commits_once_with_baseline_position() {
    let mut rig = TestRigBuilder::new()
        .with_backend(TwoFingerBackend::TouchMath)
        .with_container(250.0, 416.0)
        .with_sticker(50.0, 50.0, 45.0)
        .build();
    let id = rig.ids[0];

    rig.editor.handle_pointer_down(id, &PointerEvent::touch(1, true, Vec2::new(125.0, 208.0)));
    rig.editor.handle_pointer_move(id, &PointerEvent::touch(1, true, Vec2::new(150.0, 208.0)));
    rig.editor.handle_pointer_down(id, &PointerEvent::touch(2, false, Vec2::new(250.0, 208.0)));
    for step in 1..=10 {
        let x = 250.0 + step as f32 * 5.0;
        rig.editor.handle_pointer_move(id, &PointerEvent::touch(2, false, Vec2::new(x, 208.0)));
    }
    rig.pump_frames();
    rig.editor.handle_pointer_up(id, &PointerEvent::touch(2, false, Vec2::new(300.0, 208.0)));

    let updates = rig.updates_for(id);
    assert_eq!(updates.len(), 1, "one commit for the whole drag+pinch");
    // Baseline drag of 25px commits as +10%
    assert!((updates[0].position.unwrap().x - 60.0).abs() < 1e-3);
    // Distance went 100 -> 150: ratio 1.5 dampened to 1.2
    assert!((updates[0].scale.unwrap() - 54.0).abs() < 1e-3);
}

#[test]
fn text_pinch_adjusts_size_never_rotation() {
    let mut rig = TestRigBuilder::new()
        .with_backend(TwoFingerBackend::TouchMath)
        .with_text(50.0, 50.0, 300.0)
        .build();
    let id = rig.ids[0];

    rig.editor.handle_pointer_down(id, &PointerEvent::touch(1, true, Vec2::new(125.0, 208.0)));
    rig.editor.handle_pointer_down(id, &PointerEvent::touch(2, false, Vec2::new(225.0, 208.0)));
    // Spread AND swing the second finger: rotation must not follow
    rig.editor.handle_pointer_move(id, &PointerEvent::touch(2, false, Vec2::new(125.0, 408.0)));
    rig.pump_frames();
    rig.editor.handle_pointer_up(id, &PointerEvent::touch(2, false, Vec2::new(125.0, 408.0)));

    let updates = rig.updates_for(id);
    assert_eq!(updates.len(), 1);
    // Distance 100 -> 200: dampened ratio 1.4 -> 420
    assert!((updates[0].size.unwrap() - 420.0).abs() < 1e-3);
    assert_eq!(updates[0].rotation, None, "two-finger rotate is a no-op for text");
    assert_eq!(updates[0].scale, None);
}

#[test]
fn pointer_down_during_pinch_is_ignored() {
    let mut rig = TestRigBuilder::new()
        .with_backend(TwoFingerBackend::TouchMath)
        .with_sticker(50.0, 50.0, 45.0)
        .build();
    let id = rig.ids[0];

    rig.editor.handle_pointer_down(id, &PointerEvent::touch(1, true, Vec2::new(125.0, 208.0)));
    rig.editor.handle_pointer_down(id, &PointerEvent::touch(2, false, Vec2::new(225.0, 208.0)));
    // A third finger lands: the drag path must not restart
    rig.editor.handle_pointer_down(id, &PointerEvent::touch(3, true, Vec2::new(160.0, 240.0)));

    rig.editor.handle_pointer_move(id, &PointerEvent::touch(2, false, Vec2::new(325.0, 208.0)));
    rig.pump_frames();
    rig.editor.handle_pointer_up(id, &PointerEvent::touch(2, false, Vec2::new(325.0, 208.0)));

    let updates = rig.updates_for(id);
    assert_eq!(updates.len(), 1);
    assert!((updates[0].scale.unwrap() - 63.0).abs() < 1e-3, "pinch math unaffected");
}

#[test]
fn leftover_finger_after_pinch_is_inert() {
    let mut rig = TestRigBuilder::new()
        .with_backend(TwoFingerBackend::TouchMath)
        .with_sticker(50.0, 50.0, 45.0)
        .build();
    let id = rig.ids[0];

    rig.editor.handle_pointer_down(id, &PointerEvent::touch(1, true, Vec2::new(125.0, 208.0)));
    rig.editor.handle_pointer_down(id, &PointerEvent::touch(2, false, Vec2::new(225.0, 208.0)));
    rig.editor.handle_pointer_up(id, &PointerEvent::touch(2, false, Vec2::new(225.0, 208.0)));
    assert_eq!(rig.updates_for(id).len(), 1, "pinch committed when count dropped");

    // The finger that stayed down does nothing further
    rig.editor.handle_pointer_move(id, &PointerEvent::touch(1, true, Vec2::new(175.0, 208.0)));
    rig.editor.handle_pointer_up(id, &PointerEvent::touch(1, true, Vec2::new(175.0, 208.0)));
    assert_eq!(rig.updates_for(id).len(), 1, "no second commit");
}

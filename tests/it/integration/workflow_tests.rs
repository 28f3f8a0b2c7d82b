//! Cross-component workflows: export consistency, deletion, placement.

use crate::helpers::TestRigBuilder;
use caseboard::input::PointerEvent;
use caseboard::render::ManipulableSurface;
use glam::Vec2;

#[test]
fn export_reads_committed_state_only() {
    let mut rig = TestRigBuilder::new()
        .with_container(250.0, 416.0)
        .with_sticker(50.0, 50.0, 45.0)
        .build();
    let id = rig.ids[0];

    rig.editor.handle_pointer_down(id, &PointerEvent::mouse(1, Vec2::new(125.0, 208.0)));
    rig.editor.handle_pointer_move(id, &PointerEvent::mouse(1, Vec2::new(175.0, 208.0)));
    rig.pump_frames();

    // Mid-gesture, the authoritative model is untouched
    let mid_gesture = rig.editor.store().get(id).unwrap().position;
    assert_eq!(mid_gesture.x, 50.0);

    rig.editor.handle_pointer_up(id, &PointerEvent::mouse(1, Vec2::new(175.0, 208.0)));

    // At rest, the committed list is fully consistent for the composer
    let at_rest = rig.editor.store().get(id).unwrap().position;
    assert!((at_rest.x - 70.0).abs() < 1e-3);
    assert_eq!(rig.editor.active_object(), None);
    assert_eq!(rig.editor.surface().node(id).unwrap().style().live, None);
}

#[test]
fn tap_then_delete_affordance() {
    let mut rig = TestRigBuilder::new()
        .with_sticker(50.0, 50.0, 45.0)
        .with_sticker(20.0, 20.0, 45.0)
        .build();
    let id = rig.ids[0];

    // Tap selects
    rig.editor.handle_pointer_down(id, &PointerEvent::mouse(1, Vec2::new(125.0, 208.0)));
    rig.editor.handle_pointer_up(id, &PointerEvent::mouse(1, Vec2::new(125.0, 208.0)));
    assert_eq!(rig.editor.selection().selected(), Some(id));

    // The delete affordance removes exactly the selection
    let removed = rig.editor.delete_selected().expect("selection deleted");
    assert_eq!(removed.id, id);
    assert_eq!(rig.editor.selection().selected(), None);
    assert_eq!(rig.editor.store().objects().len(), 1);

    // A second press is a no-op
    assert!(rig.editor.delete_selected().is_none());
}

#[test]
fn delete_mid_gesture_leaves_no_orphan_state() {
    let mut rig = TestRigBuilder::new().with_sticker(50.0, 50.0, 45.0).build();
    let id = rig.ids[0];

    rig.editor.handle_pointer_down(id, &PointerEvent::mouse(1, Vec2::new(125.0, 208.0)));
    rig.editor.handle_pointer_move(id, &PointerEvent::mouse(1, Vec2::new(175.0, 208.0)));

    rig.editor.delete_object(id).expect("object removed");
    assert_eq!(rig.editor.active_object(), None);

    // Input for the dead object degrades to silence, never a crash or commit
    rig.editor.handle_pointer_move(id, &PointerEvent::mouse(1, Vec2::new(200.0, 208.0)));
    rig.editor.handle_pointer_up(id, &PointerEvent::mouse(1, Vec2::new(200.0, 208.0)));
    rig.pump_frames();
    assert!(rig.updates_for(id).is_empty());
    assert!(rig.editor.store().objects().is_empty());
}

#[test]
fn background_tap_clears_selection() {
    let mut rig = TestRigBuilder::new().with_sticker(50.0, 50.0, 45.0).build();
    let id = rig.ids[0];

    rig.editor.handle_pointer_down(id, &PointerEvent::mouse(1, Vec2::new(125.0, 208.0)));
    rig.editor.handle_pointer_up(id, &PointerEvent::mouse(1, Vec2::new(125.0, 208.0)));
    assert_eq!(rig.editor.selection().selected(), Some(id));

    rig.editor.tap_background();
    assert_eq!(rig.editor.selection().selected(), None);
}

#[test]
fn stacking_order_is_insertion_based() {
    let rig = TestRigBuilder::new()
        .with_sticker(50.0, 50.0, 45.0)
        .with_sticker(50.0, 50.0, 45.0)
        .with_text(50.0, 50.0, 300.0)
        .build();

    let z_orders: Vec<u32> = rig
        .editor
        .store()
        .objects()
        .iter()
        .map(|object| object.z_order)
        .collect();
    assert_eq!(z_orders, vec![0, 1, 2]);
}

#[test]
fn frame_monitor_counts_applied_frames() {
    let mut rig = TestRigBuilder::new().with_sticker(50.0, 50.0, 45.0).build();
    let id = rig.ids[0];

    rig.editor.handle_pointer_down(id, &PointerEvent::mouse(1, Vec2::new(125.0, 208.0)));
    rig.editor.handle_pointer_move(id, &PointerEvent::mouse(1, Vec2::new(150.0, 208.0)));
    rig.pump_frames();
    rig.editor.handle_pointer_up(id, &PointerEvent::mouse(1, Vec2::new(150.0, 208.0)));

    assert_eq!(rig.editor.frame_monitor().total_frames(), 1);
}

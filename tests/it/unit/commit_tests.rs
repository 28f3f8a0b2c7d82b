//! Commit-step clamp invariants and radius math.

use caseboard::bounds::MaskedBounds;
use caseboard::commit::{clamp_metric, constrain_position, drag_update, gesture_update, half_extents_px};
use caseboard::geometry::{ContainerRect, PercentPoint};
use caseboard::input::ObjectSnapshot;
use caseboard::types::{ObjectKind, PlacedObject};
use glam::Vec2;

fn image_kind(scale: f32) -> ObjectKind {
    ObjectKind::Image { asset: "a".into(), scale, emoji: false }
}

fn snapshot(object: &PlacedObject) -> ObjectSnapshot {
    ObjectSnapshot {
        position: object.position,
        metric: object.metric(),
        rotation: object.rotation,
    }
}

#[test]
fn scale_invariant_holds_for_any_input() {
    let kind = image_kind(45.0);
    for metric in [-1e9, -1.0, 0.0, 19.99, 20.0, 100.0, 180.0, 180.01, 1e9, f32::MAX] {
        let clamped = clamp_metric(&kind, metric);
        assert!((20.0..=180.0).contains(&clamped), "metric {metric} -> {clamped}");
    }
}

#[test]
fn size_invariant_holds_for_any_input() {
    let kind = ObjectKind::Text { content: "t".into(), size: 300.0 };
    for metric in [-1e9, 0.0, 199.0, 200.0, 450.0, 451.0, 1e9] {
        let clamped = clamp_metric(&kind, metric);
        assert!((200.0..=450.0).contains(&clamped), "metric {metric} -> {clamped}");
    }
}

#[test]
fn image_half_extents_are_square() {
    let half = half_extents_px(&image_kind(45.0), 45.0, None);
    assert_eq!(half, Vec2::splat(45.0)); // scale * 2 / 2
}

#[test]
fn emoji_half_extents_use_larger_factor() {
    let kind = ObjectKind::Image { asset: "a".into(), scale: 50.0, emoji: true };
    let half = half_extents_px(&kind, 50.0, None);
    assert_eq!(half, Vec2::splat(60.0)); // scale * 2.4 / 2
}

#[test]
fn text_half_extents_from_measured_box() {
    let kind = ObjectKind::Text { content: "t".into(), size: 300.0 };
    let half = half_extents_px(&kind, 300.0, Some(Vec2::new(120.0, 60.0)));
    assert_eq!(half, Vec2::new(60.0, 30.0));
    // Unmeasured text degrades to a zero box
    assert_eq!(half_extents_px(&kind, 300.0, None), Vec2::ZERO);
}

#[test]
fn containment_accounts_for_non_square_container() {
    // 50px radius in a 250x416 container: 20% of width but ~12% of height
    let kind = image_kind(50.0);
    let container = ContainerRect::new(250.0, 416.0);
    let bounds = Some(MaskedBounds::FULL);

    let clamped = constrain_position(
        PercentPoint::new(0.0, 0.0),
        &kind,
        50.0,
        None,
        container,
        bounds,
    );
    assert!((clamped.x - 20.0).abs() < 1e-3);
    assert!((clamped.y - (50.0 / 416.0 * 100.0)).abs() < 1e-3);
}

#[test]
fn boundary_clamp_scenario() {
    // Object dragged to (99, 99), radius 10% each axis,
    // bounds {left: 8, right: 93, top: 0, bottom: 100}
    let container = ContainerRect::new(100.0, 100.0);
    let kind = image_kind(10.0); // 20px box -> 10px half -> 10% of 100px
    let bounds = Some(MaskedBounds::new(8.0, 0.0, 93.0, 100.0));

    let clamped = constrain_position(
        PercentPoint::new(99.0, 99.0),
        &kind,
        10.0,
        None,
        container,
        bounds,
    );
    assert!((clamped.x - 83.0).abs() < 1e-3);
    assert!((clamped.y - 90.0).abs() < 1e-3);
}

#[test]
fn absent_bounds_mean_no_clamping() {
    let kind = image_kind(45.0);
    let container = ContainerRect::new(250.0, 416.0);
    let free = constrain_position(
        PercentPoint::new(150.0, -20.0),
        &kind,
        45.0,
        None,
        container,
        None,
    );
    assert_eq!(free, PercentPoint::new(150.0, -20.0));
}

#[test]
fn drag_update_clamps_into_bounds() {
    let object = PlacedObject::image(1, "a", PercentPoint::new(90.0, 50.0));
    let start = snapshot(&object);
    let update = drag_update(
        &object,
        &start,
        Vec2::new(500.0, 0.0), // way past the right edge
        ContainerRect::new(250.0, 416.0),
        Some(MaskedBounds::FULL),
        None,
    );
    let position = update.position.unwrap();
    // 45 scale -> 45px half extent -> 18% of 250px width
    assert!((position.x - 82.0).abs() < 1e-3);
}

#[test]
fn gesture_update_clamps_oversized_scale() {
    let object = PlacedObject::image(1, "a", PercentPoint::new(50.0, 50.0));
    let start = snapshot(&object);
    let update = gesture_update(
        &object,
        &start,
        Vec2::ZERO,
        45.0 * 5.0, // pinch blew past the range
        0.0,
        ContainerRect::new(250.0, 416.0),
        None,
        None,
    );
    assert_eq!(update.scale, Some(180.0));
}

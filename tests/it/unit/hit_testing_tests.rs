//! Hit tester queries over placed objects.

use caseboard::geometry::{ContainerRect, PercentPoint};
use caseboard::hit_testing::HitTester;
use caseboard::types::{ObjectKind, PlacedObject};
use glam::Vec2;

fn sticker(id: u64, z: u32, x: f32, y: f32, scale: f32) -> PlacedObject {
    let mut object = PlacedObject::image(id, "s", PercentPoint::new(x, y));
    object.z_order = z;
    if let ObjectKind::Image { scale: s, .. } = &mut object.kind {
        *s = scale;
    }
    object
}

#[test]
fn miss_returns_none() {
    let container = ContainerRect::new(250.0, 416.0);
    let mut tester = HitTester::new();
    tester.rebuild(&[sticker(1, 0, 50.0, 50.0, 45.0)], container, |_| None);
    assert_eq!(tester.topmost_at(Vec2::new(5.0, 5.0)), None);
}

#[test]
fn text_uses_measured_box() {
    let container = ContainerRect::new(250.0, 416.0);
    let text = PlacedObject::text(7, "hi", 300.0, PercentPoint::new(50.0, 50.0));
    let mut tester = HitTester::new();
    tester.rebuild(&[text], container, |_| Some(Vec2::new(100.0, 40.0)));

    // Center is (125, 208); the 100x40 box reaches 50 left of center
    assert_eq!(tester.topmost_at(Vec2::new(80.0, 208.0)), Some(7));
    assert_eq!(tester.topmost_at(Vec2::new(70.0, 208.0)), None);
}

#[test]
fn unmeasured_text_hits_only_at_center() {
    let container = ContainerRect::new(250.0, 416.0);
    let text = PlacedObject::text(7, "hi", 300.0, PercentPoint::new(50.0, 50.0));
    let mut tester = HitTester::new();
    tester.rebuild(&[text], container, |_| None);

    assert_eq!(tester.topmost_at(Vec2::new(125.0, 208.0)), Some(7));
    assert_eq!(tester.topmost_at(Vec2::new(126.0, 208.0)), None);
}

#[test]
fn update_moves_the_entry() {
    let container = ContainerRect::new(250.0, 416.0);
    let mut object = sticker(1, 0, 50.0, 50.0, 45.0);
    let mut tester = HitTester::new();
    tester.rebuild(std::slice::from_ref(&object), container, |_| None);
    assert_eq!(tester.topmost_at(Vec2::new(125.0, 208.0)), Some(1));

    object.position = PercentPoint::new(10.0, 10.0);
    tester.update(&object, container, None);
    assert_eq!(tester.topmost_at(Vec2::new(125.0, 208.0)), None);
    assert_eq!(tester.topmost_at(Vec2::new(25.0, 41.6)), Some(1));
}

#[test]
fn overlap_resolves_to_highest_z() {
    let container = ContainerRect::new(250.0, 416.0);
    let objects = vec![
        sticker(1, 2, 50.0, 50.0, 45.0),
        sticker(2, 0, 50.0, 50.0, 90.0),
        sticker(3, 1, 50.0, 50.0, 60.0),
    ];
    let mut tester = HitTester::new();
    tester.rebuild(&objects, container, |_| None);
    assert_eq!(tester.topmost_at(Vec2::new(125.0, 208.0)), Some(1));
}

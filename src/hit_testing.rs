//! Hit testing for placed objects.
//!
//! Provides R-tree based spatial indexing so tap/click resolution stays
//! O(log n) as designs grow. Entries are center-based (objects position by
//! their visual center) and envelopes are expanded for rotation, so a rotated
//! sticker is still hittable at its corners.

use crate::geometry::ContainerRect;
use crate::types::{ObjectId, PlacedObject};
use glam::Vec2;
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// A spatial entry for one placed object's rotation-expanded bounding box.
#[derive(Debug, Clone, Copy)]
pub struct HitEntry {
    pub id: ObjectId,
    pub z_order: u32,
    min: [f32; 2],
    max: [f32; 2],
}

impl HitEntry {
    /// Build an entry from a center point, rendered size and rotation
    /// (degrees), all in container pixels.
    pub fn new(id: ObjectId, z_order: u32, center: Vec2, size: Vec2, rotation: f32) -> Self {
        let theta = rotation.to_radians();
        let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
        // Envelope of the rotated box
        let half = Vec2::new(
            (size.x * cos + size.y * sin) / 2.0,
            (size.x * sin + size.y * cos) / 2.0,
        );
        Self {
            id,
            z_order,
            min: [center.x - half.x, center.y - half.y],
            max: [center.x + half.x, center.y + half.y],
        }
    }

    #[inline]
    fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min[0]
            && point.x <= self.max[0]
            && point.y >= self.min[1]
            && point.y <= self.max[1]
    }
}

impl RTreeObject for HitEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

impl PartialEq for HitEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// R-tree backed hit tester over the current object set.
#[derive(Default)]
pub struct HitTester {
    tree: RTree<HitEntry>,
    entries: HashMap<ObjectId, HitEntry>,
}

impl HitTester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the index from the committed object list.
    ///
    /// `measure` supplies the rendered pixel box for objects without an
    /// intrinsic size (text); returning `None` falls back to a zero box,
    /// which makes the object hittable only at its exact center.
    pub fn rebuild<F>(&mut self, objects: &[PlacedObject], container: ContainerRect, measure: F)
    where
        F: Fn(&PlacedObject) -> Option<Vec2>,
    {
        let entries: Vec<HitEntry> = objects
            .iter()
            .map(|object| {
                let center = container.to_pixels(object.position);
                let size = object
                    .rendered_side()
                    .map(|side| Vec2::splat(side))
                    .or_else(|| measure(object))
                    .unwrap_or(Vec2::ZERO);
                HitEntry::new(object.id, object.z_order, center, size, object.rotation)
            })
            .collect();

        self.entries = entries.iter().map(|e| (e.id, *e)).collect();
        self.tree = RTree::bulk_load(entries);
    }

    /// Re-index a single object after a commit.
    pub fn update(&mut self, object: &PlacedObject, container: ContainerRect, size: Option<Vec2>) {
        if let Some(old) = self.entries.remove(&object.id) {
            self.tree.remove(&old);
        }
        let center = container.to_pixels(object.position);
        let size = object
            .rendered_side()
            .map(Vec2::splat)
            .or(size)
            .unwrap_or(Vec2::ZERO);
        let entry = HitEntry::new(object.id, object.z_order, center, size, object.rotation);
        self.tree.insert(entry);
        self.entries.insert(object.id, entry);
    }

    pub fn remove(&mut self, id: ObjectId) -> bool {
        match self.entries.remove(&id) {
            Some(entry) => {
                self.tree.remove(&entry);
                true
            }
            None => false,
        }
    }

    /// All objects whose expanded box contains the point, unordered.
    pub fn query_point(&self, point: Vec2) -> Vec<ObjectId> {
        let envelope = AABB::from_point([point.x, point.y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.contains(point))
            .map(|entry| entry.id)
            .collect()
    }

    /// The topmost object (highest z-order) under the point, if any.
    pub fn topmost_at(&self, point: Vec2) -> Option<ObjectId> {
        let envelope = AABB::from_point([point.x, point.y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.contains(point))
            .max_by_key(|entry| entry.z_order)
            .map(|entry| entry.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! The authoritative object store boundary.
//!
//! The engine never owns the object list; it talks to whatever store the host
//! provides through the [`ObjectStore`] trait. The commit step calls
//! [`ObjectStore::update`] exactly once per completed gesture, and the
//! export/composer reads [`ObjectStore::objects`] at rest — there is no API
//! through which a mid-gesture frame can leak into the store.

use crate::geometry::PercentPoint;
use crate::types::{ObjectId, ObjectKind, ObjectUpdate, PlacedObject};
use thiserror::Error;
use tracing::debug;

/// Errors from store operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The object was removed (or never existed). Gesture code treats this
    /// as a soft failure: the interaction simply ends without a commit.
    #[error("unknown object id {0}")]
    UnknownObject(ObjectId),
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Mapping `id -> PlacedObject`, with single-call partial updates.
pub trait ObjectStore {
    /// Insert a new object; the store assigns id and z-order. Returns the id.
    fn insert(&mut self, position: PercentPoint, kind: ObjectKind) -> ObjectId;

    /// Apply one partial update. The commit step calls this exactly once per
    /// gesture.
    fn update(&mut self, id: ObjectId, update: ObjectUpdate) -> StoreResult<()>;

    /// Remove an object (delete affordance / selection UI).
    fn remove(&mut self, id: ObjectId) -> StoreResult<PlacedObject>;

    fn get(&self, id: ObjectId) -> Option<&PlacedObject>;

    /// The committed, at-rest object list in z-order. Outside of an active
    /// gesture this is always fully consistent.
    fn objects(&self) -> &[PlacedObject];
}

/// In-memory store with insertion-ordered stacking.
#[derive(Default)]
pub struct InMemoryStore {
    objects: Vec<PlacedObject>,
    next_id: ObjectId,
    next_z: u32,
    update_count: u64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of `update` calls ever applied. Used by tests to assert
    /// the single-commit guarantee.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id == id)
    }
}

impl ObjectStore for InMemoryStore {
    fn insert(&mut self, position: PercentPoint, kind: ObjectKind) -> ObjectId {
        let id = self.next_id;
        self.next_id += 1;
        let z_order = self.next_z;
        self.next_z += 1;

        let object = PlacedObject {
            id,
            position,
            rotation: 0.0,
            z_order,
            kind,
        };
        debug!(id, z_order, "object placed");
        self.objects.push(object);
        id
    }

    fn update(&mut self, id: ObjectId, update: ObjectUpdate) -> StoreResult<()> {
        let index = self.index_of(id).ok_or(StoreError::UnknownObject(id))?;
        self.update_count += 1;
        debug!(id, ?update, "object committed");
        update.apply_to(&mut self.objects[index]);
        Ok(())
    }

    fn remove(&mut self, id: ObjectId) -> StoreResult<PlacedObject> {
        let index = self.index_of(id).ok_or(StoreError::UnknownObject(id))?;
        debug!(id, "object removed");
        Ok(self.objects.remove(index))
    }

    fn get(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }
}

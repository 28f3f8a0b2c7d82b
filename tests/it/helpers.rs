//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestRig` / `TestRigBuilder` - an editor over the overlay surface with a
//!   recording store and a manual frame scheduler
//! - Shared handles (`updates`, `frames`) the rig records into
//! - `pump_frames` to drive granted animation frames deterministically

use caseboard::bounds::MaskedBounds;
use caseboard::editor::CaseEditor;
use caseboard::geometry::{ContainerRect, PercentPoint};
use caseboard::input::TwoFingerBackend;
use caseboard::pipeline::FrameScheduler;
use caseboard::render::overlay::OverlaySurface;
use caseboard::store::{InMemoryStore, ObjectStore, StoreResult};
use caseboard::types::{ObjectId, ObjectKind, ObjectUpdate, PlacedObject};
use caseboard::GestureTuning;
use parking_lot::{Mutex, RwLock};
use std::sync::{Arc, Once};

static TRACING: Once = Once::new();

/// Install the test subscriber once; `RUST_LOG=caseboard=debug` makes
/// gesture traces visible in failing tests.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Every `update` call the store ever received, in order.
pub type SharedUpdates = Arc<Mutex<Vec<(ObjectId, ObjectUpdate)>>>;

/// Every frame request the scheduler received, in order.
pub type SharedFrames = Arc<Mutex<Vec<ObjectId>>>;

/// Store wrapper that records every commit for assertions.
pub struct RecordingStore {
    inner: InMemoryStore,
    updates: SharedUpdates,
}

impl RecordingStore {
    pub fn new(updates: SharedUpdates) -> Self {
        Self {
            inner: InMemoryStore::new(),
            updates,
        }
    }
}

impl ObjectStore for RecordingStore {
    fn insert(&mut self, position: PercentPoint, kind: ObjectKind) -> ObjectId {
        self.inner.insert(position, kind)
    }

    fn update(&mut self, id: ObjectId, update: ObjectUpdate) -> StoreResult<()> {
        self.updates.lock().push((id, update.clone()));
        self.inner.update(id, update)
    }

    fn remove(&mut self, id: ObjectId) -> StoreResult<PlacedObject> {
        self.inner.remove(id)
    }

    fn get(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.inner.get(id)
    }

    fn objects(&self) -> &[PlacedObject] {
        self.inner.objects()
    }
}

/// Scheduler that records frame requests instead of spinning a timer.
pub struct ManualScheduler {
    frames: SharedFrames,
}

impl ManualScheduler {
    pub fn new(frames: SharedFrames) -> Self {
        Self { frames }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self, object: ObjectId) {
        self.frames.lock().push(object);
    }
}

/// A complete editor rig over the overlay surface.
pub struct TestRig {
    pub editor: CaseEditor<OverlaySurface>,
    pub updates: SharedUpdates,
    pub frames: SharedFrames,
    /// Ids of the objects placed by the builder, in placement order.
    pub ids: Vec<ObjectId>,
}

impl TestRig {
    /// Drive every granted animation frame once, like the host's rAF loop.
    pub fn pump_frames(&mut self) {
        let pending: Vec<ObjectId> = self.frames.lock().drain(..).collect();
        for id in pending {
            self.editor.on_animation_frame(id);
        }
    }

    /// All updates recorded for one object.
    pub fn updates_for(&self, id: ObjectId) -> Vec<ObjectUpdate> {
        self.updates
            .lock()
            .iter()
            .filter(|(target, _)| *target == id)
            .map(|(_, update)| update.clone())
            .collect()
    }
}

/// Builder for editor rigs.
///
/// # Example
/// ```ignore
/// let mut rig = TestRigBuilder::new()
///     .with_container(250.0, 416.0)
///     .with_sticker(50.0, 50.0, 45.0)
///     .build();
/// ```
pub struct TestRigBuilder {
    container: ContainerRect,
    backend: TwoFingerBackend,
    tuning: GestureTuning,
    bounds: Option<MaskedBounds>,
    objects: Vec<(PercentPoint, ObjectKind)>,
}

impl Default for TestRigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRigBuilder {
    pub fn new() -> Self {
        Self {
            container: ContainerRect::new(250.0, 416.0),
            backend: TwoFingerBackend::TouchMath,
            tuning: GestureTuning::default(),
            bounds: None,
            objects: Vec::new(),
        }
    }

    pub fn with_container(mut self, width: f32, height: f32) -> Self {
        self.container = ContainerRect::new(width, height);
        self
    }

    pub fn with_backend(mut self, backend: TwoFingerBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_tuning(mut self, tuning: GestureTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn with_bounds(mut self, bounds: MaskedBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Add an image sticker at the given percent position and scale.
    pub fn with_sticker(mut self, x: f32, y: f32, scale: f32) -> Self {
        self.objects.push((
            PercentPoint::new(x, y),
            ObjectKind::Image {
                asset: "sticker".into(),
                scale,
                emoji: false,
            },
        ));
        self
    }

    /// Add a text object at the given percent position and font size.
    pub fn with_text(mut self, x: f32, y: f32, size: f32) -> Self {
        self.objects.push((
            PercentPoint::new(x, y),
            ObjectKind::Text {
                content: "hello".into(),
                size,
            },
        ));
        self
    }

    pub fn build(self) -> TestRig {
        init_tracing();
        let updates: SharedUpdates = Arc::new(Mutex::new(Vec::new()));
        let frames: SharedFrames = Arc::new(Mutex::new(Vec::new()));

        let mut store = RecordingStore::new(Arc::clone(&updates));
        let mut surface = OverlaySurface::new(self.container);

        let mut ids = Vec::new();
        for (position, kind) in self.objects {
            let id = store.insert(position, kind);
            let object = store.get(id).expect("freshly inserted").clone();
            surface.mount(&object);
            ids.push(id);
        }

        let mut editor = CaseEditor::new(
            surface,
            Box::new(store),
            Box::new(ManualScheduler::new(Arc::clone(&frames))),
            self.backend,
            self.tuning,
        );
        if let Some(bounds) = self.bounds {
            editor.set_bounds_handle(Arc::new(RwLock::new(Some(bounds))));
        }

        TestRig { editor, updates, frames, ids }
    }
}

//! The editor controller.
//!
//! `CaseEditor` owns everything that makes the gesture engine per-object and
//! per-process: one [`GestureSession`] and one [`TransformPipeline`] per
//! object, the selection, the shared bounds handle and the classified
//! two-finger backend. Event handlers live in `input::pointer_down` /
//! `pointer_move` / `pointer_up` / `pinch` as `impl CaseEditor` blocks.

use crate::bounds::{MaskedBounds, SharedBounds};
use crate::config::GestureTuning;
use crate::input::classifier::TwoFingerBackend;
use crate::input::state::{GestureSession, ObjectSnapshot};
use crate::perf::FrameMonitor;
use crate::pipeline::{FrameScheduler, LiveTransform, TransformPipeline};
use crate::render::{ManipulableSurface, SurfaceNode};
use crate::selection::SelectionManager;
use crate::store::ObjectStore;
use crate::types::{ObjectId, PlacedObject};
use glam::Vec2;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct CaseEditor<S: ManipulableSurface> {
    pub(crate) surface: S,
    pub(crate) store: Box<dyn ObjectStore>,
    pub(crate) scheduler: Box<dyn FrameScheduler>,
    pub(crate) tuning: GestureTuning,
    pub(crate) backend: TwoFingerBackend,
    pub(crate) bounds: SharedBounds,
    pub(crate) sessions: HashMap<ObjectId, GestureSession>,
    pub(crate) pipelines: HashMap<ObjectId, TransformPipeline>,
    pub(crate) selection: SelectionManager,
    /// The single active drag/gesture target. A pointer landing on a
    /// different object while this is set is ignored.
    pub(crate) active: Option<ObjectId>,
    monitor: FrameMonitor,
}

impl<S: ManipulableSurface> CaseEditor<S> {
    pub fn new(
        surface: S,
        store: Box<dyn ObjectStore>,
        scheduler: Box<dyn FrameScheduler>,
        backend: TwoFingerBackend,
        tuning: GestureTuning,
    ) -> Self {
        Self {
            surface,
            store,
            scheduler,
            tuning,
            backend,
            bounds: Arc::new(RwLock::new(None)),
            sessions: HashMap::new(),
            pipelines: HashMap::new(),
            selection: SelectionManager::new(),
            active: None,
            monitor: FrameMonitor::new(),
        }
    }

    /// Wire the editor to a bounds tracker's shared handle.
    pub fn set_bounds_handle(&mut self, bounds: SharedBounds) {
        self.bounds = bounds;
    }

    /// Current masked bounds, `None` meaning unconstrained.
    pub fn masked_bounds(&self) -> Option<MaskedBounds> {
        *self.bounds.read()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> &mut dyn ObjectStore {
        self.store.as_mut()
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn tuning(&self) -> &GestureTuning {
        &self.tuning
    }

    pub fn backend(&self) -> TwoFingerBackend {
        self.backend
    }

    /// The object currently being dragged or gestured, if any.
    pub fn active_object(&self) -> Option<ObjectId> {
        self.active
    }

    pub fn frame_monitor(&self) -> &FrameMonitor {
        &self.monitor
    }

    // ------------------------------------------------------------------
    // Frames
    // ------------------------------------------------------------------

    /// Host callback for a granted animation frame for one object. Applies
    /// the latest pending transform (if any) as a single mutation.
    pub fn on_animation_frame(&mut self, id: ObjectId) {
        crate::profile_scope!("apply_transform_frame");
        let Some(pipeline) = self.pipelines.get_mut(&id) else {
            return;
        };
        self.monitor.begin_frame();
        let badge_visible = self.selection.is_selected(id);
        pipeline.run_frame(self.surface.node_mut(id), badge_visible);
        self.monitor.end_frame();
    }

    /// Stage a live transform for an object and request a frame if none is
    /// outstanding.
    pub(crate) fn stage_transform(&mut self, id: ObjectId, transform: LiveTransform) {
        let pipeline = self.pipelines.entry(id).or_default();
        if pipeline.stage(transform) {
            self.scheduler.request_frame(id);
        }
    }

    // ------------------------------------------------------------------
    // Selection / deletion
    // ------------------------------------------------------------------

    /// Background tap: clear the selection. Active gestures are unaffected.
    pub fn tap_background(&mut self) {
        self.selection.clear();
    }

    /// Delete the selected object via its affordance.
    pub fn delete_selected(&mut self) -> Option<PlacedObject> {
        let id = self.selection.selected()?;
        self.delete_object(id)
    }

    /// Remove an object: store, session, pipeline and selection entries all
    /// go together so no orphaned state can keep referencing it.
    pub fn delete_object(&mut self, id: ObjectId) -> Option<PlacedObject> {
        self.sessions.remove(&id);
        if let Some(pipeline) = self.pipelines.get_mut(&id) {
            pipeline.cancel();
        }
        self.pipelines.remove(&id);
        if self.active == Some(id) {
            self.active = None;
        }
        self.selection.forget(id);

        match self.store.remove(id) {
            Ok(object) => Some(object),
            Err(error) => {
                warn!(id, %error, "delete ignored");
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Session plumbing shared by the handlers
    // ------------------------------------------------------------------

    /// Snapshot the authoritative pose of an object for a new interaction.
    pub(crate) fn snapshot_of(&self, id: ObjectId) -> Option<ObjectSnapshot> {
        self.store.get(id).map(|object| ObjectSnapshot {
            position: object.position,
            metric: object.metric(),
            rotation: object.rotation,
        })
    }

    /// Whether a new interaction may start on this object. Only one object
    /// is the active target per surface.
    pub(crate) fn may_target(&self, id: ObjectId) -> bool {
        match self.active {
            Some(active) => active == id,
            None => true,
        }
    }

    /// End-of-interaction teardown: release capture, settle the node onto the
    /// committed pose, drop empty sessions.
    pub(crate) fn finish_interaction(&mut self, id: ObjectId) {
        if let Some(session) = self.sessions.get_mut(&id) {
            if let Some(pointer) = session.take_captured() {
                if let Some(node) = self.surface.node_mut(id) {
                    // A missing release must not throw
                    node.release_pointer(pointer);
                }
            }
            session.reset();
        }
        if let Some(pipeline) = self.pipelines.get_mut(&id) {
            pipeline.cancel();
        }

        let transition = self.tuning.settle_transition();
        if let Some(object) = self.store.get(id).cloned() {
            if let Some(node) = self.surface.node_mut(id) {
                node.settle(&object, transition);
                if self.selection.is_selected(id) {
                    node.set_badge_scale(1.0);
                }
            }
        }

        if self
            .sessions
            .get(&id)
            .is_some_and(|session| session.pointer_count() == 0)
        {
            self.sessions.remove(&id);
        }
        if self.active == Some(id) {
            self.active = None;
            debug!(id, "interaction finished");
        }
    }

    /// Measured glyph box for text objects, from the surface.
    pub(crate) fn measured_box(&self, id: ObjectId) -> Option<Vec2> {
        self.surface.node(id).and_then(|node| node.measured_box())
    }
}

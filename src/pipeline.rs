//! Frame-coalesced transform application.
//!
//! During a gesture the desired transform is staged into a single pending
//! slot per object, overwriting any not-yet-applied value - never queueing.
//! At most one animation-frame callback is outstanding per object; when the
//! host grants the frame, the latest pending value is applied as one
//! imperative mutation on the surface node. The authoritative object model is
//! bypassed entirely until commit.
//!
//! ## Performance Notes
//!
//! Pointer moves arrive far more often than frames are painted (120Hz+ input
//! on 60Hz displays is common). Overwrite-in-place is what keeps the applied
//! frame current instead of replaying a backlog of stale transforms.

use crate::render::SurfaceNode;
use crate::types::ObjectId;
use glam::Vec2;
use tracing::trace;

/// The live (transient-tier) transform for one object.
///
/// Write-only from the business logic's perspective: nothing reads this back
/// except the surface node it is painted onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LiveTransform {
    /// Pixel translation from the at-rest position.
    pub translate: Vec2,
    /// Live metric: scale (image) or font size (text).
    pub metric: f32,
    /// Committed metric at interaction start, for badge counter-scaling.
    pub base_metric: f32,
    /// Live rotation, degrees.
    pub rotation: f32,
}

impl LiveTransform {
    /// Ratio of the live metric to the committed one. The delete affordance
    /// is counter-scaled by the inverse so it keeps a constant on-screen
    /// size while its object grows and shrinks under it.
    pub fn scale_ratio(&self) -> f32 {
        if self.base_metric > 0.0 {
            self.metric / self.base_metric
        } else {
            1.0
        }
    }
}

/// Host seam for animation-frame scheduling.
///
/// The engine never spins its own timer; it asks the host for one frame and
/// expects a matching `CaseEditor::on_animation_frame` call. Requests are
/// already de-duplicated per object before they reach this trait.
pub trait FrameScheduler {
    fn request_frame(&mut self, object: ObjectId);
}

/// The per-object pending-transform slot and its scheduled flag.
#[derive(Debug, Default)]
pub struct TransformPipeline {
    pending: Option<LiveTransform>,
    scheduled: bool,
    applied_frames: u64,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage the latest desired transform. Returns true if the caller must
    /// request an animation frame (i.e. none is outstanding yet).
    pub fn stage(&mut self, transform: LiveTransform) -> bool {
        self.pending = Some(transform);
        if self.scheduled {
            return false;
        }
        self.scheduled = true;
        true
    }

    /// Run the granted frame: apply the latest pending value to the node and
    /// clear the scheduled flag. Returns true if a mutation was applied.
    ///
    /// A vanished node makes the frame a no-op (the flag is still cleared so
    /// a later gesture can schedule again).
    pub fn run_frame<N: SurfaceNode>(
        &mut self,
        node: Option<&mut N>,
        badge_visible: bool,
    ) -> bool {
        self.scheduled = false;
        let Some(pending) = self.pending.take() else {
            return false;
        };
        let Some(node) = node else {
            trace!("transform frame dropped: node vanished");
            return false;
        };
        if !node.is_attached() {
            trace!("transform frame dropped: node detached");
            return false;
        }

        node.apply_live(&pending);
        if badge_visible {
            node.set_badge_scale(1.0 / pending.scale_ratio());
        }
        self.applied_frames += 1;
        true
    }

    /// Discard any staged transform without applying it (gesture teardown).
    pub fn cancel(&mut self) {
        self.pending = None;
        self.scheduled = false;
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// How many frames actually mutated a node. Diagnostic only.
    pub fn applied_frames(&self) -> u64 {
        self.applied_frames
    }
}

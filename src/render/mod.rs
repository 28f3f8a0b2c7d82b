//! Manipulable surfaces.
//!
//! The gesture engine is rendering-agnostic: it drives whichever surface the
//! host mounts through the traits here. Two adapters ship with the crate:
//!
//! - `overlay` - free-transform overlay nodes (live style transforms, eased
//!   settle, counter-scaled delete badge)
//! - `scene` - a retained scene graph with built-in transform handles,
//!   snapped rotation and hard clipping
//!
//! The clamp/commit logic is shared and backend-agnostic; only rendering and
//! interaction affordances live per backend.

pub mod overlay;
pub mod scene;

use crate::geometry::ContainerRect;
use crate::input::events::PointerId;
use crate::pipeline::LiveTransform;
use crate::types::{ObjectId, PlacedObject};
use glam::Vec2;
use std::time::Duration;
use thiserror::Error;

/// Errors from pointer capture. Always recoverable: a gesture continues in
/// best-effort uncaptured mode when capture is refused.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CaptureError {
    #[error("pointer capture refused by host")]
    Refused,
    #[error("pointer {0} is not active")]
    UnknownPointer(PointerId),
}

/// One object's visual node on a surface.
///
/// All operations must be safe on a node whose backing visual vanished
/// mid-gesture: `is_attached` turns the pipeline's frames into no-ops, and
/// the remaining methods must never panic.
pub trait SurfaceNode {
    /// False once the backing visual has been unmounted.
    fn is_attached(&self) -> bool;

    /// Apply a live transform as one imperative mutation. Called at most
    /// once per animation frame, from the transform pipeline only.
    fn apply_live(&mut self, live: &LiveTransform);

    /// Drop live styling and render the committed pose, easing over
    /// `transition`. The hand-off from live to model-driven rendering must be
    /// visually seamless.
    fn settle(&mut self, object: &PlacedObject, transition: Duration);

    /// Counter-scale the attached delete affordance so it keeps a constant
    /// on-screen size.
    fn set_badge_scale(&mut self, scale: f32);

    /// Rendered pixel box for objects without an intrinsic size (text glyph
    /// boxes). `None` when the surface has not measured yet.
    fn measured_box(&self) -> Option<Vec2>;

    /// Ask the host to route this pointer's events here until release.
    fn capture_pointer(&mut self, id: PointerId) -> Result<(), CaptureError>;

    /// Release a captured pointer. Releasing a pointer that was never
    /// captured must be a no-op.
    fn release_pointer(&mut self, id: PointerId);
}

/// A rendering surface hosting one node per placed object.
pub trait ManipulableSurface {
    type Node: SurfaceNode;

    /// Current pixel dimensions. Read fresh at commit time - never cached
    /// across a gesture boundary.
    fn container(&self) -> ContainerRect;

    fn node(&self, id: ObjectId) -> Option<&Self::Node>;

    fn node_mut(&mut self, id: ObjectId) -> Option<&mut Self::Node>;
}

//! The free-transform overlay surface.
//!
//! Each object is an absolutely-positioned overlay node whose at-rest pose is
//! derived purely from the committed model. During a gesture, the transform
//! pipeline writes live transforms straight onto the node - the node is
//! visually decoupled from the model until the gesture settles.
//!
//! This adapter records exactly what a DOM/compositor host would paint
//! (translation, scale, rotation, transition, badge counter-scale); the host
//! maps `NodeStyle` onto its own style system.

use crate::geometry::{ContainerRect, PercentPoint};
use crate::input::events::PointerId;
use crate::pipeline::LiveTransform;
use crate::render::{CaptureError, ManipulableSurface, SurfaceNode};
use crate::types::{ObjectId, PlacedObject};
use glam::Vec2;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::trace;

/// The at-rest pose of an overlay node, derived from the committed model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RestingPose {
    pub position: PercentPoint,
    pub metric: f32,
    pub rotation: f32,
}

impl RestingPose {
    fn of(object: &PlacedObject) -> Self {
        Self {
            position: object.position,
            metric: object.metric(),
            rotation: object.rotation,
        }
    }
}

/// What the host would currently paint for one node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
    pub resting: RestingPose,
    /// Live transform layered on top of the resting pose, if a gesture is
    /// in flight.
    pub live: Option<LiveTransform>,
    /// Eased transition applied to the settle back to the resting pose.
    pub transition: Option<Duration>,
    /// Compositor hint: a gesture is actively mutating this node.
    pub will_change: bool,
}

/// One object's overlay node.
#[derive(Debug)]
pub struct OverlayNode {
    style: NodeStyle,
    badge_scale: f32,
    measured: Option<Vec2>,
    attached: bool,
    /// Host-controlled: whether pointer capture requests succeed.
    capture_allowed: bool,
    captured: HashSet<PointerId>,
}

impl OverlayNode {
    fn new(object: &PlacedObject) -> Self {
        Self {
            style: NodeStyle {
                resting: RestingPose::of(object),
                live: None,
                transition: None,
                will_change: false,
            },
            badge_scale: 1.0,
            measured: None,
            attached: true,
            capture_allowed: true,
            captured: HashSet::new(),
        }
    }

    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    pub fn badge_scale(&self) -> f32 {
        self.badge_scale
    }

    pub fn captured_pointers(&self) -> &HashSet<PointerId> {
        &self.captured
    }

    /// Host hook: simulate a platform that refuses pointer capture.
    pub fn set_capture_allowed(&mut self, allowed: bool) {
        self.capture_allowed = allowed;
    }

    /// Host hook: the text glyph box finished layout at this pixel size.
    pub fn set_measured_box(&mut self, size: Vec2) {
        self.measured = Some(size);
    }

    /// Host hook: the backing visual was torn down mid-gesture.
    pub fn detach(&mut self) {
        self.attached = false;
    }
}

impl SurfaceNode for OverlayNode {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn apply_live(&mut self, live: &LiveTransform) {
        if !self.attached {
            return;
        }
        self.style.live = Some(*live);
        self.style.transition = None;
        self.style.will_change = true;
    }

    fn settle(&mut self, object: &PlacedObject, transition: Duration) {
        if !self.attached {
            return;
        }
        self.style.resting = RestingPose::of(object);
        self.style.live = None;
        self.style.transition = Some(transition);
        self.style.will_change = false;
    }

    fn set_badge_scale(&mut self, scale: f32) {
        self.badge_scale = scale;
    }

    fn measured_box(&self) -> Option<Vec2> {
        self.measured
    }

    fn capture_pointer(&mut self, id: PointerId) -> Result<(), CaptureError> {
        if !self.capture_allowed {
            return Err(CaptureError::Refused);
        }
        self.captured.insert(id);
        Ok(())
    }

    fn release_pointer(&mut self, id: PointerId) {
        // Releasing a never-captured pointer is fine
        self.captured.remove(&id);
    }
}

/// Overlay surface: one node per placed object plus the container geometry.
pub struct OverlaySurface {
    container: ContainerRect,
    nodes: HashMap<ObjectId, OverlayNode>,
}

impl OverlaySurface {
    pub fn new(container: ContainerRect) -> Self {
        Self {
            container,
            nodes: HashMap::new(),
        }
    }

    /// Layout resize. Committed percent positions keep objects in place; the
    /// commit step reads the new dimensions on the next gesture end.
    pub fn set_container(&mut self, container: ContainerRect) {
        self.container = container;
    }

    /// Mount a node for a newly placed object.
    pub fn mount(&mut self, object: &PlacedObject) {
        trace!(id = object.id, "overlay node mounted");
        self.nodes.insert(object.id, OverlayNode::new(object));
    }

    /// Unmount an object's node (delete, teardown).
    pub fn unmount(&mut self, id: ObjectId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.detach();
        }
        self.nodes.remove(&id);
    }
}

impl ManipulableSurface for OverlaySurface {
    type Node = OverlayNode;

    fn container(&self) -> ContainerRect {
        self.container
    }

    fn node(&self, id: ObjectId) -> Option<&OverlayNode> {
        self.nodes.get(&id)
    }

    fn node_mut(&mut self, id: ObjectId) -> Option<&mut OverlayNode> {
        self.nodes.get_mut(&id)
    }
}

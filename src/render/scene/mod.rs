//! The retained scene-graph surface.
//!
//! A parallel implementation of the same manipulation contract as the
//! overlay engine, used for the sticker-on-phone preview with hard clipping
//! to the irregular case silhouette. Interaction affordances differ by
//! policy: resize/rotate goes through a built-in transformer with corner
//! handles, rotation snaps to detents, and deletion is a tracked badge node.
//!
//! ## Modules
//!
//! - `transformer` - selection handles, bound-box validation, delete badge
//! - `clip` - silhouette path parsing, scaling and containment

pub mod clip;
pub mod transformer;

use crate::bounds::MaskedBounds;
use crate::commit::constrain_position;
use crate::geometry::{ContainerRect, PixelRect};
use crate::hit_testing::HitTester;
use crate::input::events::PointerId;
use crate::pipeline::LiveTransform;
use crate::render::{CaptureError, ManipulableSurface, SurfaceNode};
use crate::store::{ObjectStore, StoreResult};
use crate::types::{ObjectId, ObjectUpdate, PlacedObject};
use clip::ClipPath;
use glam::Vec2;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::{debug, trace};
use transformer::{Anchor, DeleteBadge, Transformer, TransformerConfig};

/// One object's node in the scene graph.
///
/// Mirrors the retained-canvas model: `center` and `rotation` are committed
/// attributes, `scale_x`/`scale_y` are transient transform factors that the
/// commit step folds back into the object's metric and resets to 1.
#[derive(Debug)]
pub struct SceneNode {
    id: ObjectId,
    container: ContainerRect,
    center: Vec2,
    resting_center: Vec2,
    width: f32,
    height: f32,
    scale_x: f32,
    scale_y: f32,
    rotation: f32,
    pub visible: bool,
    pub draggable: bool,
    attached: bool,
    measured: Option<Vec2>,
    badge_scale: f32,
    capture_allowed: bool,
    captured: HashSet<PointerId>,
}

impl SceneNode {
    fn new(object: &PlacedObject, container: ContainerRect) -> Self {
        let mut node = Self {
            id: object.id,
            container,
            center: Vec2::ZERO,
            resting_center: Vec2::ZERO,
            width: 0.0,
            height: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            visible: true,
            draggable: true,
            attached: true,
            measured: None,
            badge_scale: 1.0,
            capture_allowed: true,
            captured: HashSet::new(),
        };
        node.sync_from(object, container);
        node
    }

    /// Re-derive committed attributes from the model.
    pub fn sync_from(&mut self, object: &PlacedObject, container: ContainerRect) {
        self.container = container;
        self.center = container.to_pixels(object.position);
        self.resting_center = self.center;
        let size = object
            .rendered_side()
            .map(Vec2::splat)
            .or(self.measured)
            .unwrap_or(Vec2::ZERO);
        self.width = size.x;
        self.height = size.y;
        self.rotation = object.rotation;
        self.scale_x = 1.0;
        self.scale_y = 1.0;
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn scale_factors(&self) -> (f32, f32) {
        (self.scale_x, self.scale_y)
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    /// Multiply the transient scale factors (corner-handle resize).
    pub fn scale_by(&mut self, factor: f32) {
        self.scale_x *= factor;
        self.scale_y *= factor;
    }

    pub fn reset_scale(&mut self) {
        self.scale_x = 1.0;
        self.scale_y = 1.0;
    }

    pub fn measured_size(&self) -> Option<Vec2> {
        self.measured
    }

    pub fn set_measured(&mut self, size: Vec2) {
        self.measured = Some(size);
        // Text nodes take their box from the measurement
        if self.width == 0.0 && self.height == 0.0 {
            self.width = size.x;
            self.height = size.y;
        }
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn set_capture_allowed(&mut self, allowed: bool) {
        self.capture_allowed = allowed;
    }

    /// Rotation-expanded axis-aligned bounding box of the scaled node.
    pub fn client_rect(&self) -> PixelRect {
        let size = Vec2::new(self.width * self.scale_x, self.height * self.scale_y);
        let theta = self.rotation.to_radians();
        let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
        let half = Vec2::new(
            (size.x * cos + size.y * sin) / 2.0,
            (size.x * sin + size.y * cos) / 2.0,
        );
        PixelRect::new(
            self.center.x - half.x,
            self.center.y - half.y,
            half.x * 2.0,
            half.y * 2.0,
        )
    }
}

impl SurfaceNode for SceneNode {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn apply_live(&mut self, live: &LiveTransform) {
        if !self.attached {
            return;
        }
        self.center = self.resting_center + live.translate;
        let ratio = live.scale_ratio();
        self.scale_x = ratio;
        self.scale_y = ratio;
        self.rotation = live.rotation;
    }

    fn settle(&mut self, object: &PlacedObject, _transition: Duration) {
        if !self.attached {
            return;
        }
        // The retained canvas redraws from committed attributes immediately;
        // easing is the compositor's concern on the overlay surface only
        let container = self.container;
        self.sync_from(object, container);
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
        self.captured.remove(&id);
    }
}

/// The scene surface: clipped node layer, transformer, delete badge and an
/// R-tree hit index.
pub struct SceneSurface {
    container: ContainerRect,
    clip: Option<ClipPath>,
    nodes: HashMap<ObjectId, SceneNode>,
    transformer: Transformer,
    badge: DeleteBadge,
    hit: HitTester,
}

impl SceneSurface {
    pub fn new(container: ContainerRect) -> Self {
        Self::with_transformer(container, TransformerConfig::default())
    }

    pub fn with_transformer(container: ContainerRect, config: TransformerConfig) -> Self {
        Self {
            container,
            clip: None,
            nodes: HashMap::new(),
            transformer: Transformer::new(config),
            badge: DeleteBadge::default(),
            hit: HitTester::new(),
        }
    }

    /// Install the case silhouette the layer clips against.
    pub fn set_clip(&mut self, clip: ClipPath) {
        self.clip = Some(clip);
    }

    pub fn clip(&self) -> Option<&ClipPath> {
        self.clip.as_ref()
    }

    /// Whether a container point falls inside the visible (clipped) region.
    pub fn point_visible(&self, point: Vec2) -> bool {
        match &self.clip {
            Some(clip) => clip.contains(point, self.container),
            None => true,
        }
    }

    pub fn set_container(&mut self, container: ContainerRect) {
        self.container = container;
    }

    pub fn transformer(&self) -> &Transformer {
        &self.transformer
    }

    pub fn badge(&self) -> &DeleteBadge {
        &self.badge
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.transformer.attached()
    }

    // ------------------------------------------------------------------
    // Node lifecycle
    // ------------------------------------------------------------------

    pub fn mount(&mut self, object: &PlacedObject) {
        trace!(id = object.id, "scene node mounted");
        let node = SceneNode::new(object, self.container);
        self.hit.update(object, self.container, node.measured);
        self.nodes.insert(object.id, node);
    }

    pub fn unmount(&mut self, id: ObjectId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.detach();
        }
        self.nodes.remove(&id);
        self.hit.remove(id);
        if self.transformer.attached() == Some(id) {
            self.deselect();
        }
    }

    /// Re-sync a node and its hit entry after a commit.
    pub fn sync_object(&mut self, object: &PlacedObject) {
        let container = self.container;
        let measured = if let Some(node) = self.nodes.get_mut(&object.id) {
            node.sync_from(object, container);
            node.measured
        } else {
            None
        };
        self.hit.update(object, container, measured);
        if self.transformer.attached() == Some(object.id) {
            self.track_badge(object.id);
        }
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Bind the transformer and show the delete badge on this node.
    pub fn select(&mut self, id: ObjectId) {
        if !self.nodes.contains_key(&id) {
            return;
        }
        self.transformer.attach(id);
        self.track_badge(id);
        debug!(id, "scene selection");
    }

    pub fn deselect(&mut self) {
        self.transformer.detach();
        self.badge.hide();
    }

    /// The topmost object under a tap, by z-order.
    pub fn hit_test(&self, point: Vec2) -> Option<ObjectId> {
        crate::profile_scope!("scene_hit_test");
        self.hit.topmost_at(point)
    }

    fn track_badge(&mut self, id: ObjectId) {
        if let Some(node) = self.nodes.get(&id) {
            self.badge.track(&node.client_rect());
        }
    }

    // ------------------------------------------------------------------
    // Native drag (the scene graph moves nodes itself; we commit the result)
    // ------------------------------------------------------------------

    /// The host's drag moved a node to a new center. Badge follows.
    pub fn drag_node_to(&mut self, id: ObjectId, center: Vec2) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_center(center);
        }
        if self.transformer.attached() == Some(id) {
            self.track_badge(id);
        }
    }

    /// Drag ended: convert the node's center back to percent, constrain, and
    /// write the single commit.
    pub fn commit_node_drag(
        &mut self,
        id: ObjectId,
        store: &mut dyn ObjectStore,
        bounds: Option<MaskedBounds>,
    ) -> StoreResult<()> {
        let update = {
            let Some(node) = self.nodes.get(&id) else {
                return Ok(()); // vanished node: no-op
            };
            let Some(object) = store.get(id) else {
                return Ok(());
            };
            if self.container.is_degenerate() {
                return Ok(());
            }
            let target = self.container.to_percent(node.center());
            let position = constrain_position(
                target,
                &object.kind,
                object.metric(),
                node.measured_size(),
                self.container,
                bounds,
            );
            ObjectUpdate {
                position: Some(position),
                ..Default::default()
            }
        };

        store.update(id, update)?;
        if let Some(object) = store.get(id).cloned() {
            self.sync_object(&object);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Transformer-driven resize/rotate
    // ------------------------------------------------------------------

    /// Handle drag on a corner anchor. Returns whether the box changed
    /// (a rejected proposal leaves the node untouched).
    pub fn resize_with_anchor(&mut self, id: ObjectId, anchor: Anchor, pointer: Vec2) -> bool {
        if self.transformer.attached() != Some(id) {
            return false;
        }
        let container = self.container;
        let changed = match self.nodes.get_mut(&id) {
            Some(node) => self.transformer.drag_corner(node, anchor, pointer, container),
            None => false,
        };
        if changed {
            self.track_badge(id);
        }
        changed
    }

    /// Handle drag on the rotation handle, snapped per policy.
    pub fn rotate_to(&mut self, id: ObjectId, raw_degrees: f32) {
        if self.transformer.attached() != Some(id) {
            return;
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            self.transformer.drag_rotation(node, raw_degrees);
        }
        self.track_badge(id);
    }

    /// Transform ended: fold the handles' result into the model in one
    /// commit, reset the node's transient factors.
    pub fn commit_transform(
        &mut self,
        id: ObjectId,
        store: &mut dyn ObjectStore,
        bounds: Option<MaskedBounds>,
    ) -> StoreResult<()> {
        let update = {
            let Some(node) = self.nodes.get_mut(&id) else {
                return Ok(());
            };
            let Some(object) = store.get(id) else {
                return Ok(());
            };
            self.transformer.transform_end(node, object, self.container, bounds)
        };

        store.update(id, update)?;
        if let Some(object) = store.get(id).cloned() {
            self.sync_object(&object);
        }
        Ok(())
    }
}

impl ManipulableSurface for SceneSurface {
    type Node = SceneNode;

    fn container(&self) -> ContainerRect {
        self.container
    }

    fn node(&self, id: ObjectId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    fn node_mut(&mut self, id: ObjectId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }
}

//! Selection transformer for the scene backend.
//!
//! Binds resize/rotate handles to the selected node. Policy differs from the
//! overlay engine on purpose: handle-driven rotation snaps to 45° detents,
//! resizing is corner-anchored with the aspect ratio always locked, and a
//! bounding-box validator rejects degenerate sizes by returning the previous
//! box unchanged.

use crate::bounds::MaskedBounds;
use crate::commit::{clamp_metric, constrain_position};
use crate::constants::{
    DELETE_BADGE_OFFSET, MAX_TRANSFORM_BOX_FRACTION, MIN_TRANSFORM_BOX, ROTATION_SNAP_STEP,
    ROTATION_SNAP_TOLERANCE,
};
use crate::geometry::{ContainerRect, PixelRect};
use crate::render::scene::SceneNode;
use crate::types::{ObjectId, ObjectUpdate, PlacedObject};
use glam::Vec2;
use tracing::{debug, trace};

/// The four enabled resize anchors. Edge anchors are deliberately absent:
/// aspect ratio is always locked, so only corners make sense.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 4] = [
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
    ];

    /// The anchor's corner point on a rect.
    pub fn corner(&self, rect: &PixelRect) -> Vec2 {
        match self {
            Anchor::TopLeft => Vec2::new(rect.left, rect.top),
            Anchor::TopRight => Vec2::new(rect.right(), rect.top),
            Anchor::BottomLeft => Vec2::new(rect.left, rect.bottom()),
            Anchor::BottomRight => Vec2::new(rect.right(), rect.bottom()),
        }
    }
}

/// Transformer policy knobs. Defaults encode the scene backend's divergences.
#[derive(Clone, Debug)]
pub struct TransformerConfig {
    /// Aspect ratio locked during resize. Always true for this product.
    pub keep_ratio: bool,
    /// Snap detents for handle rotation, degrees.
    pub rotation_snaps: Vec<f32>,
    /// Degrees within which a raw rotation snaps to a detent.
    pub snap_tolerance: f32,
    /// Smallest accepted bounding-box side, pixels.
    pub min_box: f32,
    /// Largest accepted side, as a fraction of the smaller container side.
    pub max_box_fraction: f32,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            keep_ratio: true,
            rotation_snaps: (0..8).map(|i| i as f32 * ROTATION_SNAP_STEP).collect(),
            snap_tolerance: ROTATION_SNAP_TOLERANCE,
            min_box: MIN_TRANSFORM_BOX,
            max_box_fraction: MAX_TRANSFORM_BOX_FRACTION,
        }
    }
}

/// Resize/rotate handle controller bound to at most one node.
#[derive(Debug)]
pub struct Transformer {
    config: TransformerConfig,
    attached: Option<ObjectId>,
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new(TransformerConfig::default())
    }
}

impl Transformer {
    pub fn new(config: TransformerConfig) -> Self {
        Self { config, attached: None }
    }

    pub fn config(&self) -> &TransformerConfig {
        &self.config
    }

    pub fn attached(&self) -> Option<ObjectId> {
        self.attached
    }

    pub fn attach(&mut self, id: ObjectId) {
        self.attached = Some(id);
    }

    pub fn detach(&mut self) {
        self.attached = None;
    }

    /// Bounding-box validator: a proposed box below the minimum size or
    /// above the container fraction is rejected by returning the previous
    /// box unchanged.
    pub fn validate_box(
        &self,
        old_box: PixelRect,
        new_box: PixelRect,
        container: ContainerRect,
    ) -> PixelRect {
        if new_box.width < self.config.min_box || new_box.height < self.config.min_box {
            trace!("resize rejected: below minimum box");
            return old_box;
        }
        let max_side = container.min_side() * self.config.max_box_fraction;
        if new_box.width > max_side || new_box.height > max_side {
            trace!("resize rejected: above maximum box");
            return old_box;
        }
        new_box
    }

    /// Snap a raw rotation to the nearest detent when within tolerance,
    /// otherwise pass it through unchanged.
    pub fn snap_rotation(&self, raw_degrees: f32) -> f32 {
        let normalized = raw_degrees.rem_euclid(360.0);
        for snap in &self.config.rotation_snaps {
            // Consider the detent one turn up as well, so 357 snaps to 360
            // rather than unwinding a full turn
            let correction = [snap - normalized, snap + 360.0 - normalized]
                .into_iter()
                .min_by(|a, b| a.abs().total_cmp(&b.abs()))
                .unwrap_or(0.0);
            if correction.abs() <= self.config.snap_tolerance {
                return raw_degrees + correction;
            }
        }
        raw_degrees
    }

    /// Corner-anchored, ratio-locked resize: the uniform scale factor is the
    /// dragged corner's distance from the box center relative to where the
    /// corner started. Applies to the node's transient scale factors only if
    /// the resulting box validates; returns whether anything changed.
    pub fn drag_corner(
        &self,
        node: &mut SceneNode,
        anchor: Anchor,
        pointer: Vec2,
        container: ContainerRect,
    ) -> bool {
        let old_box = node.client_rect();
        let center = node.center();
        let corner = anchor.corner(&old_box);

        let start_distance = (corner - center).length();
        if start_distance <= f32::EPSILON {
            return false;
        }
        let factor = (pointer - center).length() / start_distance;

        let proposed = PixelRect::new(
            center.x - old_box.width * factor / 2.0,
            center.y - old_box.height * factor / 2.0,
            old_box.width * factor,
            old_box.height * factor,
        );
        if self.validate_box(old_box, proposed, container) == old_box {
            return false;
        }

        node.scale_by(factor);
        true
    }

    /// Handle-driven rotation, snapped.
    pub fn drag_rotation(&self, node: &mut SceneNode, raw_degrees: f32) {
        node.set_rotation(self.snap_rotation(raw_degrees));
    }

    /// Fold the transient transform into the model: new metric = old metric
    /// x the mean of the node's scale factors, clamped; scale factors reset
    /// to 1 (scale lives in the model, not on the node); position re-read
    /// from the node, converted to percent and constrained.
    pub fn transform_end(
        &self,
        node: &mut SceneNode,
        object: &PlacedObject,
        container: ContainerRect,
        bounds: Option<MaskedBounds>,
    ) -> ObjectUpdate {
        let (scale_x, scale_y) = node.scale_factors();
        let mean_scale = (scale_x + scale_y) / 2.0;
        let metric = clamp_metric(&object.kind, object.metric() * mean_scale);
        let rotation = node.rotation();
        node.reset_scale();

        let mut update = ObjectUpdate {
            rotation: Some(rotation),
            ..Default::default()
        };
        match &object.kind {
            crate::types::ObjectKind::Image { .. } => update.scale = Some(metric),
            crate::types::ObjectKind::Text { .. } => update.size = Some(metric),
        }

        if !container.is_degenerate() {
            let target = container.to_percent(node.center());
            let measured = node.measured_size();
            update.position = Some(constrain_position(
                target,
                &object.kind,
                metric,
                measured,
                container,
                bounds,
            ));
        }

        debug!(id = object.id, metric, rotation, "transform committed");
        update
    }
}

/// The delete affordance node: always present, hidden until a selection
/// exists, repositioned to the selection's bounding box on every transform
/// frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DeleteBadge {
    visible: bool,
    position: Vec2,
}

impl DeleteBadge {
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Track a selection box: badge sits just off the top-right corner.
    pub fn track(&mut self, selection_box: &PixelRect) {
        self.position = Vec2::new(
            selection_box.right() + DELETE_BADGE_OFFSET,
            selection_box.top - DELETE_BADGE_OFFSET,
        );
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

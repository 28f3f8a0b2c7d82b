//! The commit / reconciliation step.
//!
//! Exactly once per completed gesture, the final transient values are folded
//! into canonical percent/unit space, clamped against the stated invariants
//! and the masked bounds, and packed into a single [`ObjectUpdate`]. This is
//! the only point at which the rest of the application observes a change;
//! intermediate frames are never written back.
//!
//! The logic here is shared by both rendering backends - the overlay engine
//! commits drag/pinch results and the scene transformer commits handle-driven
//! transforms through the same clamps.

use crate::bounds::MaskedBounds;
use crate::constants::{
    EMOJI_SIZE_FACTOR, IMAGE_SIZE_FACTOR, MAX_STICKER_SCALE, MAX_TEXT_SIZE, MIN_STICKER_SCALE,
    MIN_TEXT_SIZE,
};
use crate::geometry::{ContainerRect, PercentPoint};
use crate::input::state::ObjectSnapshot;
use crate::types::{ObjectKind, ObjectUpdate, PlacedObject};
use glam::Vec2;

/// Clamp a size metric to its kind's invariant range. Out-of-range values
/// are silently clamped, never rejected.
pub fn clamp_metric(kind: &ObjectKind, metric: f32) -> f32 {
    match kind {
        ObjectKind::Image { .. } => metric.clamp(MIN_STICKER_SCALE, MAX_STICKER_SCALE),
        ObjectKind::Text { .. } => metric.clamp(MIN_TEXT_SIZE, MAX_TEXT_SIZE),
    }
}

/// Per-axis pixel half-extents of an object rendered at `metric`.
///
/// Image stickers are square (`metric * size factor`); text uses the glyph
/// box measured by the surface, falling back to a zero box when no
/// measurement exists (the center then clamps against the bare bounds).
pub fn half_extents_px(kind: &ObjectKind, metric: f32, measured: Option<Vec2>) -> Vec2 {
    match kind {
        ObjectKind::Image { emoji, .. } => {
            let factor = if *emoji { EMOJI_SIZE_FACTOR } else { IMAGE_SIZE_FACTOR };
            Vec2::splat(metric * factor / 2.0)
        }
        ObjectKind::Text { .. } => measured.map(|box_px| box_px / 2.0).unwrap_or(Vec2::ZERO),
    }
}

/// Clamp a center position against the masked bounds, inset by the object's
/// effective radius on each axis. Absent bounds mean no clamping.
pub fn constrain_position(
    center: PercentPoint,
    kind: &ObjectKind,
    metric: f32,
    measured: Option<Vec2>,
    container: ContainerRect,
    bounds: Option<MaskedBounds>,
) -> PercentPoint {
    let Some(bounds) = bounds else {
        return center;
    };
    let half_px = half_extents_px(kind, metric, measured);
    let half_pct = container.half_extents_to_percent(half_px);
    bounds.clamp_center(center, half_pct)
}

/// Commit a completed drag: pixel delta -> percent delta against the
/// container's current dimensions, clamped into bounds.
///
/// Returns a position-only update. A degenerate container (collapsed layout)
/// produces an empty update rather than NaN coordinates.
pub fn drag_update(
    object: &PlacedObject,
    start: &ObjectSnapshot,
    translate: Vec2,
    container: ContainerRect,
    bounds: Option<MaskedBounds>,
    measured: Option<Vec2>,
) -> ObjectUpdate {
    if container.is_degenerate() {
        return ObjectUpdate::default();
    }

    let delta = container.delta_to_percent(translate);
    let target = PercentPoint::new(start.position.x + delta.x, start.position.y + delta.y);
    let position = constrain_position(target, &object.kind, start.metric, measured, container, bounds);

    ObjectUpdate {
        position: Some(position),
        ..Default::default()
    }
}

/// Commit a completed pinch/rotate: final live metric and rotation, plus the
/// preserved drag baseline as a position change when one exists.
///
/// Text objects commit size only - pinch rotation is a no-op for text, so
/// the rotation field stays untouched rather than rewriting the old value.
pub fn gesture_update(
    object: &PlacedObject,
    start: &ObjectSnapshot,
    baseline: Vec2,
    live_metric: f32,
    live_rotation: f32,
    container: ContainerRect,
    bounds: Option<MaskedBounds>,
    measured: Option<Vec2>,
) -> ObjectUpdate {
    let metric = clamp_metric(&object.kind, live_metric);

    let mut update = match &object.kind {
        ObjectKind::Image { .. } => ObjectUpdate {
            scale: Some(metric),
            rotation: Some(live_rotation),
            ..Default::default()
        },
        ObjectKind::Text { .. } => ObjectUpdate {
            size: Some(metric),
            ..Default::default()
        },
    };

    // A pinch that inherited a drag baseline also commits the translation;
    // the baseline is never silently discarded.
    if baseline != Vec2::ZERO && !container.is_degenerate() {
        let delta = container.delta_to_percent(baseline);
        let target = PercentPoint::new(start.position.x + delta.x, start.position.y + delta.y);
        update.position = Some(constrain_position(
            target,
            &object.kind,
            metric,
            measured,
            container,
            bounds,
        ));
    }

    update
}

//! Masked-bounds tracking for the case preview.
//!
//! The case silhouette does not fill its container; a "masked content" probe
//! element marks the safe region object centers must stay inside. The tracker
//! converts that probe's pixel rect into resolution-independent percentages
//! and keeps the value current across layout changes.
//!
//! Recomputation is cheap but layout queries are not free, so size-change
//! notifications are debounced to one recompute per animation frame. On mount
//! the first computation runs synchronously (a first-frame jump is visible
//! otherwise), with one follow-up on the next frame to catch layout settling.

use crate::geometry::PercentPoint;
use crate::geometry::PixelRect;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace};

/// The safe sub-region of the container, in percent-of-container.
///
/// Exclusively written by [`BoundsTracker`]; everything else reads through a
/// [`SharedBounds`] handle. `None` means "no probe, unconstrained".
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaskedBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl MaskedBounds {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// The full container as bounds.
    pub const FULL: MaskedBounds = MaskedBounds::new(0.0, 0.0, 100.0, 100.0);

    /// Clamp an object center into these bounds, inset by the object's
    /// per-axis half-extents (both in percent space).
    ///
    /// If the object is wider than the masked region the inset ranges invert;
    /// the min/max order below resolves that to the region edge rather than
    /// producing NaN or oscillation.
    pub fn clamp_center(&self, center: PercentPoint, half_extents: PercentPoint) -> PercentPoint {
        let min_x = self.left + half_extents.x;
        let max_x = (self.right - half_extents.x).max(min_x);
        let min_y = self.top + half_extents.y;
        let max_y = (self.bottom - half_extents.y).max(min_y);
        PercentPoint::new(center.x.clamp(min_x, max_x), center.y.clamp(min_y, max_y))
    }
}

/// Supplies the current layout rects the tracker derives bounds from.
///
/// Implemented by the host over whatever layout system it runs on. Either
/// rect may be absent while layout is unsettled or the probe is unmounted.
pub trait LayoutProbe {
    fn container_rect(&self) -> Option<PixelRect>;
    fn masked_rect(&self) -> Option<PixelRect>;
}

/// Shared read handle to the tracked bounds.
pub type SharedBounds = Arc<RwLock<Option<MaskedBounds>>>;

/// Observes the container and its masked-content probe, publishing a clamp
/// rectangle into a [`SharedBounds`] cell.
pub struct BoundsTracker {
    cell: SharedBounds,
    /// A recompute is scheduled for the next animation frame. Multiple
    /// resize notifications within one frame coalesce into one recompute.
    dirty: bool,
    recompute_count: u64,
}

impl Default for BoundsTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundsTracker {
    pub fn new() -> Self {
        Self {
            cell: Arc::new(RwLock::new(None)),
            dirty: false,
            recompute_count: 0,
        }
    }

    /// Read handle for consumers (gesture sessions, commit step).
    pub fn handle(&self) -> SharedBounds {
        Arc::clone(&self.cell)
    }

    /// Current bounds, if any.
    pub fn current(&self) -> Option<MaskedBounds> {
        *self.cell.read()
    }

    /// How many recomputations have run. Diagnostic only.
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    /// Attach to a probe: compute once synchronously, then schedule one more
    /// computation for the next animation frame.
    pub fn mount(&mut self, probe: &dyn LayoutProbe) {
        self.recompute(probe);
        self.dirty = true;
    }

    /// Size-change notification from the container or the masked probe.
    /// Debounced: the actual recompute runs on the next animation frame.
    pub fn notify_resized(&mut self) {
        trace!("bounds probe resize notification");
        self.dirty = true;
    }

    /// Animation-frame tick. Recomputes at most once per frame, and only if
    /// a notification arrived since the last recompute.
    pub fn on_animation_frame(&mut self, probe: &dyn LayoutProbe) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;
        self.recompute(probe);
        true
    }

    fn recompute(&mut self, probe: &dyn LayoutProbe) {
        self.recompute_count += 1;
        let bounds = compute_bounds(probe);
        match bounds {
            Some(b) => debug!(
                left = b.left,
                top = b.top,
                right = b.right,
                bottom = b.bottom,
                "masked bounds updated"
            ),
            None => debug!("masked bounds unavailable, objects unconstrained"),
        }
        *self.cell.write() = bounds;
    }
}

/// Pure bounds math: probe edges relative to the container, as percentages.
///
/// Fails soft: absent container or probe, or a degenerate container, yields
/// `None` rather than an error.
fn compute_bounds(probe: &dyn LayoutProbe) -> Option<MaskedBounds> {
    let container = probe.container_rect()?;
    let masked = probe.masked_rect()?;
    if container.width <= 0.0 || container.height <= 0.0 {
        return None;
    }

    Some(MaskedBounds::new(
        (masked.left - container.left) / container.width * 100.0,
        (masked.top - container.top) / container.height * 100.0,
        (masked.right() - container.left) / container.width * 100.0,
        (masked.bottom() - container.top) / container.height * 100.0,
    ))
}

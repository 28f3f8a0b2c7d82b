//! Gesture session state machine - unified state for one object's interaction.
//!
//! Each placed object gets its own session record owned by the editor; there
//! is no module-level gesture state, so concurrent object instances stay
//! independent and testable in isolation.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Dragging          (primary pointer down on the object)
//! Dragging -> Gesturing     (second finger engages; drag delta becomes the
//!                            gesture's translation baseline - no jump)
//! Dragging -> Idle          (pointer up/cancel -> one commit, or tap-select)
//! Gesturing -> Idle         (contact count drops -> one commit)
//! ```

use crate::geometry::PercentPoint;
use crate::input::events::PointerId;
use crate::input::gesture_source::PinchOrigin;
use glam::Vec2;
use std::collections::HashMap;

/// Object pose captured when an interaction starts. Live deltas compose
/// against this snapshot; the authoritative model is untouched until commit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectSnapshot {
    pub position: PercentPoint,
    /// Scale (image) or font size (text) at interaction start.
    pub metric: f32,
    pub rotation: f32,
}

/// The interaction mode of one object's session.
#[derive(Clone, Debug)]
pub enum SessionState {
    /// No active interaction.
    Idle,

    /// Single-pointer drag.
    Dragging {
        /// The pointer driving the drag.
        pointer_id: PointerId,
        /// Pointer position at drag start, container pixels.
        start: Vec2,
        /// Object pose at drag start.
        snapshot: ObjectSnapshot,
        /// Accumulated pixel delta, updated every move.
        translate: Vec2,
        /// Movement exceeded the tap threshold at least once.
        moved: bool,
    },

    /// Two-finger pinch/rotate.
    Gesturing {
        /// Object pose at the start of the whole interaction.
        snapshot: ObjectSnapshot,
        /// Backend-specific gesture-start snapshot.
        origin: PinchOrigin,
        /// Drag translation carried over from a preceding drag, held
        /// constant for the duration of the gesture.
        baseline: Vec2,
        /// Latest live metric (scale or size).
        live_metric: f32,
        /// Latest live rotation, degrees.
        live_rotation: f32,
    },
}

/// Per-object interaction record: active pointers, captured pointer, and the
/// current state machine position.
///
/// Created on first pointer-down on the object, destroyed when the last
/// active pointer lifts. At most one exists per object instance.
#[derive(Debug)]
pub struct GestureSession {
    state: SessionState,
    /// Active pointers and their last known positions.
    pointers: HashMap<PointerId, Vec2>,
    /// The pointer we hold capture on, if capture succeeded.
    captured: Option<PointerId>,
}

impl Default for GestureSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            pointers: HashMap::new(),
            captured: None,
        }
    }

    // ------------------------------------------------------------------
    // Pointer bookkeeping
    // ------------------------------------------------------------------

    /// Record a pointer contact (down) or refresh its position (move).
    pub fn track_pointer(&mut self, id: PointerId, position: Vec2) {
        self.pointers.insert(id, position);
    }

    pub fn forget_pointer(&mut self, id: PointerId) {
        self.pointers.remove(&id);
    }

    pub fn has_pointer(&self, id: PointerId) -> bool {
        self.pointers.contains_key(&id)
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// The two active contacts, if exactly two are down. Order is stable by
    /// pointer id so repeated calls pair the same way.
    pub fn pointer_pair(&self) -> Option<[(PointerId, Vec2); 2]> {
        if self.pointers.len() != 2 {
            return None;
        }
        let mut pair: Vec<(PointerId, Vec2)> =
            self.pointers.iter().map(|(id, pos)| (*id, *pos)).collect();
        pair.sort_by_key(|(id, _)| *id);
        Some([pair[0], pair[1]])
    }

    pub fn set_captured(&mut self, id: PointerId) {
        self.captured = Some(id);
    }

    /// Take the captured pointer for release. Missing capture is fine.
    pub fn take_captured(&mut self) -> Option<PointerId> {
        self.captured.take()
    }

    // ------------------------------------------------------------------
    // State queries
    // ------------------------------------------------------------------

    pub fn is_idle(&self) -> bool {
        matches!(self.state, SessionState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SessionState::Dragging { .. })
    }

    pub fn is_gesturing(&self) -> bool {
        matches!(self.state, SessionState::Gesturing { .. })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The pointer driving an active drag.
    pub fn drag_pointer(&self) -> Option<PointerId> {
        match &self.state {
            SessionState::Dragging { pointer_id, .. } => Some(*pointer_id),
            _ => None,
        }
    }

    /// Current live translation: the drag delta, or the preserved baseline
    /// while gesturing.
    pub fn translation(&self) -> Vec2 {
        match &self.state {
            SessionState::Idle => Vec2::ZERO,
            SessionState::Dragging { translate, .. } => *translate,
            SessionState::Gesturing { baseline, .. } => *baseline,
        }
    }

    /// Pose snapshot of the interaction, if one is active.
    pub fn snapshot(&self) -> Option<ObjectSnapshot> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Dragging { snapshot, .. } => Some(*snapshot),
            SessionState::Gesturing { snapshot, .. } => Some(*snapshot),
        }
    }

    /// Whether the drag ever exceeded the tap threshold.
    pub fn moved(&self) -> bool {
        match &self.state {
            SessionState::Dragging { moved, .. } => *moved,
            // A gesture implies real movement by definition
            SessionState::Gesturing { .. } => true,
            SessionState::Idle => false,
        }
    }

    /// The gesture-start snapshot for the pinch backends.
    pub fn pinch_origin(&self) -> Option<PinchOrigin> {
        match &self.state {
            SessionState::Gesturing { origin, .. } => Some(*origin),
            _ => None,
        }
    }

    /// Latest live (metric, rotation) while gesturing.
    pub fn live_values(&self) -> Option<(f32, f32)> {
        match &self.state {
            SessionState::Gesturing { live_metric, live_rotation, .. } => {
                Some((*live_metric, *live_rotation))
            }
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Idle -> Dragging. Zeroes the accumulated delta.
    pub fn begin_drag(&mut self, pointer_id: PointerId, start: Vec2, snapshot: ObjectSnapshot) {
        self.state = SessionState::Dragging {
            pointer_id,
            start,
            snapshot,
            translate: Vec2::ZERO,
            moved: false,
        };
    }

    /// Update an active drag from the driving pointer's position. Returns the
    /// new translation, or `None` if not dragging.
    pub fn drag_to(&mut self, position: Vec2, tap_threshold: f32) -> Option<Vec2> {
        match &mut self.state {
            SessionState::Dragging { start, translate, moved, .. } => {
                let delta = position - *start;
                *translate = delta;
                if delta.x.abs() > tap_threshold || delta.y.abs() > tap_threshold {
                    *moved = true;
                }
                Some(delta)
            }
            _ => None,
        }
    }

    /// Dragging (or Idle) -> Gesturing. The accumulated drag delta at the
    /// moment of transition is preserved as the gesture's baseline
    /// translation so the object does not visually jump when gaining a
    /// second finger.
    pub fn begin_gesture(&mut self, origin: PinchOrigin, fallback: ObjectSnapshot) {
        let (snapshot, baseline) = match &self.state {
            SessionState::Dragging { snapshot, translate, .. } => (*snapshot, *translate),
            SessionState::Gesturing { snapshot, baseline, .. } => (*snapshot, *baseline),
            SessionState::Idle => (fallback, Vec2::ZERO),
        };
        self.state = SessionState::Gesturing {
            snapshot,
            origin,
            baseline,
            live_metric: snapshot.metric,
            live_rotation: snapshot.rotation,
        };
    }

    /// Record the latest live values while gesturing.
    pub fn set_live(&mut self, metric: f32, rotation: f32) {
        if let SessionState::Gesturing { live_metric, live_rotation, .. } = &mut self.state {
            *live_metric = metric;
            *live_rotation = rotation;
        }
    }

    /// Any -> Idle. Pointer bookkeeping is left to the caller (a session with
    /// no pointers left is destroyed by its owner).
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }
}

//! Gesture tuning configuration.
//!
//! The dampening factors, tap threshold and settle timing are UX tuning, not
//! protocol. They are grouped here as plain data so hosts can persist or
//! override them instead of patching literals scattered through the engine.

use crate::constants::{
    PINCH_DAMPENING, ROTATION_DAMPENING, SETTLE_TRANSITION_MS, TAP_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunable feel parameters for the gesture engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureTuning {
    /// Sensitivity applied to manual two-finger pinch deltas.
    ///
    /// Raw pinch ratios from touch math overshoot badly on small screens;
    /// `1 + (ratio - 1) * pinch_dampening` is applied before clamping.
    /// Native platform gesture deltas are already calibrated and skip this.
    pub pinch_dampening: f32,

    /// Sensitivity applied to two-finger rotation deltas, both backends.
    pub rotation_dampening: f32,

    /// Movement below this many pixels is treated as a tap (select only);
    /// no position commit is written.
    pub tap_threshold: f32,

    /// Duration of the eased transition from live transform back to the
    /// committed pose at gesture end. Cosmetic; never blocks input.
    pub settle_transition_ms: u64,
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self {
            pinch_dampening: PINCH_DAMPENING,
            rotation_dampening: ROTATION_DAMPENING,
            tap_threshold: TAP_THRESHOLD,
            settle_transition_ms: SETTLE_TRANSITION_MS,
        }
    }
}

impl GestureTuning {
    /// Settle transition as a [`Duration`].
    pub fn settle_transition(&self) -> Duration {
        Duration::from_millis(self.settle_transition_ms)
    }
}

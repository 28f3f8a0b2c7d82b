//! Two-finger gesture sources.
//!
//! A [`TwoFingerGestureSource`] turns backend-specific second-finger input
//! into uniform pinch samples (scale ratio + rotation delta, both relative to
//! gesture start). Two interchangeable implementations exist, selected once
//! at startup by the classifier:
//!
//! - [`NativeGestureSource`] — WebKit engines deliver calibrated scale and
//!   rotation deltas directly; only rotation is dampened.
//! - [`TouchMathSource`] — everywhere else, deltas are hand-computed from the
//!   two touch points' distance and angle, and both axes are dampened to
//!   counter oversensitive raw pinch ratios.

use crate::config::GestureTuning;
use crate::geometry::{angle_degrees, distance};
use crate::input::classifier::TwoFingerBackend;
use crate::input::events::{NativeGestureEvent, TouchPoint};

/// Snapshot taken when the second finger engages.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PinchOrigin {
    /// Pixel distance between the two contacts at gesture start.
    /// Zero for the native backend (the platform tracks its own baseline).
    pub start_distance: f32,
    /// Angle of the contact pair at gesture start, in degrees.
    pub start_angle: f32,
}

/// One uniform pinch sample: how much to scale and rotate relative to the
/// gesture-start snapshot, dampening already applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchSample {
    /// Multiplier on the start-of-gesture metric (1.0 = unchanged).
    pub scale_ratio: f32,
    /// Degrees added to the start-of-gesture rotation.
    pub rotation_delta: f32,
}

/// Strategy interface over the two second-finger input shapes.
pub trait TwoFingerGestureSource {
    /// The backend-specific input this source consumes.
    type Input;

    fn backend(&self) -> TwoFingerBackend;

    /// Snapshot the gesture start. `None` if the input cannot start a pinch.
    fn origin(&self, input: &Self::Input) -> Option<PinchOrigin>;

    /// Compute the current sample against a start snapshot.
    fn sample(
        &self,
        origin: &PinchOrigin,
        input: &Self::Input,
        tuning: &GestureTuning,
    ) -> Option<PinchSample>;
}

/// Platform-native gesture deltas (WebKit engines).
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeGestureSource;

impl TwoFingerGestureSource for NativeGestureSource {
    type Input = NativeGestureEvent;

    fn backend(&self) -> TwoFingerBackend {
        TwoFingerBackend::NativeGestures
    }

    fn origin(&self, _input: &NativeGestureEvent) -> Option<PinchOrigin> {
        // The platform reports deltas relative to its own gesture start
        Some(PinchOrigin::default())
    }

    fn sample(
        &self,
        _origin: &PinchOrigin,
        input: &NativeGestureEvent,
        tuning: &GestureTuning,
    ) -> Option<PinchSample> {
        Some(PinchSample {
            scale_ratio: input.scale,
            rotation_delta: input.rotation * tuning.rotation_dampening,
        })
    }
}

/// Manual two-finger distance/angle math (non-WebKit hosts).
#[derive(Clone, Copy, Debug, Default)]
pub struct TouchMathSource;

impl TwoFingerGestureSource for TouchMathSource {
    type Input = [TouchPoint; 2];

    fn backend(&self) -> TwoFingerBackend {
        TwoFingerBackend::TouchMath
    }

    fn origin(&self, input: &[TouchPoint; 2]) -> Option<PinchOrigin> {
        let start_distance = distance(input[0].position, input[1].position);
        if start_distance <= f32::EPSILON {
            return None;
        }
        Some(PinchOrigin {
            start_distance,
            start_angle: angle_degrees(input[0].position, input[1].position),
        })
    }

    fn sample(
        &self,
        origin: &PinchOrigin,
        input: &[TouchPoint; 2],
        tuning: &GestureTuning,
    ) -> Option<PinchSample> {
        if origin.start_distance <= f32::EPSILON {
            return None;
        }

        let current_distance = distance(input[0].position, input[1].position);
        let raw_ratio = current_distance / origin.start_distance;
        let scale_ratio = 1.0 + (raw_ratio - 1.0) * tuning.pinch_dampening;

        let current_angle = angle_degrees(input[0].position, input[1].position);
        // Wrap across the atan2 branch cut so a pinch crossing ±180° does
        // not jump a full turn
        let raw_delta = wrap_degrees(current_angle - origin.start_angle);
        let rotation_delta = raw_delta * tuning.rotation_dampening;

        Some(PinchSample { scale_ratio, rotation_delta })
    }
}

/// Wrap an angle difference into [-180, 180).
fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 180.0 { wrapped - 360.0 } else { wrapped }
}

//! Platform-native gesture handling (WebKit engines) and the shared
//! gesture-end commit.
//!
//! WebKit hosts deliver two-finger input as a dedicated gesture stream with
//! calibrated scale/rotation deltas; these handlers consume it. Hosts on the
//! touch-math backend never wire them, and a stray event from the wrong
//! backend is ignored rather than corrupting a session.

use crate::commit::{clamp_metric, gesture_update};
use crate::editor::CaseEditor;
use crate::input::classifier::TwoFingerBackend;
use crate::input::events::NativeGestureEvent;
use crate::input::gesture_source::{NativeGestureSource, TwoFingerGestureSource};
use crate::pipeline::LiveTransform;
use crate::profile_scope;
use crate::render::ManipulableSurface;
use crate::types::ObjectId;
use tracing::{debug, warn};

impl<S: ManipulableSurface> CaseEditor<S> {
    /// Native gesture stream opened on the given object. Cancels any
    /// in-progress drag, preserving its delta as the gesture baseline.
    pub fn handle_gesture_begin(&mut self, id: ObjectId, event: &NativeGestureEvent) {
        profile_scope!("handle_gesture_begin");

        if self.backend != TwoFingerBackend::NativeGestures {
            return;
        }
        let Some(snapshot) = self.snapshot_of(id) else {
            return;
        };
        if !self.may_target(id) {
            return;
        }

        let staged = {
            let Some(origin) = NativeGestureSource.origin(event) else {
                return;
            };
            let session = self.sessions.entry(id).or_default();
            session.begin_gesture(origin, snapshot);
            let start = session.snapshot().unwrap_or(snapshot);
            LiveTransform {
                translate: session.translation(),
                metric: start.metric,
                base_metric: start.metric,
                rotation: start.rotation,
            }
        };

        self.selection.select(id);
        self.active = Some(id);
        debug!(id, "pinch started (native gestures)");
        self.stage_transform(id, staged);
    }

    /// Native gesture sample: scale/rotation relative to gesture start.
    pub fn handle_gesture_change(&mut self, id: ObjectId, event: &NativeGestureEvent) {
        profile_scope!("handle_gesture_change");

        if self.backend != TwoFingerBackend::NativeGestures {
            return;
        }
        let Some(staged) = self.native_live_values(id, event) else {
            return;
        };
        self.stage_transform(id, staged);
    }

    /// Native gesture stream closed: fold the final sample in, then commit.
    pub fn handle_gesture_end(&mut self, id: ObjectId, event: &NativeGestureEvent) {
        profile_scope!("handle_gesture_end");

        if self.backend != TwoFingerBackend::NativeGestures {
            return;
        }
        // The final deltas are still present on the end event
        if self.native_live_values(id, event).is_none() {
            return;
        }
        self.commit_gesture_end(id);
    }

    /// Update the session's live values from a native sample and build the
    /// transform to stage. `None` if no pinch is in progress.
    fn native_live_values(&mut self, id: ObjectId, event: &NativeGestureEvent) -> Option<LiveTransform> {
        let object = self.store.get(id)?;
        let is_text = object.is_text();
        let kind = object.kind.clone();

        let session = self.sessions.get_mut(&id)?;
        if !session.is_gesturing() {
            return None;
        }
        let origin = session.pinch_origin()?;
        let start = session.snapshot()?;
        let sample = NativeGestureSource.sample(&origin, event, &self.tuning)?;

        let metric = clamp_metric(&kind, start.metric * sample.scale_ratio);
        // Text objects pinch size only; their rotation never follows the
        // gesture stream
        let rotation = if is_text {
            start.rotation
        } else {
            start.rotation + sample.rotation_delta
        };
        session.set_live(metric, rotation);

        Some(LiveTransform {
            translate: session.translation(),
            metric,
            base_metric: start.metric,
            rotation,
        })
    }

    /// Shared end-of-pinch commit for both two-finger backends: exactly one
    /// store update from the last live values, then teardown.
    pub(crate) fn commit_gesture_end(&mut self, id: ObjectId) {
        let committed = {
            let Some(session) = self.sessions.get(&id) else {
                return;
            };
            let (Some(start), Some((metric, rotation))) =
                (session.snapshot(), session.live_values())
            else {
                return;
            };
            let baseline = session.translation();
            let container = self.surface.container();
            let bounds = self.masked_bounds();
            let measured = self.measured_box(id);

            self.store.get(id).map(|object| {
                gesture_update(object, &start, baseline, metric, rotation, container, bounds, measured)
            })
        };

        if let Some(update) = committed {
            if let Err(error) = self.store.update(id, update) {
                warn!(id, %error, "pinch commit dropped");
            }
        }
        self.finish_interaction(id);
    }
}

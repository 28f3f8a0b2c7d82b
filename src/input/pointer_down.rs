//! Pointer down handling - selection, drag initiation, second-finger pinch.
//!
//! ## Performance Notes
//!
//! Pointer down is a hot path during user interaction. All work here is
//! bounded: one store lookup, one session transition, at most one staged
//! transform.

use crate::editor::CaseEditor;
use crate::input::classifier::TwoFingerBackend;
use crate::input::events::{PointerButton, PointerEvent, PointerKind, TouchPoint};
use crate::input::gesture_source::{TouchMathSource, TwoFingerGestureSource};
use crate::pipeline::LiveTransform;
use crate::profile_scope;
use crate::render::{ManipulableSurface, SurfaceNode};
use crate::types::ObjectId;
use tracing::{debug, trace};

impl<S: ManipulableSurface> CaseEditor<S> {
    /// A pointer went down on the given object's node.
    pub fn handle_pointer_down(&mut self, id: ObjectId, event: &PointerEvent) {
        profile_scope!("handle_pointer_down");

        if event.kind == PointerKind::Mouse && event.button != PointerButton::Primary {
            return;
        }
        // Vanished object: every operation is a no-op
        let Some(snapshot) = self.snapshot_of(id) else {
            return;
        };
        // Only one object is the active target per surface
        if !self.may_target(id) {
            trace!(id, "pointer down ignored, another object is active");
            return;
        }

        // A pointer-down while a pinch is active is ignored by the drag path
        if self
            .sessions
            .get(&id)
            .is_some_and(|session| session.is_gesturing())
        {
            return;
        }

        // Second touch contact: on the touch-math backend this is the pinch
        // trigger; on the native backend the platform gesture stream handles
        // two-finger input and extra contacts are ignored here.
        if event.kind == PointerKind::Touch && !event.primary {
            if self.backend == TwoFingerBackend::TouchMath {
                self.second_finger_down(id, event);
            }
            return;
        }

        // Primary pointer: start a drag (unless one is already running)
        if self
            .sessions
            .get(&id)
            .is_some_and(|session| !session.is_idle())
        {
            return;
        }

        // Capture is best-effort: refusal degrades to uncaptured tracking
        let captured = match self.surface.node_mut(id) {
            Some(node) => match node.capture_pointer(event.id) {
                Ok(()) => true,
                Err(error) => {
                    debug!(id, pointer = event.id, %error, "pointer capture failed");
                    false
                }
            },
            None => false,
        };

        self.selection.select(id);

        let session = self.sessions.entry(id).or_default();
        session.track_pointer(event.id, event.position);
        session.begin_drag(event.id, event.position, snapshot);
        if captured {
            session.set_captured(event.id);
        }
        self.active = Some(id);
        debug!(id, pointer = event.id, "drag started");
    }

    /// Second touch contact on an object that may already be mid-drag:
    /// promote the session to a pinch, preserving the drag delta as the
    /// gesture's translation baseline.
    fn second_finger_down(&mut self, id: ObjectId, event: &PointerEvent) {
        let Some(snapshot) = self.snapshot_of(id) else {
            return;
        };

        let staged = {
            // The first finger's drag opened the session; a second contact
            // with no session to join is ignored
            let Some(session) = self.sessions.get_mut(&id) else {
                return;
            };
            session.track_pointer(event.id, event.position);

            let Some(pair) = session.pointer_pair() else {
                // Third contact and beyond: ignored
                return;
            };
            let touches = [
                TouchPoint::new(pair[0].0, pair[0].1),
                TouchPoint::new(pair[1].0, pair[1].1),
            ];
            let Some(origin) = TouchMathSource.origin(&touches) else {
                return;
            };

            session.begin_gesture(origin, snapshot);
            let start = session.snapshot().unwrap_or(snapshot);
            let (metric, rotation) = session.live_values().unwrap_or((start.metric, start.rotation));

            // Hold the current visual position while the pinch takes over
            LiveTransform {
                translate: session.translation(),
                metric,
                base_metric: start.metric,
                rotation,
            }
        };

        self.selection.select(id);
        self.active = Some(id);
        debug!(id, "pinch started (touch math)");
        self.stage_transform(id, staged);
    }
}

//! Pointer move handling - live drag and touch-math pinch updates.
//!
//! ## Performance Notes
//!
//! Pointer move fires at input rate (often 120Hz+), well above the frame
//! rate. Nothing here touches the authoritative model or the render tree;
//! each move only updates the session and overwrites the object's pending
//! transform slot. The actual mutation happens once per animation frame in
//! the pipeline.

use crate::commit::clamp_metric;
use crate::editor::CaseEditor;
use crate::input::classifier::TwoFingerBackend;
use crate::input::events::{PointerEvent, TouchPoint};
use crate::input::gesture_source::{TouchMathSource, TwoFingerGestureSource};
use crate::pipeline::LiveTransform;
use crate::profile_scope;
use crate::render::ManipulableSurface;
use crate::types::ObjectId;

impl<S: ManipulableSurface> CaseEditor<S> {
    /// A tracked pointer moved over the given object.
    pub fn handle_pointer_move(&mut self, id: ObjectId, event: &PointerEvent) {
        profile_scope!("handle_pointer_move");

        let Some(session) = self.sessions.get_mut(&id) else {
            return;
        };
        if !session.has_pointer(event.id) {
            return;
        }
        session.track_pointer(event.id, event.position);

        if session.is_gesturing() {
            // Native-backend pinches are fed by the platform gesture stream,
            // not by pointer moves
            if self.backend == TwoFingerBackend::TouchMath {
                self.touch_pinch_move(id);
            }
            return;
        }

        // Drag: only the driving pointer moves the object
        if session.drag_pointer() != Some(event.id) {
            return;
        }
        let staged = {
            let tap_threshold = self.tuning.tap_threshold;
            let Some(delta) = session.drag_to(event.position, tap_threshold) else {
                return;
            };
            let Some(start) = session.snapshot() else {
                return;
            };
            // 1:1 finger tracking: no live clamp, the commit step snaps back
            LiveTransform {
                translate: delta,
                metric: start.metric,
                base_metric: start.metric,
                rotation: start.rotation,
            }
        };
        self.stage_transform(id, staged);
    }

    /// Recompute the live pinch values from the current two contacts.
    fn touch_pinch_move(&mut self, id: ObjectId) {
        let staged = {
            let Some(object) = self.store.get(id) else {
                return;
            };
            let is_text = object.is_text();
            let kind = object.kind.clone();

            let Some(session) = self.sessions.get_mut(&id) else {
                return;
            };
            let Some(pair) = session.pointer_pair() else {
                return;
            };
            let (Some(origin), Some(start)) = (session.pinch_origin(), session.snapshot()) else {
                return;
            };

            let touches = [
                TouchPoint::new(pair[0].0, pair[0].1),
                TouchPoint::new(pair[1].0, pair[1].1),
            ];
            let Some(sample) = TouchMathSource.sample(&origin, &touches, &self.tuning) else {
                return;
            };

            let metric = clamp_metric(&kind, start.metric * sample.scale_ratio);
            // Two-finger rotate is a no-op for text: pinch adjusts size only
            let rotation = if is_text {
                start.rotation
            } else {
                start.rotation + sample.rotation_delta
            };
            session.set_live(metric, rotation);

            LiveTransform {
                translate: session.translation(),
                metric,
                base_metric: start.metric,
                rotation,
            }
        };
        self.stage_transform(id, staged);
    }
}

//! Pointer up/cancel handling - finalize interactions, commit once.
//!
//! Cancel is treated identically to up: whatever partial delta accumulated
//! still commits exactly once, so an interrupted gesture never leaves an
//! object in a transient-only state.

use crate::commit::drag_update;
use crate::editor::CaseEditor;
use crate::input::classifier::TwoFingerBackend;
use crate::input::events::PointerEvent;
use crate::profile_scope;
use crate::render::ManipulableSurface;
use crate::types::ObjectId;
use tracing::{debug, warn};

impl<S: ManipulableSurface> CaseEditor<S> {
    /// A tracked pointer lifted from the given object.
    pub fn handle_pointer_up(&mut self, id: ObjectId, event: &PointerEvent) {
        self.pointer_end(id, event);
    }

    /// The platform cancelled a tracked pointer. Same path as a lift.
    pub fn handle_pointer_cancel(&mut self, id: ObjectId, event: &PointerEvent) {
        debug!(id, pointer = event.id, "pointer cancelled");
        self.pointer_end(id, event);
    }

    fn pointer_end(&mut self, id: ObjectId, event: &PointerEvent) {
        profile_scope!("handle_pointer_up");

        let Some(session) = self.sessions.get_mut(&id) else {
            return;
        };
        if !session.has_pointer(event.id) {
            return;
        }
        session.forget_pointer(event.id);

        if session.is_dragging() && session.drag_pointer() == Some(event.id) {
            let moved = session.moved();
            let start = session.snapshot();
            let translate = session.translation();

            if moved {
                if let Some(start) = start {
                    let container = self.surface.container();
                    let bounds = self.masked_bounds();
                    let measured = self.measured_box(id);
                    let update = self
                        .store
                        .get(id)
                        .map(|object| drag_update(object, &start, translate, container, bounds, measured));
                    if let Some(update) = update {
                        if let Err(error) = self.store.update(id, update) {
                            warn!(id, %error, "drag commit dropped");
                        }
                    }
                }
            } else {
                // Below the tap threshold: selection already happened on
                // pointer down; no position commit is written
                debug!(id, "tap, no position commit");
            }
            self.finish_interaction(id);
        } else if session.is_gesturing() {
            // Touch-math pinch ends when the contact count drops below two;
            // on the native backend the platform's gesture-end event is the
            // sole end-of-pinch signal
            if self.backend == TwoFingerBackend::TouchMath && session.pointer_count() < 2 {
                self.commit_gesture_end(id);
            }
        } else {
            // An inert leftover contact (e.g. the finger that outlived a
            // pinch). Nothing to commit; drop the session when it empties.
            if session.pointer_count() == 0 {
                self.sessions.remove(&id);
                if self.active == Some(id) {
                    self.active = None;
                }
            }
        }
    }
}

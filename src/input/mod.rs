//! Pointer, touch and platform-gesture input handling.
//!
//! This module implements the gesture engine's input side: per-object
//! session state, backend classification, and the event handlers that turn
//! raw input into live transforms and final commits.
//!
//! ## Architecture
//!
//! The input system uses an explicit state machine ([`state::GestureSession`])
//! per object instance, never module-level gesture state. A one-shot
//! classifier selects which of two two-finger backends is wired for the
//! process lifetime; single-finger drag always rides the pointer-event path.
//!
//! ## Modules
//!
//! - `events` - host-agnostic input event model
//! - `classifier` - one-shot platform capability classification
//! - `gesture_source` - the two-finger strategy (native deltas vs touch math)
//! - `state` - gesture session state machine and helper methods
//! - `pointer_down` - drag initiation, selection, second-finger pinch
//! - `pointer_move` - live drag and touch-math pinch updates
//! - `pointer_up` - finalize operations, single commit, teardown
//! - `pinch` - native gesture stream handling and the shared pinch commit

pub mod classifier;
pub mod events;
pub mod gesture_source;
pub mod state;

mod pinch;
mod pointer_down;
mod pointer_move;
mod pointer_up;

pub use classifier::{classified_backend, classify, PlatformCaps, TwoFingerBackend};
pub use events::{NativeGestureEvent, PointerButton, PointerEvent, PointerId, PointerKind, TouchPoint};
pub use gesture_source::{
    NativeGestureSource, PinchOrigin, PinchSample, TouchMathSource, TwoFingerGestureSource,
};
pub use state::{GestureSession, ObjectSnapshot, SessionState};

//! Input event model for the gesture engine.
//!
//! The engine is host-agnostic: whatever event system the host runs on
//! (pointer events, touch lists, platform gesture streams) is translated into
//! these types at the boundary. Coordinates are container-relative pixels.

use glam::Vec2;

/// Host-assigned identifier for one pointer (finger, mouse, pen).
pub type PointerId = u64;

/// What kind of device produced a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

/// Mouse button for pointer events. Touch and pen report `Primary`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
}

/// A single pointer event (down/move/up/cancel share this shape).
#[derive(Clone, Copy, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerKind,
    pub button: PointerButton,
    /// True for the first touch point of a multi-touch sequence; always true
    /// for mouse and pen.
    pub primary: bool,
    /// Position in container pixels.
    pub position: Vec2,
}

impl PointerEvent {
    /// A primary-button mouse event, the common case in tests.
    pub fn mouse(id: PointerId, position: Vec2) -> Self {
        Self {
            id,
            kind: PointerKind::Mouse,
            button: PointerButton::Primary,
            primary: true,
            position,
        }
    }

    /// A touch-contact pointer event.
    pub fn touch(id: PointerId, primary: bool, position: Vec2) -> Self {
        Self {
            id,
            kind: PointerKind::Touch,
            button: PointerButton::Primary,
            primary,
            position,
        }
    }
}

/// One contact in a touch list (manual two-finger math backend).
#[derive(Clone, Copy, Debug)]
pub struct TouchPoint {
    pub id: PointerId,
    pub position: Vec2,
}

impl TouchPoint {
    pub fn new(id: PointerId, position: Vec2) -> Self {
        Self { id, position }
    }
}

/// A platform-native two-finger gesture sample.
///
/// Both fields are relative to gesture start: `scale` is a ratio (1.0 = no
/// change) and `rotation` is in degrees (0.0 = no change). Only WebKit-engine
/// hosts deliver these.
#[derive(Clone, Copy, Debug)]
pub struct NativeGestureEvent {
    pub scale: f32,
    pub rotation: f32,
}

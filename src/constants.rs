//! Application-wide constants.
//!
//! Centralizes magic numbers and tuning values to make the codebase
//! more maintainable and self-documenting.

// ============================================================================
// Object Size Invariants
// ============================================================================

/// Minimum scale for image stickers
pub const MIN_STICKER_SCALE: f32 = 20.0;

/// Maximum scale for image stickers (up to ~40% of the case back)
pub const MAX_STICKER_SCALE: f32 = 180.0;

/// Default scale for a freshly placed image sticker
pub const DEFAULT_STICKER_SCALE: f32 = 45.0;

/// Minimum font size for text objects
pub const MIN_TEXT_SIZE: f32 = 200.0;

/// Maximum font size for text objects
pub const MAX_TEXT_SIZE: f32 = 450.0;

/// Rendered pixel size of an image sticker is `scale * IMAGE_SIZE_FACTOR`
pub const IMAGE_SIZE_FACTOR: f32 = 2.0;

/// Emoji stickers render slightly larger than images at the same scale
pub const EMOJI_SIZE_FACTOR: f32 = 2.4;

// ============================================================================
// Gesture Tuning
// ============================================================================

/// Sensitivity applied to manual two-finger pinch deltas (1.0 = raw)
pub const PINCH_DAMPENING: f32 = 0.4;

/// Sensitivity applied to two-finger rotation deltas (1.0 = raw)
pub const ROTATION_DAMPENING: f32 = 0.4;

/// Movement below this many pixels is a tap/select, not a move
pub const TAP_THRESHOLD: f32 = 5.0;

/// Duration of the eased settle transition after a gesture, in milliseconds
pub const SETTLE_TRANSITION_MS: u64 = 150;

// ============================================================================
// Scene Transformer
// ============================================================================

/// Rotation snap increment for handle-driven rotation, in degrees
pub const ROTATION_SNAP_STEP: f32 = 45.0;

/// How close (degrees) a raw rotation must be to a snap point to snap
pub const ROTATION_SNAP_TOLERANCE: f32 = 5.0;

/// Minimum bounding-box side accepted by the transformer, in pixels
pub const MIN_TRANSFORM_BOX: f32 = 20.0;

/// Maximum bounding-box side, as a fraction of the smaller container dimension
pub const MAX_TRANSFORM_BOX_FRACTION: f32 = 0.8;

// ============================================================================
// Delete Affordance
// ============================================================================

/// On-screen diameter of the delete badge, in pixels
pub const DELETE_BADGE_SIZE: f32 = 32.0;

/// Gap between the selection box corner and the delete badge, in pixels
pub const DELETE_BADGE_OFFSET: f32 = 5.0;

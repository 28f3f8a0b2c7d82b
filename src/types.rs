//! Core types for the caseboard object model.
//!
//! This module defines the fundamental data structures used throughout the
//! engine: placed overlay objects, their kind-specific payloads, and the
//! partial update written back by the commit step.

use crate::constants::{DEFAULT_STICKER_SCALE, EMOJI_SIZE_FACTOR, IMAGE_SIZE_FACTOR};
use crate::geometry::PercentPoint;
use serde::{Deserialize, Serialize};

/// Stable identifier for a placed object, unique among currently placed
/// objects. Assigned by the object store, monotonically increasing.
pub type ObjectId = u64;

/// One manipulable overlay item on the case preview.
///
/// Mutated only by the commit step of the gesture engine — never mid-gesture.
/// The export/composer boundary reads the committed list at rest, so outside
/// of an active gesture this struct is always fully consistent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    /// Unique identifier
    pub id: ObjectId,
    /// Visual center, in percent of container width/height (0-100)
    pub position: PercentPoint,
    /// Rotation in degrees. Unconstrained; consumers normalize mod 360.
    pub rotation: f32,
    /// Insertion-based stacking index
    pub z_order: u32,
    /// Kind-specific payload (image sticker or free text)
    pub kind: ObjectKind,
}

/// Kind-specific payload of a placed object.
///
/// Both kinds share the transform contract (position/rotation plus one size
/// metric); rendering diverges entirely.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectKind {
    /// An image sticker. `scale` is the abstract size unit; the rendered
    /// square is `scale * 2` pixels.
    Image {
        /// Source asset identifier (resolved by the host's catalog)
        asset: String,
        /// Abstract size unit, clamped to 20..=180 at commit
        scale: f32,
        /// Emoji stickers render as glyphs, slightly larger per unit scale
        #[serde(default)]
        emoji: bool,
    },
    /// Free text. `size` is the pixel font size of the rendered glyph box.
    Text {
        content: String,
        /// Pixel font size, clamped to 200..=450 at commit
        size: f32,
    },
}

impl PlacedObject {
    /// Create an image sticker at the given position with default scale.
    pub fn image(id: ObjectId, asset: impl Into<String>, position: PercentPoint) -> Self {
        Self {
            id,
            position,
            rotation: 0.0,
            z_order: 0,
            kind: ObjectKind::Image {
                asset: asset.into(),
                scale: DEFAULT_STICKER_SCALE,
                emoji: false,
            },
        }
    }

    /// Create a text object at the given position.
    pub fn text(id: ObjectId, content: impl Into<String>, size: f32, position: PercentPoint) -> Self {
        Self {
            id,
            position,
            rotation: 0.0,
            z_order: 0,
            kind: ObjectKind::Text {
                content: content.into(),
                size,
            },
        }
    }

    /// The object's single size metric: `scale` for images, `size` for text.
    pub fn metric(&self) -> f32 {
        match &self.kind {
            ObjectKind::Image { scale, .. } => *scale,
            ObjectKind::Text { size, .. } => *size,
        }
    }

    /// Rendered pixel side length for image-kind objects.
    ///
    /// Text objects have no intrinsic side; their glyph box is measured by
    /// the surface.
    pub fn rendered_side(&self) -> Option<f32> {
        match &self.kind {
            ObjectKind::Image { scale, emoji, .. } => {
                let factor = if *emoji { EMOJI_SIZE_FACTOR } else { IMAGE_SIZE_FACTOR };
                Some(scale * factor)
            }
            ObjectKind::Text { .. } => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ObjectKind::Text { .. })
    }

    pub fn is_image(&self) -> bool {
        matches!(self.kind, ObjectKind::Image { .. })
    }
}

/// Partial update applied to a placed object by the commit step.
///
/// Exactly one of these is written per completed gesture; fields left `None`
/// are untouched. There is no way to update mid-gesture state through this
/// type — live transforms never pass through the store.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectUpdate {
    pub position: Option<PercentPoint>,
    /// New scale (image kind). Ignored for text objects.
    pub scale: Option<f32>,
    /// New font size (text kind). Ignored for image objects.
    pub size: Option<f32>,
    pub rotation: Option<f32>,
}

impl ObjectUpdate {
    /// True if the update carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.scale.is_none()
            && self.size.is_none()
            && self.rotation.is_none()
    }

    /// Apply this update to an object, respecting its kind.
    pub fn apply_to(&self, object: &mut PlacedObject) {
        if let Some(position) = self.position {
            object.position = position;
        }
        if let Some(rotation) = self.rotation {
            object.rotation = rotation;
        }
        match &mut object.kind {
            ObjectKind::Image { scale, .. } => {
                if let Some(new_scale) = self.scale {
                    *scale = new_scale;
                }
            }
            ObjectKind::Text { size, .. } => {
                if let Some(new_size) = self.size {
                    *size = new_size;
                }
            }
        }
    }
}

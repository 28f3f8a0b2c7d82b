//! Coordinate conversion utilities for the case preview.
//!
//! Object positions live in percent-of-container space so they survive
//! container resizes; all gesture math happens in pixel space from raw input
//! coordinates. This module centralizes the conversion formulas so they are
//! not duplicated across input handling and commit code.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A point in percent-of-container space (0-100 on each axis).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PercentPoint {
    pub x: f32,
    pub y: f32,
}

impl PercentPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of the viewport hosting the objects.
///
/// Never cached across a gesture boundary: the commit step reads fresh
/// dimensions from the surface so mid-gesture resizes convert correctly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerRect {
    pub width: f32,
    pub height: f32,
}

impl ContainerRect {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Guards the divide-by-zero case of a collapsed layout.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// The smaller of the two dimensions.
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Convert a percent-space point to container pixels.
    #[inline]
    pub fn to_pixels(&self, point: PercentPoint) -> Vec2 {
        Vec2::new(
            point.x / 100.0 * self.width,
            point.y / 100.0 * self.height,
        )
    }

    /// Convert a container-pixel point to percent space.
    #[inline]
    pub fn to_percent(&self, point: Vec2) -> PercentPoint {
        PercentPoint::new(
            point.x / self.width * 100.0,
            point.y / self.height * 100.0,
        )
    }

    /// Convert a pixel delta to a percent delta (for drag commits).
    #[inline]
    pub fn delta_to_percent(&self, delta: Vec2) -> PercentPoint {
        PercentPoint::new(
            delta.x / self.width * 100.0,
            delta.y / self.height * 100.0,
        )
    }

    /// Convert pixel half-extents to per-axis percent half-extents.
    ///
    /// The container is not square, so a symmetric pixel radius maps to two
    /// different percentages.
    #[inline]
    pub fn half_extents_to_percent(&self, half: Vec2) -> PercentPoint {
        PercentPoint::new(
            half.x / self.width * 100.0,
            half.y / self.height * 100.0,
        )
    }
}

/// An axis-aligned pixel rectangle, as reported by the layout host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }
}

/// Distance between two pixel points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Angle of the segment a→b in degrees, as `atan2(dy, dx)`.
#[inline]
pub fn angle_degrees(a: Vec2, b: Vec2) -> f32 {
    let d = b - a;
    d.y.atan2(d.x).to_degrees()
}

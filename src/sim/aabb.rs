//! Axis-aligned bounding boxes for entity footprints
//!
//! Field space: origin top-left, x grows right, y grows down.
//! A box is described by its top-left corner and its size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned footprint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict intersection: boxes that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Whether the whole box lies inside `[0, bounds]`
    pub fn within(&self, bounds: Vec2) -> bool {
        self.min.x >= 0.0 && self.min.y >= 0.0 && self.max.x <= bounds.x && self.max.y <= bounds.y
    }
}

/// Clamp a top-left position so a box of `size` stays inside `[0, bounds]`.
///
/// If the box is larger than the bounds on an axis it is pinned at 0 on
/// that axis. Non-finite coordinates are pulled back to 0.
pub fn clamp_into(pos: Vec2, size: Vec2, bounds: Vec2) -> Vec2 {
    let max = (bounds - size).max(Vec2::ZERO);
    let pos = Vec2::new(
        if pos.x.is_finite() { pos.x } else { 0.0 },
        if pos.y.is_finite() { pos.y } else { 0.0 },
    );
    pos.clamp(Vec2::ZERO, max)
}

//! Axis-aligned rectangles for pointer hit tests and edge bounces
//!
//! Screen space: x grows to the right, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in world (screen) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box of the given size centered on `center`
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Bounding box of a `size` rectangle centered on `center` and rotated
    /// by `degrees` about that center
    pub fn rotated(center: Vec2, size: Vec2, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let half = size * 0.5;
        let extent = Vec2::new(
            (half.x * cos).abs() + (half.y * sin).abs(),
            (half.x * sin).abs() + (half.y * cos).abs(),
        );
        Self {
            min: center - extent,
            max: center + extent,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Point containment, inclusive on the top/left edges and exclusive on
    /// the bottom/right edges so adjacent boxes never both claim a point
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }
}

//! Axis-aligned rectangles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its minimum corner and its size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum (x, y) corner.
    pub origin: Vec2,
    /// Width and height. Expected to be non-negative.
    pub size: Vec2,
}

impl Rect {
    /// A rectangle from its minimum corner and size components.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// A rectangle of `size` at the origin.
    #[must_use]
    pub const fn from_size(size: Vec2) -> Self {
        Self {
            origin: Vec2::ZERO,
            size,
        }
    }

    /// A rectangle of `size` centred on `center`.
    #[must_use]
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            origin: center - size * 0.5,
            size,
        }
    }

    #[must_use]
    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    #[must_use]
    pub fn min_y(&self) -> f32 {
        self.origin.y
    }

    #[must_use]
    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.x
    }

    #[must_use]
    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.y
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    /// Returns `true` if `point` lies inside or on the border.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }
}

//! Triangles, the unit of render geometry.

use glam::{Mat3, Vec2};
use serde::{Deserialize, Serialize};

/// Three points in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
}

impl Triangle {
    #[must_use]
    pub const fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self { a, b, c }
    }

    /// The vertices in order.
    #[must_use]
    pub fn vertices(&self) -> [Vec2; 3] {
        [self.a, self.b, self.c]
    }

    /// Signed area; positive for counter-clockwise winding.
    #[must_use]
    pub fn signed_area(&self) -> f32 {
        0.5 * (self.b - self.a).perp_dot(self.c - self.a)
    }

    /// The triangle with each vertex mapped through `matrix`.
    #[must_use]
    pub fn transformed(&self, matrix: &Mat3) -> Self {
        Self {
            a: matrix.transform_point2(self.a),
            b: matrix.transform_point2(self.b),
            c: matrix.transform_point2(self.c),
        }
    }
}

//! 2D transform component.
//!
//! [`Transform`] places an entity in the world: position, rotation in
//! degrees, a uniform scale factor and a z-index used as the draw-order key.
//! Movement and animation reducers write it; renderers only read it.

use glam::{Mat3, Vec2};
use redecs_component::Component;
use serde::{Deserialize, Serialize};

use crate::matrix::MatrixExt;

/// Position, rotation, uniform scale and draw order of an entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub position: Vec2,
    /// Rotation in degrees, counter-clockwise.
    pub rotation: f32,
    /// Uniform scale factor.
    pub scale: f32,
    /// Draw-order key. Higher values draw later.
    pub z_index: i32,
}

impl Transform {
    /// The identity transform: origin, no rotation, unit scale, z-index 0.
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        rotation: 0.0,
        scale: 1.0,
        z_index: 0,
    };

    /// Identity transform moved to `position`.
    #[must_use]
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    #[must_use]
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Rotation in radians.
    #[must_use]
    pub fn radians(&self) -> f32 {
        self.rotation.to_radians()
    }

    /// The placement matrix: translate by position, rotate, then scale.
    ///
    /// Local points are scaled first, then rotated, then moved to
    /// `position`.
    #[must_use]
    pub fn to_matrix(&self) -> Mat3 {
        Mat3::IDENTITY
            .translated_by(self.position)
            .rotated_by(self.radians())
            .scaled_by(Vec2::splat(self.scale))
    }

    /// Translate the transform by the given offset.
    #[must_use]
    pub fn translated(mut self, offset: Vec2) -> Self {
        self.position += offset;
        self
    }

    /// Add `degrees` to the rotation.
    #[must_use]
    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation += degrees;
        self
    }

    /// Multiply the scale by `factor`.
    #[must_use]
    pub fn scaled(mut self, factor: f32) -> Self {
        self.scale *= factor;
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Component for Transform {
    fn type_name() -> &'static str {
        "Transform"
    }
}

//! # redecs_math
//!
//! 2D math for the ECS. Re-exports [`glam`] for vectors and matrices and
//! defines the geometry the renderer speaks: [`Rect`], [`Triangle`], the
//! chaining [`MatrixExt`] builder and the [`Transform`] component.

pub mod matrix;
pub mod rect;
pub mod transform;
pub mod triangle;

// Re-export glam types for convenience.
pub use glam::{Mat3, Vec2, Vec3};

pub use matrix::MatrixExt;
pub use rect::Rect;
pub use transform::Transform;
pub use triangle::Triangle;

//! Chaining affine builders for [`Mat3`].
//!
//! Every method right-multiplies the receiver, so in
//!
//! ```rust
//! use redecs_math::{Mat3, MatrixExt, Vec2};
//!
//! let m = Mat3::IDENTITY
//!     .translated_by(Vec2::new(10.0, 0.0))
//!     .scaled_by(Vec2::splat(2.0));
//! assert_eq!(m.transform_point2(Vec2::new(1.0, 1.0)), Vec2::new(12.0, 2.0));
//! ```
//!
//! the operation written last is the first one applied to a point.

use glam::{Mat3, Vec2};

/// Right-multiplying translate/rotate/scale on 3x3 affine matrices.
pub trait MatrixExt {
    /// `self * translation(offset)`.
    #[must_use]
    fn translated_by(self, offset: Vec2) -> Self;

    /// `self * rotation(radians)`, counter-clockwise positive.
    #[must_use]
    fn rotated_by(self, radians: f32) -> Self;

    /// `self * scale(factor)`.
    #[must_use]
    fn scaled_by(self, factor: Vec2) -> Self;
}

impl MatrixExt for Mat3 {
    fn translated_by(self, offset: Vec2) -> Self {
        self * Mat3::from_translation(offset)
    }

    fn rotated_by(self, radians: f32) -> Self {
        self * Mat3::from_angle(radians)
    }

    fn scaled_by(self, factor: Vec2) -> Self {
        self * Mat3::from_scale(factor)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_identity_chain_is_identity() {
        let m = Mat3::IDENTITY
            .translated_by(Vec2::ZERO)
            .rotated_by(0.0)
            .scaled_by(Vec2::ONE);
        assert_eq!(m, Mat3::IDENTITY);
    }

    #[test]
    fn test_rotation_is_counter_clockwise() {
        let m = Mat3::IDENTITY.rotated_by(FRAC_PI_2);
        assert!(close(m.transform_point2(Vec2::X), Vec2::Y));
    }

    #[test]
    fn test_last_operation_applies_first() {
        // Scale then translate, as read right-to-left.
        let m = Mat3::IDENTITY
            .translated_by(Vec2::new(5.0, 5.0))
            .scaled_by(Vec2::splat(3.0));
        assert!(close(m.transform_point2(Vec2::new(1.0, 0.0)), Vec2::new(8.0, 5.0)));

        // Translate then scale.
        let m = Mat3::IDENTITY
            .scaled_by(Vec2::splat(3.0))
            .translated_by(Vec2::new(5.0, 5.0));
        assert!(close(m.transform_point2(Vec2::new(1.0, 0.0)), Vec2::new(18.0, 15.0)));
    }
}

//! Planar vector helpers layered over [`glam::DVec2`].
//!
//! `DVec2` already covers the arithmetic (add, sub, mul, div, scale, dot,
//! length, distance, lerp). This module adds the few operations whose
//! semantics the ray marcher depends on and glam spells differently.

use glam::{DVec2, IVec2};

pub trait Planar: Sized {
    /// Unit vector in the same direction, or the zero vector when the length
    /// is exactly zero.
    fn norm(self) -> Self;

    /// Quarter turn: `(x, y) -> (-y, x)`. Used as the local "right" axis of a
    /// heading.
    fn rot90(self) -> Self;

    /// Per-axis sign where zero stays zero.
    fn sign(self) -> Self;

    /// Integer cell containing this point.
    fn cell(self) -> IVec2;
}

impl Planar for DVec2 {
    fn norm(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            DVec2::ZERO
        } else {
            self / len
        }
    }

    fn rot90(self) -> Self {
        self.perp()
    }

    fn sign(self) -> Self {
        DVec2::new(signum_101(self.x), signum_101(self.y))
    }

    fn cell(self) -> IVec2 {
        let floored = self.floor();
        IVec2::new(floored.x as i32, floored.y as i32)
    }
}

/// Unit vector pointing along `angle` radians.
#[inline]
pub fn unit_forward(angle: f64) -> DVec2 {
    DVec2::from_angle(angle)
}

/// 3-valued signum: zero (of either sign) produces zero.
#[inline]
pub fn signum_101(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x.signum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn norm_of_non_zero_is_unit() {
        for v in [
            DVec2::new(3.0, 4.0),
            DVec2::new(-0.001, 0.0),
            DVec2::new(1e6, -2e6),
            DVec2::new(1e-9, 1e-9),
        ] {
            assert!((v.norm().length() - 1.0).abs() < 1e-6, "{v}");
        }
    }

    #[test]
    fn norm_of_zero_is_zero() {
        assert_eq!(DVec2::ZERO.norm(), DVec2::ZERO);
        assert_eq!(DVec2::new(-0.0, 0.0).norm(), DVec2::ZERO);
    }

    #[test]
    fn rot90_is_perpendicular() {
        let v = DVec2::new(2.0, 1.0);
        assert_eq!(v.rot90(), DVec2::new(-1.0, 2.0));
        assert_eq!(v.dot(v.rot90()), 0.0);
    }

    #[test]
    fn lerp_extrapolates() {
        let a = DVec2::new(1.0, 1.0);
        let b = DVec2::new(3.0, 1.0);
        assert_eq!(a.lerp(b, 0.5), DVec2::new(2.0, 1.0));
        assert_eq!(a.lerp(b, 2.0), DVec2::new(5.0, 1.0));
        assert_eq!(a.lerp(b, -1.0), DVec2::new(-1.0, 1.0));
    }

    #[test]
    fn sign_keeps_zero() {
        assert_eq!(DVec2::new(-3.0, 0.0).sign(), DVec2::new(-1.0, 0.0));
        assert_eq!(DVec2::new(0.5, -0.0).sign(), DVec2::new(1.0, 0.0));
    }

    #[test]
    fn cell_floors_negative_coordinates() {
        assert_eq!(DVec2::new(2.9, 0.0).cell(), IVec2::new(2, 0));
        assert_eq!(DVec2::new(-0.1, 1.0).cell(), IVec2::new(-1, 1));
    }

    #[test]
    fn unit_forward_matches_heading() {
        assert!((unit_forward(0.0) - DVec2::X).length() < 1e-12);
        assert!((unit_forward(FRAC_PI_2) - DVec2::Y).length() < 1e-12);
        assert!((unit_forward(PI) + DVec2::X).length() < 1e-12);
    }
}

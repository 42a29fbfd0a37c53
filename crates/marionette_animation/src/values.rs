use std::fmt::Debug;

use glam::IVec2;

/// A value kind a [`Channel`](crate::Channel) can animate.
///
/// Interpolation is strictly linear between two bracketing keyframes; each
/// kind decides how the blended result is represented.
pub trait Interpolatable: Copy + Default + Debug + PartialEq {
    /// Blend `start` towards `end`. `t` is 0 at `start` and 1 at `end`.
    fn interpolate_linear(start: Self, end: Self, t: f64) -> Self;
}

/// Angles, in radians. Kept exact.
impl Interpolatable for f64 {
    fn interpolate_linear(start: Self, end: Self, t: f64) -> Self {
        start + (end - start) * t
    }
}

/// Integer 2D points. Each axis is blended independently and truncated
/// toward zero.
impl Interpolatable for IVec2 {
    fn interpolate_linear(start: Self, end: Self, t: f64) -> Self {
        let x = f64::from(start.x) + t * f64::from(end.x - start.x);
        let y = f64::from(start.y) + t * f64::from(end.y - start.y);
        IVec2::new(x as i32, y as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_is_exact() {
        let v = f64::interpolate_linear(1.0, 2.0, 0.25);
        assert!((v - 1.25).abs() < 1e-12);
    }

    #[test]
    fn position_truncates_toward_zero() {
        let v = IVec2::interpolate_linear(IVec2::new(101, 655), IVec2::new(202, 1000), 1.0 / 3.0);
        let expected_y = (655.0 + 1.0 / 3.0 * (1000.0 - 655.0)) as i32;
        assert_eq!(v, IVec2::new(134, expected_y));

        // Negative results truncate up toward zero, not down.
        let v = IVec2::interpolate_linear(IVec2::new(0, 0), IVec2::new(-3, -3), 0.5);
        assert_eq!(v, IVec2::new(-1, -1));
    }
}

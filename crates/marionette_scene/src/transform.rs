//! 2D rotation helpers.
//!
//! Rotation by θ maps `(x, y) -> (x·cosθ + y·sinθ, −x·sinθ + y·cosθ)`.
//! Screen space is y-down, so a positive angle turns +x toward -y (up).

use glam::{DVec2, IVec2};

/// Rotate `v` by `angle` radians.
#[inline]
#[must_use]
pub fn rotate(v: DVec2, angle: f64) -> DVec2 {
    let (sin, cos) = angle.sin_cos();
    DVec2::new(cos * v.x + sin * v.y, -sin * v.x + cos * v.y)
}

/// Rotate an integer point, truncating each axis toward zero.
#[inline]
#[must_use]
pub fn rotate_point(point: IVec2, angle: f64) -> IVec2 {
    let r = rotate(point.as_dvec2(), angle);
    IVec2::new(r.x as i32, r.y as i32)
}

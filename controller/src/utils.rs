use crate::collision::Vec3;

/// Horizontal look direction for a yaw angle (radians, 0 looks down -Z).
#[inline]
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Horizontal right-hand direction for a yaw angle.
#[inline]
pub fn right_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

/// Fraction of the remaining gap closed by exponential easing at `rate` (1/s) over `dt`.
#[inline]
pub fn ease_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}

/// Move `current` toward `target` by exponential easing.
#[inline]
pub fn ease_toward(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * ease_factor(rate, dt)
}

/// `v` with its vertical component dropped.
#[inline]
pub fn horizontal(v: &Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Horizontal part of `v` that lies in the plane with unit normal `n`.
#[inline]
pub fn planar_along(v: &Vec3, n: &Vec3) -> Vec3 {
    horizontal(&(v - n * v.dot(n)))
}

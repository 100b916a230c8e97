/*!
Core collision types and math aliases shared by the collision submodules.

This module intentionally contains no algorithms. It defines the data types
exchanged between:
- geometry (closest-point and penetration queries against a single box)
- the collision world and its shared store
- the capsule resolver and ground probe
- the wall detector and the wall-run controller

Contacts are explicit values: "no wall" is `None`, never a zero-length normal.
*/

use nalgebra as na;
use rapier3d::parry::bounding_volume::Aabb;

use crate::constants::SAME_WALL_DOT;

/// Common math alias for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;

/// An axis-aligned static collider in world space.
///
/// Bounds are kept exactly as published. Zero-size and inverted boxes are legal; every
/// query clamps instead of asserting `min <= max`.
#[derive(Clone, Copy, Debug)]
pub struct AabbCollider {
    /// World-space bounds.
    pub bounds: Aabb,
    /// Eligible for wall-run contact (walls only; floors, ceilings and overhangs are not).
    pub surfable: bool,
}

impl AabbCollider {
    #[inline]
    pub fn new(min: Vec3, max: Vec3, surfable: bool) -> Self {
        Self {
            bounds: Aabb::new(min.into(), max.into()),
            surfable,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.bounds.mins.coords
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.bounds.maxs.coords
    }
}

/// The player collision volume: two spheres on a vertical segment.
///
/// `height` is measured from the feet to the top of the upper sphere. The sphere centers
/// are derived from the feet position on demand and never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capsule {
    pub radius: f32,
    pub height: f32,
}

impl Capsule {
    #[inline]
    pub fn new(radius: f32, height: f32) -> Self {
        Self { radius, height }
    }

    /// Center of the lower sphere.
    #[inline]
    pub fn bottom(&self, feet: Vec3) -> Vec3 {
        Vec3::new(feet.x, feet.y + self.radius, feet.z)
    }

    /// Center of the upper sphere.
    #[inline]
    pub fn top(&self, feet: Vec3) -> Vec3 {
        Vec3::new(feet.x, feet.y + self.height - self.radius, feet.z)
    }

    /// Both sphere centers, bottom first.
    #[inline]
    pub fn spheres(&self, feet: Vec3) -> [Vec3; 2] {
        [self.bottom(feet), self.top(feet)]
    }
}

/// How far and in which direction a sphere must move to leave a box.
#[derive(Clone, Copy, Debug)]
pub struct Penetration {
    /// Unit separation direction, pointing from the box toward the sphere.
    pub normal: Vec3,
    /// Push distance along `normal` (meters).
    pub depth: f32,
    /// Closest point on the box to the sphere center before the push.
    pub closest: Vec3,
}

/// A wall the capsule is touching.
#[derive(Clone, Copy, Debug)]
pub struct WallContact {
    /// Unit normal pointing from the wall into the capsule.
    pub normal: Vec3,
    /// Closest point on the wall box when the contact was found.
    pub point: Vec3,
    /// Top of the wall box (world Y).
    pub top_y: f32,
    /// Bounds of the wall box.
    pub bounds: Aabb,
}

impl WallContact {
    /// Whether `normal` belongs to the same wall orientation as this contact.
    #[inline]
    pub fn is_same_wall(&self, normal: &Vec3) -> bool {
        self.normal.dot(normal) > SAME_WALL_DOT
    }

    /// Signed distance from `point` to the wall plane, positive on the capsule side.
    #[inline]
    pub fn plane_distance(&self, point: &Vec3) -> f32 {
        (point - self.point).dot(&self.normal)
    }
}

/// Result of a single capsule resolve.
#[derive(Clone, Copy, Debug)]
pub struct ResolveResult {
    /// Corrected feet position.
    pub position: Vec3,
    /// Corrected velocity.
    pub velocity: Vec3,
    /// Whether the capsule is supported by ground this tick.
    pub on_ground: bool,
    /// Last qualifying wall contact found while resolving (never set when grounded).
    pub wall: Option<WallContact>,
}

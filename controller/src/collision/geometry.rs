use rapier3d::parry::bounding_volume::Aabb;

use super::{
    settings::{DEGENERATE_DIST, FACE_EPS, PENETRATION_SLOP},
    types::{Penetration, Vec3},
};

/// Clamp that tolerates `lo > hi` (returns `lo`), unlike `f32::clamp` which panics.
#[inline]
fn clamp_tolerant(v: f32, lo: f32, hi: f32) -> f32 {
    v.min(hi).max(lo)
}

/// Closest point on `bounds` to `point`.
///
/// Degenerate boxes are handled by the clamp: a zero-size box collapses to its corner and an
/// inverted axis collapses to its `min` coordinate.
#[inline]
pub fn closest_point(point: &Vec3, bounds: &Aabb) -> Vec3 {
    Vec3::new(
        clamp_tolerant(point.x, bounds.mins.x, bounds.maxs.x),
        clamp_tolerant(point.y, bounds.mins.y, bounds.maxs.y),
        clamp_tolerant(point.z, bounds.mins.z, bounds.maxs.z),
    )
}

/// Strict sphere/box overlap: touching at exactly `radius` does not count.
#[inline]
pub fn sphere_intersects(center: &Vec3, radius: f32, bounds: &Aabb) -> bool {
    (center - closest_point(center, bounds)).norm_squared() < radius * radius
}

/// Separation needed to push a sphere out of a box, or `None` if they do not overlap.
///
/// Overlaps no deeper than [`PENETRATION_SLOP`] are reported as `None`.
///
/// When the center is inside the box the push goes along the axis of least penetration,
/// far enough to clear the box by the radius. A center just above a box's bottom face (a
/// ceiling entered from below) therefore pushes down.
pub fn sphere_penetration(center: &Vec3, radius: f32, bounds: &Aabb) -> Option<Penetration> {
    let closest = closest_point(center, bounds);
    let delta = center - closest;
    let dist_sq = delta.norm_squared();
    let touch = (radius - PENETRATION_SLOP).max(0.0);
    if dist_sq >= touch * touch {
        return None;
    }

    let dist = dist_sq.sqrt();
    if dist > DEGENERATE_DIST {
        return Some(Penetration {
            normal: delta / dist,
            depth: radius - dist,
            closest,
        });
    }

    let (mins, maxs) = (&bounds.mins, &bounds.maxs);
    // Only reachable with the center outside the box, which the distance check above excludes.
    if mins.y > center.y + radius {
        return Some(Penetration {
            normal: Vec3::new(0.0, -1.0, 0.0),
            depth: radius,
            closest,
        });
    }

    let pen_x = (center.x - mins.x).min(maxs.x - center.x);
    let pen_y = (center.y - mins.y).min(maxs.y - center.y);
    let pen_z = (center.z - mins.z).min(maxs.z - center.z);
    let side = |c: f32, lo: f32, hi: f32| if c > (lo + hi) * 0.5 { 1.0 } else { -1.0 };

    let (normal, pen) = if pen_x <= pen_y && pen_x <= pen_z {
        (Vec3::new(side(center.x, mins.x, maxs.x), 0.0, 0.0), pen_x)
    } else if pen_y <= pen_z {
        (Vec3::new(0.0, side(center.y, mins.y, maxs.y), 0.0), pen_y)
    } else {
        (Vec3::new(0.0, 0.0, side(center.z, mins.z, maxs.z)), pen_z)
    };

    Some(Penetration {
        normal,
        depth: pen.max(0.0) + radius,
        closest,
    })
}

/// True if `closest` lies on exactly one face of `bounds`: not on an edge or a corner.
///
/// Only face contacts give a well-defined along-wall direction.
pub fn is_face_interior(closest: &Vec3, bounds: &Aabb) -> bool {
    let on = |v: f32, lo: f32, hi: f32| (v - lo).abs() <= FACE_EPS || (v - hi).abs() <= FACE_EPS;
    let boundary_count = [
        on(closest.x, bounds.mins.x, bounds.maxs.x),
        on(closest.y, bounds.mins.y, bounds.maxs.y),
        on(closest.z, bounds.mins.z, bounds.maxs.z),
    ]
    .iter()
    .filter(|&&b| b)
    .count();
    boundary_count == 1
}

use super::{
    geometry,
    settings::{DEGENERATE_DIST, WALL_NORMAL_THRESHOLD},
    types::{AabbCollider, Capsule, Vec3, WallContact},
};

/// Find the nearest surfable wall within `touch_epsilon` of the bottom sphere.
///
/// This is the no-penetration counterpart of the resolver's wall classification. It keeps a
/// wall contact alive when wall-run forces momentarily separate the capsule from the surface.
///
/// A collider is a candidate only if:
/// - it is surfable,
/// - the bottom sphere is within `radius + touch_epsilon` of it but not inside it,
/// - the contact normal is wall-like (`|normal.y| < WALL_NORMAL_THRESHOLD`),
/// - the closest point lies on exactly one face (edges and corners have no along-wall direction).
///
/// The nearest candidate wins.
pub fn scan_wall(
    colliders: &[AabbCollider],
    capsule: Capsule,
    feet: Vec3,
    touch_epsilon: f32,
) -> Option<WallContact> {
    let center = capsule.bottom(feet);
    let touch = capsule.radius + touch_epsilon;
    let mut best_dist_sq = touch * touch;
    let mut best = None;

    for c in colliders.iter().filter(|c| c.surfable) {
        let closest = geometry::closest_point(&center, &c.bounds);
        let delta = center - closest;
        let dist_sq = delta.norm_squared();
        if dist_sq >= best_dist_sq {
            continue;
        }

        let dist = dist_sq.sqrt();
        if dist < DEGENERATE_DIST {
            continue;
        }

        let normal = delta / dist;
        if normal.y.abs() >= WALL_NORMAL_THRESHOLD {
            continue;
        }
        if !geometry::is_face_interior(&closest, &c.bounds) {
            continue;
        }

        best_dist_sq = dist_sq;
        best = Some(WallContact {
            normal,
            point: closest,
            top_y: c.bounds.maxs.y,
            bounds: c.bounds,
        });
    }

    best
}

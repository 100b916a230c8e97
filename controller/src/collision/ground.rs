use super::{
    geometry,
    settings::{DEGENERATE_DIST, GROUND_NORMAL_MIN_Y, GROUND_TOLERANCE},
    types::{AabbCollider, Capsule, Vec3},
};

/// Ground found under the bottom sphere.
#[derive(Clone, Copy, Debug)]
pub struct GroundSupport {
    /// Unit support normal, pointing from the ground toward the sphere.
    pub normal: Vec3,
    /// Distance from the bottom sphere center to the support point (meters).
    pub distance: f32,
}

impl GroundSupport {
    /// Offset that puts the bottom sphere exactly `radius` from the support point.
    #[inline]
    pub fn snap_offset(&self, radius: f32) -> Vec3 {
        self.normal * (radius - self.distance)
    }
}

/// Look for ground support just under the bottom sphere.
///
/// - The bottom sphere is tested with its radius inflated by [`GROUND_TOLERANCE`].
/// - Only upward-facing contacts (`normal.y > GROUND_NORMAL_MIN_Y`) count as support.
/// - Returns the nearest qualifying support, or `None`.
///
/// Used after penetration resolution so a capsule resting on (or hovering just above) a floor
/// reads as grounded. Callers snap with [`GroundSupport::snap_offset`].
pub fn probe_ground(
    colliders: &[AabbCollider],
    capsule: Capsule,
    feet: Vec3,
) -> Option<GroundSupport> {
    let center = capsule.bottom(feet);
    let reach = capsule.radius + GROUND_TOLERANCE;

    let mut best: Option<GroundSupport> = None;
    for c in colliders {
        let closest = geometry::closest_point(&center, &c.bounds);
        let delta = center - closest;
        let dist_sq = delta.norm_squared();
        if dist_sq >= reach * reach || dist_sq <= DEGENERATE_DIST * DEGENERATE_DIST {
            continue;
        }

        let distance = dist_sq.sqrt();
        let normal = delta / distance;
        if normal.y <= GROUND_NORMAL_MIN_Y {
            continue;
        }

        if best.map_or(true, |b| distance < b.distance) {
            best = Some(GroundSupport { normal, distance });
        }
    }

    best
}

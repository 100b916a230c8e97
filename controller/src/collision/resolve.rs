use super::{
    geometry, ground,
    settings::{GROUND_NORMAL_MIN_Y, MAX_RESOLVE_ITERATIONS, WALL_NORMAL_THRESHOLD},
    types::{AabbCollider, Capsule, ResolveResult, Vec3, WallContact},
};

/// Push a two-sphere capsule out of a set of static boxes.
///
/// Algorithm:
/// - Each iteration scans colliders (in order) against the bottom then top sphere and
///   resolves only the first overlapping pair found.
/// - The capsule is pushed along the separation normal by the penetration depth.
/// - Ground contacts (`normal.y > GROUND_NORMAL_MIN_Y`) clamp `velocity.y >= 0`; any other
///   contact removes the velocity component along the normal.
/// - Surfable contacts with `|normal.y| < WALL_NORMAL_THRESHOLD` are wall candidates; the last
///   one found wins.
/// - Stops when an iteration finds no overlap or after `MAX_RESOLVE_ITERATIONS`. Leftover
///   overlap is accepted for this tick.
///
/// After the loop, a ground probe catches a capsule that is touching or hovering just above a
/// floor while not moving upward, and snaps it down onto the floor. A grounded result carries
/// no wall.
pub fn resolve_capsule(
    colliders: &[AabbCollider],
    position: Vec3,
    velocity: Vec3,
    capsule: Capsule,
) -> ResolveResult {
    let mut pos = position;
    let mut vel = velocity;
    let mut on_ground = false;
    let mut wall = None;
    let mut settled = false;

    for _ in 0..MAX_RESOLVE_ITERATIONS {
        let spheres = capsule.spheres(pos);
        let hit = colliders.iter().find_map(|c| {
            spheres.iter().find_map(|center| {
                geometry::sphere_penetration(center, capsule.radius, &c.bounds).map(|p| (c, p))
            })
        });

        let Some((collider, pen)) = hit else {
            settled = true;
            break;
        };

        pos += pen.normal * pen.depth;

        if pen.normal.y > GROUND_NORMAL_MIN_Y {
            on_ground = true;
            vel.y = vel.y.max(0.0);
        } else {
            vel -= pen.normal * vel.dot(&pen.normal);
            if collider.surfable && pen.normal.y.abs() < WALL_NORMAL_THRESHOLD {
                wall = Some(WallContact {
                    normal: pen.normal,
                    point: pen.closest,
                    top_y: collider.bounds.maxs.y,
                    bounds: collider.bounds,
                });
            }
        }
    }

    if !settled {
        log::trace!(
            "Capsule resolve hit the {MAX_RESOLVE_ITERATIONS}-iteration cap at {:?}; keeping residual overlap",
            pos
        );
    }

    if !on_ground && vel.y <= 0.0 {
        if let Some(support) = ground::probe_ground(colliders, capsule, pos) {
            pos += support.snap_offset(capsule.radius);
            on_ground = true;
            vel.y = 0.0;
        }
    }

    ResolveResult {
        position: pos,
        velocity: vel,
        on_ground,
        wall: if on_ground { None } else { wall },
    }
}

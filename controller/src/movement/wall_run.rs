/*!
Wall-run force model.

One wall-run tick, in order:
1) strip the velocity component pointing away from the wall
2) reduced gravity
3) on mount or wall switch: reset the session and retarget along-wall velocity
4) thrust (lift, mount boost, along-wall push), at most once per frame
5) strip again
6) ease along-wall overspeed toward the cap
7) snap the capsule to exactly one radius off the wall plane

Thrust is integrated with the frame's thrust delta (ticks run this frame times the tick
length) instead of the tick length, so the impulse per frame does not depend on how many
sub-steps the frame needed.
*/

use crate::{
    collision::{Vec3, WallContact},
    constants::{
        GRAVITY_MPS2, INITIAL_SURF_SPEED_MPS, SAME_WALL_DOT, WALL_JUMP_COOLDOWN_TICKS,
        WALL_RUN_FORWARD_THRUST_DURATION_S, WALL_RUN_GRAVITY_MULT, WALL_RUN_MOUNT_BOOST_DURATION_S,
        WALL_RUN_MOUNT_DELAY_S, WALL_RUN_MOUNT_LIFT_BOOST, WALL_RUN_SPEED_CAP_MPS,
        WALL_RUN_SPEED_EASE, WALL_RUN_VERTICAL_THRUST_DURATION_S,
    },
    utils::{ease_factor, planar_along},
};

use super::tuning::MovementTuning;

/// Along-wall directions shorter than this before normalizing are degenerate.
const ALONG_WALL_MIN_LEN: f32 = 0.1;

/// Per-mount wall-run bookkeeping plus the wall-jump cooldown.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WallRunSession {
    /// Thrust time accumulated since mount (seconds).
    pub elapsed: f32,
    /// Along-wall thrust direction fixed at mount.
    pub thrust_dir: Option<Vec3>,
    /// Wall normal of the previous tick, for switch detection.
    pub prev_normal: Option<Vec3>,
    /// Remaining ticks during which the departed wall cannot be re-mounted.
    pub cooldown_ticks: u32,
    /// Normal of the wall last jumped from.
    pub jumped_from: Option<Vec3>,
}

impl WallRunSession {
    /// Forget mount timing and thrust direction. The wall-jump cooldown is kept.
    pub fn end(&mut self) {
        self.elapsed = 0.0;
        self.thrust_dir = None;
    }

    pub fn start_wall_jump_cooldown(&mut self, normal: Vec3) {
        self.cooldown_ticks = WALL_JUMP_COOLDOWN_TICKS;
        self.jumped_from = Some(normal);
    }

    /// Whether `wall` is the wall just jumped from and the cooldown is still running.
    pub fn blocks_reattach(&self, wall: &WallContact) -> bool {
        self.cooldown_ticks > 0 && self.jumped_from.is_some_and(|j| wall.is_same_wall(&j))
    }

    /// Whether `normal` differs from last tick's wall enough to count as a new wall.
    pub fn is_wall_switch(&self, normal: &Vec3) -> bool {
        self.prev_normal.is_some_and(|p| p.dot(normal) < SAME_WALL_DOT)
    }
}

/// Thrust bookkeeping shared by all sub-steps of one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameThrust {
    thrust_delta: f32,
    first_substep: bool,
    applied: bool,
}

impl FrameThrust {
    /// `thrust_delta` is the simulated time of the whole frame (seconds).
    pub fn new(thrust_delta: f32) -> Self {
        Self {
            thrust_delta,
            first_substep: true,
            applied: false,
        }
    }

    #[inline]
    pub fn applied(&self) -> bool {
        self.applied
    }

    /// Called between sub-steps.
    pub fn next_substep(&mut self) {
        self.first_substep = false;
    }

    /// Take this frame's thrust if it is still available to this sub-step.
    fn claim(&mut self, remount: bool) -> bool {
        if self.applied || !(self.first_substep || remount) {
            return false;
        }
        self.applied = true;
        true
    }
}

/// Inputs of one wall-run tick.
#[derive(Clone, Copy, Debug)]
pub struct WallRunStep<'a> {
    pub wall: &'a WallContact,
    /// Horizontal look direction.
    pub forward: Vec3,
    /// The session just started or moved to a different wall.
    pub remount: bool,
    pub radius: f32,
    pub dt: f32,
    pub tuning: &'a MovementTuning,
}

/// Unit horizontal direction along a wall (`normal x up`), or `None` for near-horizontal normals.
pub fn along_wall_dir(normal: &Vec3) -> Option<Vec3> {
    let along = normal.cross(&Vec3::y());
    Vec3::new(along.x, 0.0, along.z).try_normalize(ALONG_WALL_MIN_LEN)
}

/// Retarget velocity for a fresh wall-run and pick the thrust direction.
///
/// - `velocity.y` is clamped to be non-negative.
/// - The along-wall direction is flipped to agree with `forward`.
/// - The horizontal in-plane velocity is replaced by `max(INITIAL_SURF_SPEED_MPS, incoming)`
///   along that direction.
///
/// Returns the thrust direction, or `None` when the wall has no usable along-wall direction
/// (velocity is still clamped upward in that case).
pub fn mount(velocity: &mut Vec3, normal: &Vec3, forward: &Vec3) -> Option<Vec3> {
    velocity.y = velocity.y.max(0.0);

    let along = along_wall_dir(normal)?;
    let dir = if forward.dot(&along) < 0.0 { -along } else { along };

    let in_plane = planar_along(velocity, normal);
    let speed = in_plane.norm().max(INITIAL_SURF_SPEED_MPS);
    *velocity += dir * speed - in_plane;

    Some(dir)
}

/// Remove the velocity component pointing away from the wall.
#[inline]
fn strip_outward(velocity: &mut Vec3, normal: &Vec3) {
    let out = velocity.dot(normal);
    if out > 0.0 {
        *velocity -= normal * out;
    }
}

fn apply_thrust(
    velocity: &mut Vec3,
    session: &mut WallRunSession,
    wall: &WallContact,
    tuning: &MovementTuning,
    td: f32,
) {
    let t = session.elapsed;

    let surfing = (t - WALL_RUN_MOUNT_DELAY_S).max(0.0);
    let lift = (1.0 - surfing / WALL_RUN_VERTICAL_THRUST_DURATION_S).max(0.0);
    velocity.y += tuning.wall_run_lift_accel * td * lift;

    if t < WALL_RUN_MOUNT_BOOST_DURATION_S {
        velocity.y += WALL_RUN_MOUNT_LIFT_BOOST * td;
    }

    if session.thrust_dir.is_none() {
        session.thrust_dir = along_wall_dir(&wall.normal);
    }
    if let Some(dir) = session.thrust_dir {
        let push = (1.0 - t / WALL_RUN_FORWARD_THRUST_DURATION_S).max(0.0);
        *velocity += dir * (tuning.wall_run_along_thrust * push * td);
    }

    session.elapsed += td;
}

/// Run one wall-run tick against `step.wall`.
pub fn apply_wall_run(
    step: &WallRunStep<'_>,
    position: &mut Vec3,
    velocity: &mut Vec3,
    session: &mut WallRunSession,
    frame: &mut FrameThrust,
) {
    let n = step.wall.normal;

    // 1) Stay on the wall.
    strip_outward(velocity, &n);

    // 2) Reduced gravity.
    velocity.y -= GRAVITY_MPS2 * WALL_RUN_GRAVITY_MULT * step.dt;

    // 3) Fresh session on mount or switch.
    if step.remount {
        session.end();
        session.thrust_dir = mount(velocity, &n, &step.forward);
        log::debug!(
            "Wall-run mount: normal={:?} thrust_dir={:?} speed={:.2}",
            n,
            session.thrust_dir,
            planar_along(velocity, &n).norm()
        );
    }

    // 4) Thrust, once per frame.
    if frame.claim(step.remount) {
        apply_thrust(velocity, session, step.wall, step.tuning, frame.thrust_delta);
    }

    // 5) Thrust never pushes off the wall.
    strip_outward(velocity, &n);

    // 6) Ease overspeed down to the cap.
    let in_plane = planar_along(velocity, &n);
    let speed = in_plane.norm();
    if speed > WALL_RUN_SPEED_CAP_MPS {
        let eased = speed + (WALL_RUN_SPEED_CAP_MPS - speed) * ease_factor(WALL_RUN_SPEED_EASE, step.dt);
        *velocity += in_plane * ((eased - speed) / speed);
    }

    // 7) Hold exactly one radius off the plane.
    let dist = step.wall.plane_distance(position);
    *position += n * (step.radius - dist);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CAPSULE_RADIUS;
    use rapier3d::parry::bounding_volume::Aabb;

    const DT: f32 = 1.0 / 60.0;
    const EPS: f32 = 1.0e-4;

    fn east_wall_contact() -> WallContact {
        contact_with_normal(Vec3::new(-1.0, 0.0, 0.0))
    }

    fn contact_with_normal(normal: Vec3) -> WallContact {
        WallContact {
            normal,
            point: Vec3::new(1.0, 3.4, 0.0),
            top_y: 10.0,
            bounds: Aabb::new([1.0, 0.0, -10.0].into(), [2.0, 10.0, 10.0].into()),
        }
    }

    #[test]
    fn mount_keeps_faster_incoming_speed() {
        let n = Vec3::new(-1.0, 0.0, 0.0);
        let mut v = Vec3::new(0.0, -3.0, -9.0);
        let dir = mount(&mut v, &n, &Vec3::new(0.0, 0.0, -1.0)).unwrap();
        assert!((dir - Vec3::new(0.0, 0.0, -1.0)).norm() < EPS);
        assert!((v.z + 9.0).abs() < EPS);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn mount_raises_slow_entry_and_follows_look() {
        let n = Vec3::new(-1.0, 0.0, 0.0);
        // Moving -Z but looking +Z: thrust direction follows the look.
        let mut v = Vec3::new(0.0, 1.0, -2.0);
        let dir = mount(&mut v, &n, &Vec3::new(0.0, 0.0, 1.0)).unwrap();
        assert!((dir - Vec3::new(0.0, 0.0, 1.0)).norm() < EPS);
        assert!((v.z - INITIAL_SURF_SPEED_MPS).abs() < EPS);
        assert_eq!(v.y, 1.0);
    }

    #[test]
    fn near_horizontal_normal_has_no_along_dir() {
        assert!(along_wall_dir(&Vec3::y()).is_none());
        let mut v = Vec3::new(0.0, -1.0, 0.0);
        assert!(mount(&mut v, &Vec3::y(), &Vec3::new(0.0, 0.0, -1.0)).is_none());
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn first_tick_applies_mount_and_thrust() {
        let wall = east_wall_contact();
        let tuning = MovementTuning::default();
        let step = WallRunStep {
            wall: &wall,
            forward: Vec3::new(0.0, 0.0, -1.0),
            remount: true,
            radius: CAPSULE_RADIUS,
            dt: DT,
            tuning: &tuning,
        };
        let mut pos = Vec3::new(0.55, 3.0, 0.0);
        let mut vel = Vec3::new(0.0, 0.0, -5.0);
        let mut session = WallRunSession::default();
        let mut frame = FrameThrust::new(DT);

        apply_wall_run(&step, &mut pos, &mut vel, &mut session, &mut frame);

        let lift = tuning.wall_run_lift_accel * DT + WALL_RUN_MOUNT_LIFT_BOOST * DT;
        assert!((vel.y - lift).abs() < EPS);
        assert!((vel.z + INITIAL_SURF_SPEED_MPS + tuning.wall_run_along_thrust * DT).abs() < EPS);
        assert!(vel.x.abs() < EPS);
        assert!((pos.x - (1.0 - CAPSULE_RADIUS)).abs() < EPS);
        assert!((session.elapsed - DT).abs() < 1.0e-6);
        assert!(frame.applied());
    }

    #[test]
    fn thrust_applies_once_per_frame() {
        let wall = east_wall_contact();
        let tuning = MovementTuning::default();
        let mut step = WallRunStep {
            wall: &wall,
            forward: Vec3::new(0.0, 0.0, -1.0),
            remount: false,
            radius: CAPSULE_RADIUS,
            dt: DT,
            tuning: &tuning,
        };
        let mut pos = Vec3::new(0.6, 3.0, 0.0);
        let mut vel = Vec3::new(0.0, 0.0, -8.0);
        let mut session = WallRunSession {
            elapsed: 0.5,
            thrust_dir: Some(Vec3::new(0.0, 0.0, -1.0)),
            ..Default::default()
        };
        let mut frame = FrameThrust::new(2.0 * DT);

        apply_wall_run(&step, &mut pos, &mut vel, &mut session, &mut frame);
        let after_first = vel;
        assert!((session.elapsed - (0.5 + 2.0 * DT)).abs() < 1.0e-6);

        frame.next_substep();
        apply_wall_run(&step, &mut pos, &mut vel, &mut session, &mut frame);
        // Second sub-step: gravity only, no thrust.
        assert!((vel.y - (after_first.y - GRAVITY_MPS2 * WALL_RUN_GRAVITY_MULT * DT)).abs() < EPS);
        assert!((vel.z - after_first.z).abs() < EPS);

        // A wall switch in a later sub-step still gets nothing once the frame's thrust is spent.
        step.remount = true;
        apply_wall_run(&step, &mut pos, &mut vel, &mut session, &mut frame);
        assert_eq!(session.elapsed, 0.0);
        assert!(frame.applied());
    }

    #[test]
    fn overspeed_eases_toward_cap_without_undershoot() {
        let wall = east_wall_contact();
        let tuning = MovementTuning {
            wall_run_along_thrust: 0.0,
            wall_run_lift_accel: 0.0,
            ..Default::default()
        };
        let step = WallRunStep {
            wall: &wall,
            forward: Vec3::new(0.0, 0.0, -1.0),
            remount: false,
            radius: CAPSULE_RADIUS,
            dt: DT,
            tuning: &tuning,
        };
        let mut pos = Vec3::new(0.6, 3.0, 0.0);
        let mut vel = Vec3::new(0.0, 0.0, -30.0);
        let mut session = WallRunSession { elapsed: 1.0, ..Default::default() };

        let mut prev = 30.0;
        for _ in 0..60 {
            let mut frame = FrameThrust::new(DT);
            apply_wall_run(&step, &mut pos, &mut vel, &mut session, &mut frame);
            let speed = -vel.z;
            assert!(speed < prev);
            assert!(speed >= WALL_RUN_SPEED_CAP_MPS);
            prev = speed;
        }
        assert!(prev - WALL_RUN_SPEED_CAP_MPS < 0.01);
    }

    #[test]
    fn outward_velocity_is_removed() {
        let wall = east_wall_contact();
        let tuning = MovementTuning::default();
        let step = WallRunStep {
            wall: &wall,
            forward: Vec3::new(0.0, 0.0, -1.0),
            remount: false,
            radius: CAPSULE_RADIUS,
            dt: DT,
            tuning: &tuning,
        };
        let mut pos = Vec3::new(0.6, 3.0, 0.0);
        // Moving away from the wall (-X).
        let mut vel = Vec3::new(-4.0, 0.0, -7.0);
        let mut session = WallRunSession { elapsed: 2.0, ..Default::default() };
        let mut frame = FrameThrust::new(DT);
        apply_wall_run(&step, &mut pos, &mut vel, &mut session, &mut frame);
        assert!(vel.x.abs() < EPS);
    }

    #[test]
    fn cooldown_blocks_only_the_departed_wall() {
        let mut session = WallRunSession::default();
        let departed = east_wall_contact();
        session.start_wall_jump_cooldown(departed.normal);
        assert!(session.blocks_reattach(&departed));
        // ~10 degrees off: a different wall.
        let a = 10.0f32.to_radians();
        let other = contact_with_normal(Vec3::new(-a.cos(), 0.0, a.sin()));
        assert!(!session.blocks_reattach(&other));

        session.cooldown_ticks = 0;
        assert!(!session.blocks_reattach(&departed));
    }
}

use crate::{
    collision::{
        Capsule, CollisionWorld, Vec3, WallContact,
        geometry::is_face_interior,
        resolve_capsule, scan_wall,
        settings::{WALL_RUN_NEAR_EPSILON, WALL_RUN_PLANE_TOLERANCE, WALL_TOUCH_EPSILON},
    },
    constants::{
        CAPSULE_RADIUS, CROUCH_EYE_HEIGHT, CROUCH_HEIGHT, GRAVITY_MPS2, HORIZONTAL_DAMPING,
        JUMP_VELOCITY_MPS, STAND_EYE_HEIGHT, STAND_HEIGHT, WALL_JUMP_OUT_MPS, WALL_JUMP_UP_MPS,
        WALL_LATCH_JUMP_MPS, WALL_TOP_EYE_MARGIN,
    },
    utils::ease_toward,
};

use super::{
    intent::MoveIntent,
    state::{MovementState, TickCarry},
    tuning::MovementTuning,
    wall_run::{FrameThrust, WallRunStep, apply_wall_run},
};

/// Kinematic state of the player capsule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterState {
    /// Feet position (world space).
    pub position: Vec3,
    pub velocity: Vec3,
    /// Current capsule height, eased between crouch and stand.
    pub height: f32,
    /// Current eye height above the feet.
    pub eye_height: f32,
    pub crouching: bool,
}

impl CharacterState {
    /// Standing and at rest at `position`.
    pub fn spawn(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::zeros(),
            height: STAND_HEIGHT,
            eye_height: STAND_EYE_HEIGHT,
            crouching: false,
        }
    }

    #[inline]
    pub fn capsule(&self) -> Capsule {
        Capsule::new(CAPSULE_RADIUS, self.height)
    }

    /// World-space eye Y.
    #[inline]
    pub fn eye_y(&self) -> f32 {
        self.position.y + self.eye_height
    }

    fn is_finite(&self) -> bool {
        self.position.iter().all(|v| v.is_finite())
            && self.velocity.iter().all(|v| v.is_finite())
            && self.height.is_finite()
            && self.eye_height.is_finite()
    }
}

/// Read-only inputs shared by every tick of a frame.
#[derive(Clone, Copy, Debug)]
pub struct TickContext<'a> {
    pub world: &'a CollisionWorld,
    pub tuning: &'a MovementTuning,
    /// Tick length (seconds).
    pub dt: f32,
}

/// Whether an airborne wall contact passes the geometric wall-run gates.
///
/// - the capsule stays within `radius + WALL_RUN_PLANE_TOLERANCE` of the wall plane
/// - the wall point nearest the feet lies on a face interior (not past an edge)
fn airborne_wall_ok(wall: &WallContact, feet: &Vec3) -> bool {
    if wall.plane_distance(feet).abs() > CAPSULE_RADIUS + WALL_RUN_PLANE_TOLERANCE {
        return false;
    }
    is_face_interior(&CollisionWorld::closest_point(feet, &wall.bounds), &wall.bounds)
}

/// Run one fixed tick of player movement.
///
/// Input is interpreted through `carry.state` (the previous tick's result); the returned
/// carry holds the state that governs the next tick. `character` is updated in place. If the
/// tick produced a non-finite value the character is restored to its pre-tick state.
pub fn step(
    character: &mut CharacterState,
    carry: TickCarry,
    intent: &MoveIntent,
    ctx: &TickContext<'_>,
    frame: &mut FrameThrust,
) -> TickCarry {
    let before = *character;
    let tuning = ctx.tuning;
    let dt = ctx.dt;
    let colliders = ctx.world.colliders();
    let jump_pressed = intent.jump && !carry.jump_held;

    let mut wall = carry.wall;
    let mut wall_run_mode = carry.wall_run_mode;
    let mut session = carry.session;

    // 0) Posture: forced crouch when there is no room to stand.
    let standing = Capsule::new(CAPSULE_RADIUS, STAND_HEIGHT);
    character.crouching = intent.crouch || !ctx.world.has_headroom(character.position, standing);

    // 1) Input, through last tick's state.
    match carry.state {
        MovementState::Walking => {
            if let Some(dir) = intent.wish_dir() {
                character.velocity.x = dir.x * tuning.move_speed;
                character.velocity.z = dir.z * tuning.move_speed;
            }
            if jump_pressed {
                character.velocity.y = if wall.is_some() {
                    WALL_LATCH_JUMP_MPS
                } else {
                    JUMP_VELOCITY_MPS
                };
            }
        }
        MovementState::Falling => {
            if let Some(dir) = intent.wish_dir() {
                let want = dir * tuning.move_speed;
                let a = tuning.air_control;
                character.velocity.x += (want.x - character.velocity.x) * a;
                character.velocity.z += (want.z - character.velocity.z) * a;
            }
        }
        MovementState::WallRunning => {
            if jump_pressed {
                if let Some(contact) = wall.take() {
                    character.velocity += contact.normal * WALL_JUMP_OUT_MPS;
                    character.velocity.y = WALL_JUMP_UP_MPS;
                    session.start_wall_jump_cooldown(contact.normal);
                    wall_run_mode = false;
                    log::debug!("Wall jump off {:?}", contact.normal);
                }
            }
        }
    }

    // 2) Integrate, then ease posture.
    character.position += character.velocity * dt;
    let (height, eye) = if character.crouching {
        (CROUCH_HEIGHT, CROUCH_EYE_HEIGHT)
    } else {
        (STAND_HEIGHT, STAND_EYE_HEIGHT)
    };
    character.height = ease_toward(character.height, height, tuning.crouch_lerp_speed, dt)
        .clamp(CROUCH_HEIGHT, STAND_HEIGHT);
    character.eye_height = ease_toward(character.eye_height, eye, tuning.crouch_lerp_speed, dt)
        .clamp(CROUCH_EYE_HEIGHT, STAND_EYE_HEIGHT);

    // 3) Collide.
    let capsule = character.capsule();
    let resolved = resolve_capsule(colliders, character.position, character.velocity, capsule);
    character.position = resolved.position;
    character.velocity = resolved.velocity;
    let on_ground = resolved.on_ground;

    // 4) Wall contact: fresh contact wins, otherwise keep the carried one, then scan.
    wall = if on_ground { None } else { resolved.wall.or(wall) };
    let was_wall_running = carry.state == MovementState::WallRunning;
    if wall.is_none() {
        if on_ground {
            wall = scan_wall(colliders, capsule, character.position, WALL_TOUCH_EPSILON);
        } else if was_wall_running || session.cooldown_ticks > 0 {
            wall = scan_wall(colliders, capsule, character.position, WALL_RUN_NEAR_EPSILON);
        }
    }

    // 5) Gates.
    if session.cooldown_ticks > 0 {
        if wall.is_some_and(|w| session.blocks_reattach(&w)) {
            wall = None;
            wall_run_mode = false;
        }
        session.cooldown_ticks -= 1;
    }
    if wall.is_some_and(|w| character.eye_y() >= w.top_y - WALL_TOP_EYE_MARGIN) {
        wall = None;
        wall_run_mode = false;
    }
    if !on_ground && wall.is_some_and(|w| !airborne_wall_ok(&w, &character.position)) {
        wall = None;
        wall_run_mode = false;
    }

    if on_ground {
        wall_run_mode = false;
    } else if wall.is_some() && !carry.on_ground {
        wall_run_mode = true;
    }

    // 6) Transition.
    let state = carry.state.next(on_ground, wall_run_mode && wall.is_some());
    if state != carry.state {
        log::debug!("Movement state {} -> {}", carry.state, state);
    }

    // 7) Per-state forces.
    match (state, wall) {
        (MovementState::WallRunning, Some(contact)) => {
            let remount = !was_wall_running || session.is_wall_switch(&contact.normal);
            let wall_step = WallRunStep {
                wall: &contact,
                forward: intent.look_forward(),
                remount,
                radius: CAPSULE_RADIUS,
                dt,
                tuning,
            };
            apply_wall_run(
                &wall_step,
                &mut character.position,
                &mut character.velocity,
                &mut session,
                frame,
            );
        }
        (MovementState::Falling, _) => {
            character.velocity.y -= GRAVITY_MPS2 * dt;
        }
        _ => {}
    }

    if state != MovementState::WallRunning {
        session.end();
        character.velocity.x *= HORIZONTAL_DAMPING;
        character.velocity.z *= HORIZONTAL_DAMPING;
    }
    session.prev_normal = wall.map(|w| w.normal);

    // 8) Never publish a non-finite state.
    if !character.is_finite() {
        log::warn!(
            "Non-finite character state after tick ({:?}); reverting to {:?}",
            character,
            before.position
        );
        *character = before;
        return TickCarry {
            jump_held: intent.jump,
            ..carry
        };
    }

    TickCarry {
        state,
        on_ground,
        jump_held: intent.jump,
        wall_run_mode,
        wall,
        session,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::AabbCollider;

    const DT: f32 = 1.0 / 60.0;
    const EPS: f32 = 1.0e-3;

    fn world(colliders: Vec<AabbCollider>) -> CollisionWorld {
        CollisionWorld::new(colliders)
    }

    fn slab_floor() -> AabbCollider {
        AabbCollider::new(Vec3::new(-50.0, -1.0, -50.0), Vec3::new(50.0, 0.0, 50.0), false)
    }

    fn east_wall() -> AabbCollider {
        AabbCollider::new(Vec3::new(1.0, 0.0, -10.0), Vec3::new(2.0, 10.0, 10.0), true)
    }

    fn tick(
        w: &CollisionWorld,
        ch: &mut CharacterState,
        carry: TickCarry,
        intent: &MoveIntent,
    ) -> TickCarry {
        let tuning = MovementTuning::default();
        let ctx = TickContext { world: w, tuning: &tuning, dt: DT };
        let mut frame = FrameThrust::new(DT);
        step(ch, carry, intent, &ctx, &mut frame)
    }

    fn airborne() -> TickCarry {
        TickCarry {
            state: MovementState::Falling,
            on_ground: false,
            ..Default::default()
        }
    }

    #[test]
    fn spawn_on_thin_floor_settles_grounded() {
        let w = world(vec![AabbCollider::new(
            Vec3::new(-5000.0, 0.0, -5000.0),
            Vec3::new(5000.0, 0.1, 5000.0),
            false,
        )]);
        let mut ch = CharacterState::spawn(Vec3::new(0.0, 0.0, 8.0));
        let carry = tick(&w, &mut ch, TickCarry::default(), &MoveIntent::default());
        assert!(carry.on_ground);
        assert_eq!(carry.state, MovementState::Walking);
        assert_eq!(ch.velocity.y, 0.0);
        assert!((ch.position.y - 0.1).abs() < EPS);
    }

    #[test]
    fn falling_capsule_lands_with_bottom_sphere_at_radius() {
        let w = world(vec![slab_floor()]);
        let mut ch = CharacterState::spawn(Vec3::new(0.0, 1.0, 0.0));
        ch.velocity = Vec3::new(0.0, -5.0, 0.0);

        let mut carry = airborne();
        for _ in 0..60 {
            carry = tick(&w, &mut ch, carry, &MoveIntent::default());
            if carry.on_ground {
                break;
            }
        }
        assert!(carry.on_ground);
        assert_eq!(carry.state, MovementState::Walking);
        assert_eq!(ch.velocity.y, 0.0);
        assert!(ch.position.y.abs() < 1.0e-4, "feet at {}", ch.position.y);

        // Resting ticks keep it there.
        for _ in 0..10 {
            carry = tick(&w, &mut ch, carry, &MoveIntent::default());
        }
        assert_eq!(carry.state, MovementState::Walking);
        assert!(ch.position.y.abs() < 1.0e-4);
    }

    #[test]
    fn walking_input_sets_speed_and_jump_leaves_ground() {
        let w = world(vec![slab_floor()]);
        let mut ch = CharacterState::spawn(Vec3::zeros());
        let intent = MoveIntent { forward: 1.0, ..Default::default() };
        let carry = tick(&w, &mut ch, TickCarry::default(), &intent);
        assert_eq!(carry.state, MovementState::Walking);
        assert!((ch.velocity.z + 14.0 * HORIZONTAL_DAMPING).abs() < EPS);

        let jump = MoveIntent { jump: true, ..Default::default() };
        let carry = tick(&w, &mut ch, carry, &jump);
        assert_eq!(carry.state, MovementState::Falling);
        assert!((ch.velocity.y - (JUMP_VELOCITY_MPS - GRAVITY_MPS2 * DT)).abs() < EPS);

        // Holding jump does not re-trigger.
        assert!(carry.jump_held);
    }

    #[test]
    fn held_jump_only_fires_on_the_press_edge() {
        let w = world(vec![slab_floor()]);
        let mut ch = CharacterState::spawn(Vec3::zeros());
        let held = TickCarry { jump_held: true, ..Default::default() };
        let jump = MoveIntent { jump: true, ..Default::default() };
        let carry = tick(&w, &mut ch, held, &jump);
        assert_eq!(carry.state, MovementState::Walking);
        assert_eq!(ch.velocity.y, 0.0);
    }

    #[test]
    fn grounded_jump_next_to_wall_is_a_small_latch_hop() {
        let w = world(vec![slab_floor(), east_wall()]);
        let mut ch = CharacterState::spawn(Vec3::new(0.55, 0.0, 0.0));
        // First tick finds the wall within touch range.
        let carry = tick(&w, &mut ch, TickCarry::default(), &MoveIntent::default());
        assert!(carry.wall.is_some());
        let jump = MoveIntent { jump: true, ..Default::default() };
        let carry = tick(&w, &mut ch, carry, &jump);
        assert_eq!(carry.state, MovementState::Falling);
        assert!((ch.velocity.y - (WALL_LATCH_JUMP_MPS - GRAVITY_MPS2 * DT)).abs() < EPS);
    }

    #[test]
    fn falling_into_surfable_wall_mounts() {
        let w = world(vec![east_wall()]);
        let mut ch = CharacterState::spawn(Vec3::new(0.65, 3.0, 0.0));
        ch.velocity = Vec3::new(3.0, 0.0, -5.0);

        let carry = tick(&w, &mut ch, airborne(), &MoveIntent::default());

        assert_eq!(carry.state, MovementState::WallRunning);
        assert!(carry.wall_run_mode);
        let contact = carry.wall.unwrap();
        assert!((contact.normal - Vec3::new(-1.0, 0.0, 0.0)).norm() < EPS);
        assert!(ch.velocity.y >= 0.0);
        assert!((ch.velocity.y - 0.5).abs() < EPS);
        assert!((ch.velocity.z + 6.0 + 20.0 * DT).abs() < EPS);
        assert!((ch.position.x - (1.0 - CAPSULE_RADIUS)).abs() < EPS);
        assert!(carry.session.thrust_dir.is_some());
    }

    #[test]
    fn wall_contact_while_leaving_ground_does_not_mount() {
        let w = world(vec![east_wall()]);
        let mut ch = CharacterState::spawn(Vec3::new(0.65, 3.0, 0.0));
        ch.velocity = Vec3::new(3.0, 0.0, -5.0);
        let carry = TickCarry { state: MovementState::Falling, on_ground: true, ..Default::default() };
        let carry = tick(&w, &mut ch, carry, &MoveIntent::default());
        assert_eq!(carry.state, MovementState::Falling);
        assert!(!carry.wall_run_mode);
    }

    #[test]
    fn wall_run_keeps_wall_through_separation() {
        let w = world(vec![east_wall()]);
        let mut ch = CharacterState::spawn(Vec3::new(0.65, 3.0, 0.0));
        ch.velocity = Vec3::new(3.0, 0.0, -5.0);
        let mut carry = tick(&w, &mut ch, airborne(), &MoveIntent::default());
        for _ in 0..30 {
            carry = tick(&w, &mut ch, carry, &MoveIntent::default());
            assert_eq!(carry.state, MovementState::WallRunning);
            assert!((ch.position.x - (1.0 - CAPSULE_RADIUS)).abs() < EPS);
        }
        assert!(carry.session.elapsed > 0.4);
    }

    #[test]
    fn wall_jump_cooldown_blocks_same_wall_but_not_another() {
        let w = world(vec![east_wall()]);
        let mut ch = CharacterState::spawn(Vec3::new(0.65, 3.0, 0.0));
        ch.velocity = Vec3::new(3.0, 0.0, -5.0);
        let carry = tick(&w, &mut ch, airborne(), &MoveIntent::default());
        assert_eq!(carry.state, MovementState::WallRunning);

        let jump = MoveIntent { jump: true, ..Default::default() };
        let carry = tick(&w, &mut ch, carry, &jump);
        assert_eq!(carry.state, MovementState::Falling);
        assert!(ch.velocity.x < -5.0);
        let departed = Vec3::new(-1.0, 0.0, 0.0);
        assert!(carry.session.jumped_from.is_some_and(|j| (j - departed).norm() < EPS));
        // The re-acquired wall was blocked and one cooldown tick consumed.
        assert_eq!(carry.session.cooldown_ticks, 2);
        assert!(carry.wall.is_none());

        // Pulled back against the same wall inside the cooldown: no re-entry.
        let mut back = ch;
        back.position.x = 0.6;
        back.velocity = Vec3::new(2.0, 0.0, -5.0);
        let again = tick(&w, &mut back, carry, &MoveIntent::default());
        assert_ne!(again.state, MovementState::WallRunning);
        assert!(again.wall.is_none());

        // A wall facing a different way may be mounted immediately.
        let north = AabbCollider::new(Vec3::new(-10.0, 0.0, -2.0), Vec3::new(10.0, 10.0, -1.0), true);
        let w2 = world(vec![north]);
        let mut other = ch;
        other.position = Vec3::new(0.0, 3.0, -0.65);
        other.velocity = Vec3::new(-5.0, 0.0, -3.0);
        let switched = tick(&w2, &mut other, carry, &MoveIntent::default());
        assert_eq!(switched.state, MovementState::WallRunning);
    }

    #[test]
    fn wall_above_eye_is_required() {
        // Wall top below the eye.
        let low = AabbCollider::new(Vec3::new(1.0, 0.0, -10.0), Vec3::new(2.0, 4.0, 10.0), true);
        let w = world(vec![low]);
        let mut ch = CharacterState::spawn(Vec3::new(0.65, 3.0, 0.0));
        ch.velocity = Vec3::new(3.0, 0.0, -5.0);
        let carry = tick(&w, &mut ch, airborne(), &MoveIntent::default());
        assert_eq!(carry.state, MovementState::Falling);
        assert!(carry.wall.is_none());
    }

    #[test]
    fn running_past_the_wall_end_detaches() {
        let short = AabbCollider::new(Vec3::new(1.0, 0.0, -1.0), Vec3::new(2.0, 10.0, 1.0), true);
        let w = world(vec![short]);
        let mut ch = CharacterState::spawn(Vec3::new(0.65, 3.0, 0.0));
        ch.velocity = Vec3::new(3.0, 0.0, -5.0);
        let mut carry = tick(&w, &mut ch, airborne(), &MoveIntent::default());
        assert_eq!(carry.state, MovementState::WallRunning);

        let mut left = false;
        for _ in 0..60 {
            carry = tick(&w, &mut ch, carry, &MoveIntent::default());
            if carry.state == MovementState::Falling {
                left = true;
                break;
            }
        }
        assert!(left);
        assert!(ch.position.z < -0.99);
    }

    #[test]
    fn low_ceiling_forces_crouch() {
        let ceiling = AabbCollider::new(Vec3::new(-5.0, 1.2, -5.0), Vec3::new(5.0, 2.0, 5.0), false);
        let w = world(vec![slab_floor(), ceiling]);
        let mut ch = CharacterState::spawn(Vec3::zeros());
        ch.height = CROUCH_HEIGHT;
        ch.eye_height = CROUCH_EYE_HEIGHT;
        let carry = tick(&w, &mut ch, TickCarry::default(), &MoveIntent::default());
        assert!(ch.crouching);
        assert_eq!(ch.height, CROUCH_HEIGHT);
        assert!(carry.on_ground);

        // Open sky: standing back up eases the height toward standing.
        let w = world(vec![slab_floor()]);
        tick(&w, &mut ch, carry, &MoveIntent::default());
        assert!(!ch.crouching);
        assert!(ch.height > CROUCH_HEIGHT);
    }

    #[test]
    fn non_finite_tick_is_reverted() {
        let w = world(vec![slab_floor()]);
        let mut ch = CharacterState::spawn(Vec3::new(0.0, 5.0, 0.0));
        ch.velocity = Vec3::new(f32::INFINITY, 0.0, 0.0);
        let before = ch;
        let carry = tick(&w, &mut ch, airborne(), &MoveIntent::default());
        assert_eq!(ch, before);
        assert_eq!(carry.state, MovementState::Falling);
    }
}

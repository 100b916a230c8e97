use std::time::Duration;

/// Radius of both capsule spheres (meters).
pub const CAPSULE_RADIUS: f32 = 0.4;

/// Standing capsule height, feet to top of the upper sphere (meters).
pub const STAND_HEIGHT: f32 = 1.8;

/// Standing eye height above the feet (meters).
pub const STAND_EYE_HEIGHT: f32 = 1.6;

/// Height and eye height multiplier while crouched.
///
/// Must keep `STAND_HEIGHT * CROUCH_MULTIPLIER >= 2 * CAPSULE_RADIUS` so the two
/// capsule spheres never swap order.
pub const CROUCH_MULTIPLIER: f32 = 0.5;

/// Crouched capsule height (meters).
pub const CROUCH_HEIGHT: f32 = STAND_HEIGHT * CROUCH_MULTIPLIER;

/// Crouched eye height (meters).
pub const CROUCH_EYE_HEIGHT: f32 = STAND_EYE_HEIGHT * CROUCH_MULTIPLIER;

/// Gravity magnitude in meters per second squared (positive value, applied along -Y).
pub const GRAVITY_MPS2: f32 = 24.0;

/// Vertical velocity set by a grounded jump (m/s).
pub const JUMP_VELOCITY_MPS: f32 = 8.0;

/// Vertical velocity set by a grounded jump while a wall is within touch range (m/s).
///
/// Only enough to get the capsule airborne so the next tick can latch onto the wall.
pub const WALL_LATCH_JUMP_MPS: f32 = 2.5;

/// Default walking speed (m/s). Live value comes from `MovementTuning::move_speed`.
pub const DEFAULT_MOVE_SPEED_MPS: f32 = 14.0;

/// Default air-control fraction for planar (XZ) steering while falling.
///
/// Convention:
/// - 1.0 = airborne steering snaps to the desired velocity like on the ground
/// - 0.0 = no air control
///
/// Typical values: 0.1 .. 0.4
pub const DEFAULT_AIR_CONTROL: f32 = 0.3;

/// Default crouch/stand easing rate (1/s).
pub const DEFAULT_CROUCH_LERP_SPEED: f32 = 8.0;

/// Default wall-run upward acceleration at full lift (m/s^2).
pub const DEFAULT_WALL_RUN_LIFT_ACCEL: f32 = 12.0;

/// Default wall-run along-wall acceleration at full thrust (m/s^2).
pub const DEFAULT_WALL_RUN_ALONG_THRUST: f32 = 20.0;

/// Horizontal velocity multiplier applied every tick while not wall-running.
pub const HORIZONTAL_DAMPING: f32 = 0.92;

/// Gravity multiplier while wall-running.
pub const WALL_RUN_GRAVITY_MULT: f32 = 0.25;

/// Along-wall speed cap (m/s). Overspeed is eased down toward this, never below.
pub const WALL_RUN_SPEED_CAP_MPS: f32 = 16.0;

/// Exponential easing rate toward [`WALL_RUN_SPEED_CAP_MPS`] (1/s).
pub const WALL_RUN_SPEED_EASE: f32 = 10.0;

/// Fixed along-wall speed given on mount, so every wall-run arc starts the same (m/s).
pub const INITIAL_SURF_SPEED_MPS: f32 = 6.0;

/// Vertical velocity set by a wall jump (m/s).
pub const WALL_JUMP_UP_MPS: f32 = 9.0;

/// Velocity added along the wall normal by a wall jump (m/s).
pub const WALL_JUMP_OUT_MPS: f32 = 10.0;

/// Ticks after a wall jump during which the departed wall cannot be re-mounted.
pub const WALL_JUMP_COOLDOWN_TICKS: u32 = 3;

/// Time at full vertical lift before the lift starts to taper (seconds).
pub const WALL_RUN_MOUNT_DELAY_S: f32 = 0.28;

/// Duration of the linear vertical lift taper, measured after the mount delay (seconds).
pub const WALL_RUN_VERTICAL_THRUST_DURATION_S: f32 = 1.4;

/// Duration of the linear along-wall thrust taper, measured from mount (seconds).
pub const WALL_RUN_FORWARD_THRUST_DURATION_S: f32 = 0.85;

/// Window after mount during which the extra mount lift is applied (seconds).
pub const WALL_RUN_MOUNT_BOOST_DURATION_S: f32 = 0.2;

/// Extra upward acceleration during the mount boost window (m/s^2).
pub const WALL_RUN_MOUNT_LIFT_BOOST: f32 = 18.0;

/// Two wall normals with a dot product above this are treated as the same wall (~8 degrees).
pub const SAME_WALL_DOT: f32 = 0.99;

/// Mounting is refused when the eye is within this distance of the wall top, or above it.
pub const WALL_TOP_EYE_MARGIN: f32 = 0.05;

/// Camera bank angle while wall-running (degrees).
pub const WALL_RUN_ROLL_DEG: f32 = 18.0;

/// Exponential easing rate of the camera bank (1/s).
pub const WALL_RUN_ROLL_LERP: f32 = 10.0;

/// Simulation rate (Hz).
pub const TICK_HZ: u32 = 60;

/// Fixed simulation step.
///
/// Integer nanoseconds so accumulator arithmetic is exact and frame splitting never
/// changes the number of ticks run.
pub const FIXED_TICK: Duration = Duration::from_nanos(1_000_000_000 / TICK_HZ as u64);

/// Largest frame delta accepted per call; longer stalls are truncated.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(50);

/// Cap on the accumulated backlog, bounding ticks per frame.
pub const MAX_ACCUMULATOR: Duration = Duration::from_millis(100);

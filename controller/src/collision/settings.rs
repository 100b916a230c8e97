/*!
Collision tolerances and classification thresholds.

These constants centralize the parameters used by the capsule resolver, the
ground probe and the wall detector. Keeping them together makes tuning easier
and keeps the resolver and the detector agreeing on what a "wall" is.

Notes
- Distances are in meters.
- Favor practical world-space tolerances over machine epsilon for robust behavior.
*/

/// Maximum number of push-out iterations per resolve.
/// Each iteration resolves exactly one sphere/box pair.
pub const MAX_RESOLVE_ITERATIONS: u32 = 8;

/// A contact normal with `normal.y` above this is ground.
pub const GROUND_NORMAL_MIN_Y: f32 = 0.5;

/// A contact normal with `|normal.y|` below this is a wall.
///
/// Between this and [`GROUND_NORMAL_MIN_Y`] is a steep slope: neither ground nor wall.
pub const WALL_NORMAL_THRESHOLD: f32 = 0.45;

/// Extra probe radius used to keep a resting capsule grounded (meters).
pub const GROUND_TOLERANCE: f32 = 0.05;

/// Overlaps at most this deep count as touching, not penetrating (meters).
pub const PENETRATION_SLOP: f32 = 1.0e-5;

/// Below this distance a sphere center is considered inside the box (meters).
pub const DEGENERATE_DIST: f32 = 1.0e-6;

/// Tolerance for deciding a closest point lies on a box boundary (meters).
pub const FACE_EPS: f32 = 1.0e-4;

/// Default wall touch range beyond the capsule radius (meters).
pub const WALL_TOUCH_EPSILON: f32 = 0.12;

/// Wider touch range used to keep or re-acquire a wall while wall-running (meters).
pub const WALL_RUN_NEAR_EPSILON: f32 = 0.28;

/// Still on the wall while within radius plus this of the wall plane (meters).
pub const WALL_RUN_PLANE_TOLERANCE: f32 = 0.5;

/// Colliders whose bottom is at most this far above the feet are ignored by the
/// headroom check (floors and low obstacles, meters).
pub const HEADROOM_IGNORE_BELOW: f32 = 0.2;

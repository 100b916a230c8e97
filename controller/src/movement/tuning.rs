use crate::constants::{
    DEFAULT_AIR_CONTROL, DEFAULT_CROUCH_LERP_SPEED, DEFAULT_MOVE_SPEED_MPS,
    DEFAULT_WALL_RUN_ALONG_THRUST, DEFAULT_WALL_RUN_LIFT_ACCEL,
};

/// Runtime-adjustable movement parameters.
///
/// Everything else the controller uses is a compile-time constant. Values are read once per
/// tick, so a change takes effect on the next tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementTuning {
    /// Walking speed (m/s).
    pub move_speed: f32,
    /// Fraction of the desired planar velocity blended in per tick while falling (0..=1).
    pub air_control: f32,
    /// Crouch/stand easing rate (1/s).
    pub crouch_lerp_speed: f32,
    /// Wall-run upward acceleration at full lift (m/s^2).
    pub wall_run_lift_accel: f32,
    /// Wall-run along-wall acceleration at full thrust (m/s^2).
    pub wall_run_along_thrust: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED_MPS,
            air_control: DEFAULT_AIR_CONTROL,
            crouch_lerp_speed: DEFAULT_CROUCH_LERP_SPEED,
            wall_run_lift_accel: DEFAULT_WALL_RUN_LIFT_ACCEL,
            wall_run_along_thrust: DEFAULT_WALL_RUN_ALONG_THRUST,
        }
    }
}

impl MovementTuning {
    /// Copy with every field made usable.
    ///
    /// - Non-finite values fall back to the default for that field.
    /// - Negative speeds and rates become 0.
    /// - `air_control` is clamped into `0..=1`.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let pick = |v: f32, d: f32| if v.is_finite() { v.max(0.0) } else { d };

        Self {
            move_speed: pick(self.move_speed, defaults.move_speed),
            air_control: pick(self.air_control, defaults.air_control).min(1.0),
            crouch_lerp_speed: pick(self.crouch_lerp_speed, defaults.crouch_lerp_speed),
            wall_run_lift_accel: pick(self.wall_run_lift_accel, defaults.wall_run_lift_accel),
            wall_run_along_thrust: pick(self.wall_run_along_thrust, defaults.wall_run_along_thrust),
        }
    }
}

use crate::{
    collision::Vec3,
    utils::{forward_from_yaw, right_from_yaw},
};

/// Squared planar length below which movement input counts as "no input".
const INPUT_EPS_SQ: f32 = 1.0e-6;

/// Player input sampled once per frame and reused by every tick of that frame.
///
/// Axes are in `-1..=1` (values outside are clamped, non-finite values read as 0).
/// `yaw` and `pitch` are camera angles in radians; `yaw == 0` looks down -Z.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveIntent {
    pub forward: f32,
    pub right: f32,
    /// Jump button held. Jumps trigger on the press edge only.
    pub jump: bool,
    /// Crouch button held.
    pub crouch: bool,
    pub yaw: f32,
    pub pitch: f32,
}

impl MoveIntent {
    /// Horizontal look direction.
    #[inline]
    pub fn look_forward(&self) -> Vec3 {
        forward_from_yaw(self.yaw)
    }

    /// Horizontal right-hand direction.
    #[inline]
    pub fn look_right(&self) -> Vec3 {
        right_from_yaw(self.yaw)
    }

    /// Desired horizontal movement direction in world space.
    ///
    /// Length is at most 1: diagonal input is normalized, partial analog input keeps its
    /// magnitude. `None` when there is no movement input.
    pub fn wish_dir(&self) -> Option<Vec3> {
        let f = clamp_axis(self.forward);
        let r = clamp_axis(self.right);
        let dir = self.look_forward() * f + self.look_right() * r;

        let len_sq = dir.norm_squared();
        if len_sq <= INPUT_EPS_SQ {
            return None;
        }
        if len_sq > 1.0 {
            return Some(dir / len_sq.sqrt());
        }
        Some(dir)
    }
}

#[inline]
fn clamp_axis(v: f32) -> f32 {
    if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 }
}

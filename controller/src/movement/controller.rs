use crate::{
    collision::{Vec3, WallContact},
    constants::{WALL_RUN_ROLL_DEG, WALL_RUN_ROLL_LERP},
    utils::{ease_toward, horizontal, right_from_yaw},
};

use super::{
    character::{CharacterState, TickContext, step},
    intent::MoveIntent,
    state::{MovementState, TickCarry},
    wall_run::FrameThrust,
};

/// What the renderer needs after a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Presentation {
    /// Feet position.
    pub position: Vec3,
    pub eye_height: f32,
    /// Camera bank (radians, positive rolls counter-clockwise as seen from behind).
    pub roll: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub state: MovementState,
}

impl Presentation {
    #[inline]
    pub fn eye_position(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.eye_height, 0.0)
    }

    #[inline]
    pub fn state_label(&self) -> &'static str {
        self.state.label()
    }
}

/// Camera bank target for the current wall: tilt away from the wall side.
pub fn roll_target(state: MovementState, wall: Option<&WallContact>, yaw: f32) -> f32 {
    if state != MovementState::WallRunning {
        return 0.0;
    }
    let Some(n) = wall.and_then(|w| horizontal(&w.normal).try_normalize(f32::EPSILON)) else {
        return 0.0;
    };
    -right_from_yaw(yaw).dot(&n) * WALL_RUN_ROLL_DEG.to_radians()
}

/// The player: character, tick carry and camera bank.
#[derive(Clone, Copy, Debug)]
pub struct PlayerController {
    character: CharacterState,
    carry: TickCarry,
    roll: f32,
}

impl PlayerController {
    pub fn new(spawn: Vec3) -> Self {
        Self {
            character: CharacterState::spawn(spawn),
            carry: TickCarry::default(),
            roll: 0.0,
        }
    }

    #[inline]
    pub fn character(&self) -> &CharacterState {
        &self.character
    }

    #[inline]
    pub fn carry(&self) -> &TickCarry {
        &self.carry
    }

    #[inline]
    pub fn state(&self) -> MovementState {
        self.carry.state
    }

    /// Put the player back at rest at `spawn`.
    pub fn respawn(&mut self, spawn: Vec3) {
        *self = Self::new(spawn);
    }

    /// Run one fixed tick and ease the camera bank.
    pub fn tick(&mut self, intent: &MoveIntent, ctx: &TickContext<'_>, frame: &mut FrameThrust) {
        self.carry = step(&mut self.character, self.carry, intent, ctx, frame);

        let target = roll_target(self.carry.state, self.carry.wall.as_ref(), intent.yaw);
        self.roll = ease_toward(self.roll, target, WALL_RUN_ROLL_LERP, ctx.dt);
    }

    pub fn presentation(&self, intent: &MoveIntent) -> Presentation {
        Presentation {
            position: self.character.position,
            eye_height: self.character.eye_height,
            roll: self.roll,
            yaw: intent.yaw,
            pitch: intent.pitch,
            state: self.carry.state,
        }
    }
}

use std::fmt;

use crate::collision::WallContact;

use super::wall_run::WallRunSession;

/// Locomotion mode of the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MovementState {
    #[default]
    Walking,
    Falling,
    WallRunning,
}

impl MovementState {
    /// Next state from this tick's contact facts.
    ///
    /// | from        | grounded | wall-running | to          |
    /// |-------------|----------|--------------|-------------|
    /// | any         | yes      | -            | Walking     |
    /// | Walking     | no       | -            | Falling     |
    /// | Falling     | no       | yes          | WallRunning |
    /// | Falling     | no       | no           | Falling     |
    /// | WallRunning | no       | yes          | WallRunning |
    /// | WallRunning | no       | no           | Falling     |
    ///
    /// Walking never enters WallRunning directly; the capsule has to spend a tick airborne.
    pub fn next(self, on_ground: bool, wall_running: bool) -> Self {
        match (self, on_ground, wall_running) {
            (_, true, _) => Self::Walking,
            (Self::Walking, false, _) => Self::Falling,
            (Self::Falling | Self::WallRunning, false, true) => Self::WallRunning,
            (Self::Falling | Self::WallRunning, false, false) => Self::Falling,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Falling => "falling",
            Self::WallRunning => "wall-running",
        }
    }
}

impl fmt::Display for MovementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything one tick hands to the next besides the character itself.
#[derive(Clone, Copy, Debug)]
pub struct TickCarry {
    pub state: MovementState,
    /// Grounded result of the previous tick.
    pub on_ground: bool,
    /// Jump button state of the previous tick, for press-edge detection.
    pub jump_held: bool,
    /// Wall-run latch. Set when airborne on a wall, cleared on landing and by gates.
    pub wall_run_mode: bool,
    /// Wall contact kept across ticks until a gate clears it.
    pub wall: Option<WallContact>,
    pub session: WallRunSession,
}

impl Default for TickCarry {
    fn default() -> Self {
        Self {
            state: MovementState::Walking,
            on_ground: true,
            jump_held: false,
            wall_run_mode: false,
            wall: None,
            session: WallRunSession::default(),
        }
    }
}

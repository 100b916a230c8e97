/*!
Player movement.

- intent:     per-frame player input
- tuning:     runtime-adjustable movement parameters
- state:      locomotion states, the transition table and the per-tick carry
- wall_run:   wall-run session bookkeeping and force model
- character:  one fixed tick of movement (input, integrate, collide, gate, forces)
- controller: the player controller, camera bank and presentation output
*/

pub mod character;
pub mod controller;
pub mod intent;
pub mod state;
pub mod tuning;
pub mod wall_run;

pub use character::{CharacterState, TickContext, step};
pub use controller::{PlayerController, Presentation, roll_target};
pub use intent::MoveIntent;
pub use state::{MovementState, TickCarry};
pub use tuning::MovementTuning;
pub use wall_run::{FrameThrust, WallRunSession, WallRunStep, apply_wall_run, mount};

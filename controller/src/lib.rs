pub mod collision;
pub mod constants;
pub mod fixed_step;
pub mod movement;
pub mod simulation;
pub mod utils;

pub use collision::{
    AabbCollider, Capsule, ColliderDef, ColliderStore, CollisionWorld, IngestReport, Vec3,
    WallContact, collider_from_def, resolve_capsule, scan_wall,
};
pub use fixed_step::{FixedStepSimulator, FramePlan};
pub use movement::{
    CharacterState, MoveIntent, MovementState, MovementTuning, PlayerController, Presentation,
    TickCarry,
};
pub use simulation::Simulation;

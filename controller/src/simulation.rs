//! Frame driver.
//!
//! Glues the fixed-step accumulator, the collider store and the player controller:
//! - one collision snapshot per frame, shared by all of that frame's ticks
//! - one input sample per frame, reused by every tick
//! - one thrust budget per frame (see `movement::wall_run`)

use std::time::Duration;

use crate::{
    collision::{ColliderDef, ColliderStore, IngestReport, Vec3},
    fixed_step::FixedStepSimulator,
    movement::{FrameThrust, MoveIntent, MovementTuning, PlayerController, Presentation, TickContext},
};

#[derive(Debug)]
pub struct Simulation {
    store: ColliderStore,
    stepper: FixedStepSimulator,
    player: PlayerController,
    tuning: MovementTuning,
}

impl Simulation {
    /// A player at rest at `spawn`, colliding against whatever `store` publishes.
    pub fn new(store: ColliderStore, spawn: Vec3) -> Self {
        Self {
            store,
            stepper: FixedStepSimulator::default(),
            player: PlayerController::new(spawn),
            tuning: MovementTuning::default(),
        }
    }

    #[inline]
    pub fn store(&self) -> &ColliderStore {
        &self.store
    }

    #[inline]
    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    #[inline]
    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    /// Replace the live tunables; applied from the next tick.
    pub fn set_tuning(&mut self, tuning: MovementTuning) {
        let sanitized = tuning.sanitized();
        if sanitized != tuning {
            log::warn!("Movement tuning {:?} adjusted to {:?}", tuning, sanitized);
        }
        self.tuning = sanitized;
    }

    /// Publish level geometry. Later frames see the new colliders; a running frame does not.
    pub fn ingest_colliders(&self, batch: &[ColliderDef]) -> IngestReport {
        self.store.ingest(batch)
    }

    pub fn respawn(&mut self, spawn: Vec3) {
        log::info!("Respawn at {:?}", spawn);
        self.player.respawn(spawn);
    }

    /// Advance by one rendered frame and return what to draw.
    pub fn frame(&mut self, frame_delta: Duration, intent: &MoveIntent) -> Presentation {
        let plan = self.stepper.advance(frame_delta);
        if plan.steps > 0 {
            let world = self.store.snapshot();
            let ctx = TickContext {
                world: &world,
                tuning: &self.tuning,
                dt: plan.tick_dt,
            };
            let mut thrust = FrameThrust::new(plan.thrust_delta);
            for _ in 0..plan.steps {
                self.player.tick(intent, &ctx, &mut thrust);
                thrust.next_substep();
            }
        }

        self.player.presentation(intent)
    }
}

use std::time::Duration;

use crate::constants::{FIXED_TICK, MAX_ACCUMULATOR, MAX_FRAME_DELTA};

/// Ticks to run for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePlan {
    pub steps: u32,
    /// Length of each tick (seconds).
    pub tick_dt: f32,
    /// Simulated time of the whole frame, `steps * tick_dt` (seconds).
    pub thrust_delta: f32,
}

/// Fixed-timestep accumulator.
///
/// Time is kept as integer nanoseconds: splitting the same elapsed time into different frame
/// deltas yields the same total number of ticks.
#[derive(Clone, Copy, Debug)]
pub struct FixedStepSimulator {
    tick: Duration,
    max_frame_delta: Duration,
    max_accumulator: Duration,
    accumulator: Duration,
}

impl Default for FixedStepSimulator {
    fn default() -> Self {
        Self::new(FIXED_TICK, MAX_FRAME_DELTA, MAX_ACCUMULATOR)
    }
}

impl FixedStepSimulator {
    /// A zero `tick` is raised to one nanosecond.
    pub fn new(tick: Duration, max_frame_delta: Duration, max_accumulator: Duration) -> Self {
        Self {
            tick: tick.max(Duration::from_nanos(1)),
            max_frame_delta,
            max_accumulator,
            accumulator: Duration::ZERO,
        }
    }

    #[inline]
    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Time banked toward the next tick.
    #[inline]
    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    /// Bank `frame_delta` and return how many ticks to run now.
    ///
    /// - `frame_delta` is truncated to the max frame delta.
    /// - The backlog is capped at the max accumulator; excess time is dropped.
    pub fn advance(&mut self, frame_delta: Duration) -> FramePlan {
        if frame_delta > self.max_frame_delta {
            log::trace!(
                "Frame delta {:?} truncated to {:?}",
                frame_delta,
                self.max_frame_delta
            );
        }
        let delta = frame_delta.min(self.max_frame_delta);

        let banked = self.accumulator + delta;
        if banked > self.max_accumulator {
            log::trace!("Accumulator {:?} capped at {:?}", banked, self.max_accumulator);
        }
        self.accumulator = banked.min(self.max_accumulator);

        let steps = u32::try_from(self.accumulator.as_nanos() / self.tick.as_nanos()).unwrap_or(u32::MAX);
        let simulated = self.tick.saturating_mul(steps);
        self.accumulator = self.accumulator.saturating_sub(simulated);

        FramePlan {
            steps,
            tick_dt: self.tick.as_secs_f32(),
            thrust_delta: simulated.as_secs_f32(),
        }
    }
}

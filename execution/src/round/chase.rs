//! Light chase: how far the light runs and how fast.
//!
//! The light always runs 3 or 4 full loops and then a further 0-11 cells, so
//! the stopping cell is uniform over the ring. Ticks start at the base delay
//! and slow down over the last two loops: each tick in the second-to-last
//! loop adds the slowdown step, each tick in the last loop adds the larger
//! final step.

use super::RandomSource;
use std::time::Duration;
use xiaomali_types::game::{
    ring_cell, MAX_CHASE_LOOPS, MIN_CHASE_LOOPS, RING_LENGTH,
};
use xiaomali_types::EngineConfig;

const RING: u32 = RING_LENGTH as u32;

/// Randomly drawn length of a chase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChasePlan {
    pub loops: u32,
    pub offset: u32,
}

impl ChasePlan {
    /// Draw the loop count first, then the stop offset.
    pub fn draw<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let loops = rng.next_in_range(MIN_CHASE_LOOPS, MAX_CHASE_LOOPS);
        let offset = rng.next_in_range(0, RING - 1);
        Self { loops, offset }
    }

    pub fn total_steps(&self) -> u32 {
        self.loops * RING + self.offset
    }

    /// Board cell lit on the final tick.
    pub fn landing_cell(&self) -> usize {
        ring_cell(self.total_steps() as usize - 1)
    }
}

/// One lit cell of the chase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub cell: usize,
    /// 1-based count of ticks so far.
    pub step: u32,
    /// Delay before the next tick, `None` once the light has stopped.
    pub next: Option<Duration>,
}

/// A chase in flight.
#[derive(Clone, Debug)]
pub struct Chase {
    total_steps: u32,
    step: u32,
    position: usize,
    delay: Duration,
    slowdown: Duration,
    final_slowdown: Duration,
}

impl Chase {
    pub fn new(plan: ChasePlan, config: &EngineConfig) -> Self {
        Self {
            total_steps: plan.total_steps(),
            step: 0,
            position: 0,
            delay: config.base_tick(),
            slowdown: Duration::from_millis(config.slowdown_step_ms),
            final_slowdown: Duration::from_millis(config.final_slowdown_step_ms),
        }
    }

    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.total_steps
    }

    /// Light the next cell and compute the wait before the one after.
    pub fn advance(&mut self) -> Tick {
        let cell = ring_cell(self.position);
        self.step += 1;
        self.position += 1;

        if self.is_finished() {
            return Tick {
                cell,
                step: self.step,
                next: None,
            };
        }

        if self.step > self.total_steps.saturating_sub(RING) {
            self.delay += self.final_slowdown;
        } else if self.step > self.total_steps.saturating_sub(2 * RING) {
            self.delay += self.slowdown;
        }

        Tick {
            cell,
            step: self.step,
            next: Some(self.delay),
        }
    }
}

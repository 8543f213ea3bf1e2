//! Test doubles for the engine's randomness and timer seams.

use crate::round::RandomSource;
use crate::scheduler::{Scheduler, Step};
use crate::RoundEngine;
use std::collections::VecDeque;
use std::time::Duration;
use xiaomali_types::game::{CHASE_SEQUENCE, MIN_CHASE_LOOPS, RING_LENGTH};
use xiaomali_types::EngineConfig;

/// Returns a fixed sequence of draws. Panics when the script runs out or a
/// scripted value falls outside the requested range.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    values: VecDeque<u32>,
}

impl ScriptedRng {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push(&mut self, values: impl IntoIterator<Item = u32>) {
        self.values.extend(values);
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedRng {
    fn next_in_range(&mut self, low: u32, high: u32) -> u32 {
        let value = self
            .values
            .pop_front()
            .unwrap_or_else(|| panic!("scripted rng exhausted (wanted {low}..={high})"));
        assert!(
            (low..=high).contains(&value),
            "scripted value {value} outside {low}..={high}"
        );
        value
    }
}

/// Records scheduled steps in order instead of running timers.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    queue: VecDeque<(Duration, Step)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pop_next(&mut self) -> Option<(Duration, Step)> {
        self.queue.pop_front()
    }

    pub fn peek(&self) -> Option<&(Duration, Step)> {
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, step: Step) {
        self.queue.push_back((delay, step));
    }
}

/// Draws that make a chase of three loops stop on `cell`.
pub fn draws_landing_on(cell: usize) -> [u32; 2] {
    let index = CHASE_SEQUENCE
        .iter()
        .position(|c| *c == cell)
        .unwrap_or_else(|| panic!("cell {cell} is not on the ring"));
    // The last tick lights position total - 1
    let offset = (index + 1) % RING_LENGTH;
    [MIN_CHASE_LOOPS, offset as u32]
}

pub type TestEngine = RoundEngine<ScriptedRng, ManualScheduler>;

/// Engine with default config, scripted draws and a manual scheduler.
pub fn create_engine(draws: &[u32]) -> TestEngine {
    create_engine_with(EngineConfig::default(), draws)
}

pub fn create_engine_with(config: EngineConfig, draws: &[u32]) -> TestEngine {
    RoundEngine::new(
        config,
        ScriptedRng::new(draws.iter().copied()),
        ManualScheduler::new(),
    )
    .expect("test config should be valid")
}

/// Fire scheduled steps in order until the queue drains or `limit` steps
/// have fired. Returns the fired steps.
pub fn fire_pending(engine: &mut TestEngine, limit: usize) -> Vec<(Duration, Step)> {
    let mut fired = Vec::new();
    while fired.len() < limit {
        let Some((delay, step)) = engine.scheduler_mut().pop_next() else {
            break;
        };
        engine.fire(step);
        fired.push((delay, step));
    }
    fired
}

/// Fire chase ticks until the light stops.
pub fn finish_chase(engine: &mut TestEngine) {
    while let Some((_, step @ Step::ChaseTick { .. })) = engine.scheduler().peek().copied() {
        engine.scheduler_mut().pop_next();
        engine.fire(step);
    }
}

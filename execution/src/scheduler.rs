//! Timer seam between the engine and whatever drives it.
//!
//! The engine never sleeps. Whenever it needs to wait it hands a [Step] and a
//! delay to its [Scheduler]; the driver calls
//! [crate::RoundEngine::fire] with that step once the delay has elapsed.

use std::time::Duration;

/// Deferred engine work. Each step remembers the round it was scheduled in so
/// the engine can drop steps that arrive late.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// Advance the light one cell.
    ChaseTick { round: u64 },
    /// Close a resolved round and return to betting.
    Reset { round: u64 },
    /// Start the next auto-play round with the refilled bets.
    AutoStart { round: u64 },
}

impl Step {
    pub fn round(&self) -> u64 {
        match self {
            Step::ChaseTick { round } | Step::Reset { round } | Step::AutoStart { round } => *round,
        }
    }
}

pub trait Scheduler {
    /// Arrange for `step` to be fired after `delay`. Must not block.
    fn schedule(&mut self, delay: Duration, step: Step);
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn schedule(&mut self, delay: Duration, step: Step) {
        (**self).schedule(delay, step)
    }
}

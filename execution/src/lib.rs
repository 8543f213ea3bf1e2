//! Round engine for the xiaomali light-chasing lottery.
//!
//! [RoundEngine] is driven by player commands and by the [scheduler::Step]s it
//! asks its [scheduler::Scheduler] to deliver later. Randomness comes from an
//! injected [round::RandomSource].

pub mod engine;
pub mod round;
pub mod scheduler;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use engine::{EngineView, RoundEngine};
pub use round::{GameRng, RandomSource};
pub use scheduler::{Scheduler, Step};

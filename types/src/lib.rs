//! Shared definitions for the xiaomali light-chasing lottery.
//!
//! Everything the round engine and its presentation shell need to agree on
//! lives here: the symbol odds table, the board geometry, phases, events,
//! rejection reasons and the timing configuration.

pub mod config;
pub mod game;

pub use config::{ConfigError, EngineConfig};

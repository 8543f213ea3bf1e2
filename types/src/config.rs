use crate::game::{
    AUTO_RESTART_DELAY_MS, BASE_TICK_MS, FINAL_SLOWDOWN_STEP_MS, LOSE_RESET_DELAY_MS,
    MAX_BET_PER_SYMBOL, SLOWDOWN_STEP_MS, STARTING_BALANCE, WIN_RESET_DELAY_MS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Tunables handed to the round engine. Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    pub starting_balance: u64,
    pub max_bet_per_symbol: u64,

    /// Delay between the first chase ticks.
    pub base_tick_ms: u64,
    /// Added to the tick delay during the second-to-last loop.
    pub slowdown_step_ms: u64,
    /// Added to the tick delay during the last loop.
    pub final_slowdown_step_ms: u64,

    /// Pause after a win before the round resets (auto-play only).
    pub win_reset_delay_ms: u64,
    /// Pause after a loss before the round resets.
    pub lose_reset_delay_ms: u64,
    /// Pause between an auto-play reset and the next round.
    pub auto_restart_delay_ms: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: u64 },
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_balance: STARTING_BALANCE,
            max_bet_per_symbol: MAX_BET_PER_SYMBOL,
            base_tick_ms: BASE_TICK_MS,
            slowdown_step_ms: SLOWDOWN_STEP_MS,
            final_slowdown_step_ms: FINAL_SLOWDOWN_STEP_MS,
            win_reset_delay_ms: WIN_RESET_DELAY_MS,
            lose_reset_delay_ms: LOSE_RESET_DELAY_MS,
            auto_restart_delay_ms: AUTO_RESTART_DELAY_MS,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_nonzero("max_bet_per_symbol", self.max_bet_per_symbol)?;
        ensure_nonzero("base_tick_ms", self.base_tick_ms)?;
        Ok(())
    }

    pub fn base_tick(&self) -> Duration {
        Duration::from_millis(self.base_tick_ms)
    }

    pub fn win_reset_delay(&self) -> Duration {
        Duration::from_millis(self.win_reset_delay_ms)
    }

    pub fn lose_reset_delay(&self) -> Duration {
        Duration::from_millis(self.lose_reset_delay_ms)
    }

    pub fn auto_restart_delay(&self) -> Duration {
        Duration::from_millis(self.auto_restart_delay_ms)
    }
}

fn ensure_nonzero(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidNonZero { field, value });
    }
    Ok(())
}

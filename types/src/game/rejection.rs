use super::{Phase, Symbol};
use thiserror::Error;

/// Why a command was refused. A refused command leaves the engine untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("insufficient balance: need {required}, have {available}")]
    InsufficientBalance { required: u64, available: u64 },
    #[error("cannot {action} while {phase}")]
    InvalidPhase { action: &'static str, phase: Phase },
    #[error("bet on {symbol} already at the cap of {cap}")]
    BetCapReached { symbol: Symbol, cap: u64 },
    #[error("no bets placed")]
    NoBets,
    #[error("no previous bets to repeat")]
    NothingToRepeat,
    #[error("double-up stake would be zero")]
    ZeroStake,
}

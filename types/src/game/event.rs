use super::{Guess, RoundOutcome, Symbol};

/// Notification emitted by the engine after a state change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    BetPlaced {
        symbol: Symbol,
        stake: u64,
        total_bet: u64,
    },
    BetsCleared,
    BetsRepeated {
        total_bet: u64,
    },
    AutoPlayChanged {
        enabled: bool,
    },
    RoundStarted {
        round: u64,
        total_bet: u64,
        balance: u64,
        total_steps: u32,
    },
    LightMoved {
        cell: usize,
        step: u32,
    },
    RoundResolved {
        outcome: RoundOutcome,
        balance: u64,
    },
    DoubleUpOffered {
        current_win: u64,
    },
    DoubleUpStaked {
        stake: u64,
        banked: u64,
        balance: u64,
    },
    DoubleUpResolved {
        guess: Guess,
        draw: u32,
        won: bool,
        /// Stake after doubling on a win, the forfeited stake on a loss.
        amount: u64,
        balance: u64,
    },
    WinningsCollected {
        balance: u64,
    },
    RoundReset {
        /// Bets were refilled and a restart is scheduled.
        auto_replay: bool,
    },
}

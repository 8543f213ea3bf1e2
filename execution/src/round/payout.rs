//! Payout for a finished chase.

use super::{ledger::BetLedger, RandomSource};
use xiaomali_types::game::{Symbol, MAX_LUCK_MULTIPLIER, MIN_LUCK_MULTIPLIER};

/// Amount won on the landed symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub win: u64,
    /// Multiplier drawn for the luck bonus, if it fired.
    pub luck_multiplier: Option<u32>,
}

impl Resolution {
    /// Only a winning round may be carried into the double-up.
    pub fn bonus_eligible(&self) -> bool {
        self.win > 0
    }
}

/// Resolve the round for the symbol the light stopped on.
///
/// An unstaked symbol loses. A staked ordinary symbol pays its stake times
/// its multiplier. A staked luck cell pays the whole bet times a random
/// 2-6 multiplier. Randomness is only consumed for the luck bonus.
pub fn resolve<R: RandomSource + ?Sized>(
    symbol: Symbol,
    bets: &BetLedger,
    rng: &mut R,
) -> Resolution {
    let stake = bets.stake(symbol);
    if stake == 0 {
        return Resolution {
            win: 0,
            luck_multiplier: None,
        };
    }

    if symbol.is_luck() {
        let multiplier = rng.next_in_range(MIN_LUCK_MULTIPLIER, MAX_LUCK_MULTIPLIER);
        return Resolution {
            win: bets.total().saturating_mul(multiplier as u64),
            luck_multiplier: Some(multiplier),
        };
    }

    Resolution {
        win: stake.saturating_mul(symbol.payout_multiplier()),
        luck_multiplier: None,
    }
}

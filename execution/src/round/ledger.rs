//! Per-symbol stakes for the round being set up.

use std::collections::BTreeMap;
use xiaomali_types::game::{Rejection, Symbol};

/// Stakes keyed by symbol. Only positive stakes are stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BetLedger {
    stakes: BTreeMap<Symbol, u64>,
}

impl BetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stake(&self, symbol: Symbol) -> u64 {
        self.stakes.get(&symbol).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.stakes.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stakes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.stakes.iter().map(|(symbol, stake)| (*symbol, *stake))
    }

    pub fn clear(&mut self) {
        self.stakes.clear();
    }

    /// Add one unit to `symbol`.
    ///
    /// Refused when the symbol is already at `cap` or when the new total would
    /// exceed `balance`. Returns the new stake on the symbol.
    pub fn place(&mut self, symbol: Symbol, cap: u64, balance: u64) -> Result<u64, Rejection> {
        let current = self.stake(symbol);
        if current >= cap {
            return Err(Rejection::BetCapReached { symbol, cap });
        }
        let required = self.total() + 1;
        if required > balance {
            return Err(Rejection::InsufficientBalance {
                required,
                available: balance,
            });
        }
        let stake = current + 1;
        self.stakes.insert(symbol, stake);
        Ok(stake)
    }
}

impl FromIterator<(Symbol, u64)> for BetLedger {
    fn from_iter<I: IntoIterator<Item = (Symbol, u64)>>(iter: I) -> Self {
        let mut ledger = BetLedger::new();
        for (symbol, stake) in iter {
            if stake > 0 {
                *ledger.stakes.entry(symbol).or_insert(0) += stake;
            }
        }
        ledger
    }
}

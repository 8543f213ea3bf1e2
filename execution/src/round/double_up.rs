//! Double-up sub-game.
//!
//! The win from a round is offered for a big/small guess on a 1-12 draw.
//! Choosing a stake takes it off the balance and banks the rest; a correct
//! guess doubles the stake and credits it, a wrong guess forfeits it.

use super::RandomSource;
use xiaomali_types::game::{
    DoubleUpState, Guess, Rejection, Stake, MAX_DOUBLE_UP_DRAW, MIN_DOUBLE_UP_DRAW,
};

/// Effect of choosing a stake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Staked {
    /// Amount now at risk.
    pub stake: u64,
    /// Part of the offered win kept on the balance.
    pub banked: u64,
}

/// Effect of a guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub guess: Guess,
    pub draw: u32,
    pub won: bool,
    /// Doubled stake on a win, forfeited stake on a loss.
    pub amount: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoubleUp {
    state: DoubleUpState,
}

impl DoubleUp {
    /// Offer `current_win`, which the balance already includes.
    pub fn offer(current_win: u64) -> Self {
        Self {
            state: DoubleUpState {
                stake: 0,
                current_win,
            },
        }
    }

    pub fn state(&self) -> DoubleUpState {
        self.state
    }

    pub fn is_staked(&self) -> bool {
        self.state.stake > 0
    }

    /// Put half or all of the offered win at risk.
    ///
    /// The whole offer comes off the balance and the unstaked remainder goes
    /// back on, so `floor(current_win / 2)` rounding stays with the player.
    pub fn place_stake(&mut self, stake: Stake, balance: &mut u64) -> Result<Staked, Rejection> {
        let mut current_win = self.state.current_win;
        let amount = stake.amount(current_win);
        if amount == 0 {
            return Err(Rejection::ZeroStake);
        }

        let mut updated = balance
            .checked_sub(current_win)
            .ok_or(Rejection::InsufficientBalance {
                required: current_win,
                available: *balance,
            })?;
        current_win -= amount;
        updated += current_win;

        *balance = updated;
        self.state = DoubleUpState {
            stake: amount,
            current_win,
        };
        Ok(Staked {
            stake: amount,
            banked: current_win,
        })
    }

    /// Draw 1-12 and settle the guess.
    ///
    /// On a win the doubled stake becomes the new offer and is credited, so
    /// the next offer is backed by the balance just like the first one.
    pub fn guess<R: RandomSource + ?Sized>(
        &mut self,
        guess: Guess,
        rng: &mut R,
        balance: &mut u64,
    ) -> Verdict {
        let draw = rng.next_in_range(MIN_DOUBLE_UP_DRAW, MAX_DOUBLE_UP_DRAW);
        let won = guess.wins(draw);
        let stake = self.state.stake;

        if won {
            let doubled = stake.saturating_mul(2);
            *balance = balance.saturating_add(doubled);
            self.state = DoubleUpState {
                stake: 0,
                current_win: doubled,
            };
            Verdict {
                guess,
                draw,
                won,
                amount: doubled,
            }
        } else {
            self.state = DoubleUpState::default();
            Verdict {
                guess,
                draw,
                won,
                amount: stake,
            }
        }
    }
}

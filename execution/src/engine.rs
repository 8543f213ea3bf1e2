//! Round engine.
//!
//! A finite-state sequencer that owns the balance, the bet ledgers and the
//! double-up panel:
//!
//! ```text
//! Idle --start--> Chasing --(last tick)--> ResolvedLose --reset--> Idle
//!                                      \-> ResolvedWin  --reset--> Idle   (auto-play)
//!                                      \-> DoubleUpOffered                (manual)
//! DoubleUpOffered --stake--> DoubleUpActive --right--> DoubleUpOffered
//!                                          \--wrong--> Idle
//! DoubleUpOffered --collect--> Idle
//! ```
//!
//! Commands return a [Rejection] instead of mutating anything when their
//! guard fails. Waiting is delegated to the [Scheduler]; the driver feeds the
//! scheduled [Step]s back through [RoundEngine::fire].

use crate::round::{
    chase::{Chase, ChasePlan},
    double_up::{DoubleUp, Verdict},
    ledger::BetLedger,
    payout, RandomSource,
};
use crate::scheduler::{Scheduler, Step};
use std::mem;
use tracing::{debug, info, warn};
use xiaomali_types::game::{
    symbol_at, DoubleUpState, Event, Guess, Phase, Rejection, RoundOutcome, Stake, Symbol,
};
use xiaomali_types::{ConfigError, EngineConfig};

/// Everything a presentation shell needs to redraw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineView {
    pub phase: Phase,
    pub round: u64,
    pub balance: u64,
    pub total_bet: u64,
    pub current_win: u64,
    pub bets: BetLedger,
    pub lit_cell: Option<usize>,
    pub auto_play: bool,
    pub double_up: Option<DoubleUpState>,
    pub last_outcome: Option<RoundOutcome>,
}

pub struct RoundEngine<R, S> {
    config: EngineConfig,
    rng: R,
    scheduler: S,

    phase: Phase,
    round: u64,
    balance: u64,
    bets: BetLedger,
    last_bets: BetLedger,
    current_win: u64,
    auto_play: bool,

    chase: Option<Chase>,
    lit_cell: Option<usize>,
    last_outcome: Option<RoundOutcome>,
    double_up: Option<DoubleUp>,

    events: Vec<Event>,
}

impl<R: RandomSource, S: Scheduler> RoundEngine<R, S> {
    pub fn new(config: EngineConfig, rng: R, scheduler: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            balance: config.starting_balance,
            config,
            rng,
            scheduler,
            phase: Phase::Idle,
            round: 0,
            bets: BetLedger::new(),
            last_bets: BetLedger::new(),
            current_win: 0,
            auto_play: false,
            chase: None,
            lit_cell: None,
            last_outcome: None,
            double_up: None,
            events: Vec::new(),
        })
    }

    // === Queries ===

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn total_bet(&self) -> u64 {
        self.bets.total()
    }

    pub fn current_win(&self) -> u64 {
        self.current_win
    }

    pub fn stake(&self, symbol: Symbol) -> u64 {
        self.bets.stake(symbol)
    }

    pub fn bets(&self) -> &BetLedger {
        &self.bets
    }

    pub fn last_bets(&self) -> &BetLedger {
        &self.last_bets
    }

    pub fn auto_play(&self) -> bool {
        self.auto_play
    }

    /// Cell currently lit; after a chase it stays on the landed cell.
    pub fn lit_cell(&self) -> Option<usize> {
        self.lit_cell
    }

    pub fn last_outcome(&self) -> Option<RoundOutcome> {
        self.last_outcome
    }

    pub fn double_up(&self) -> Option<DoubleUpState> {
        self.double_up.as_ref().map(DoubleUp::state)
    }

    pub fn snapshot(&self) -> EngineView {
        EngineView {
            phase: self.phase,
            round: self.round,
            balance: self.balance,
            total_bet: self.bets.total(),
            current_win: self.current_win,
            bets: self.bets.clone(),
            lit_cell: self.lit_cell,
            auto_play: self.auto_play,
            double_up: self.double_up(),
            last_outcome: self.last_outcome,
        }
    }

    /// Drain notifications emitted since the last call.
    pub fn take_events(&mut self) -> Vec<Event> {
        mem::take(&mut self.events)
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    // === Betting ===

    pub fn place_bet(&mut self, symbol: Symbol) -> Result<u64, Rejection> {
        self.require(Phase::Idle, "place a bet")?;
        let stake = self
            .bets
            .place(symbol, self.config.max_bet_per_symbol, self.balance)
            .inspect_err(|rejection| debug!(%symbol, %rejection, "bet refused"))?;
        self.events.push(Event::BetPlaced {
            symbol,
            stake,
            total_bet: self.bets.total(),
        });
        Ok(stake)
    }

    pub fn clear_bets(&mut self) -> Result<(), Rejection> {
        self.require(Phase::Idle, "clear bets")?;
        self.bets.clear();
        self.events.push(Event::BetsCleared);
        Ok(())
    }

    /// Copy the bets of the last started round back into the ledger.
    pub fn repeat_last_bets(&mut self) -> Result<u64, Rejection> {
        self.require(Phase::Idle, "repeat bets")?;
        if self.last_bets.is_empty() {
            return Err(Rejection::NothingToRepeat);
        }
        let required = self.last_bets.total();
        if required > self.balance {
            return Err(Rejection::InsufficientBalance {
                required,
                available: self.balance,
            });
        }
        self.bets = self.last_bets.clone();
        self.events.push(Event::BetsRepeated {
            total_bet: required,
        });
        Ok(required)
    }

    /// Allowed in any phase; it is read when a round resolves or resets.
    pub fn set_auto_play(&mut self, enabled: bool) {
        if self.auto_play == enabled {
            return;
        }
        self.auto_play = enabled;
        info!(enabled, "auto-play changed");
        self.events.push(Event::AutoPlayChanged { enabled });
    }

    // === Round ===

    pub fn start_round(&mut self) -> Result<(), Rejection> {
        self.require(Phase::Idle, "start a round")?;
        let total_bet = self.bets.total();
        if total_bet == 0 {
            return Err(Rejection::NoBets);
        }
        if total_bet > self.balance {
            return Err(Rejection::InsufficientBalance {
                required: total_bet,
                available: self.balance,
            });
        }

        self.round += 1;
        self.last_bets = self.bets.clone();
        self.balance -= total_bet;
        self.current_win = 0;
        self.last_outcome = None;
        self.phase = Phase::Chasing;

        let plan = ChasePlan::draw(&mut self.rng);
        let chase = Chase::new(plan, &self.config);
        info!(
            round = self.round,
            total_bet,
            balance = self.balance,
            total_steps = chase.total_steps(),
            "round started"
        );
        self.events.push(Event::RoundStarted {
            round: self.round,
            total_bet,
            balance: self.balance,
            total_steps: chase.total_steps(),
        });
        self.chase = Some(chase);

        // The first cell lights immediately
        self.tick();
        Ok(())
    }

    /// Run a step the scheduler was asked to deliver.
    ///
    /// Steps from an earlier round, or whose phase has already moved on, are
    /// dropped.
    pub fn fire(&mut self, step: Step) {
        if step.round() != self.round {
            debug!(?step, round = self.round, "dropping stale step");
            return;
        }
        match (step, self.phase) {
            (Step::ChaseTick { .. }, Phase::Chasing) => self.tick(),
            (Step::Reset { .. }, Phase::ResolvedWin | Phase::ResolvedLose) => self.reset(true),
            (Step::AutoStart { .. }, Phase::Idle) => {
                if let Err(rejection) = self.start_round() {
                    debug!(%rejection, "auto-play restart skipped");
                }
            }
            (step, phase) => debug!(?step, %phase, "dropping step for wrong phase"),
        }
    }

    fn tick(&mut self) {
        let Some(chase) = self.chase.as_mut() else {
            warn!(round = self.round, "chase tick without a chase");
            return;
        };
        let tick = chase.advance();
        self.lit_cell = Some(tick.cell);
        debug!(cell = tick.cell, step = tick.step, "light moved");
        self.events.push(Event::LightMoved {
            cell: tick.cell,
            step: tick.step,
        });

        match tick.next {
            Some(delay) => self.scheduler.schedule(
                delay,
                Step::ChaseTick {
                    round: self.round,
                },
            ),
            None => self.resolve(tick.cell),
        }
    }

    fn resolve(&mut self, cell: usize) {
        self.chase = None;
        let Some(symbol) = symbol_at(cell) else {
            // Ring cells always carry a symbol
            warn!(cell, "light stopped on an empty cell");
            self.phase = Phase::ResolvedLose;
            self.schedule_reset(self.config.lose_reset_delay());
            return;
        };

        let resolution = payout::resolve(symbol, &self.bets, &mut self.rng);
        self.balance = self.balance.saturating_add(resolution.win);
        self.current_win = resolution.win;

        let outcome = RoundOutcome {
            symbol,
            cell,
            win: resolution.win,
            luck_multiplier: resolution.luck_multiplier,
        };
        self.last_outcome = Some(outcome);
        info!(
            round = self.round,
            %symbol,
            cell,
            win = outcome.win,
            balance = self.balance,
            "round resolved"
        );
        self.events.push(Event::RoundResolved {
            outcome,
            balance: self.balance,
        });

        if !resolution.bonus_eligible() {
            self.phase = Phase::ResolvedLose;
            self.schedule_reset(self.config.lose_reset_delay());
        } else if self.auto_play {
            self.phase = Phase::ResolvedWin;
            self.schedule_reset(self.config.win_reset_delay());
        } else {
            self.phase = Phase::DoubleUpOffered;
            self.double_up = Some(DoubleUp::offer(resolution.win));
            self.events.push(Event::DoubleUpOffered {
                current_win: resolution.win,
            });
        }
    }

    fn schedule_reset(&mut self, delay: std::time::Duration) {
        self.scheduler.schedule(delay, Step::Reset { round: self.round });
    }

    /// Return to betting. Auto-play only refills after a plain resolution.
    fn reset(&mut self, plain_resolution: bool) {
        self.current_win = 0;
        self.bets.clear();
        self.chase = None;
        self.double_up = None;
        self.phase = Phase::Idle;

        let replay_total = self.last_bets.total();
        let auto_replay = plain_resolution
            && self.auto_play
            && replay_total > 0
            && self.balance >= replay_total;
        if auto_replay {
            self.bets = self.last_bets.clone();
            self.scheduler.schedule(
                self.config.auto_restart_delay(),
                Step::AutoStart { round: self.round },
            );
        }
        info!(round = self.round, auto_replay, balance = self.balance, "round reset");
        self.events.push(Event::RoundReset { auto_replay });
    }

    // === Double-up ===

    /// Close the double-up panel, keeping what the balance already holds.
    pub fn collect_winnings(&mut self) -> Result<u64, Rejection> {
        self.require(Phase::DoubleUpOffered, "collect winnings")?;
        info!(balance = self.balance, "winnings collected");
        self.events.push(Event::WinningsCollected {
            balance: self.balance,
        });
        self.reset(false);
        Ok(self.balance)
    }

    pub fn choose_double_stake(&mut self, stake: Stake) -> Result<u64, Rejection> {
        self.require(Phase::DoubleUpOffered, "double up")?;
        let Some(double_up) = self.double_up.as_mut() else {
            return Err(Rejection::InvalidPhase {
                action: "double up",
                phase: self.phase,
            });
        };
        let staked = double_up.place_stake(stake, &mut self.balance)?;
        self.current_win = staked.banked;
        self.phase = Phase::DoubleUpActive;
        debug!(stake = staked.stake, banked = staked.banked, "double-up staked");
        self.events.push(Event::DoubleUpStaked {
            stake: staked.stake,
            banked: staked.banked,
            balance: self.balance,
        });
        Ok(staked.stake)
    }

    pub fn guess(&mut self, guess: Guess) -> Result<Verdict, Rejection> {
        self.require(Phase::DoubleUpActive, "guess")?;
        let Some(double_up) = self.double_up.as_mut() else {
            return Err(Rejection::InvalidPhase {
                action: "guess",
                phase: self.phase,
            });
        };
        let verdict = double_up.guess(guess, &mut self.rng, &mut self.balance);
        info!(
            ?guess,
            draw = verdict.draw,
            won = verdict.won,
            amount = verdict.amount,
            "double-up resolved"
        );
        self.events.push(Event::DoubleUpResolved {
            guess,
            draw: verdict.draw,
            won: verdict.won,
            amount: verdict.amount,
            balance: self.balance,
        });

        if verdict.won {
            self.current_win = verdict.amount;
            self.phase = Phase::DoubleUpOffered;
            self.events.push(Event::DoubleUpOffered {
                current_win: verdict.amount,
            });
        } else {
            self.reset(false);
        }
        Ok(verdict)
    }

    fn require(&self, phase: Phase, action: &'static str) -> Result<(), Rejection> {
        if self.phase != phase {
            debug!(action, phase = %self.phase, "command refused in this phase");
            return Err(Rejection::InvalidPhase {
                action,
                phase: self.phase,
            });
        }
        Ok(())
    }
}

//! Integration tests for the round engine.
//!
//! These drive whole rounds through the public commands, firing scheduled
//! steps by hand.

#[cfg(test)]
mod tests {
    use crate::mocks::{
        create_engine, create_engine_with, draws_landing_on, finish_chase, fire_pending,
        ManualScheduler, TestEngine,
    };
    use crate::{GameRng, RoundEngine, Step};
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::time::Duration;
    use xiaomali_types::game::{
        Event, Guess, Phase, Rejection, Stake, Symbol, CHASE_SEQUENCE, MAX_BET_PER_SYMBOL,
    };
    use xiaomali_types::EngineConfig;

    const BAR_CELL: usize = 8;
    const BELL_CELL: usize = 2;
    const LUCK_CELL: usize = 4;

    fn bet(engine: &mut TestEngine, symbol: Symbol, times: u64) {
        for _ in 0..times {
            engine.place_bet(symbol).expect("bet should be accepted");
        }
    }

    /// Bet 10 on bell and land on it: a 100 win offered for double-up.
    fn engine_with_bell_win() -> TestEngine {
        let mut engine = create_engine(&draws_landing_on(BELL_CELL));
        bet(&mut engine, Symbol::Bell, 10);
        engine.start_round().unwrap();
        finish_chase(&mut engine);
        assert_eq!(engine.phase(), Phase::DoubleUpOffered);
        assert_eq!(engine.current_win(), 100);
        assert_eq!(engine.balance(), 1_090);
        engine.take_events();
        engine
    }

    #[test]
    fn test_bar_win_scenario() {
        let mut engine = create_engine(&draws_landing_on(BAR_CELL));
        bet(&mut engine, Symbol::Bar, 10);
        assert_eq!(engine.total_bet(), 10);

        engine.start_round().unwrap();
        assert_eq!(engine.phase(), Phase::Chasing);
        assert_eq!(engine.balance(), 990);

        finish_chase(&mut engine);
        let outcome = engine.last_outcome().expect("round should resolve");
        assert_eq!(outcome.symbol, Symbol::Bar);
        assert_eq!(outcome.cell, BAR_CELL);
        assert_eq!(outcome.win, 1_000);
        assert_eq!(engine.current_win(), 1_000);
        assert_eq!(engine.balance(), 1_990);
        assert_eq!(engine.phase(), Phase::DoubleUpOffered);
        assert_eq!(engine.lit_cell(), Some(BAR_CELL));
    }

    #[test]
    fn test_orange_loss_scenario() {
        let mut engine = create_engine(&draws_landing_on(BELL_CELL));
        bet(&mut engine, Symbol::Orange, 5);
        engine.start_round().unwrap();
        finish_chase(&mut engine);

        assert_eq!(engine.balance(), 995);
        assert_eq!(engine.current_win(), 0);
        assert_eq!(engine.phase(), Phase::ResolvedLose);
        assert_eq!(
            engine.scheduler().peek().copied(),
            Some((Duration::from_millis(500), Step::Reset { round: 1 }))
        );

        fire_pending(&mut engine, 10);
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.total_bet(), 0);
        assert_eq!(engine.last_bets().stake(Symbol::Orange), 5);
        assert!(engine.scheduler().is_empty());
    }

    #[test]
    fn test_double_all_then_big_scenario() {
        let mut engine = engine_with_bell_win();

        assert_eq!(engine.choose_double_stake(Stake::All), Ok(100));
        assert_eq!(engine.phase(), Phase::DoubleUpActive);
        assert_eq!(engine.current_win(), 0);
        assert_eq!(engine.balance(), 990);

        engine.rng_mut().push([9]);
        let verdict = engine.guess(Guess::Big).unwrap();
        assert!(verdict.won);
        assert_eq!(verdict.draw, 9);
        assert_eq!(engine.current_win(), 200);
        assert_eq!(engine.phase(), Phase::DoubleUpOffered);
        assert_eq!(engine.balance(), 1_190);

        assert_eq!(engine.collect_winnings(), Ok(1_190));
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.current_win(), 0);
        assert_eq!(engine.total_bet(), 0);
    }

    #[test]
    fn test_wrong_guess_never_recredits_stake() {
        let mut engine = engine_with_bell_win();

        assert_eq!(engine.choose_double_stake(Stake::Half), Ok(50));
        assert_eq!(engine.current_win(), 50);
        assert_eq!(engine.balance(), 1_040);

        engine.rng_mut().push([3]);
        let verdict = engine.guess(Guess::Big).unwrap();
        assert!(!verdict.won);
        assert_eq!(verdict.amount, 50);
        assert_eq!(engine.balance(), 1_040);
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.current_win(), 0);

        let events = engine.take_events();
        assert!(events.contains(&Event::RoundReset {
            auto_replay: false
        }));
    }

    #[test]
    fn test_repeated_double_up_wins() {
        let mut engine = engine_with_bell_win();
        engine.rng_mut().push([1, 12]);

        engine.choose_double_stake(Stake::All).unwrap();
        assert!(engine.guess(Guess::Small).unwrap().won);
        assert_eq!(engine.current_win(), 200);

        engine.choose_double_stake(Stake::Half).unwrap();
        assert_eq!(engine.double_up().unwrap().stake, 100);
        assert!(engine.guess(Guess::Big).unwrap().won);
        assert_eq!(engine.current_win(), 200);
        // 1090 - 100 + 200 - 200 + 100 + 200
        assert_eq!(engine.balance(), 1_290);
    }

    #[test]
    fn test_luck_pays_multiple_of_total_bet() {
        for multiplier in 2..=6u32 {
            let [loops, offset] = draws_landing_on(LUCK_CELL);
            let mut engine = create_engine(&[loops, offset, multiplier]);
            bet(&mut engine, Symbol::Luck, 1);
            bet(&mut engine, Symbol::Star, 9);
            engine.start_round().unwrap();
            finish_chase(&mut engine);

            let outcome = engine.last_outcome().unwrap();
            assert_eq!(outcome.symbol, Symbol::Luck);
            assert_eq!(outcome.luck_multiplier, Some(multiplier));
            assert_eq!(outcome.win, 10 * multiplier as u64);
            assert_eq!(engine.balance(), 1_000 - 10 + 10 * multiplier as u64);
        }
    }

    #[test]
    fn test_start_without_bets_is_noop() {
        let mut engine = create_engine(&[]);
        assert_eq!(engine.start_round(), Err(Rejection::NoBets));
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.balance(), 1_000);
        assert_eq!(engine.round(), 0);
        assert!(engine.take_events().is_empty());
        assert!(engine.scheduler().is_empty());
    }

    #[test]
    fn test_bets_bounded_by_balance() {
        let config = EngineConfig {
            starting_balance: 3,
            ..EngineConfig::default()
        };
        let mut engine = create_engine_with(config, &[]);
        bet(&mut engine, Symbol::Orange, 3);
        assert_eq!(
            engine.place_bet(Symbol::Grapes),
            Err(Rejection::InsufficientBalance {
                required: 4,
                available: 3
            })
        );
        assert_eq!(engine.total_bet(), 3);
    }

    #[test]
    fn test_bet_cap() {
        let mut engine = create_engine(&[]);
        bet(&mut engine, Symbol::Star, MAX_BET_PER_SYMBOL);
        assert_eq!(
            engine.place_bet(Symbol::Star),
            Err(Rejection::BetCapReached {
                symbol: Symbol::Star,
                cap: MAX_BET_PER_SYMBOL
            })
        );
        assert_eq!(engine.stake(Symbol::Star), MAX_BET_PER_SYMBOL);
    }

    #[test]
    fn test_commands_refused_in_wrong_phase() {
        let mut engine = create_engine(&draws_landing_on(BELL_CELL));
        assert!(matches!(
            engine.collect_winnings(),
            Err(Rejection::InvalidPhase { .. })
        ));
        assert!(matches!(
            engine.guess(Guess::Big),
            Err(Rejection::InvalidPhase { .. })
        ));

        bet(&mut engine, Symbol::Bell, 2);
        engine.start_round().unwrap();
        let balance = engine.balance();

        for result in [
            engine.place_bet(Symbol::Bar).map(|_| ()),
            engine.clear_bets(),
            engine.repeat_last_bets().map(|_| ()),
            engine.start_round(),
            engine.choose_double_stake(Stake::All).map(|_| ()),
        ] {
            assert!(matches!(
                result,
                Err(Rejection::InvalidPhase {
                    phase: Phase::Chasing,
                    ..
                })
            ));
        }
        assert_eq!(engine.balance(), balance);
        assert_eq!(engine.stake(Symbol::Bell), 2);

        finish_chase(&mut engine);
        assert_eq!(engine.phase(), Phase::DoubleUpOffered);
        assert!(matches!(
            engine.place_bet(Symbol::Bar),
            Err(Rejection::InvalidPhase {
                phase: Phase::DoubleUpOffered,
                ..
            })
        ));
        assert!(matches!(
            engine.guess(Guess::Small),
            Err(Rejection::InvalidPhase { .. })
        ));
    }

    #[test]
    fn test_repeat_last_bets() {
        let mut engine = create_engine(&draws_landing_on(BELL_CELL));
        assert_eq!(engine.repeat_last_bets(), Err(Rejection::NothingToRepeat));

        bet(&mut engine, Symbol::Orange, 3);
        bet(&mut engine, Symbol::Bar, 2);
        let placed = engine.bets().clone();
        engine.start_round().unwrap();
        finish_chase(&mut engine);
        fire_pending(&mut engine, 10);
        assert_eq!(engine.total_bet(), 0);

        assert_eq!(engine.repeat_last_bets(), Ok(5));
        assert_eq!(engine.bets(), &placed);
    }

    #[test]
    fn test_repeat_refused_when_unaffordable() {
        let config = EngineConfig {
            starting_balance: 20,
            ..EngineConfig::default()
        };
        let mut engine = create_engine_with(config, &draws_landing_on(BELL_CELL));
        bet(&mut engine, Symbol::Orange, 20);
        engine.start_round().unwrap();
        finish_chase(&mut engine);
        fire_pending(&mut engine, 10);
        assert_eq!(engine.balance(), 0);

        assert_eq!(
            engine.repeat_last_bets(),
            Err(Rejection::InsufficientBalance {
                required: 20,
                available: 0
            })
        );
        assert!(engine.bets().is_empty());
    }

    #[test]
    fn test_clear_bets() {
        let mut engine = create_engine(&[]);
        bet(&mut engine, Symbol::Watermelon, 4);
        engine.clear_bets().unwrap();
        assert_eq!(engine.total_bet(), 0);
        assert_eq!(engine.take_events().last(), Some(&Event::BetsCleared));
    }

    #[test]
    fn test_light_events_follow_chase() {
        let mut engine = create_engine(&draws_landing_on(BELL_CELL));
        bet(&mut engine, Symbol::Bell, 1);
        engine.take_events();

        engine.start_round().unwrap();
        // First cell lights without waiting
        assert_eq!(engine.lit_cell(), Some(CHASE_SEQUENCE[0]));
        assert_eq!(engine.scheduler().len(), 1);
        finish_chase(&mut engine);

        let events = engine.take_events();
        let total_steps = match &events[0] {
            Event::RoundStarted { total_steps, .. } => *total_steps,
            other => panic!("unexpected first event {other:?}"),
        };
        let cells: Vec<usize> = events
            .iter()
            .filter_map(|event| match event {
                Event::LightMoved { cell, .. } => Some(*cell),
                _ => None,
            })
            .collect();
        assert_eq!(cells.len() as u32, total_steps);
        assert_eq!(cells.last(), Some(&BELL_CELL));
        assert!(matches!(events.last(), Some(Event::DoubleUpOffered { current_win: 10 })));
    }

    #[test]
    fn test_auto_play_replays_after_loss() {
        let mut engine = create_engine(&draws_landing_on(BELL_CELL));
        engine.set_auto_play(true);
        bet(&mut engine, Symbol::Orange, 5);
        engine.start_round().unwrap();
        finish_chase(&mut engine);
        assert_eq!(engine.phase(), Phase::ResolvedLose);

        // Reset refills the bets and schedules the restart
        let fired = fire_pending(&mut engine, 1);
        assert_eq!(fired[0].1, Step::Reset { round: 1 });
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.stake(Symbol::Orange), 5);
        assert_eq!(
            engine.scheduler().peek().copied(),
            Some((Duration::from_millis(1_500), Step::AutoStart { round: 1 }))
        );

        engine.rng_mut().push(draws_landing_on(BELL_CELL));
        fire_pending(&mut engine, 1);
        assert_eq!(engine.phase(), Phase::Chasing);
        assert_eq!(engine.round(), 2);
        assert_eq!(engine.balance(), 990);
    }

    #[test]
    fn test_auto_play_win_skips_double_up() {
        let mut engine = create_engine(&draws_landing_on(BAR_CELL));
        engine.set_auto_play(true);
        bet(&mut engine, Symbol::Bar, 1);
        engine.start_round().unwrap();
        finish_chase(&mut engine);

        assert_eq!(engine.phase(), Phase::ResolvedWin);
        assert_eq!(engine.double_up(), None);
        assert_eq!(engine.balance(), 1_099);
        assert_eq!(
            engine.scheduler().peek().copied(),
            Some((Duration::from_millis(1_000), Step::Reset { round: 1 }))
        );
        assert!(matches!(
            engine.choose_double_stake(Stake::All),
            Err(Rejection::InvalidPhase { .. })
        ));

        fire_pending(&mut engine, 1);
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.stake(Symbol::Bar), 1);
        assert!(matches!(
            engine.scheduler().peek(),
            Some((_, Step::AutoStart { round: 1 }))
        ));
    }

    #[test]
    fn test_auto_play_does_not_replay_after_double_up() {
        let mut engine = engine_with_bell_win();
        engine.set_auto_play(true);
        engine.collect_winnings().unwrap();

        assert_eq!(engine.phase(), Phase::Idle);
        assert!(engine.bets().is_empty());
        assert!(engine.scheduler().is_empty());
        assert!(engine.take_events().contains(&Event::RoundReset {
            auto_replay: false
        }));
    }

    #[test]
    fn test_auto_play_stops_when_broke() {
        let config = EngineConfig {
            starting_balance: 5,
            ..EngineConfig::default()
        };
        let mut engine = create_engine_with(config, &draws_landing_on(BELL_CELL));
        engine.set_auto_play(true);
        bet(&mut engine, Symbol::Orange, 5);
        engine.start_round().unwrap();
        finish_chase(&mut engine);
        fire_pending(&mut engine, 10);

        assert_eq!(engine.balance(), 0);
        assert_eq!(engine.phase(), Phase::Idle);
        assert!(engine.bets().is_empty());
        assert!(engine.scheduler().is_empty());
    }

    #[test]
    fn test_stale_steps_are_dropped() {
        let mut engine = create_engine(&draws_landing_on(BELL_CELL));
        engine.set_auto_play(true);
        bet(&mut engine, Symbol::Orange, 1);
        engine.start_round().unwrap();
        finish_chase(&mut engine);
        fire_pending(&mut engine, 1);
        let (_, auto_start) = engine.scheduler_mut().pop_next().unwrap();

        // Player starts the next round before the auto-play timer fires
        engine.rng_mut().push(draws_landing_on(BELL_CELL));
        engine.start_round().unwrap();
        assert_eq!(engine.round(), 2);
        let before = engine.snapshot();

        engine.fire(auto_start);
        engine.fire(Step::Reset { round: 2 });
        engine.fire(Step::ChaseTick { round: 1 });
        assert_eq!(engine.snapshot(), before);

        finish_chase(&mut engine);
        assert_eq!(engine.phase(), Phase::ResolvedLose);
    }

    #[test]
    fn test_auto_play_toggle_emits_once() {
        let mut engine = create_engine(&[]);
        engine.set_auto_play(true);
        engine.set_auto_play(true);
        engine.set_auto_play(false);
        assert_eq!(
            engine.take_events(),
            vec![
                Event::AutoPlayChanged { enabled: true },
                Event::AutoPlayChanged { enabled: false },
            ]
        );
    }

    #[test]
    fn test_random_bets_respect_cap_and_balance() {
        let mut rng = StdRng::seed_from_u64(42);
        for balance in [0u64, 1, 37, 120, 1_000] {
            let config = EngineConfig {
                starting_balance: balance,
                ..EngineConfig::default()
            };
            let mut engine = create_engine_with(config, &[]);
            for _ in 0..600 {
                let symbol = Symbol::ALL[rng.gen_range(0..Symbol::ALL.len())];
                let _ = engine.place_bet(symbol);
                if rng.gen_ratio(1, 100) {
                    engine.clear_bets().unwrap();
                }
                assert!(engine.total_bet() <= engine.balance());
                for symbol in Symbol::ALL {
                    assert!(engine.stake(symbol) <= MAX_BET_PER_SYMBOL);
                }
            }
        }
    }

    #[test]
    fn test_balance_law_over_seeded_rounds() {
        let mut bettor = StdRng::seed_from_u64(7);
        for seed in 0..40 {
            let mut engine = RoundEngine::new(
                EngineConfig::default(),
                GameRng::new(seed),
                ManualScheduler::new(),
            )
            .unwrap();
            for _ in 0..bettor.gen_range(1..30) {
                let symbol = Symbol::ALL[bettor.gen_range(0..Symbol::ALL.len())];
                engine.place_bet(symbol).unwrap();
            }
            let before = engine.balance();
            let total_bet = engine.total_bet();
            let bets = engine.bets().clone();

            engine.start_round().unwrap();
            while let Some((_, step)) = engine.scheduler_mut().pop_next() {
                engine.fire(step);
                if engine.phase() != Phase::Chasing {
                    break;
                }
            }

            let outcome = engine.last_outcome().expect("chase should finish");
            assert_eq!(engine.balance(), before - total_bet + outcome.win);
            let stake = bets.stake(outcome.symbol);
            if stake == 0 {
                assert_eq!(outcome.win, 0);
            } else if outcome.symbol == Symbol::Luck {
                let multiplier = outcome.win / total_bet;
                assert_eq!(outcome.win % total_bet, 0);
                assert!((2..=6).contains(&multiplier));
            } else {
                assert_eq!(outcome.win, stake * outcome.symbol.payout_multiplier());
            }
        }
    }
}

//! Line commands typed by the player.

use std::str::FromStr;
use thiserror::Error;
use xiaomali_execution::{RandomSource, RoundEngine, Scheduler};
use xiaomali_types::game::{Guess, ParseSymbolError, Rejection, Stake, Symbol};

/// Upper bound on units placed by a single `bet` line.
pub const MAX_UNITS_PER_LINE: u64 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Place `units` single-unit bets on a symbol.
    Bet { symbol: Symbol, units: u64 },
    Start,
    Clear,
    Repeat,
    Auto(bool),
    Collect,
    Double(Stake),
    Guess(Guess),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Symbol(#[from] ParseSymbolError),
}

pub const HELP: &str = "\
commands:
  bet <symbol> [n]   add n units (default 1) on orange|grapes|bell|watermelon|star|77|bar|luck
  start              run the light
  clear              remove all bets
  repeat             bet the same as last round
  auto on|off        replay the same bets automatically
  half | all         double up half or all of the win
  big | small        guess the double-up draw (big = 7-12)
  collect            keep the win and close the double-up
  show               redraw the board
  quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        let command = match (head.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("bet" | "b", [symbol]) => Command::Bet {
                symbol: symbol.parse()?,
                units: 1,
            },
            ("bet" | "b", [symbol, units]) => {
                let units = units
                    .parse::<u64>()
                    .ok()
                    .filter(|n| (1..=MAX_UNITS_PER_LINE).contains(n))
                    .ok_or(CommandError::Usage("bet <symbol> [1-50]"))?;
                Command::Bet {
                    symbol: symbol.parse()?,
                    units,
                }
            }
            ("bet" | "b", _) => return Err(CommandError::Usage("bet <symbol> [n]")),
            ("start" | "s" | "go", []) => Command::Start,
            ("clear", []) => Command::Clear,
            ("repeat" | "r", []) => Command::Repeat,
            ("auto", ["on"]) => Command::Auto(true),
            ("auto", ["off"]) => Command::Auto(false),
            ("auto", _) => return Err(CommandError::Usage("auto on|off")),
            ("collect" | "c", []) => Command::Collect,
            ("half", []) => Command::Double(Stake::Half),
            ("all", []) => Command::Double(Stake::All),
            ("big", []) => Command::Guess(Guess::Big),
            ("small", []) => Command::Guess(Guess::Small),
            ("show", []) => Command::Show,
            ("help" | "?", []) => Command::Help,
            ("quit" | "q" | "exit", []) => Command::Quit,
            _ => return Err(CommandError::Unknown(line.trim().to_string())),
        };
        Ok(command)
    }
}

/// Forward a command to the engine.
///
/// `Show`, `Help` and `Quit` are handled by the shell and leave the engine
/// untouched. A multi-unit bet stops at the first refused unit and reports
/// the refusal only if no unit was placed.
pub fn apply<R: RandomSource, S: Scheduler>(
    engine: &mut RoundEngine<R, S>,
    command: Command,
) -> Result<(), Rejection> {
    match command {
        Command::Bet { symbol, units } => {
            for placed in 0..units {
                if let Err(rejection) = engine.place_bet(symbol) {
                    if placed == 0 {
                        return Err(rejection);
                    }
                    break;
                }
            }
            Ok(())
        }
        Command::Start => engine.start_round(),
        Command::Clear => engine.clear_bets(),
        Command::Repeat => engine.repeat_last_bets().map(|_| ()),
        Command::Auto(enabled) => {
            engine.set_auto_play(enabled);
            Ok(())
        }
        Command::Collect => engine.collect_winnings().map(|_| ()),
        Command::Double(stake) => engine.choose_double_stake(stake).map(|_| ()),
        Command::Guess(guess) => engine.guess(guess).map(|_| ()),
        Command::Show | Command::Help | Command::Quit => Ok(()),
    }
}

use std::fmt;

/// Current step of a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Accepting bets.
    #[default]
    Idle,
    /// Light is running; bets are locked.
    Chasing,
    /// Round won; waiting for the auto-play reset.
    ResolvedWin,
    /// Round lost; waiting for the reset.
    ResolvedLose,
    /// Winnings are offered for a double-up.
    DoubleUpOffered,
    /// A stake is at risk, waiting for a big/small guess.
    DoubleUpActive,
}

impl Phase {
    /// Whether betting controls are enabled.
    pub fn accepts_bets(self) -> bool {
        self == Phase::Idle
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Chasing => "chasing",
            Phase::ResolvedWin => "resolved-win",
            Phase::ResolvedLose => "resolved-lose",
            Phase::DoubleUpOffered => "double-up-offered",
            Phase::DoubleUpActive => "double-up-active",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much of the current win to put at risk in the double-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stake {
    /// floor(current_win / 2)
    Half,
    All,
}

impl Stake {
    pub fn amount(self, current_win: u64) -> u64 {
        match self {
            Stake::Half => current_win / 2,
            Stake::All => current_win,
        }
    }
}

/// Double-up guess on a 1-12 draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guess {
    /// 7..=12
    Big,
    /// 1..=6
    Small,
}

impl Guess {
    pub fn wins(self, draw: u32) -> bool {
        match self {
            Guess::Big => draw >= super::BIG_THRESHOLD,
            Guess::Small => draw < super::BIG_THRESHOLD,
        }
    }
}

/// Result of a finished chase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundOutcome {
    /// Symbol the light stopped on.
    pub symbol: super::Symbol,
    /// Board cell the light stopped on.
    pub cell: usize,
    /// Amount credited to the balance (0 on a loss).
    pub win: u64,
    /// Set when the luck bonus replaced the symbol's fixed multiplier.
    pub luck_multiplier: Option<u32>,
}

impl RoundOutcome {
    pub fn is_win(&self) -> bool {
        self.win > 0
    }
}

/// Stake and winnings held by the double-up panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DoubleUpState {
    /// Amount currently at risk (0 until a stake is chosen).
    pub stake: u64,
    /// Amount on offer for the next double-up.
    pub current_win: u64,
}

use std::{fmt, str::FromStr};
use thiserror::Error;

/// Symbols printed on the board, in ascending order of payout.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Orange = 0,
    Grapes = 1,
    Bell = 2,
    Watermelon = 3,
    Star = 4,
    SevenSeven = 5,
    Bar = 6,
    /// Pays a random multiple of the whole bet instead of a fixed multiplier.
    Luck = 7,
}

/// Static description of a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolDef {
    pub symbol: Symbol,
    pub key: &'static str,
    pub display_name: &'static str,
    pub payout_multiplier: u64,
}

/// The odds table.
pub const SYMBOLS: [SymbolDef; 8] = [
    SymbolDef {
        symbol: Symbol::Orange,
        key: "orange",
        display_name: "橘子",
        payout_multiplier: 2,
    },
    SymbolDef {
        symbol: Symbol::Grapes,
        key: "grapes",
        display_name: "葡萄",
        payout_multiplier: 5,
    },
    SymbolDef {
        symbol: Symbol::Bell,
        key: "bell",
        display_name: "鈴鐺",
        payout_multiplier: 10,
    },
    SymbolDef {
        symbol: Symbol::Watermelon,
        key: "watermelon",
        display_name: "西瓜",
        payout_multiplier: 15,
    },
    SymbolDef {
        symbol: Symbol::Star,
        key: "star",
        display_name: "星星",
        payout_multiplier: 20,
    },
    SymbolDef {
        symbol: Symbol::SevenSeven,
        key: "77",
        display_name: "77",
        payout_multiplier: 50,
    },
    SymbolDef {
        symbol: Symbol::Bar,
        key: "bar",
        display_name: "BAR",
        payout_multiplier: 100,
    },
    SymbolDef {
        symbol: Symbol::Luck,
        key: "luck",
        display_name: "LUCK",
        payout_multiplier: 0,
    },
];

impl Symbol {
    pub const ALL: [Symbol; 8] = [
        Symbol::Orange,
        Symbol::Grapes,
        Symbol::Bell,
        Symbol::Watermelon,
        Symbol::Star,
        Symbol::SevenSeven,
        Symbol::Bar,
        Symbol::Luck,
    ];

    pub fn def(self) -> &'static SymbolDef {
        &SYMBOLS[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.def().key
    }

    pub fn display_name(self) -> &'static str {
        self.def().display_name
    }

    /// Fixed multiplier applied to the stake on this symbol. Zero for luck.
    pub fn payout_multiplier(self) -> u64 {
        self.def().payout_multiplier
    }

    pub fn is_luck(self) -> bool {
        self == Symbol::Luck
    }

    /// Payout label shown on the board; luck hides its multiplier.
    pub fn payout_label(self) -> String {
        if self.is_luck() {
            "???".to_string()
        } else {
            format!("{}x", self.payout_multiplier())
        }
    }
}

impl TryFrom<u8> for Symbol {
    type Error = ParseSymbolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Symbol::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| ParseSymbolError(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown symbol: {0}")]
pub struct ParseSymbolError(pub String);

impl FromStr for Symbol {
    type Err = ParseSymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        SYMBOLS
            .iter()
            .find(|def| def.key == key)
            .map(|def| def.symbol)
            .ok_or(ParseSymbolError(s.to_string()))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

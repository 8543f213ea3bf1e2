/// Maximum stake a player may place on a single symbol
pub const MAX_BET_PER_SYMBOL: u64 = 50;

/// Starting balance for a fresh session
pub const STARTING_BALANCE: u64 = 1_000;

/// Number of cells on one side of the square board
pub const BOARD_SIDE: usize = 4;

/// Total number of cells on the board (occupied and empty)
pub const BOARD_CELLS: usize = BOARD_SIDE * BOARD_SIDE;

/// Number of perimeter cells the light travels
pub const RING_LENGTH: usize = 4 * (BOARD_SIDE - 1);

/// Full loops the light always runs before the stop offset (inclusive range)
pub const MIN_CHASE_LOOPS: u32 = 3;
pub const MAX_CHASE_LOOPS: u32 = 4;

/// Multiplier range drawn when the light lands on a staked luck cell
pub const MIN_LUCK_MULTIPLIER: u32 = 2;
pub const MAX_LUCK_MULTIPLIER: u32 = 6;

/// Double-up draw range
pub const MIN_DOUBLE_UP_DRAW: u32 = 1;
pub const MAX_DOUBLE_UP_DRAW: u32 = 12;

/// Lowest draw that counts as "big"; anything below is "small"
pub const BIG_THRESHOLD: u32 = 7;

// Chase and reset timing, in milliseconds.
pub const BASE_TICK_MS: u64 = 100;
pub const SLOWDOWN_STEP_MS: u64 = 15;
pub const FINAL_SLOWDOWN_STEP_MS: u64 = 30;
pub const WIN_RESET_DELAY_MS: u64 = 1_000;
pub const LOSE_RESET_DELAY_MS: u64 = 500;
pub const AUTO_RESTART_DELAY_MS: u64 = 1_500;

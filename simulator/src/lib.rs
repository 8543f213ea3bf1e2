//! Terminal shell for the light-chasing lottery.
//!
//! The engine lives in `xiaomali-execution`; this crate parses player
//! commands, drives the engine's timers on tokio and draws the board.

pub mod command;
pub mod config;
pub mod render;
pub mod timer;

pub use command::{apply, Command, CommandError, HELP};
pub use config::{ShellConfig, ShellConfigError, ValidatedShellConfig};
pub use render::{describe, describe_rejection, render_board, render_status};
pub use timer::TokioScheduler;

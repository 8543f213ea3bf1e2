//! Text rendering of the board and engine notifications.

use std::fmt::Write;
use xiaomali_execution::EngineView;
use crate::Command;
use xiaomali_types::game::{symbol_at, Event, Guess, Phase, Rejection, BOARD_SIDE};

const CELL_WIDTH: usize = 14;

/// Draw the 4x4 board and a status line.
///
/// Each perimeter cell shows name, payout and stake; the lit cell is
/// bracketed with `>` `<`.
pub fn render_board(view: &EngineView) -> String {
    let mut out = String::new();
    let border = format!("+{}\n", format!("{}+", "-".repeat(CELL_WIDTH)).repeat(BOARD_SIDE));

    out.push_str(&border);
    for row in 0..BOARD_SIDE {
        let mut names = String::from("|");
        let mut stakes = String::from("|");
        for col in 0..BOARD_SIDE {
            let cell = row * BOARD_SIDE + col;
            let (name, stake) = match symbol_at(cell) {
                Some(symbol) => {
                    let lit = view.lit_cell == Some(cell);
                    let name = if lit {
                        format!(">{} {}<", symbol.display_name(), symbol.payout_label())
                    } else {
                        format!("{} {}", symbol.display_name(), symbol.payout_label())
                    };
                    (name, format!("bet {}", view.bets.stake(symbol)))
                }
                None => (String::new(), String::new()),
            };
            let _ = write!(names, "{}|", pad(&name));
            let _ = write!(stakes, "{}|", pad(&stake));
        }
        out.push_str(&names);
        out.push('\n');
        out.push_str(&stakes);
        out.push('\n');
        out.push_str(&border);
    }
    out.push_str(&render_status(view));
    out
}

pub fn render_status(view: &EngineView) -> String {
    let mut status = format!(
        "score {} | bet {} | win {} | {}",
        view.balance, view.total_bet, view.current_win, view.phase
    );
    if view.auto_play {
        status.push_str(" | auto");
    }
    if let Some(double_up) = view.double_up {
        match view.phase {
            Phase::DoubleUpOffered => {
                let _ = write!(
                    status,
                    "\ndouble up {}? half | all | collect",
                    double_up.current_win
                );
            }
            Phase::DoubleUpActive => {
                let _ = write!(status, "\n{} at stake: big | small", double_up.stake);
            }
            _ => {}
        }
    }
    status
}

/// Message for events worth telling the player about. Chase ticks and bet
/// bookkeeping are left to the board redraw.
pub fn describe(event: &Event) -> Option<String> {
    match event {
        Event::RoundResolved { outcome, .. } => Some(match outcome.luck_multiplier {
            Some(multiplier) => format!(
                "幸運！您獲得了 {} 分的隨機獎勵！ ({}x)",
                outcome.win, multiplier
            ),
            None if outcome.is_win() => format!(
                "{} pays {}",
                outcome.symbol.display_name(),
                outcome.win
            ),
            None => format!("{}: no win", outcome.symbol.display_name()),
        }),
        Event::DoubleUpResolved {
            guess, draw, won, amount, ..
        } => Some(if *won {
            format!("猜對了！數字是 {draw}。您的獎金變為 {amount} ({})", guess_label(*guess))
        } else {
            format!("猜錯了！數字是 {draw}。您失去了 {amount} 分。")
        }),
        Event::WinningsCollected { balance } => Some(format!("collected, score {balance}")),
        Event::RoundReset { auto_replay: true } => Some("auto-play: next round soon".to_string()),
        Event::AutoPlayChanged { enabled } => Some(format!(
            "auto-play {}",
            if *enabled { "on" } else { "off" }
        )),
        _ => None,
    }
}

/// Text shown when the engine refuses `command`.
pub fn describe_rejection(command: &Command, rejection: &Rejection) -> String {
    match (command, rejection) {
        (Command::Repeat, Rejection::InsufficientBalance { .. }) => {
            "分數不足以重複上一局押注!".to_string()
        }
        _ => format!("refused: {rejection}"),
    }
}

fn guess_label(guess: Guess) -> &'static str {
    match guess {
        Guess::Big => "big",
        Guess::Small => "small",
    }
}

/// Pad to the cell width, counting CJK glyphs as two columns.
fn pad(text: &str) -> String {
    let width: usize = text
        .chars()
        .map(|c| if c.is_ascii() { 1 } else { 2 })
        .sum();
    let fill = CELL_WIDTH.saturating_sub(width);
    format!("{text}{}", " ".repeat(fill))
}

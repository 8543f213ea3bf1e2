use anyhow::Context;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use xiaomali_execution::{GameRng, RandomSource, RoundEngine, Scheduler};
use xiaomali_simulator::{
    apply, describe, describe_rejection, render_board, Command, ShellConfig, TokioScheduler,
    HELP,
};
use xiaomali_types::game::{symbol_at, Event};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML file with shell and engine settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed the hash-chain RNG for a reproducible session
    #[arg(short, long)]
    seed: Option<u64>,

    /// Start with auto-play enabled
    #[arg(short, long, default_value_t = false)]
    auto: bool,

    /// Overrides the configured log level
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();

    // Load config
    let mut config = match &args.config {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::default(),
    };
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    let config = config.validate().context("invalid configuration")?;

    // Create logger
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .init();

    // Create engine
    let rng: Box<dyn RandomSource + Send> = match args.seed {
        Some(seed) => {
            info!(seed, "using seeded rng");
            Box::new(GameRng::new(seed))
        }
        None => Box::new(StdRng::from_entropy()),
    };
    let (scheduler, mut steps) = TokioScheduler::new();
    let mut engine =
        RoundEngine::new(config.engine, rng, scheduler).context("failed to create engine")?;
    if args.auto {
        engine.set_auto_play(true);
    }

    println!("{HELP}");
    flush(&mut engine, true);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                };
                match command {
                    Command::Quit => break,
                    Command::Help => println!("{HELP}"),
                    Command::Show => flush(&mut engine, true),
                    _ => {
                        if let Err(rejection) = apply(&mut engine, command) {
                            println!("{}", describe_rejection(&command, &rejection));
                        }
                        flush(&mut engine, true);
                    }
                }
            }
            Some(step) = steps.recv() => {
                engine.fire(step);
                flush(&mut engine, false);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    info!(
        balance = engine.balance(),
        rounds = engine.round(),
        "session ended"
    );
    Ok(())
}

/// Print pending engine events. Light movement is drawn in place on one
/// line; anything else triggers a board redraw.
fn flush<R: RandomSource, S: Scheduler>(engine: &mut RoundEngine<R, S>, mut redraw: bool) {
    let mut stdout = std::io::stdout();
    for event in engine.take_events() {
        match event {
            Event::LightMoved { cell, step } => {
                if let Some(symbol) = symbol_at(cell) {
                    let _ = write!(stdout, "\r{step:>3} {:<8}", symbol.display_name());
                }
            }
            event => {
                redraw = true;
                if let Some(message) = describe(&event) {
                    let _ = writeln!(stdout, "\n{message}");
                }
            }
        }
    }
    if redraw {
        let _ = writeln!(stdout, "\n{}", render_board(&engine.snapshot()));
    }
    let _ = stdout.flush();
}

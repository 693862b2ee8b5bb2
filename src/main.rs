//! hex-patterns: a pattern-based Hex player.
//!
//! The engine plays Black (top to bottom) against a human or program
//! playing White (left to right).
//!
//! ## Usage
//!
//! - `hex-patterns` - Show a demo
//! - `hex-patterns play` - Play against the engine in the terminal
//! - `hex-patterns protocol` - Start the line protocol for other programs
//! - `hex-patterns demo` - Run the demo

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use hex_patterns::board::{coord_to_label, label_to_coord};
use hex_patterns::constants::DEFAULT_SIZE;
use hex_patterns::protocol::ProtocolEngine;
use hex_patterns::session::{EngineConfig, Session};
use hex_patterns::win::Winner;

/// hex-patterns: a Hex player built on edge templates
#[derive(Parser)]
#[command(name = "hex-patterns")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board size
    #[arg(short, long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Seed for the engine's random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Log engine decisions to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play White against the engine in the terminal
    Play,
    /// Start the line protocol on stdin/stdout
    Protocol,
    /// Play the engine against a random White player
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    let mut config = EngineConfig::new(cli.size);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    match cli.command {
        Some(Commands::Play) => run_play(config),
        Some(Commands::Protocol) => {
            let mut engine = ProtocolEngine::new(config).context("cannot start the engine")?;
            engine.run().context("protocol I/O failed")
        }
        Some(Commands::Demo) | None => run_demo(config),
    }
}

fn run_play(config: EngineConfig) -> Result<()> {
    let mut session = Session::new(config).context("cannot start a game")?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let opening = session.genmove()?;
    println!("Black opens at {}", coord_to_label(opening));

    let mut lines = stdin.lock().lines();
    while session.winner() == Winner::NoWinner {
        println!("{}", session.board());
        print!("White to play (e.g. a1, or q to quit): ");
        stdout.flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("cannot read move")?;
        let input = line.trim();
        if input == "q" || input == "quit" {
            return Ok(());
        }

        let cell = match label_to_coord(input) {
            Ok(c) => c,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        match session.respond(cell) {
            Ok(Some(reply)) => println!("Black plays {}", coord_to_label(reply)),
            Ok(None) => {}
            Err(e) => println!("{e}"),
        }
    }

    println!("{}", session.board());
    println!("{}", session.winner());
    Ok(())
}

fn run_demo(config: EngineConfig) -> Result<()> {
    println!("hex-patterns: pattern-based Hex player\n");

    let mut session = Session::new(config).context("cannot start a game")?;
    let mut white = fastrand::Rng::with_seed(session.config().seed ^ 0x5eed);

    let opening = session.genmove()?;
    println!("Black opens at {}", coord_to_label(opening));

    while session.winner() == Winner::NoWinner {
        let free: Vec<_> = session.board().unoccupied().iter().copied().collect();
        if free.is_empty() {
            break;
        }
        let cell = free[white.usize(..free.len())];
        match session.respond(cell)? {
            Some(reply) => println!(
                "White {:>3}  Black {:>3}  ({} live patterns)",
                coord_to_label(cell),
                coord_to_label(reply),
                session.live().len()
            ),
            None => println!("White {:>3}", coord_to_label(cell)),
        }
    }

    println!("\n{}", session.board());
    println!("{}", session.winner());
    Ok(())
}

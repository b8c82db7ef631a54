//! CLI frontend for the fairdice non-transitive dice game.

mod commands;
mod console;

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "FAIRDICE_LOG";

#[derive(Parser)]
#[command(
    name = "fairdice",
    about = "Non-transitive dice game with provably fair rolls",
    version,
    after_help = "Dice starting with '-' must follow '--': fairdice --seed 3 -- -1,2,3,4,5,6 1,1,6,6,8,8 3,3,5,5,7,7"
)]
struct Cli {
    /// Dice as six comma-separated integers each, e.g. 2,2,4,4,9,9 (at least 3)
    #[arg(value_name = "DICE")]
    dice: Vec<String>,

    /// Print the win probability table for the dice and exit
    #[arg(long)]
    table: bool,

    /// Seed every draw for a reproducible game (insecure, for replays and tests)
    #[arg(long)]
    seed: Option<u64>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let result = commands::parse_dice(&cli.dice).and_then(|dice| {
        if cli.table {
            commands::table::run(&dice)
        } else {
            commands::play::run(dice, cli.seed)
        }
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

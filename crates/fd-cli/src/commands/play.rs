use std::io;

use colored::Colorize;
use tracing::{debug, error};

use fd_core::DiceSet;
use fd_game::{GameConfig, GameEngine, GameOutcome};

use crate::console::ConsoleIo;

pub fn run(dice: DiceSet, seed: Option<u64>) -> Result<(), String> {
    let mut config = GameConfig::default();
    if let Some(seed) = seed {
        eprintln!(
            "{}",
            format!("warning: seed {seed} makes every draw predictable, do not use it for real games")
                .yellow()
        );
        config = config.with_seed(seed);
    }
    debug!(dice = dice.len(), seeded = config.is_deterministic(), "starting game");

    println!("{}", "=== Non-Transitive Dice Game ===".bold());
    println!("Let's determine who makes the first move.");

    let stdin = io::stdin();
    let console = ConsoleIo::new(stdin.lock(), io::stdout());
    let mut engine = GameEngine::from_config(dice, &config, console);

    match engine.run() {
        Ok(GameOutcome::Finished(_)) => Ok(()),
        Ok(GameOutcome::Aborted) => {
            println!("Exiting game.");
            Ok(())
        }
        Err(e) if e.is_protocol_violation() => {
            error!(error = %e, "reveal did not match its commitment");
            Err(format!("protocol violation: {e}"))
        }
        Err(e) => Err(e.to_string()),
    }
}

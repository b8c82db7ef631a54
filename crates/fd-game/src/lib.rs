//! Non-transitive dice game engine for fairdice.
//!
//! A session runs as an explicit state machine: a fair coin flip decides who
//! picks a die first, both sides pick, then each die is rolled with a fair
//! commit/reveal draw and the higher face wins. The human side is reached
//! only through the [`InputProvider`] and [`OutputSink`] collaborators, the
//! computer side through the [`Participant`] trait.

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod input;
pub mod participant;

pub use config::GameConfig;
pub use engine::{GameEngine, GameOutcome, GameSession, Phase, Roll, Score, Winner};
pub use error::{GameError, GameResult};
pub use event::{Event, OutputSink, Side, Stage};
pub use input::{Choice, InputProvider, Prompt, parse_choice};
pub use participant::{ComputerPlayer, Console, HumanSeat, Participant};

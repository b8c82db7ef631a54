//! The game state machine.
//!
//! ```text
//! DetermineFirstMover -> SelectDice -> ResolveUserRoll -> ResolveComputerRoll -> Score -> Done
//! ```
//!
//! A help request shows the probability table and leaves the phase
//! unchanged, so only the interrupted request is repeated. Draws and picks
//! that already happened are kept in the [`GameSession`] and never replayed.

use std::cmp::Ordering;
use std::ops::ControlFlow;

use fd_core::{DiceSet, DieId, FACES, ProbabilityMatrix};
use fd_fair::{Entropy, EntropySource, FairResolver, Reply, Resolution};
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::event::{Event, Side, Stage};
use crate::participant::{ComputerPlayer, Console, HumanSeat, Participant};

/// States of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Coin flip for the first pick.
    DetermineFirstMover,
    /// Both sides pick a die, `first` picks first.
    SelectDice {
        /// Who picks first.
        first: Side,
    },
    /// Fair roll of the user's die.
    ResolveUserRoll,
    /// Fair roll of the computer's die.
    ResolveComputerRoll,
    /// Compare faces.
    Score,
    /// The session is over.
    Done,
}

/// One resolved roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roll {
    /// The die that was rolled.
    pub die: DieId,
    /// Face index from the fair draw, `0..6`.
    pub index: usize,
    /// The value on that face.
    pub face: i64,
}

/// Who won a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    /// The user's face was strictly higher.
    User,
    /// The computer's face was strictly higher.
    Computer,
    /// Equal faces.
    Draw,
}

/// The final comparison of both rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// The user's roll.
    pub user: Roll,
    /// The computer's roll.
    pub computer: Roll,
    /// The result of comparing the faces.
    pub winner: Winner,
}

impl Score {
    /// Compare two rolls; strictly greater wins.
    pub fn new(user: Roll, computer: Roll) -> Self {
        let winner = match user.face.cmp(&computer.face) {
            Ordering::Greater => Winner::User,
            Ordering::Less => Winner::Computer,
            Ordering::Equal => Winner::Draw,
        };
        Self {
            user,
            computer,
            winner,
        }
    }
}

/// How a session ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// Both dice were rolled and compared.
    Finished(Score),
    /// The user quit.
    Aborted,
}

/// Everything decided so far in one game.
#[derive(Debug, Clone)]
pub struct GameSession {
    dice: DiceSet,
    first_mover: Option<Side>,
    user_die: Option<DieId>,
    computer_die: Option<DieId>,
    user_roll: Option<Roll>,
    computer_roll: Option<Roll>,
    score: Option<Score>,
}

impl GameSession {
    /// A fresh session over `dice`.
    pub fn new(dice: DiceSet) -> Self {
        Self {
            dice,
            first_mover: None,
            user_die: None,
            computer_die: None,
            user_roll: None,
            computer_roll: None,
            score: None,
        }
    }

    /// The dice in play.
    pub fn dice(&self) -> &DiceSet {
        &self.dice
    }

    /// Who picked first, once decided.
    pub fn first_mover(&self) -> Option<Side> {
        self.first_mover
    }

    /// The die assigned to `side`, once picked.
    pub fn die_of(&self, side: Side) -> Option<DieId> {
        match side {
            Side::User => self.user_die,
            Side::Computer => self.computer_die,
        }
    }

    /// The roll of `side`, once resolved.
    pub fn roll_of(&self, side: Side) -> Option<Roll> {
        match side {
            Side::User => self.user_roll,
            Side::Computer => self.computer_roll,
        }
    }

    /// The final score, once the game is over.
    pub fn score(&self) -> Option<Score> {
        self.score
    }
}

enum Step {
    Next,
    Aborted,
    Finished(Score),
}

/// Drives one game from the coin flip to the score.
pub struct GameEngine<E, C, F> {
    session: GameSession,
    matrix: ProbabilityMatrix,
    phase: Phase,
    resolver: FairResolver<E>,
    computer: C,
    console: F,
}

impl<F: Console> GameEngine<Entropy, ComputerPlayer<Entropy>, F> {
    /// Build an engine whose randomness comes from `config`.
    pub fn from_config(dice: DiceSet, config: &GameConfig, console: F) -> Self {
        Self::new(
            dice,
            FairResolver::new(config.resolver_entropy()),
            ComputerPlayer::new(config.computer_entropy()),
            console,
        )
    }
}

impl<E: EntropySource, C: Participant, F: Console> GameEngine<E, C, F> {
    /// Build an engine from its parts.
    pub fn new(dice: DiceSet, resolver: FairResolver<E>, computer: C, console: F) -> Self {
        let matrix = ProbabilityMatrix::compute(&dice);
        Self {
            session: GameSession::new(dice),
            matrix,
            phase: Phase::DetermineFirstMover,
            resolver,
            computer,
            console,
        }
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Everything decided so far.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The console collaborator.
    pub fn console(&self) -> &F {
        &self.console
    }

    /// Run until the game is scored or the user aborts.
    pub fn run(&mut self) -> GameResult<GameOutcome> {
        loop {
            match self.step()? {
                Step::Next => {}
                Step::Aborted => {
                    info!(phase = ?self.phase, "user aborted");
                    return Ok(GameOutcome::Aborted);
                }
                Step::Finished(score) => return Ok(GameOutcome::Finished(score)),
            }
        }
    }

    fn step(&mut self) -> GameResult<Step> {
        debug!(phase = ?self.phase, "step");
        match self.phase {
            Phase::DetermineFirstMover => self.determine_first_mover(),
            Phase::SelectDice { first } => self.select_dice(first),
            Phase::ResolveUserRoll => self.resolve_roll(Side::User),
            Phase::ResolveComputerRoll => self.resolve_roll(Side::Computer),
            Phase::Score => self.score(),
            Phase::Done => self
                .session
                .score
                .map(Step::Finished)
                .ok_or(GameError::OutOfOrder("session ended without a score")),
        }
    }

    fn show_help(&mut self) -> GameResult<Step> {
        self.console.emit(&Event::Help {
            dice: &self.session.dice,
            matrix: &self.matrix,
        })?;
        Ok(Step::Next)
    }

    fn determine_first_mover(&mut self) -> GameResult<Step> {
        let mut seat = HumanSeat::new(&mut self.console, &self.session.dice, Stage::FirstMover);
        let outcome = match self.resolver.resolve_guess(&mut seat)? {
            Resolution::Done(outcome) => outcome,
            Resolution::Help => return self.show_help(),
            Resolution::Abort => return Ok(Step::Aborted),
        };
        if let Err(e) = outcome.verify() {
            warn!(error = %e, "coin flip reveal failed verification");
            return Err(e.into());
        }

        let first = if outcome.correct() {
            Side::User
        } else {
            Side::Computer
        };
        info!(?first, "first mover decided");
        self.console.emit(&Event::GuessRevealed {
            outcome: &outcome,
            first,
        })?;
        self.session.first_mover = Some(first);
        self.phase = Phase::SelectDice { first };
        Ok(Step::Next)
    }

    fn select_dice(&mut self, first: Side) -> GameResult<Step> {
        match first {
            Side::User => {
                let user = match self.session.user_die {
                    Some(id) => id,
                    None => {
                        let all = self.session.dice.ids();
                        match self.human_pick(&all)? {
                            ControlFlow::Continue(id) => self.assign(Side::User, id)?,
                            ControlFlow::Break(step) => return Ok(step),
                        }
                    }
                };
                let rest = self.session.dice.ids_without(user);
                match self.computer_pick(&rest)? {
                    ControlFlow::Continue(id) => self.assign(Side::Computer, id)?,
                    ControlFlow::Break(step) => return Ok(step),
                };
            }
            Side::Computer => {
                let computer = match self.session.computer_die {
                    Some(id) => id,
                    None => {
                        let all = self.session.dice.ids();
                        match self.computer_pick(&all)? {
                            ControlFlow::Continue(id) => self.assign(Side::Computer, id)?,
                            ControlFlow::Break(step) => return Ok(step),
                        }
                    }
                };
                let rest = self.session.dice.ids_without(computer);
                match self.human_pick(&rest)? {
                    ControlFlow::Continue(id) => self.assign(Side::User, id)?,
                    ControlFlow::Break(step) => return Ok(step),
                };
            }
        }
        self.phase = Phase::ResolveUserRoll;
        Ok(Step::Next)
    }

    fn human_pick(&mut self, available: &[DieId]) -> GameResult<ControlFlow<Step, DieId>> {
        let mut seat = HumanSeat::new(&mut self.console, &self.session.dice, Stage::Selection);
        let reply = seat.pick_die(available)?;
        self.checked_pick(Side::User, reply, available)
    }

    fn computer_pick(&mut self, available: &[DieId]) -> GameResult<ControlFlow<Step, DieId>> {
        let reply = self.computer.pick_die(available)?;
        self.checked_pick(Side::Computer, reply, available)
    }

    fn checked_pick(
        &mut self,
        side: Side,
        reply: Reply<DieId>,
        available: &[DieId],
    ) -> GameResult<ControlFlow<Step, DieId>> {
        match reply {
            Reply::Value(id) if available.contains(&id) => Ok(ControlFlow::Continue(id)),
            Reply::Value(id) => {
                warn!(?side, die = %id, "illegal die choice");
                Err(GameError::IllegalChoice(id))
            }
            Reply::Help => Ok(ControlFlow::Break(self.show_help()?)),
            Reply::Abort => Ok(ControlFlow::Break(Step::Aborted)),
        }
    }

    fn assign(&mut self, side: Side, id: DieId) -> GameResult<DieId> {
        let die = self
            .session
            .dice
            .get(id)
            .ok_or(GameError::IllegalChoice(id))?;
        info!(?side, die = %id, "die chosen");
        self.console.emit(&Event::DieChosen { side, die })?;
        match side {
            Side::User => self.session.user_die = Some(id),
            Side::Computer => self.session.computer_die = Some(id),
        }
        Ok(id)
    }

    fn resolve_roll(&mut self, side: Side) -> GameResult<Step> {
        let die_id = self
            .session
            .die_of(side)
            .ok_or(GameError::OutOfOrder("roll before both dice were chosen"))?;

        let mut seat = HumanSeat::new(&mut self.console, &self.session.dice, Stage::Roll(side));
        let value = match self.resolver.resolve_random(FACES as u32, &mut seat)? {
            Resolution::Done(value) => value,
            Resolution::Help => return self.show_help(),
            Resolution::Abort => return Ok(Step::Aborted),
        };
        if let Err(e) = value.verify() {
            warn!(?side, error = %e, "roll reveal failed verification");
            return Err(e.into());
        }

        let index = value.result as usize;
        let face = self
            .session
            .dice
            .get(die_id)
            .and_then(|die| die.face(index))
            .ok_or(GameError::OutOfOrder("face index outside the die"))?;
        let roll = Roll {
            die: die_id,
            index,
            face,
        };
        info!(?side, index, face, "roll resolved");
        self.console.emit(&Event::RollRevealed {
            side,
            value: &value,
            roll: &roll,
        })?;

        match side {
            Side::User => {
                self.session.user_roll = Some(roll);
                self.phase = Phase::ResolveComputerRoll;
            }
            Side::Computer => {
                self.session.computer_roll = Some(roll);
                self.phase = Phase::Score;
            }
        }
        Ok(Step::Next)
    }

    fn score(&mut self) -> GameResult<Step> {
        let (Some(user), Some(computer)) = (self.session.user_roll, self.session.computer_roll)
        else {
            return Err(GameError::OutOfOrder("scoring before both rolls"));
        };
        let score = Score::new(user, computer);
        info!(winner = ?score.winner, user = user.face, computer = computer.face, "game scored");
        self.console.emit(&Event::Finished(&score))?;
        self.session.score = Some(score);
        self.phase = Phase::Done;
        Ok(Step::Finished(score))
    }
}

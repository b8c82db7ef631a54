//! Players as seen by the engine.
//!
//! The engine never talks to stdin or a random generator directly for a
//! player's decisions. It asks a [`Participant`], so a remote peer could take
//! either seat without changes to the resolver or the engine.

use fd_core::{DiceSet, Die, DieId};
use fd_fair::{Contributor, EntropySource, Offer, Purpose, Reply, uniform_below};

use crate::error::{GameError, GameResult};
use crate::event::{Event, OutputSink, Stage};
use crate::input::{Choice, InputProvider, Prompt};

/// A player that can answer commitments and pick dice.
pub trait Participant: Contributor<Error = GameError> {
    /// Pick one of `available`.
    fn pick_die(&mut self, available: &[DieId]) -> GameResult<Reply<DieId>>;
}

/// Both collaborators of the human seat behind one handle.
pub trait Console: InputProvider + OutputSink {}

impl<T: InputProvider + OutputSink> Console for T {}

/// The computer player: every decision is a secure uniform draw.
#[derive(Debug)]
pub struct ComputerPlayer<E> {
    entropy: E,
}

impl<E: EntropySource> ComputerPlayer<E> {
    /// Create a computer player drawing from `entropy`.
    pub fn new(entropy: E) -> Self {
        Self { entropy }
    }
}

impl<E: EntropySource> Contributor for ComputerPlayer<E> {
    type Error = GameError;

    fn contribute(&mut self, offer: &Offer) -> GameResult<Reply<u32>> {
        Ok(Reply::Value(uniform_below(&mut self.entropy, offer.range)?))
    }
}

impl<E: EntropySource> Participant for ComputerPlayer<E> {
    fn pick_die(&mut self, available: &[DieId]) -> GameResult<Reply<DieId>> {
        let count = u32::try_from(available.len()).map_err(|_| GameError::NoDieAvailable)?;
        if count == 0 {
            return Err(GameError::NoDieAvailable);
        }
        let index = uniform_below(&mut self.entropy, count)? as usize;
        available
            .get(index)
            .copied()
            .map(Reply::Value)
            .ok_or(GameError::NoDieAvailable)
    }
}

/// The human player, reached through the console for one stage of the game.
///
/// Before asking for a contribution the seat shows the commitment it was
/// offered, so the digest is always on screen before the human answers.
pub struct HumanSeat<'a, F> {
    console: &'a mut F,
    dice: &'a DiceSet,
    stage: Stage,
}

impl<'a, F: Console> HumanSeat<'a, F> {
    /// Seat the human for `stage`.
    pub fn new(console: &'a mut F, dice: &'a DiceSet, stage: Stage) -> Self {
        Self {
            console,
            dice,
            stage,
        }
    }

    fn ask(&mut self, prompt: Prompt) -> GameResult<Reply<u32>> {
        Ok(match self.console.read_choice(&prompt)? {
            Choice::Number(n) => Reply::Value(n),
            Choice::Help => Reply::Help,
            Choice::Abort => Reply::Abort,
        })
    }
}

impl<F: Console> Contributor for HumanSeat<'_, F> {
    type Error = GameError;

    fn contribute(&mut self, offer: &Offer) -> GameResult<Reply<u32>> {
        self.console.emit(&Event::Committed {
            stage: self.stage,
            offer,
        })?;
        let prompt = match offer.purpose {
            Purpose::Guess => Prompt::Guess,
            Purpose::Combine => Prompt::Contribution { range: offer.range },
        };
        self.ask(prompt)
    }
}

impl<F: Console> Participant for HumanSeat<'_, F> {
    fn pick_die(&mut self, available: &[DieId]) -> GameResult<Reply<DieId>> {
        let options: Vec<&Die> = available
            .iter()
            .filter_map(|id| self.dice.get(*id))
            .collect();
        self.console.emit(&Event::DieOptions { dice: &options })?;
        let reply = self.ask(Prompt::ChooseDie {
            count: self.dice.len(),
        })?;
        Ok(reply.map(|n| DieId(n as usize)))
    }
}

#[cfg(test)]
mod tests {
    use fd_fair::{Digest, SeededEntropy};

    use super::*;

    #[test]
    fn computer_picks_only_available_dice() {
        let mut cpu = ComputerPlayer::new(SeededEntropy::new(9));
        let available = [DieId(1), DieId(3), DieId(4)];
        for _ in 0..200 {
            let Reply::Value(id) = cpu.pick_die(&available).unwrap() else {
                panic!("computer never asks for help");
            };
            assert!(available.contains(&id));
        }
    }

    #[test]
    fn computer_cannot_pick_from_nothing() {
        let mut cpu = ComputerPlayer::new(SeededEntropy::new(9));
        assert!(matches!(
            cpu.pick_die(&[]),
            Err(GameError::NoDieAvailable)
        ));
    }

    #[test]
    fn computer_contribution_in_range() {
        let mut cpu = ComputerPlayer::new(SeededEntropy::new(1));
        let offer = Offer {
            purpose: Purpose::Combine,
            range: 6,
            digest: Digest::from_bytes([0; 32]),
        };
        for _ in 0..100 {
            let Reply::Value(v) = cpu.contribute(&offer).unwrap() else {
                panic!("computer always answers");
            };
            assert!(v < 6);
        }
    }
}

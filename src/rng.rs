use std::collections::VecDeque;

use rand::{rngs::StdRng, Rng, SeedableRng};
use thiserror::Error;

use crate::rules::FACES;
use crate::scoring::{DiceRoll, RollError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiceError {
    #[error("dice script ran out of rolls")]
    ScriptExhausted,
    #[error("scripted roll {roll} has {got} dice, expected {expected}")]
    WrongCount { roll: usize, expected: usize, got: usize },
}

/// Where dice come from.
pub trait DiceSource {
    /// Roll `count` dice, each uniform in 1..=6.
    fn roll(&mut self, count: usize) -> Result<Vec<u8>, DiceError>;
}

impl<D: DiceSource + ?Sized> DiceSource for Box<D> {
    fn roll(&mut self, count: usize) -> Result<Vec<u8>, DiceError> {
        (**self).roll(count)
    }
}

pub struct SeededDice { rng: StdRng }

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed ^ 0x5EED) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }
}

impl DiceSource for SeededDice {
    fn roll(&mut self, count: usize) -> Result<Vec<u8>, DiceError> {
        Ok((0..count).map(|_| self.rng.gen_range(FACES)).collect())
    }
}

/// Replays pre-written rolls in order, e.g. to walk through a known game.
/// Each roll must have exactly as many dice as are thrown.
#[derive(Debug, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<Vec<u8>>,
    served: usize,
}

impl ScriptedDice {
    pub fn new<I, S>(rolls: I) -> Result<Self, RollError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rolls = rolls
            .into_iter()
            .map(|r| r.as_ref().parse::<DiceRoll>().map(|roll| roll.faces))
            .collect::<Result<_, _>>()?;
        Ok(Self { rolls, served: 0 })
    }

    /// One roll per line; blank lines and `#` comments are skipped.
    pub fn from_script(text: &str) -> Result<Self, RollError> {
        Self::new(
            text.lines()
                .map(|l| l.split('#').next().unwrap_or("").trim())
                .filter(|l| !l.is_empty()),
        )
    }

    pub fn remaining(&self) -> usize { self.rolls.len() }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self, count: usize) -> Result<Vec<u8>, DiceError> {
        let faces = self.rolls.pop_front().ok_or(DiceError::ScriptExhausted)?;
        self.served += 1;
        if faces.len() != count {
            return Err(DiceError::WrongCount { roll: self.served, expected: count, got: faces.len() });
        }
        Ok(faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_dice_are_reproducible_and_in_range() {
        let a = SeededDice::new(7).roll(5).unwrap();
        let b = SeededDice::new(7).roll(5).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
        let mut dice = SeededDice::new(99);
        for _ in 0..200 {
            assert!(dice.roll(5).unwrap().iter().all(|f| FACES.contains(f)));
        }
    }

    #[test]
    fn scripted_dice_replay_in_order() {
        let mut dice = ScriptedDice::new(["12345", "66"]).unwrap();
        assert_eq!(dice.roll(5), Ok(vec![1, 2, 3, 4, 5]));
        assert_eq!(dice.roll(2), Ok(vec![6, 6]));
        assert_eq!(dice.remaining(), 0);
        assert_eq!(dice.roll(2), Err(DiceError::ScriptExhausted));
    }

    #[test]
    fn scripted_roll_must_match_dice_thrown() {
        let mut dice = ScriptedDice::new(["5", "12"]).unwrap();
        assert_eq!(dice.roll(5), Err(DiceError::WrongCount { roll: 1, expected: 5, got: 1 }));
        assert_eq!(dice.roll(1), Err(DiceError::WrongCount { roll: 2, expected: 1, got: 2 }));
    }

    #[test]
    fn script_files_skip_comments_and_check_faces() {
        let dice = ScriptedDice::from_script("# opening\n11155\n\n  23466  # bust\n").unwrap();
        assert_eq!(dice.remaining(), 2);
        assert_eq!(ScriptedDice::from_script("12370").unwrap_err(), RollError::InvalidFace('7'));
    }

    #[test]
    fn boxed_sources_roll_too() {
        let mut dice: Box<dyn DiceSource> = Box::new(ScriptedDice::new(["44"]).unwrap());
        assert_eq!(dice.roll(2), Ok(vec![4, 4]));
    }
}

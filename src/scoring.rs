//! Dice scoring.
//!
//! A roll is sorted ascending and matched against a fixed list of runs,
//! most valuable first. Each match consumes its dice and the scan starts over
//! from the top, so triples always win over loose singles of the same face.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rules::is_face;

/// Largest roll `score` and `DiceRoll::from_str` accept.
pub const MAX_DICE: usize = 6;

pub const SCORING_PATTERNS: [(&[u8], u32); 8] = [
    (&[1, 1, 1], 1000),
    (&[6, 6, 6], 600),
    (&[5, 5, 5], 500),
    (&[4, 4, 4], 400),
    (&[3, 3, 3], 300),
    (&[2, 2, 2], 200),
    (&[1], 100),
    (&[5], 50),
];

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Evaluation {
    pub points: u32,
    pub dice_consumed: usize,
    pub all_scoring: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RollError {
    #[error("no dice in roll")]
    Empty,
    #[error("too many dice: {0} (max {})", MAX_DICE)]
    TooManyDice(usize),
    #[error("invalid die face {0:?}, expected 1-6")]
    InvalidFace(char),
}

/// Score a set of faces. Order does not matter; faces must be in 1..=6.
pub fn evaluate(faces: &[u8]) -> Evaluation {
    debug_assert!(faces.iter().all(|&f| is_face(f)));
    let mut remaining = faces.to_vec();
    remaining.sort_unstable();

    let mut eval = Evaluation::default();
    'scan: loop {
        for &(pattern, points) in SCORING_PATTERNS.iter() {
            let at = remaining.windows(pattern.len()).position(|w| w == pattern);
            if let Some(pos) = at {
                remaining.drain(pos..pos + pattern.len());
                eval.points += points;
                eval.dice_consumed += pattern.len();
                continue 'scan;
            }
        }
        break;
    }
    eval.all_scoring = remaining.is_empty();
    eval
}

/// Best single-roll score with `n` dice, found by trying every outcome.
pub fn max_roll_score(n: usize) -> u32 {
    assert!((1..=MAX_DICE).contains(&n), "dice count out of range: {}", n);
    let mut faces = vec![0u8; n];
    let mut best = 0;
    for code in 0..6usize.pow(n as u32) {
        let mut c = code;
        for f in faces.iter_mut() { *f = (c % 6) as u8 + 1; c /= 6; }
        best = best.max(evaluate(&faces).points);
    }
    best
}

/// Score a roll written as digits, e.g. `"24454"`. Whitespace is ignored.
pub fn score(dice: &str) -> Result<u32, RollError> {
    Ok(dice.parse::<DiceRoll>()?.throw_score)
}

/// A scored roll. Faces are kept sorted ascending.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiceRoll {
    pub faces: Vec<u8>,
    pub throw_score: u32,
    pub dice_consumed: usize,
    pub all_scoring: bool,
}

impl DiceRoll {
    pub fn new(mut faces: Vec<u8>) -> Self {
        faces.sort_unstable();
        let eval = evaluate(&faces);
        Self {
            faces,
            throw_score: eval.points,
            dice_consumed: eval.dice_consumed,
            all_scoring: eval.all_scoring,
        }
    }

    /// Dice taken out of play by this roll; 0 on hot dice since the set resets.
    pub fn used_dice(&self) -> usize {
        if self.all_scoring { 0 } else { self.dice_consumed }
    }

    pub fn is_bust(&self) -> bool { self.throw_score == 0 }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for face in &self.faces {
            write!(f, "{}", face)?;
        }
        Ok(())
    }
}

impl FromStr for DiceRoll {
    type Err = RollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut faces = Vec::with_capacity(MAX_DICE);
        for c in s.chars().filter(|c| !c.is_whitespace()) {
            let face = c.to_digit(10).map(|d| d as u8).filter(|&d| is_face(d));
            faces.push(face.ok_or(RollError::InvalidFace(c))?);
        }
        if faces.is_empty() { return Err(RollError::Empty); }
        if faces.len() > MAX_DICE { return Err(RollError::TooManyDice(faces.len())); }
        Ok(DiceRoll::new(faces))
    }
}

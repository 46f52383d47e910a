use serde::{Deserialize, Serialize};

use crate::scoring::{max_roll_score, MAX_DICE};

/// Single-roll score needed before a player's points start counting.
pub const MINIMUM_STARTING_SCORE: u32 = 300;
/// Banked total that triggers the final round.
pub const FINAL_ROUND_POINTS: u32 = 3000;
pub const DICE_PER_TURN: usize = 5;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 9;
pub const FACES: std::ops::RangeInclusive<u8> = 1..=6;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rules {
    pub minimum_starting_score: u32,
    pub final_round_points: u32,
    pub dice_per_turn: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            minimum_starting_score: MINIMUM_STARTING_SCORE,
            final_round_points: FINAL_ROUND_POINTS,
            dice_per_turn: DICE_PER_TURN,
        }
    }
}

impl Rules {
    /// Rules under which a game can end: some roll of `dice_per_turn` dice
    /// must reach the opening threshold.
    pub fn check(&self) -> Result<(), String> {
        if !(1..=MAX_DICE).contains(&self.dice_per_turn) {
            return Err(format!("dice_per_turn must be 1-{}, got {}", MAX_DICE, self.dice_per_turn));
        }
        if self.minimum_starting_score == 0 || self.final_round_points == 0 {
            return Err("score thresholds must be positive".into());
        }
        let best = max_roll_score(self.dice_per_turn);
        if self.minimum_starting_score > best {
            return Err(format!(
                "minimum_starting_score {} is above the best roll with {} dice ({})",
                self.minimum_starting_score, self.dice_per_turn, best
            ));
        }
        Ok(())
    }
}

#[inline] pub fn is_face(face: u8) -> bool { FACES.contains(&face) }

use serde::{Deserialize, Serialize};

use crate::rules::Rules;
use crate::scoring::DiceRoll;

/// 1-based seat number.
pub type PlayerNumber = u8;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BotLevel { #[default] Amateur, Pro }

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Decision { Throw, Hold }

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventType {
    Roll,
    Bust,
    Hold,
    EndTurn,
    FinalRoundTriggered,
    GameEnd,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub seq: u64,
    pub ty: EventType,
    pub payload: serde_json::Value,
    pub state_hash: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub number: PlayerNumber,
    pub bot: Option<BotLevel>,
    pub total_score: u32,
    pub round_score: u32,
    pub valid_dice: usize,
    /// Set by the first roll reaching the opening threshold; never cleared.
    pub scoring_unlocked: bool,
    pub current_roll: Option<DiceRoll>,
}

impl Player {
    pub fn new(number: PlayerNumber, rules: &Rules) -> Self {
        Self {
            number,
            bot: None,
            total_score: 0,
            round_score: 0,
            valid_dice: rules.dice_per_turn,
            scoring_unlocked: false,
            current_roll: None,
        }
    }

    pub fn bot(number: PlayerNumber, level: BotLevel, rules: &Rules) -> Self {
        Self { bot: Some(level), ..Self::new(number, rules) }
    }

    /// Score a fresh roll of `valid_dice` faces into the round.
    pub fn rolls(&mut self, faces: Vec<u8>, rules: &Rules) -> &DiceRoll {
        debug_assert_eq!(faces.len(), self.valid_dice);
        let roll = DiceRoll::new(faces);
        if self.scoring_unlocked {
            self.round_score += roll.throw_score;
        } else if roll.throw_score >= rules.minimum_starting_score {
            self.scoring_unlocked = true;
            self.round_score += roll.throw_score;
        }
        self.valid_dice = self.valid_dice.saturating_sub(roll.used_dice());
        if roll.all_scoring { self.valid_dice = rules.dice_per_turn; }
        self.current_roll.insert(roll)
    }

    /// Bank the round and hand the player a fresh set of dice.
    pub fn reset_after_round(&mut self, rules: &Rules) {
        self.total_score += self.round_score;
        self.round_score = 0;
        self.current_roll = None;
        self.valid_dice = rules.dice_per_turn;
    }

    pub fn is_bot(&self) -> bool { self.bot.is_some() }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Normal,
    /// `trigger` is the seat index of the first player to reach the final-round total.
    FinalRound { trigger: usize },
    Finished,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub players: Vec<Player>,
    pub turn_idx: usize,
    pub phase: Phase,
    pub rules: Rules,
    pub events_seq: u64,
}

impl GameState {
    pub fn current_player(&self) -> &Player { &self.players[self.turn_idx] }

    pub fn final_scores(&self) -> Vec<(PlayerNumber, u32)> {
        self.players.iter().map(|p| (p.number, p.total_score)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> (Player, Rules) {
        let rules = Rules::default();
        (Player::new(1, &rules), rules)
    }

    #[test]
    fn below_threshold_roll_does_not_count_before_unlock() {
        let (mut p, rules) = player();
        p.rolls(vec![1, 2, 3, 4, 5], &rules);
        assert_eq!(p.round_score, 0);
        assert!(!p.scoring_unlocked);
        assert_eq!(p.valid_dice, 3);
    }

    #[test]
    fn threshold_roll_unlocks_and_counts() {
        let (mut p, rules) = player();
        p.rolls(vec![3, 3, 3, 2, 4], &rules);
        assert!(p.scoring_unlocked);
        assert_eq!(p.round_score, 300);
        assert_eq!(p.valid_dice, 2);

        p.rolls(vec![5, 6], &rules);
        assert_eq!(p.round_score, 350);
        assert_eq!(p.valid_dice, 1);
    }

    #[test]
    fn unlocked_player_adds_zero_rolls_too() {
        let (mut p, rules) = player();
        p.scoring_unlocked = true;
        p.round_score = 400;
        p.rolls(vec![2, 3, 4, 6, 6], &rules);
        assert_eq!(p.round_score, 400);
        assert!(p.current_roll.as_ref().unwrap().is_bust());
    }

    #[test]
    fn hot_dice_restores_full_set() {
        let (mut p, rules) = player();
        p.rolls(vec![1, 1, 1, 5, 5], &rules);
        assert_eq!(p.round_score, 1100);
        assert_eq!(p.valid_dice, 5);

        p.valid_dice = 2;
        p.rolls(vec![1, 5], &rules);
        assert_eq!(p.round_score, 1250);
        assert_eq!(p.valid_dice, 5);
    }

    #[test]
    fn reset_after_round_banks_and_clears() {
        let (mut p, rules) = player();
        p.rolls(vec![6, 6, 6, 2, 3], &rules);
        p.reset_after_round(&rules);
        assert_eq!(p.total_score, 600);
        assert_eq!(p.round_score, 0);
        assert!(p.current_roll.is_none());
        assert_eq!(p.valid_dice, 5);

        p.reset_after_round(&rules);
        assert_eq!(p.total_score, 600);
        assert_eq!(p.round_score, 0);
        assert_eq!(p.valid_dice, 5);
    }

    #[test]
    fn unlock_survives_turn_boundary() {
        let (mut p, rules) = player();
        p.rolls(vec![4, 4, 4, 2, 3], &rules);
        p.reset_after_round(&rules);
        p.rolls(vec![5, 2, 3, 4, 6], &rules);
        assert!(p.scoring_unlocked);
        assert_eq!(p.round_score, 50);
    }
}

use rand::{rngs::StdRng, Rng};

use crate::model::{BotLevel, Decision, Player};
use crate::rules::Rules;
use crate::scoring::evaluate;

/// Points past the opening threshold at which the amateur starts banking.
pub const AMATEUR_MARGIN: u32 = 50;

pub fn bot_decide(player: &Player, level: BotLevel, rules: &Rules, rng: &mut StdRng) -> Decision {
    // Nothing is banked before the opening roll, so there is nothing to lose.
    if !player.scoring_unlocked { return Decision::Throw; }
    match level {
        BotLevel::Amateur => amateur_policy(player, rules, rng),
        BotLevel::Pro => pro_policy(player),
    }
}

fn amateur_policy(player: &Player, rules: &Rules, rng: &mut StdRng) -> Decision {
    let hold_at = rules.minimum_starting_score + AMATEUR_MARGIN;
    let satisfied = player.round_score >= hold_at || player.valid_dice <= 2;
    if satisfied && !rng.gen_ratio(1, 5) { Decision::Hold } else { Decision::Throw }
}

fn pro_policy(player: &Player) -> Decision {
    let odds = roll_odds(player.valid_dice);
    let gain = (1.0 - odds.bust_chance) * odds.mean_score;
    let loss = odds.bust_chance * player.round_score as f64;
    if gain > loss { Decision::Throw } else { Decision::Hold }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RollOdds {
    pub bust_chance: f64,
    /// Mean points of a roll, given that it scores.
    pub mean_score: f64,
}

/// Exact odds for rolling `n` dice, by enumerating all 6^n outcomes.
pub fn roll_odds(n: usize) -> RollOdds {
    assert!((1..=6).contains(&n), "dice count out of range: {}", n);
    let total = 6usize.pow(n as u32);
    let mut faces = vec![0u8; n];
    let (mut busts, mut points) = (0usize, 0u64);
    for code in 0..total {
        let mut c = code;
        for f in faces.iter_mut() { *f = (c % 6) as u8 + 1; c /= 6; }
        let e = evaluate(&faces);
        if e.points == 0 { busts += 1; } else { points += e.points as u64; }
    }
    let scoring = total - busts;
    RollOdds {
        bust_chance: busts as f64 / total as f64,
        mean_score: if scoring == 0 { 0.0 } else { points as f64 / scoring as f64 },
    }
}

use std::io;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::console::Table;
use crate::model::{BotLevel, Event, GameState, Phase, Player, PlayerNumber};
use crate::rng::{DiceError, DiceSource};
use crate::rules::{Rules, MAX_PLAYERS, MIN_PLAYERS};
use crate::turn::take_turn;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("need {}-{} players, got {0}", MIN_PLAYERS, MAX_PLAYERS)]
    PlayerCount(usize),
    #[error("invalid rules: {0}")]
    Rules(String),
    #[error("dice: {0}")]
    Dice(#[from] DiceError),
    #[error("console: {0}")]
    Io(#[from] io::Error),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameReport {
    pub final_scores: Vec<(PlayerNumber, u32)>,
    pub winners: Vec<PlayerNumber>,
    pub events: Vec<Event>,
}

pub fn init_game(players: Vec<Player>, rules: Rules) -> Result<GameState, GameError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
        return Err(GameError::PlayerCount(players.len()));
    }
    rules.check().map_err(GameError::Rules)?;
    Ok(GameState { players, turn_idx: 0, phase: Phase::Normal, rules, events_seq: 0 })
}

/// Seats numbered from 1; the last `bots` seats are computer players.
pub fn seat_players(count: usize, bots: usize, level: BotLevel, rules: &Rules) -> Vec<Player> {
    let humans = count.saturating_sub(bots);
    (1..=count)
        .map(|n| {
            let number = n as PlayerNumber;
            if n > humans { Player::bot(number, level, rules) } else { Player::new(number, rules) }
        })
        .collect()
}

/// Seats sharing the highest banked total.
pub fn winners(state: &GameState) -> Vec<PlayerNumber> {
    let best = state.players.iter().map(|p| p.total_score).max().unwrap_or(0);
    state.players.iter().filter(|p| p.total_score == best).map(|p| p.number).collect()
}

/// Run turns in seat order until the round after the final-round trigger is done.
pub fn play(
    state: &mut GameState,
    dice: &mut impl DiceSource,
    table: &mut impl Table,
    bot_rng: &mut StdRng,
) -> Result<GameReport, GameError> {
    let mut events = Vec::new();
    while state.phase != Phase::Finished {
        events.extend(take_turn(state, dice, table, bot_rng)?);
        events.extend(crate::end_turn(state));
    }
    let final_scores = state.final_scores();
    table.render_final_scores(&final_scores)?;
    Ok(GameReport { final_scores, winners: winners(state), events })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventType;

    fn state(n: usize) -> GameState {
        let rules = Rules::default();
        init_game(seat_players(n, 0, BotLevel::Amateur, &rules), rules).unwrap()
    }

    #[test]
    fn player_count_is_checked() {
        let rules = Rules::default();
        assert!(matches!(init_game(seat_players(1, 0, BotLevel::Pro, &rules), rules), Err(GameError::PlayerCount(1))));
        assert!(matches!(init_game(seat_players(10, 0, BotLevel::Pro, &rules), rules), Err(GameError::PlayerCount(10))));
        assert!(init_game(seat_players(9, 0, BotLevel::Pro, &rules), rules).is_ok());
    }

    #[test]
    fn rules_that_cannot_open_are_refused() {
        let rules = Rules { dice_per_turn: 2, ..Rules::default() };
        assert!(matches!(init_game(seat_players(2, 2, BotLevel::Pro, &rules), rules), Err(GameError::Rules(_))));
        let rules = Rules { minimum_starting_score: 5000, ..Rules::default() };
        assert!(matches!(init_game(seat_players(2, 2, BotLevel::Pro, &rules), rules), Err(GameError::Rules(_))));
    }

    #[test]
    fn bots_fill_the_last_seats() {
        let seats = seat_players(4, 2, BotLevel::Pro, &Rules::default());
        let numbers: Vec<_> = seats.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        let bots: Vec<_> = seats.iter().map(|p| p.bot).collect();
        assert_eq!(bots, vec![None, None, Some(BotLevel::Pro), Some(BotLevel::Pro)]);
    }

    #[test]
    fn trigger_gives_everyone_else_one_more_turn() {
        let mut s = state(3);
        s.turn_idx = 1;
        s.players[1].round_score = 3000;
        let events = crate::end_turn(&mut s);
        assert_eq!(s.phase, Phase::FinalRound { trigger: 1 });
        assert_eq!(events.last().unwrap().ty, EventType::FinalRoundTriggered);

        // seat 2 then seat 0 still play
        assert_eq!(s.turn_idx, 2);
        crate::end_turn(&mut s);
        assert_eq!(s.turn_idx, 0);
        assert_eq!(s.phase, Phase::FinalRound { trigger: 1 });

        s.players[0].round_score = 5000;
        let events = crate::end_turn(&mut s);
        assert_eq!(s.phase, Phase::Finished);
        let end = events.last().unwrap();
        assert_eq!(end.ty, EventType::GameEnd);
        assert_eq!(end.payload["winners"], serde_json::json!([1]));
    }

    #[test]
    fn later_finishers_do_not_move_the_trigger() {
        let mut s = state(3);
        s.players[0].round_score = 3100;
        crate::end_turn(&mut s);
        s.players[1].round_score = 3200;
        let events = crate::end_turn(&mut s);
        assert_eq!(s.phase, Phase::FinalRound { trigger: 0 });
        assert!(events.iter().all(|e| e.ty != EventType::FinalRoundTriggered));
    }

    #[test]
    fn ties_share_the_win() {
        let mut s = state(3);
        s.players[0].total_score = 3000;
        s.players[2].total_score = 3000;
        assert_eq!(winners(&s), vec![1, 3]);
    }
}

pub mod bot;
pub mod config;
pub mod console;
pub mod game;
pub mod model;
pub mod rng;
pub mod rules;
pub mod scoring;
pub mod turn;

pub use config::{ConfigError, GameConfig};
pub use game::{init_game, play, GameError, GameReport};
pub use model::*;
pub use scoring::{evaluate, score, DiceRoll, Evaluation, RollError};

use crate::rng::{DiceError, DiceSource};
use serde_json::json;

fn hash_state_stub(s: &GameState) -> String {
    let p = s.current_player();
    format!("h:{}:{}:{}:{}", s.turn_idx, p.valid_dice, p.round_score, p.total_score)
}

fn stamp(state: &mut GameState, ty: EventType, payload: serde_json::Value) -> Event {
    state.events_seq += 1;
    Event { seq: state.events_seq, ty, payload, state_hash: hash_state_stub(state) }
}

/// Roll the current player's available dice and score them into the round.
pub fn roll(state: &mut GameState, dice: &mut impl DiceSource) -> Result<Event, DiceError> {
    assert!(matches!(state.phase, Phase::Normal | Phase::FinalRound { .. }));
    let rules = state.rules;
    let p = &mut state.players[state.turn_idx];
    let faces = dice.roll(p.valid_dice)?;
    let (faces, throw_score, all_scoring) = {
        let r = p.rolls(faces, &rules);
        (r.faces.clone(), r.throw_score, r.all_scoring)
    };
    let payload = json!({
        "player": p.number, "faces": faces, "throwScore": throw_score,
        "allScoring": all_scoring, "roundScore": p.round_score,
        "validDice": p.valid_dice, "unlocked": p.scoring_unlocked,
    });
    Ok(stamp(state, EventType::Roll, payload))
}

/// Forfeit the round after a zero roll.
pub fn bust(state: &mut GameState) -> Event {
    let p = &mut state.players[state.turn_idx];
    let lost = std::mem::take(&mut p.round_score);
    let payload = json!({ "player": p.number, "lost": lost });
    stamp(state, EventType::Bust, payload)
}

pub fn hold(state: &mut GameState) -> Event {
    let p = state.current_player();
    let payload = json!({ "player": p.number, "roundScore": p.round_score });
    stamp(state, EventType::Hold, payload)
}

/// Bank the current player's round and pass the dice on. Records the
/// final-round trigger and ends the game once play returns to it.
pub fn end_turn(state: &mut GameState) -> Vec<Event> {
    let rules = state.rules;
    let idx = state.turn_idx;
    let p = &mut state.players[idx];
    let banked = p.round_score;
    p.reset_after_round(&rules);
    let (number, total) = (p.number, p.total_score);
    let mut events = vec![stamp(state, EventType::EndTurn, json!({ "player": number, "banked": banked, "total": total }))];

    if state.phase == Phase::Normal && total >= rules.final_round_points {
        state.phase = Phase::FinalRound { trigger: idx };
        events.push(stamp(state, EventType::FinalRoundTriggered, json!({ "player": number, "total": total })));
    }

    state.turn_idx = (idx + 1) % state.players.len();
    if state.phase == (Phase::FinalRound { trigger: state.turn_idx }) {
        state.phase = Phase::Finished;
        let scores: Vec<_> = state.final_scores().into_iter()
            .map(|(player, total)| json!({ "player": player, "total": total }))
            .collect();
        events.push(stamp(state, EventType::GameEnd, json!({ "scores": scores, "winners": game::winners(state) })));
    }
    events
}

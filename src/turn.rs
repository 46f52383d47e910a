//! One player's turn as a small state machine.

use rand::rngs::StdRng;

use crate::bot::bot_decide;
use crate::console::Table;
use crate::game::GameError;
use crate::model::{Decision, Event, GameState, Player};
use crate::rng::DiceSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingRoll,
    Busted,
    HoldOrContinueDecision,
    TurnComplete,
}

/// Phase reached by looking at the player's latest roll.
pub fn after_roll(player: &Player) -> TurnPhase {
    match &player.current_roll {
        Some(roll) if roll.is_bust() => TurnPhase::Busted,
        _ => TurnPhase::HoldOrContinueDecision,
    }
}

pub fn after_decision(player: &Player, decision: Decision) -> TurnPhase {
    match decision {
        Decision::Hold => TurnPhase::TurnComplete,
        Decision::Throw if player.valid_dice == 0 => TurnPhase::TurnComplete,
        Decision::Throw => TurnPhase::AwaitingRoll,
    }
}

/// Play the current player's turn until it completes. Banking is left to
/// [`crate::end_turn`].
pub fn take_turn(
    state: &mut GameState,
    dice: &mut impl DiceSource,
    table: &mut impl Table,
    bot_rng: &mut StdRng,
) -> Result<Vec<Event>, GameError> {
    let mut events = Vec::new();
    let mut phase = after_roll(state.current_player());
    loop {
        phase = match phase {
            TurnPhase::AwaitingRoll => {
                events.push(crate::roll(state, dice)?);
                after_roll(state.current_player())
            }
            TurnPhase::Busted => {
                table.render_turn_state(state.current_player())?;
                events.push(crate::bust(state));
                table.render_bust(state.current_player())?;
                TurnPhase::TurnComplete
            }
            TurnPhase::HoldOrContinueDecision => {
                let player = state.current_player();
                table.render_turn_state(player)?;
                let decision = match player.bot {
                    Some(level) => bot_decide(player, level, &state.rules, bot_rng),
                    None => table.prompt_throw_or_hold(player)?,
                };
                let next = after_decision(player, decision);
                if decision == Decision::Hold { events.push(crate::hold(state)); }
                next
            }
            TurnPhase::TurnComplete => return Ok(events),
        };
    }
}

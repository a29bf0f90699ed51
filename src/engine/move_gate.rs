use crate::domain::GameState;

use super::actions::TurnAction;
use super::errors::ActionError;
use super::legals::{check_action, enabled_for};

/// Rooms the human may click right now.
///
/// `available_moves` is ignored unless the move affordance is enabled, so
/// stale moves from an earlier roll never leak through.
pub fn available_rooms(state: &GameState) -> Vec<&str> {
    if !enabled_for(state).may_move {
        return Vec::new();
    }
    state.available_moves.iter().map(String::as_str).collect()
}

pub fn is_available(state: &GameState, room: &str) -> bool {
    enabled_for(state).may_move && state.available_moves.iter().any(|r| r == room)
}

/// Permits a move iff the phase is `player_turn_move`, dice are rolled, the
/// active player is human and `target_room` is in `available_moves`.
pub fn check_move(state: &GameState, target_room: &str) -> Result<(), ActionError> {
    check_action(state, TurnAction::Move)?;
    if !is_available(state, target_room) {
        return Err(ActionError::RoomNotAvailable {
            room: target_room.to_string(),
        });
    }
    Ok(())
}

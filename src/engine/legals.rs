use crate::domain::{GameState, Phase};

use super::actions::TurnAction;
use super::errors::ActionError;

/// Affordances the human may use for the current snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnabledActions {
    pub may_roll: bool,
    /// Moving is further restricted to `available_moves`, see the move gate.
    pub may_move: bool,
    pub may_suspect: bool,
    pub may_accuse: bool,
    pub may_pass: bool,
}

impl EnabledActions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn allows(&self, action: TurnAction) -> bool {
        match action {
            TurnAction::Roll => self.may_roll,
            TurnAction::Move => self.may_move,
            TurnAction::Suspect => self.may_suspect,
            TurnAction::Accuse => self.may_accuse,
            TurnAction::Pass => self.may_pass,
        }
    }

    pub fn is_empty(&self) -> bool {
        TurnAction::ALL.iter().all(|a| !self.allows(*a))
    }

    pub fn iter(&self) -> impl Iterator<Item = TurnAction> + '_ {
        TurnAction::ALL.into_iter().filter(move |a| self.allows(*a))
    }
}

/// The turn table over the three observed fields.
///
/// `game_over` is terminal and unknown phases enable nothing. An AI turn
/// never enables a human action; the autoplay scheduler acts instead.
pub fn enabled_actions(phase: &Phase, dice_rolled: bool, is_human_turn: bool) -> EnabledActions {
    if !is_human_turn {
        return EnabledActions::none();
    }
    match phase {
        Phase::PlayerTurnMove if !dice_rolled => EnabledActions {
            may_roll: true,
            ..EnabledActions::none()
        },
        Phase::PlayerTurnMove => EnabledActions {
            may_move: true,
            ..EnabledActions::none()
        },
        Phase::PlayerTurnAction => EnabledActions {
            may_suspect: true,
            may_accuse: true,
            may_pass: true,
            ..EnabledActions::none()
        },
        Phase::GameOver | Phase::Other(_) => EnabledActions::none(),
    }
}

/// [`enabled_actions`] for a whole snapshot; a malformed snapshot enables nothing.
pub fn enabled_for(state: &GameState) -> EnabledActions {
    if state.validate().is_err() || state.winner.is_some() {
        return EnabledActions::none();
    }
    enabled_actions(&state.phase, state.dice_rolled, state.is_human_turn())
}

/// Explains why `action` is unavailable, or `Ok` when it is enabled.
pub fn check_action(state: &GameState, action: TurnAction) -> Result<(), ActionError> {
    if enabled_for(state).allows(action) {
        return Ok(());
    }
    if state.is_over() || state.winner.is_some() {
        return Err(ActionError::GameOver);
    }
    if !state.is_human_turn() {
        return Err(ActionError::NotHumanTurn);
    }
    match (action, &state.phase) {
        (TurnAction::Roll, Phase::PlayerTurnMove) => Err(ActionError::DiceAlreadyRolled),
        (TurnAction::Move, Phase::PlayerTurnMove) => Err(ActionError::DiceNotRolled),
        (action, phase) => Err(ActionError::WrongPhase {
            action,
            phase: phase.to_string(),
        }),
    }
}

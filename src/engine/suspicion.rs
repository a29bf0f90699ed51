//! Propose → hold → acknowledge.
//!
//! A resolved suspicion is held locally until the human acknowledges it; the
//! session only refreshes (and so only shows the turn advancing) after that.
//! A held result never expires.

use crate::domain::{GameState, SuspicionResult, SuspicionTriple};

use super::actions::TurnAction;
use super::errors::ActionError;
use super::legals::check_action;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeldSuspicion {
    pub suspicion: SuspicionTriple,
    pub result: SuspicionResult,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SuspicionStage {
    #[default]
    Idle,
    AwaitingResult(SuspicionTriple),
    ResultHeld(HeldSuspicion),
}

#[derive(Clone, Debug, Default)]
pub struct SuspicionProtocol {
    stage: SuspicionStage,
}

impl SuspicionProtocol {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> &SuspicionStage {
        &self.stage
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.stage, SuspicionStage::Idle)
    }

    pub fn held(&self) -> Option<&HeldSuspicion> {
        match &self.stage {
            SuspicionStage::ResultHeld(held) => Some(held),
            _ => None,
        }
    }

    /// Fails unless idle; a pending or held suspicion blocks every other turn action.
    pub fn ensure_idle(&self) -> Result<(), ActionError> {
        match self.stage {
            SuspicionStage::Idle => Ok(()),
            SuspicionStage::AwaitingResult(_) => Err(ActionError::SuspicionPending),
            SuspicionStage::ResultHeld(_) => Err(ActionError::SuspicionHeld),
        }
    }

    /// Idle → AwaitingResult.
    pub fn begin(&mut self, suspicion: SuspicionTriple) -> Result<(), ActionError> {
        self.ensure_idle()?;
        self.stage = SuspicionStage::AwaitingResult(suspicion);
        Ok(())
    }

    /// AwaitingResult → ResultHeld.
    pub fn resolve(&mut self, result: SuspicionResult) -> Result<(), ActionError> {
        let suspicion = match std::mem::take(&mut self.stage) {
            SuspicionStage::AwaitingResult(suspicion) => suspicion,
            other => {
                self.stage = other;
                return Err(ActionError::NoSuspicionPending);
            }
        };
        self.stage = SuspicionStage::ResultHeld(HeldSuspicion { suspicion, result });
        Ok(())
    }

    /// AwaitingResult → Idle after a failed submission. Held results are untouched.
    pub fn abandon(&mut self) -> Option<SuspicionTriple> {
        match std::mem::take(&mut self.stage) {
            SuspicionStage::AwaitingResult(suspicion) => Some(suspicion),
            other => {
                self.stage = other;
                None
            }
        }
    }

    /// ResultHeld → Idle. The caller performs the deferred refresh afterwards.
    pub fn acknowledge(&mut self) -> Result<HeldSuspicion, ActionError> {
        match std::mem::take(&mut self.stage) {
            SuspicionStage::ResultHeld(held) => Ok(held),
            other => {
                self.stage = other;
                Err(ActionError::NothingToAcknowledge)
            }
        }
    }

    pub fn reset(&mut self) {
        self.stage = SuspicionStage::Idle;
    }
}

/// Builds a suspicion in the room the active player occupies; the room is
/// never chosen freely.
pub fn suspicion_in_current_room(
    state: &GameState,
    suspect: &str,
    weapon: &str,
) -> Result<SuspicionTriple, ActionError> {
    check_action(state, TurnAction::Suspect)?;
    let room = state
        .current_player()
        .map(|p| p.position.clone())
        .ok_or(ActionError::NotHumanTurn)?;
    Ok(SuspicionTriple {
        suspect: suspect.to_string(),
        weapon: weapon.to_string(),
        room,
    })
}

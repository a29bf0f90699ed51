use super::actions::TurnAction;

/// Reasons the client refuses an action before any backend call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("the game is over")]
    GameOver,
    #[error("it is not the human player's turn")]
    NotHumanTurn,
    #[error("{action} is not available during {phase}")]
    WrongPhase { action: TurnAction, phase: String },
    #[error("dice have not been rolled yet")]
    DiceNotRolled,
    #[error("dice were already rolled this turn")]
    DiceAlreadyRolled,
    #[error("{room} is not an available move")]
    RoomNotAvailable { room: String },
    #[error("a suspicion result is waiting to be acknowledged")]
    SuspicionHeld,
    #[error("a suspicion is already awaiting its result")]
    SuspicionPending,
    #[error("there is no suspicion result to acknowledge")]
    NothingToAcknowledge,
    #[error("no suspicion is awaiting a result")]
    NoSuspicionPending,
}

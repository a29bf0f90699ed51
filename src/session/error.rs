use crate::backend::{BackendError, ErrorKind};
use crate::domain::SnapshotError;
use crate::engine::ActionError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no game session has been started")]
    NotStarted,
    #[error("another action is still in flight")]
    Busy,
    #[error(transparent)]
    Gate(#[from] ActionError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("backend returned an invalid snapshot: {0}")]
    InvalidState(#[from] SnapshotError),
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::NotStarted | SessionError::Busy | SessionError::Gate(_) => {
                ErrorKind::IllegalAction
            }
            SessionError::Backend(err) => err.kind(),
            SessionError::InvalidState(_) => ErrorKind::Transport,
        }
    }
}

/// Failure classes every layer folds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    IllegalAction,
    GameRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// Action attempted out of phase or to an unavailable room.
    IllegalAction,
    /// Malformed suspicion or accusation payload.
    GameRule,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend rejected request ({status}): {detail}")]
    Rejected {
        kind: RejectionKind,
        status: u16,
        detail: String,
    },
    #[error("backend failed ({status}): {detail}")]
    Server { status: u16, detail: String },
    #[error("failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl BackendError {
    pub fn rejected(kind: RejectionKind, status: u16, detail: impl Into<String>) -> Self {
        Self::Rejected {
            kind,
            status,
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BackendError::Rejected {
                kind: RejectionKind::IllegalAction,
                ..
            } => ErrorKind::IllegalAction,
            BackendError::Rejected {
                kind: RejectionKind::GameRule,
                ..
            } => ErrorKind::GameRule,
            BackendError::Transport(_)
            | BackendError::Server { .. }
            | BackendError::Decode(_)
            | BackendError::InvalidUrl(_) => ErrorKind::Transport,
        }
    }

    /// Maps a non-success HTTP status to an error.
    pub fn from_status(status: u16, detail: String) -> Self {
        match status {
            422 => Self::rejected(RejectionKind::GameRule, status, detail),
            400..=499 => Self::rejected(RejectionKind::IllegalAction, status, detail),
            _ => Self::Server { status, detail },
        }
    }
}

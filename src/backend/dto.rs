use serde::{Deserialize, Serialize};

use crate::domain::{ItemName, RoomName, SuspicionResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGameRequest {
    pub human_character: ItemName,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    pub destination_room: RoomName,
}

/// Reply to `roll`; the snapshot itself is fetched separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub roll: u8,
    #[serde(default)]
    pub valid_moves: Vec<RoomName>,
}

/// Reply to `suspect`. The embedded state, if any, is deliberately not used.
#[derive(Debug, Clone, Deserialize)]
pub struct SuspectResponse {
    pub result: SuspicionResult,
}

/// Reply to `accuse`. The embedded state is not decoded; a refresh follows.
#[derive(Debug, Clone, Deserialize)]
pub struct AccuseResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccusationOutcome {
    pub correct: bool,
}

impl From<AccuseResponse> for AccusationOutcome {
    fn from(response: AccuseResponse) -> Self {
        Self {
            correct: response.success,
        }
    }
}

/// FastAPI style error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

//! Boundary to the game backend: one async call per operation, each returning
//! either a fresh snapshot or a small outcome record.

pub mod dto;
pub mod error;
pub mod http;

pub use dto::*;
pub use error::*;
pub use http::HttpBackend;

use async_trait::async_trait;

use crate::domain::{GameConstants, GameState, SuspicionResult, SuspicionTriple};

#[async_trait]
pub trait GameBackend: Send + Sync {
    /// Starts a session with the human playing `human_character`.
    async fn start_game(&self, human_character: &str) -> Result<GameState, BackendError>;

    async fn get_state(&self) -> Result<GameState, BackendError>;

    async fn get_constants(&self) -> Result<GameConstants, BackendError>;

    /// Only valid in `player_turn_move` before rolling.
    async fn roll(&self) -> Result<RollOutcome, BackendError>;

    async fn move_to(&self, destination_room: &str) -> Result<GameState, BackendError>;

    /// Resolves a suspicion. The reply is not a snapshot.
    async fn suspect(&self, suspicion: &SuspicionTriple) -> Result<SuspicionResult, BackendError>;

    async fn accuse(&self, accusation: &SuspicionTriple)
        -> Result<AccusationOutcome, BackendError>;

    async fn pass_turn(&self) -> Result<GameState, BackendError>;

    /// Runs exactly one AI player's full turn.
    async fn play_ai_turn(&self) -> Result<GameState, BackendError>;
}

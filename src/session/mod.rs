//! Session client: sole owner of the live [`GameState`](crate::domain::GameState),
//! plus the scheduler that plays AI turns on a timer.

pub mod autoplay;
pub mod client;
pub mod error;
pub mod snapshot;

pub use autoplay::{needs_ai_turn, AutoplayScheduler};
pub use client::{AiAdvance, SessionClient};
pub use error::SessionError;
pub use snapshot::Snapshot;

//! Client-side turn rules: which affordances are enabled for a snapshot, which
//! rooms may be entered, and the suspicion hold/acknowledge cycle.
//!
//! Everything here is a pure function of a [`GameState`](crate::domain::GameState)
//! or a small owned state machine; nothing in this module talks to the backend.

pub mod actions;
pub mod board;
pub mod errors;
pub mod legals;
pub mod move_gate;
pub mod suspicion;

pub use actions::*;
pub use board::*;
pub use errors::*;
pub use legals::*;
pub use move_gate::*;
pub use suspicion::*;

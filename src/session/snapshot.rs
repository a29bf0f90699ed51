use std::sync::Arc;

use crate::domain::GameState;

/// One installed [`GameState`]; `version` strictly increases per session client.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub version: u64,
    pub state: Arc<GameState>,
}

impl Snapshot {
    pub(crate) fn next(previous: Option<&Snapshot>, state: Arc<GameState>) -> Self {
        let version = previous.map_or(1, |s| s.version + 1);
        Self { version, state }
    }

    /// True when the active player differs from `previous`.
    pub fn turn_changed_since(&self, previous: Option<&Snapshot>) -> bool {
        previous.map_or(true, |p| {
            p.state.current_player_index != self.state.current_player_index
        })
    }
}

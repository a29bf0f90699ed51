use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Card, ItemName, PlayerName, RoomName, SuspicionTriple};

/// Turn phase as reported by the backend.
///
/// Phases the client does not know about are kept verbatim in `Other` and
/// never enable a human action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Phase {
    PlayerTurnMove,
    PlayerTurnAction,
    GameOver,
    Other(String),
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::PlayerTurnMove => "player_turn_move",
            Phase::PlayerTurnAction => "player_turn_action",
            Phase::GameOver => "game_over",
            Phase::Other(raw) => raw,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::GameOver)
    }
}

impl From<String> for Phase {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "player_turn_move" => Phase::PlayerTurnMove,
            "player_turn_action" => Phase::PlayerTurnAction,
            "game_over" => Phase::GameOver,
            _ => Phase::Other(raw),
        }
    }
}

impl From<Phase> for String {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: PlayerName,
    pub character_name: ItemName,
    #[serde(default)]
    pub is_human: bool,
    #[serde(default)]
    pub is_eliminated: bool,
    /// Room currently occupied.
    pub position: RoomName,
    #[serde(default)]
    pub hand: Vec<Card>,
    #[serde(default)]
    pub notebook: BTreeMap<ItemName, String>,
    #[serde(default)]
    pub seen_cards: Vec<ItemName>,
    /// Suspicions this player raised that nobody could disprove.
    #[serde(default)]
    pub undisproved_suspicions: Vec<SuspicionTriple>,
}

impl Player {
    pub fn holds(&self, item: &str) -> bool {
        self.hand.iter().any(|card| card.name == item)
    }

    pub fn has_seen(&self, item: &str) -> bool {
        self.seen_cards.iter().any(|seen| seen == item)
    }
}

/// Authoritative snapshot of one game session.
///
/// Replaced wholesale on every successful backend call, never patched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub players: Vec<Player>,
    pub current_player_index: usize,
    pub phase: Phase,
    #[serde(default)]
    pub dice_rolled: bool,
    /// Only meaningful while `dice_rolled` is true.
    #[serde(default)]
    pub available_moves: Vec<RoomName>,
    #[serde(default)]
    pub winner: Option<PlayerName>,
    #[serde(default)]
    pub logs: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("game state has no players")]
    NoPlayers,
    #[error("current player index {index} out of range for {len} players")]
    IndexOutOfRange { index: usize, len: usize },
}

impl GameState {
    /// Checks `0 <= current_player_index < len(players)`.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.players.is_empty() {
            return Err(SnapshotError::NoPlayers);
        }
        if self.current_player_index >= self.players.len() {
            return Err(SnapshotError::IndexOutOfRange {
                index: self.current_player_index,
                len: self.players.len(),
            });
        }
        Ok(())
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    pub fn is_human_turn(&self) -> bool {
        self.current_player().map_or(false, |p| p.is_human)
    }

    /// The human-controlled player, matched by character when one is given.
    pub fn human_player(&self, character: Option<&str>) -> Option<&Player> {
        match character {
            Some(character) => self
                .players
                .iter()
                .find(|p| p.character_name == character),
            None => self.players.iter().find(|p| p.is_human),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn occupants<'a>(&'a self, room: &'a str) -> impl Iterator<Item = &'a Player> + 'a {
        self.players.iter().filter(move |p| p.position == room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CardType;

    const STATE_JSON: &str = r#"{
        "players": [
            {
                "name": "You",
                "character_name": "Miss Scarlet",
                "hand": [{"name": "Rope", "type": "weapon"}],
                "position": "Lounge",
                "is_human": true,
                "is_eliminated": false,
                "notebook": {"Rope": "HAND"},
                "seen_cards": [],
                "undisproved_suspicions": [
                    {"suspect": "Mr. Green", "weapon": "Wrench", "room": "Hall"}
                ]
            },
            {"name": "Sherlock", "character_name": "Mr. Green", "position": "Lounge"}
        ],
        "current_player_index": 1,
        "phase": "player_turn_move",
        "winner": null,
        "logs": ["Game initialized. All players at Lounge."],
        "available_moves": [],
        "dice_rolled": false
    }"#;

    #[test]
    fn decodes_backend_payload_with_missing_optional_fields() {
        let state: GameState = serde_json::from_str(STATE_JSON).unwrap();
        assert_eq!(state.players.len(), 2);
        assert_eq!(state.phase, Phase::PlayerTurnMove);
        assert_eq!(state.players[0].hand[0].card_type, CardType::Weapon);
        assert_eq!(state.players[0].undisproved_suspicions[0].room, "Hall");
        assert!(!state.players[1].is_human);
        assert!(state.players[1].hand.is_empty());
        assert!(!state.is_human_turn());
        assert!(state.validate().is_ok());
    }

    #[test]
    fn unknown_phase_is_preserved_verbatim() {
        let json = STATE_JSON.replace("player_turn_move", "setup");
        let state: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state.phase, Phase::Other("setup".into()));
        assert_eq!(serde_json::to_value(&state.phase).unwrap(), "setup");
    }

    #[test]
    fn validate_rejects_out_of_range_index() {
        let mut state: GameState = serde_json::from_str(STATE_JSON).unwrap();
        state.current_player_index = 2;
        assert_eq!(
            state.validate(),
            Err(SnapshotError::IndexOutOfRange { index: 2, len: 2 })
        );
        state.players.clear();
        assert_eq!(state.validate(), Err(SnapshotError::NoPlayers));
    }

    #[test]
    fn human_player_prefers_character_match() {
        let state: GameState = serde_json::from_str(STATE_JSON).unwrap();
        assert_eq!(state.human_player(None).unwrap().name, "You");
        assert_eq!(state.human_player(Some("Mr. Green")).unwrap().name, "Sherlock");
        assert!(state.human_player(Some("Mrs. White")).is_none());
        assert_eq!(state.occupants("Lounge").count(), 2);
    }
}

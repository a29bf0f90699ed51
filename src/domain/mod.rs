//! Core domain types for the Clue session client

use serde::{Deserialize, Serialize};

pub mod game_state;
pub mod notebook;

pub use game_state::*;
pub use notebook::*;

// ---------- Common type aliases ----------
pub type PlayerName = String;
pub type RoomName = String;
pub type ItemName = String;

// ---------- Enums ----------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Suspect,
    Weapon,
    Room,
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Suspect => "suspect",
            CardType::Weapon => "weapon",
            CardType::Room => "room",
        }
    }
}

/// A single card. Only the human player's hand is normally visible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub name: ItemName,
    #[serde(rename = "type")]
    pub card_type: CardType,
}

/// `(suspect, weapon, room)` as used by suspicions and accusations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuspicionTriple {
    pub suspect: ItemName,
    pub weapon: ItemName,
    pub room: RoomName,
}

/// Outcome of a suspicion as shown to its author.
///
/// `card` is only revealed to a human author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspicionResult {
    pub has_card: bool,
    #[serde(default)]
    pub player: Option<PlayerName>,
    #[serde(default)]
    pub card: Option<Card>,
}

/// Static item names served once per session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConstants {
    pub rooms: Vec<RoomName>,
    pub weapons: Vec<ItemName>,
    pub suspects: Vec<ItemName>,
}

impl GameConstants {
    /// Case-insensitive lookup returning the canonical spelling.
    pub fn find(&self, card_type: CardType, needle: &str) -> Option<&str> {
        let pool = match card_type {
            CardType::Suspect => &self.suspects,
            CardType::Weapon => &self.weapons,
            CardType::Room => &self.rooms,
        };
        let needle = needle.trim();
        pool.iter()
            .find(|item| item.eq_ignore_ascii_case(needle))
            .map(String::as_str)
    }
}

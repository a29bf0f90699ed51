//! Read-only notebook view for the human player.

use std::fmt;

use super::{CardType, GameConstants, Player, SuspicionTriple};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NotebookMark {
    /// Item is in the player's own hand.
    Hand,
    /// Item was shown to the player through a disproof.
    Seen,
    /// Free-form status recorded by the backend.
    Noted(String),
    Blank,
}

impl fmt::Display for NotebookMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotebookMark::Hand => f.write_str("HAND"),
            NotebookMark::Seen => f.write_str("SEEN"),
            NotebookMark::Noted(status) => f.write_str(status),
            NotebookMark::Blank => Ok(()),
        }
    }
}

pub fn notebook_mark(player: &Player, item: &str) -> NotebookMark {
    if player.holds(item) {
        return NotebookMark::Hand;
    }
    if player.has_seen(item) {
        return NotebookMark::Seen;
    }
    match player.notebook.get(item) {
        Some(status) if !status.is_empty() => NotebookMark::Noted(status.clone()),
        _ => NotebookMark::Blank,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotebookSection<'a> {
    pub card_type: CardType,
    pub entries: Vec<(&'a str, NotebookMark)>,
}

/// Suspects, weapons and rooms in constants order, followed by candidate
/// solutions nobody could disprove.
pub fn notebook_view<'a>(
    player: &'a Player,
    constants: &'a GameConstants,
) -> (Vec<NotebookSection<'a>>, &'a [SuspicionTriple]) {
    let section = |card_type: CardType, items: &'a [String]| NotebookSection {
        card_type,
        entries: items
            .iter()
            .map(|item| (item.as_str(), notebook_mark(player, item)))
            .collect(),
    };
    let sections = vec![
        section(CardType::Suspect, constants.suspects.as_slice()),
        section(CardType::Weapon, constants.weapons.as_slice()),
        section(CardType::Room, constants.rooms.as_slice()),
    ];
    (sections, player.undisproved_suspicions.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Card;

    fn player() -> Player {
        Player {
            name: "You".into(),
            character_name: "Miss Scarlet".into(),
            is_human: true,
            is_eliminated: false,
            position: "Lounge".into(),
            hand: vec![Card {
                name: "Rope".into(),
                card_type: CardType::Weapon,
            }],
            notebook: [("Rope".to_string(), "X".to_string()), ("Hall".to_string(), "?".to_string())]
                .into_iter()
                .collect(),
            seen_cards: vec!["Kitchen".into()],
            undisproved_suspicions: vec![],
        }
    }

    #[test]
    fn hand_wins_over_seen_and_notes() {
        let p = player();
        assert_eq!(notebook_mark(&p, "Rope"), NotebookMark::Hand);
        assert_eq!(notebook_mark(&p, "Kitchen"), NotebookMark::Seen);
        assert_eq!(notebook_mark(&p, "Hall"), NotebookMark::Noted("?".into()));
        assert_eq!(notebook_mark(&p, "Study"), NotebookMark::Blank);
    }

    #[test]
    fn view_follows_constants_order() {
        let p = player();
        let constants = GameConstants {
            rooms: vec!["Kitchen".into(), "Hall".into()],
            weapons: vec!["Rope".into()],
            suspects: vec!["Mr. Green".into()],
        };
        let (sections, candidates) = notebook_view(&p, &constants);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[2].card_type, CardType::Room);
        assert_eq!(sections[2].entries[0], ("Kitchen", NotebookMark::Seen));
        assert_eq!(sections[1].entries[0].1.to_string(), "HAND");
        assert!(candidates.is_empty());
    }
}

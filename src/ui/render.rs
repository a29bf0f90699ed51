//! Plain-text screen for the terminal front end.

use std::fmt::Write;

use crate::domain::{notebook_view, GameConstants, GameState, NotebookMark};
use crate::engine::{available_rooms, board_view, EnabledActions, HeldSuspicion};

const LOG_TAIL: usize = 6;
const CELL_WIDTH: usize = 24;

/// Everything one render pass reads. Borrowed from the live snapshot and
/// never mutated.
pub struct Screen<'a> {
    pub state: &'a GameState,
    pub constants: Option<&'a GameConstants>,
    pub human_character: Option<&'a str>,
    pub last_roll: Option<u8>,
    pub held: Option<&'a HeldSuspicion>,
    pub enabled: &'a EnabledActions,
}

impl Screen<'_> {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.header(&mut out);
        self.board(&mut out);
        self.players(&mut out);
        self.hand(&mut out);
        self.notebook(&mut out);
        self.log_tail(&mut out);
        self.held(&mut out);
        self.footer(&mut out);
        out
    }

    fn header(&self, out: &mut String) {
        let _ = writeln!(out, "\n{}", "=".repeat(CELL_WIDTH * 3 + 4));
        match self.state.current_player() {
            Some(p) => {
                let _ = write!(out, "🔎 Turn: {} ({})", p.name, p.character_name);
            }
            None => {
                let _ = write!(out, "🔎 Turn: ?");
            }
        }
        let _ = write!(out, "  |  phase: {}", self.state.phase);
        if let Some(roll) = self.last_roll {
            let _ = write!(out, "  |  🎲 last roll: {roll}");
        }
        let _ = writeln!(out);
    }

    fn board(&self, out: &mut String) {
        let separator = format!("+{}+", vec!["-".repeat(CELL_WIDTH); 3].join("+"));
        let _ = writeln!(out, "{separator}");
        for row in board_view(self.state) {
            let names: Vec<String> = row
                .iter()
                .map(|cell| {
                    let mark = if cell.available { " *" } else { "" };
                    format!("{}{}", cell.room, mark)
                })
                .collect();
            let occupants: Vec<String> = row
                .iter()
                .map(|cell| {
                    cell.occupants
                        .iter()
                        .map(|p| p.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .collect();
            let _ = writeln!(out, "{}", table_row(&names));
            let _ = writeln!(out, "{}", table_row(&occupants));
            let _ = writeln!(out, "{separator}");
        }
        let rooms = available_rooms(self.state);
        if !rooms.is_empty() {
            let _ = writeln!(out, "Available moves (*): {}", rooms.join(", "));
        }
    }

    fn players(&self, out: &mut String) {
        let _ = writeln!(out, "\nPlayers:");
        for (i, p) in self.state.players.iter().enumerate() {
            let turn = if i == self.state.current_player_index { "▶" } else { " " };
            let you = if p.is_human { " (you)" } else { "" };
            let out_of_game = if p.is_eliminated { "  ✗ eliminated" } else { "" };
            let _ = writeln!(
                out,
                " {turn} {} - {}{you} @ {}{out_of_game}",
                p.name, p.character_name, p.position
            );
        }
    }

    fn hand(&self, out: &mut String) {
        let Some(human) = self.state.human_player(self.human_character) else {
            return;
        };
        let cards: Vec<&str> = human.hand.iter().map(|c| c.name.as_str()).collect();
        if cards.is_empty() {
            return;
        }
        let _ = writeln!(out, "\n🃏 Your cards: {}", cards.join(", "));
    }

    fn notebook(&self, out: &mut String) {
        let (Some(constants), Some(human)) = (
            self.constants,
            self.state.human_player(self.human_character),
        ) else {
            return;
        };
        let (sections, candidates) = notebook_view(human, constants);
        let _ = writeln!(out, "\nNotebook:");
        for section in sections {
            let entries: Vec<String> = section
                .entries
                .iter()
                .map(|(item, mark)| match mark {
                    NotebookMark::Blank => item.to_string(),
                    mark => format!("{item} [{mark}]"),
                })
                .collect();
            let _ = writeln!(out, "  {:<8} {}", section.card_type.as_str(), entries.join(", "));
        }
        for c in candidates {
            let _ = writeln!(
                out,
                "  ⚠ undisproved: {} with the {} in the {}",
                c.suspect, c.weapon, c.room
            );
        }
    }

    fn log_tail(&self, out: &mut String) {
        let logs = &self.state.logs;
        if logs.is_empty() {
            return;
        }
        let _ = writeln!(out, "\nLog:");
        for line in &logs[logs.len().saturating_sub(LOG_TAIL)..] {
            let _ = writeln!(out, "  {line}");
        }
    }

    fn held(&self, out: &mut String) {
        let Some(held) = self.held else {
            return;
        };
        let _ = writeln!(out, "\n{}", held_message(held));
        let _ = writeln!(out, "Type `ack` to continue.");
    }

    fn footer(&self, out: &mut String) {
        if let Some(winner) = &self.state.winner {
            let _ = writeln!(out, "\n🏆 GAME OVER: {winner} wins!");
            return;
        }
        if self.state.is_over() {
            let _ = writeln!(out, "\n🏁 GAME OVER");
            return;
        }
        if self.held.is_some() {
            return;
        }
        let actions: Vec<&str> = self.enabled.iter().map(|a| a.as_str()).collect();
        if actions.is_empty() {
            let _ = writeln!(out, "\n⏳ Waiting for other players...");
        } else {
            let _ = writeln!(out, "\nYour options: {}", actions.join(" | "));
        }
    }
}

/// One-line summary of a held suspicion result.
pub fn held_message(held: &HeldSuspicion) -> String {
    let s = &held.suspicion;
    let asked = format!("{} with the {} in the {}", s.suspect, s.weapon, s.room);
    match (&held.result.player, &held.result.card) {
        (Some(player), Some(card)) if held.result.has_card => {
            format!("🃏 {asked}: {player} showed you {}.", card.name)
        }
        (Some(player), None) if held.result.has_card => {
            format!("🃏 {asked}: disproved by {player}.")
        }
        _ if held.result.has_card => format!("🃏 {asked}: disproved."),
        _ => format!("❗ {asked}: nobody could disprove it."),
    }
}

fn table_row(cells: &[String]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .map(|c| format!(" {:<width$}", truncate(c, CELL_WIDTH - 1), width = CELL_WIDTH - 1))
        .collect();
    format!("|{}|", padded.join("|"))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

//! Fixed 3×3 room grid used for display only. Movement legality comes from the
//! backend's `available_moves`, never from this layout.

use crate::domain::{GameState, Player};

use super::move_gate::is_available;

pub const BOARD_SIZE: usize = 3;

pub const ROOM_LAYOUT: [[&str; BOARD_SIZE]; BOARD_SIZE] = [
    ["Study", "Hall", "Billiard Room"],
    ["Library", "Lounge", "Dining Room"],
    ["Conservatory", "Ballroom", "Kitchen"],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

pub fn cell_of(room: &str) -> Option<CellPos> {
    ROOM_LAYOUT.iter().enumerate().find_map(|(row, cells)| {
        cells
            .iter()
            .position(|name| *name == room)
            .map(|col| CellPos { row, col })
    })
}

pub fn room_at(pos: CellPos) -> Option<&'static str> {
    ROOM_LAYOUT.get(pos.row)?.get(pos.col).copied()
}

pub fn board_rooms() -> impl Iterator<Item = &'static str> {
    ROOM_LAYOUT.iter().flat_map(|row| row.iter().copied())
}

#[derive(Clone, Debug)]
pub struct RoomCell<'a> {
    pub room: &'static str,
    pub pos: CellPos,
    /// Highlighted as a legal destination for the human.
    pub available: bool,
    pub occupants: Vec<&'a Player>,
}

/// Row-major cells with occupants and availability overlay.
pub fn board_view(state: &GameState) -> Vec<Vec<RoomCell<'_>>> {
    ROOM_LAYOUT
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, &room)| RoomCell {
                    room,
                    pos: CellPos { row, col },
                    available: is_available(state, room),
                    occupants: state.occupants(room).collect(),
                })
                .collect()
        })
        .collect()
}

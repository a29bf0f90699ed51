//! Terminal rendering and prompt parsing for `clue_cli`.

pub mod command;
pub mod render;

pub use command::{parse_character_choice, parse_command, Command, CommandError, HELP};
pub use render::{held_message, Screen};

//! Prompt commands typed by the human player.

use crate::domain::{CardType, GameConstants};

pub const HELP: &str = "\
Commands:
  roll                                  roll the dice
  move <room>                           move to a highlighted room
  suspect <suspect> ; <weapon>          suspect in your current room
  accuse <suspect> ; <weapon> ; <room>  final accusation
  pass                                  end your turn
  ack                                   dismiss the suspicion result
  refresh                               fetch the latest game state
  help                                  show this help
  quit                                  leave the game";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Roll,
    Move(String),
    Suspect { suspect: String, weapon: String },
    Accuse {
        suspect: String,
        weapon: String,
        room: String,
    },
    Pass,
    Ack,
    Refresh,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("type a command, or `help`")]
    Empty,
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("no {} named `{name}`", .card_type.as_str())]
    UnknownName { card_type: CardType, name: String },
}

/// Parses one prompt line, resolving names to their canonical spelling.
pub fn parse_command(line: &str, constants: &GameConstants) -> Result<Command, CommandError> {
    let line = line.trim();
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    match verb.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::Empty),
        "roll" | "r" => Ok(Command::Roll),
        "pass" | "p" => Ok(Command::Pass),
        "ack" | "ok" => Ok(Command::Ack),
        "refresh" => Ok(Command::Refresh),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        "move" | "m" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("move <room>"));
            }
            Ok(Command::Move(resolve(constants, CardType::Room, rest)?))
        }
        "suspect" | "s" => match fields(rest).as_slice() {
            [suspect, weapon] => Ok(Command::Suspect {
                suspect: resolve(constants, CardType::Suspect, suspect)?,
                weapon: resolve(constants, CardType::Weapon, weapon)?,
            }),
            _ => Err(CommandError::Usage("suspect <suspect> ; <weapon>")),
        },
        "accuse" | "a" => match fields(rest).as_slice() {
            [suspect, weapon, room] => Ok(Command::Accuse {
                suspect: resolve(constants, CardType::Suspect, suspect)?,
                weapon: resolve(constants, CardType::Weapon, weapon)?,
                room: resolve(constants, CardType::Room, room)?,
            }),
            _ => Err(CommandError::Usage("accuse <suspect> ; <weapon> ; <room>")),
        },
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn fields(rest: &str) -> Vec<&str> {
    if rest.is_empty() {
        return vec![];
    }
    rest.split(';').map(str::trim).collect()
}

fn resolve(constants: &GameConstants, card_type: CardType, name: &str) -> Result<String, CommandError> {
    constants
        .find(card_type, name)
        .map(str::to_string)
        .ok_or_else(|| CommandError::UnknownName {
            card_type,
            name: name.to_string(),
        })
}

/// Picks a character by 1-based menu number or by name.
pub fn parse_character_choice<'a>(input: &str, suspects: &'a [String]) -> Option<&'a str> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| suspects.get(i))
            .map(String::as_str);
    }
    suspects
        .iter()
        .find(|s| s.eq_ignore_ascii_case(input))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::constants;

    #[test]
    fn bare_verbs_and_aliases() {
        let c = constants();
        assert_eq!(parse_command("roll", &c), Ok(Command::Roll));
        assert_eq!(parse_command("  PASS ", &c), Ok(Command::Pass));
        assert_eq!(parse_command("ack", &c), Ok(Command::Ack));
        assert_eq!(parse_command("q", &c), Ok(Command::Quit));
        assert_eq!(parse_command("", &c), Err(CommandError::Empty));
        assert_eq!(
            parse_command("dance", &c),
            Err(CommandError::Unknown("dance".into()))
        );
    }

    #[test]
    fn names_resolve_case_insensitively() {
        let c = constants();
        assert_eq!(
            parse_command("move billiard room", &c),
            Ok(Command::Move("Billiard Room".into()))
        );
        assert_eq!(
            parse_command("suspect col. mustard ; lead pipe", &c),
            Ok(Command::Suspect {
                suspect: "Col. Mustard".into(),
                weapon: "Lead Pipe".into(),
            })
        );
        assert_eq!(
            parse_command("accuse Mrs. White;Rope;hall", &c),
            Ok(Command::Accuse {
                suspect: "Mrs. White".into(),
                weapon: "Rope".into(),
                room: "Hall".into(),
            })
        );
    }

    #[test]
    fn malformed_arguments_are_reported() {
        let c = constants();
        assert_eq!(parse_command("move", &c), Err(CommandError::Usage("move <room>")));
        assert!(matches!(
            parse_command("suspect Mr. Green", &c),
            Err(CommandError::Usage(_))
        ));
        assert_eq!(
            parse_command("move Cellar", &c),
            Err(CommandError::UnknownName {
                card_type: CardType::Room,
                name: "Cellar".into()
            })
        );
        let err = parse_command("suspect Mr. Green ; Spoon", &c).unwrap_err();
        assert_eq!(err.to_string(), "no weapon named `Spoon`");
    }

    #[test]
    fn character_choice_by_number_or_name() {
        let suspects = constants().suspects;
        assert_eq!(parse_character_choice("1", &suspects), Some("Miss Scarlet"));
        assert_eq!(parse_character_choice("mr. green", &suspects), Some("Mr. Green"));
        assert_eq!(parse_character_choice("0", &suspects), None);
        assert_eq!(parse_character_choice("99", &suspects), None);
    }
}

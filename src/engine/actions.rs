use std::fmt;

/// Mutating affordances offered to the human player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnAction {
    Roll,
    Move,
    Suspect,
    Accuse,
    Pass,
}

impl TurnAction {
    pub const ALL: [TurnAction; 5] = [
        TurnAction::Roll,
        TurnAction::Move,
        TurnAction::Suspect,
        TurnAction::Accuse,
        TurnAction::Pass,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TurnAction::Roll => "roll",
            TurnAction::Move => "move",
            TurnAction::Suspect => "suspect",
            TurnAction::Accuse => "accuse",
            TurnAction::Pass => "pass",
        }
    }
}

impl fmt::Display for TurnAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

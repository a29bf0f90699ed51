//! Common test utilities: snapshot fixtures and a scripted in-memory backend.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use crate::backend::{AccusationOutcome, BackendError, GameBackend, RejectionKind, RollOutcome};
use crate::domain::{GameConstants, GameState, SuspicionResult, SuspicionTriple};

/// Snapshot builders shared across test modules.
pub mod fixtures {
    use crate::domain::{Card, CardType, GameConstants, GameState, Phase, Player};

    pub fn player(name: &str, character: &str, is_human: bool, position: &str) -> Player {
        Player {
            name: name.into(),
            character_name: character.into(),
            is_human,
            is_eliminated: false,
            position: position.into(),
            hand: vec![],
            notebook: Default::default(),
            seen_cards: vec![],
            undisproved_suspicions: vec![],
        }
    }

    /// `You` (human, Library), `Bot1` and `Bot2` (both Lounge).
    pub fn players() -> Vec<Player> {
        let mut you = player("You", "Miss Scarlet", true, "Library");
        you.hand = vec![
            Card {
                name: "Rope".into(),
                card_type: CardType::Weapon,
            },
            Card {
                name: "Kitchen".into(),
                card_type: CardType::Room,
            },
        ];
        vec![
            you,
            player("Bot1", "Col. Mustard", false, "Lounge"),
            player("Bot2", "Mrs. White", false, "Lounge"),
        ]
    }

    pub fn state_at(phase: Phase, current_player_index: usize) -> GameState {
        GameState {
            players: players(),
            current_player_index,
            phase,
            dice_rolled: false,
            available_moves: vec![],
            winner: None,
            logs: vec!["Game started".into()],
        }
    }

    pub fn human_turn(phase: Phase) -> GameState {
        state_at(phase, 0)
    }

    /// Human move phase after a roll listing `moves`.
    pub fn rolled(moves: &[&str]) -> GameState {
        let mut st = human_turn(Phase::PlayerTurnMove);
        st.dice_rolled = true;
        st.available_moves = moves.iter().map(|m| m.to_string()).collect();
        st
    }

    /// Human action phase in `room`, as left by a move.
    pub fn moved_to(room: &str) -> GameState {
        let mut st = human_turn(Phase::PlayerTurnAction);
        st.players[0].position = room.into();
        st
    }

    pub fn game_over(winner: &str) -> GameState {
        let mut st = human_turn(Phase::GameOver);
        st.winner = Some(winner.into());
        st
    }

    pub fn constants() -> GameConstants {
        let names = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        GameConstants {
            rooms: names(&[
                "Study",
                "Hall",
                "Lounge",
                "Library",
                "Billiard Room",
                "Dining Room",
                "Conservatory",
                "Ballroom",
                "Kitchen",
            ]),
            weapons: names(&[
                "Candlestick",
                "Knife",
                "Lead Pipe",
                "Revolver",
                "Rope",
                "Wrench",
            ]),
            suspects: names(&[
                "Miss Scarlet",
                "Col. Mustard",
                "Mrs. White",
                "Mr. Green",
                "Mrs. Peacock",
                "Prof. Plum",
            ]),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Start,
    GetState,
    GetConstants,
    Roll,
    Move,
    Suspect,
    Accuse,
    Pass,
    AiTurn,
}

#[derive(Default)]
struct Script {
    server: Option<GameState>,
    starts: VecDeque<GameState>,
    rolls: VecDeque<(RollOutcome, GameState)>,
    moves: VecDeque<GameState>,
    suspects: VecDeque<(SuspicionResult, GameState)>,
    accusations: VecDeque<(bool, GameState)>,
    passes: VecDeque<GameState>,
    ai_turns: VecDeque<GameState>,
    failures: HashMap<Op, VecDeque<BackendError>>,
    calls: Vec<(Op, Option<String>)>,
}

/// In-memory backend replaying queued replies.
///
/// Each scripted action reply carries the state the server holds afterwards;
/// `get_state` always answers with that server state, so tests can tell a
/// refresh apart from the action reply itself. Unscripted calls are rejected.
#[derive(Default)]
pub struct ScriptedBackend {
    script: Mutex<Script>,
    constants: Mutex<GameConstants>,
    holds: Mutex<HashMap<Op, Arc<Semaphore>>>,
}

fn unscripted(op: Op) -> BackendError {
    BackendError::rejected(RejectionKind::IllegalAction, 400, format!("unscripted {op:?}"))
}

impl ScriptedBackend {
    pub fn new() -> Arc<Self> {
        let backend = Self::default();
        *backend.constants.lock() = fixtures::constants();
        Arc::new(backend)
    }

    /// Backend whose server already holds `state`, as after a start.
    pub fn with_server(state: GameState) -> Arc<Self> {
        let backend = Self::new();
        backend.set_server(state);
        backend
    }

    pub fn set_server(&self, state: GameState) {
        self.script.lock().server = Some(state);
    }

    pub fn server(&self) -> Option<GameState> {
        self.script.lock().server.clone()
    }

    pub fn on_start(&self, state: GameState) {
        self.script.lock().starts.push_back(state);
    }

    pub fn on_roll(&self, roll: u8, after: GameState) {
        let outcome = RollOutcome {
            roll,
            valid_moves: after.available_moves.clone(),
        };
        self.script.lock().rolls.push_back((outcome, after));
    }

    pub fn on_move(&self, after: GameState) {
        self.script.lock().moves.push_back(after);
    }

    pub fn on_suspect(&self, result: SuspicionResult, after: GameState) {
        self.script.lock().suspects.push_back((result, after));
    }

    pub fn on_accuse(&self, correct: bool, after: GameState) {
        self.script.lock().accusations.push_back((correct, after));
    }

    pub fn on_pass(&self, after: GameState) {
        self.script.lock().passes.push_back(after);
    }

    pub fn on_ai_turn(&self, after: GameState) {
        self.script.lock().ai_turns.push_back(after);
    }

    /// The next call of `op` fails with `err` without touching server state.
    pub fn fail_next(&self, op: Op, err: BackendError) {
        self.script
            .lock()
            .failures
            .entry(op)
            .or_default()
            .push_back(err);
    }

    /// Calls of `op` block after being recorded until [`ScriptedBackend::release`].
    pub fn hold(&self, op: Op) {
        self.holds.lock().insert(op, Arc::new(Semaphore::new(0)));
    }

    pub fn release(&self, op: Op) {
        if let Some(gate) = self.holds.lock().get(&op) {
            gate.add_permits(1);
        }
    }

    pub fn calls(&self) -> Vec<Op> {
        self.script.lock().calls.iter().map(|(op, _)| *op).collect()
    }

    pub fn count(&self, op: Op) -> usize {
        self.script
            .lock()
            .calls
            .iter()
            .filter(|(called, _)| *called == op)
            .count()
    }

    /// Arguments passed to `op`, in call order.
    pub fn args(&self, op: Op) -> Vec<String> {
        self.script
            .lock()
            .calls
            .iter()
            .filter(|(called, _)| *called == op)
            .filter_map(|(_, arg)| arg.clone())
            .collect()
    }

    async fn enter(&self, op: Op, arg: Option<String>) -> Result<(), BackendError> {
        self.script.lock().calls.push((op, arg));
        let gate = self.holds.lock().get(&op).cloned();
        if let Some(gate) = gate {
            gate.acquire().await.expect("hold semaphore closed").forget();
        }
        let mut script = self.script.lock();
        match script.failures.get_mut(&op).and_then(VecDeque::pop_front) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GameBackend for ScriptedBackend {
    async fn start_game(&self, human_character: &str) -> Result<GameState, BackendError> {
        self.enter(Op::Start, Some(human_character.to_string()))
            .await?;
        let mut script = self.script.lock();
        let state = script.starts.pop_front().ok_or_else(|| unscripted(Op::Start))?;
        script.server = Some(state.clone());
        Ok(state)
    }

    async fn get_state(&self) -> Result<GameState, BackendError> {
        self.enter(Op::GetState, None).await?;
        self.script.lock().server.clone().ok_or_else(|| {
            BackendError::rejected(RejectionKind::IllegalAction, 400, "Game not started")
        })
    }

    async fn get_constants(&self) -> Result<GameConstants, BackendError> {
        self.enter(Op::GetConstants, None).await?;
        Ok(self.constants.lock().clone())
    }

    async fn roll(&self) -> Result<RollOutcome, BackendError> {
        self.enter(Op::Roll, None).await?;
        let mut script = self.script.lock();
        let (outcome, after) = script.rolls.pop_front().ok_or_else(|| unscripted(Op::Roll))?;
        script.server = Some(after);
        Ok(outcome)
    }

    async fn move_to(&self, destination_room: &str) -> Result<GameState, BackendError> {
        self.enter(Op::Move, Some(destination_room.to_string()))
            .await?;
        let mut script = self.script.lock();
        let after = script.moves.pop_front().ok_or_else(|| unscripted(Op::Move))?;
        script.server = Some(after.clone());
        Ok(after)
    }

    async fn suspect(&self, suspicion: &SuspicionTriple) -> Result<SuspicionResult, BackendError> {
        let arg = format!("{}/{}/{}", suspicion.suspect, suspicion.weapon, suspicion.room);
        self.enter(Op::Suspect, Some(arg)).await?;
        let mut script = self.script.lock();
        let (result, after) = script
            .suspects
            .pop_front()
            .ok_or_else(|| unscripted(Op::Suspect))?;
        script.server = Some(after);
        Ok(result)
    }

    async fn accuse(
        &self,
        accusation: &SuspicionTriple,
    ) -> Result<AccusationOutcome, BackendError> {
        let arg = format!("{}/{}/{}", accusation.suspect, accusation.weapon, accusation.room);
        self.enter(Op::Accuse, Some(arg)).await?;
        let mut script = self.script.lock();
        let (correct, after) = script
            .accusations
            .pop_front()
            .ok_or_else(|| unscripted(Op::Accuse))?;
        script.server = Some(after);
        Ok(AccusationOutcome { correct })
    }

    async fn pass_turn(&self) -> Result<GameState, BackendError> {
        self.enter(Op::Pass, None).await?;
        let mut script = self.script.lock();
        let after = script.passes.pop_front().ok_or_else(|| unscripted(Op::Pass))?;
        script.server = Some(after.clone());
        Ok(after)
    }

    async fn play_ai_turn(&self) -> Result<GameState, BackendError> {
        self.enter(Op::AiTurn, None).await?;
        let mut script = self.script.lock();
        let after = script.ai_turns.pop_front().ok_or_else(|| unscripted(Op::AiTurn))?;
        script.server = Some(after.clone());
        Ok(after)
    }
}

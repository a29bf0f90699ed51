use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{watch, Mutex as AsyncMutex, MutexGuard, OnceCell};
use tracing::{debug, info, warn};

use crate::backend::{AccusationOutcome, GameBackend, RollOutcome};
use crate::domain::{GameConstants, GameState, SuspicionTriple};
use crate::engine::{
    check_action, check_move, enabled_for, suspicion_in_current_room, ActionError,
    EnabledActions, HeldSuspicion, SuspicionProtocol, TurnAction,
};

use super::autoplay::needs_ai_turn;
use super::error::SessionError;
use super::snapshot::Snapshot;

const LOG_TARGET: &str = "clue_session::session::client";

/// Result of a scheduled AI advance.
#[derive(Clone, Debug)]
pub enum AiAdvance {
    Advanced(Snapshot),
    /// The snapshot the trigger was armed against is no longer live.
    Stale,
    /// The live snapshot is a human turn or a finished game.
    NotAiTurn,
    /// A suspicion result has not been acknowledged yet.
    SuspicionOpen,
}

#[derive(Debug, Default)]
struct SessionInner {
    suspicion: SuspicionProtocol,
    human_character: Option<String>,
    last_roll: Option<u8>,
}

/// Owns the live snapshot and serialises every mutating backend call.
///
/// Snapshots are only ever replaced wholesale, never patched, and
/// every replacement is published on a watch channel. Human actions are checked
/// against the turn rules before the backend sees them.
pub struct SessionClient {
    backend: Arc<dyn GameBackend>,
    snapshots: watch::Sender<Option<Snapshot>>,
    inner: Mutex<SessionInner>,
    constants: OnceCell<GameConstants>,
    call_gate: AsyncMutex<()>,
}

impl SessionClient {
    pub fn new(backend: Arc<dyn GameBackend>) -> Self {
        let (snapshots, _) = watch::channel(None);
        Self {
            backend,
            snapshots,
            inner: Mutex::new(SessionInner::default()),
            constants: OnceCell::new(),
            call_gate: AsyncMutex::new(()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Snapshot>> {
        self.snapshots.subscribe()
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.snapshots.borrow().clone()
    }

    pub fn state(&self) -> Option<Arc<GameState>> {
        self.snapshots.borrow().as_ref().map(|s| Arc::clone(&s.state))
    }

    pub fn human_character(&self) -> Option<String> {
        self.inner.lock().human_character.clone()
    }

    /// Value of the latest roll; cleared whenever the active player changes.
    pub fn last_roll(&self) -> Option<u8> {
        self.inner.lock().last_roll
    }

    pub fn held_suspicion(&self) -> Option<HeldSuspicion> {
        self.inner.lock().suspicion.held().cloned()
    }

    /// Enabled affordances for the live snapshot. Nothing is enabled while a
    /// suspicion is pending or held.
    pub fn enabled_actions(&self) -> EnabledActions {
        let Some(state) = self.state() else {
            return EnabledActions::none();
        };
        if !self.inner.lock().suspicion.is_idle() {
            return EnabledActions::none();
        }
        enabled_for(&state)
    }

    /// Static names, fetched from the backend once per client.
    pub async fn constants(&self) -> Result<GameConstants, SessionError> {
        let constants = self
            .constants
            .get_or_try_init(|| async {
                let constants = self.backend.get_constants().await?;
                debug!(
                    target: LOG_TARGET,
                    rooms = constants.rooms.len(),
                    weapons = constants.weapons.len(),
                    suspects = constants.suspects.len(),
                    "fetched game constants"
                );
                Ok::<_, SessionError>(constants)
            })
            .await
            .inspect_err(|err| log_failure("constants", err))?;
        Ok(constants.clone())
    }

    pub async fn start(&self, human_character: &str) -> Result<Snapshot, SessionError> {
        let result: Result<_, SessionError> = async {
            let _guard = self.try_gate()?;
            let state = self.backend.start_game(human_character).await?;
            state.validate()?;
            {
                let mut inner = self.inner.lock();
                inner.suspicion.reset();
                inner.human_character = Some(human_character.to_string());
            }
            let snapshot = self.install(state);
            info!(
                target: LOG_TARGET,
                version = snapshot.version,
                character = %human_character,
                players = snapshot.state.players.len(),
                "session started"
            );
            Ok(snapshot)
        }
        .await;
        result.inspect_err(|err| log_failure("start", err))
    }

    /// Fetches and installs the backend's current state. Refused while a
    /// suspicion is pending or held; acknowledging performs that refresh.
    pub async fn refresh(&self) -> Result<Snapshot, SessionError> {
        let result: Result<_, SessionError> = async {
            let _guard = self.try_gate()?;
            self.inner.lock().suspicion.ensure_idle()?;
            self.refresh_locked().await
        }
        .await;
        result.inspect_err(|err| log_failure("refresh", err))
    }

    pub async fn roll(&self) -> Result<RollOutcome, SessionError> {
        let result: Result<_, SessionError> = async {
            let _guard = self.try_gate()?;
            self.check(TurnAction::Roll)?;
            let outcome = self.backend.roll().await?;
            self.inner.lock().last_roll = Some(outcome.roll);
            info!(
                target: LOG_TARGET,
                roll = outcome.roll,
                moves = ?outcome.valid_moves,
                "dice rolled"
            );
            self.refresh_after("roll").await;
            Ok(outcome)
        }
        .await;
        result.inspect_err(|err| log_failure("roll", err))
    }

    /// Moves the human to `room` if the move gate permits it; otherwise nothing
    /// is sent and nothing changes.
    pub async fn move_to(&self, room: &str) -> Result<(), SessionError> {
        let result: Result<_, SessionError> = async {
            let _guard = self.try_gate()?;
            let state = self.require_state()?;
            self.inner.lock().suspicion.ensure_idle()?;
            check_move(&state, room)?;
            self.backend.move_to(room).await?;
            info!(target: LOG_TARGET, %room, "moved");
            self.refresh_after("move").await;
            Ok(())
        }
        .await;
        result.inspect_err(|err| log_failure("move", err))
    }

    /// Submits a suspicion in the active player's room and holds the result.
    ///
    /// The snapshot is not refreshed here even though the backend may already
    /// have advanced the turn; see [`SessionClient::acknowledge_suspicion`].
    pub async fn propose_suspicion(
        &self,
        suspect: &str,
        weapon: &str,
    ) -> Result<HeldSuspicion, SessionError> {
        let result: Result<_, SessionError> = async {
            let _guard = self.try_gate()?;
            let state = self.require_state()?;
            let suspicion = {
                let mut inner = self.inner.lock();
                inner.suspicion.ensure_idle()?;
                let suspicion = suspicion_in_current_room(&state, suspect, weapon)?;
                inner.suspicion.begin(suspicion.clone())?;
                suspicion
            };
            match self.backend.suspect(&suspicion).await {
                Ok(outcome) => {
                    let mut inner = self.inner.lock();
                    inner.suspicion.resolve(outcome)?;
                    let held = inner
                        .suspicion
                        .held()
                        .cloned()
                        .ok_or(ActionError::NothingToAcknowledge)?;
                    info!(
                        target: LOG_TARGET,
                        suspect = %held.suspicion.suspect,
                        weapon = %held.suspicion.weapon,
                        room = %held.suspicion.room,
                        disproved = held.result.has_card,
                        "suspicion result held until acknowledged"
                    );
                    Ok(held)
                }
                Err(err) => {
                    self.inner.lock().suspicion.abandon();
                    Err(err.into())
                }
            }
        }
        .await;
        result.inspect_err(|err| log_failure("suspect", err))
    }

    /// Clears the held result, then performs the single deferred refresh.
    pub async fn acknowledge_suspicion(&self) -> Result<HeldSuspicion, SessionError> {
        let result: Result<_, SessionError> = async {
            let _guard = self.try_gate()?;
            let held = self.inner.lock().suspicion.acknowledge()?;
            debug!(target: LOG_TARGET, "suspicion acknowledged");
            self.refresh_after("acknowledge").await;
            Ok(held)
        }
        .await;
        result.inspect_err(|err| log_failure("acknowledge", err))
    }

    pub async fn accuse(
        &self,
        suspect: &str,
        weapon: &str,
        room: &str,
    ) -> Result<AccusationOutcome, SessionError> {
        let result: Result<_, SessionError> = async {
            let _guard = self.try_gate()?;
            self.check(TurnAction::Accuse)?;
            let accusation = SuspicionTriple {
                suspect: suspect.to_string(),
                weapon: weapon.to_string(),
                room: room.to_string(),
            };
            let outcome = self.backend.accuse(&accusation).await?;
            info!(
                target: LOG_TARGET,
                %suspect,
                %weapon,
                %room,
                correct = outcome.correct,
                "accusation resolved"
            );
            self.refresh_after("accuse").await;
            Ok(outcome)
        }
        .await;
        result.inspect_err(|err| log_failure("accuse", err))
    }

    pub async fn pass_turn(&self) -> Result<(), SessionError> {
        let result: Result<_, SessionError> = async {
            let _guard = self.try_gate()?;
            self.check(TurnAction::Pass)?;
            self.backend.pass_turn().await?;
            info!(target: LOG_TARGET, "turn passed");
            self.refresh_after("pass").await;
            Ok(())
        }
        .await;
        result.inspect_err(|err| log_failure("pass", err))
    }

    /// Plays one AI turn if `expected_version` is still the live snapshot and
    /// it is an AI player's turn. Waits for any in-flight call to finish.
    pub async fn advance_ai_turn(&self, expected_version: u64) -> Result<AiAdvance, SessionError> {
        let result: Result<_, SessionError> = async {
            let _guard = self.call_gate.lock().await;
            let current = self.snapshot().ok_or(SessionError::NotStarted)?;
            if current.version != expected_version {
                return Ok(AiAdvance::Stale);
            }
            if !self.inner.lock().suspicion.is_idle() {
                return Ok(AiAdvance::SuspicionOpen);
            }
            if !needs_ai_turn(&current.state) {
                return Ok(AiAdvance::NotAiTurn);
            }
            let player = current
                .state
                .current_player()
                .map(|p| p.name.clone())
                .unwrap_or_default();
            let state = self.backend.play_ai_turn().await?;
            state.validate()?;
            let snapshot = self.install(state);
            info!(
                target: LOG_TARGET,
                %player,
                version = snapshot.version,
                phase = %snapshot.state.phase,
                "AI turn played"
            );
            Ok(AiAdvance::Advanced(snapshot))
        }
        .await;
        result.inspect_err(|err| log_failure("ai-turn", err))
    }

    fn try_gate(&self) -> Result<MutexGuard<'_, ()>, SessionError> {
        self.call_gate.try_lock().map_err(|_| SessionError::Busy)
    }

    fn require_state(&self) -> Result<Arc<GameState>, SessionError> {
        self.state().ok_or(SessionError::NotStarted)
    }

    fn check(&self, action: TurnAction) -> Result<(), SessionError> {
        let state = self.require_state()?;
        self.inner.lock().suspicion.ensure_idle()?;
        check_action(&state, action)?;
        Ok(())
    }

    /// Caller must hold the call gate.
    async fn refresh_locked(&self) -> Result<Snapshot, SessionError> {
        let state = self.backend.get_state().await?;
        state.validate()?;
        Ok(self.install(state))
    }

    /// Refresh that follows a successful action; failure keeps the previous snapshot.
    async fn refresh_after(&self, op: &'static str) {
        if let Err(err) = self.refresh_locked().await {
            warn!(
                target: LOG_TARGET,
                op,
                error = %err,
                "refresh after action failed; previous snapshot stays live"
            );
        }
    }

    /// Caller must hold the call gate, which makes it the only writer.
    fn install(&self, state: GameState) -> Snapshot {
        let previous = self.snapshot();
        let snapshot = Snapshot::next(previous.as_ref(), Arc::new(state));
        if snapshot.turn_changed_since(previous.as_ref()) {
            self.inner.lock().last_roll = None;
        }
        self.snapshots.send_replace(Some(snapshot.clone()));
        debug!(
            target: LOG_TARGET,
            version = snapshot.version,
            phase = %snapshot.state.phase,
            current = snapshot.state.current_player_index,
            dice_rolled = snapshot.state.dice_rolled,
            "snapshot installed"
        );
        snapshot
    }
}

fn log_failure(op: &'static str, err: &SessionError) {
    match err {
        SessionError::Gate(_) | SessionError::Busy | SessionError::NotStarted => {
            debug!(target: LOG_TARGET, op, error = %err, "action refused locally")
        }
        _ => warn!(
            target: LOG_TARGET,
            op,
            kind = ?err.kind(),
            error = %err,
            "action failed; state unchanged"
        ),
    }
}

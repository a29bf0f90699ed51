//! Delayed AI turn trigger.
//!
//! One trigger is armed per snapshot that needs an AI turn. A newer snapshot
//! cancels the pending trigger and re-arms against itself, so a refresh never
//! produces a second call for the same turn. A failed AI call is logged and
//! not retried; the loop then waits for the next snapshot.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::GameState;
use crate::tokio_tools::spawn_named_task;

use super::client::{AiAdvance, SessionClient};
use super::snapshot::Snapshot;

const LOG_TARGET: &str = "clue_session::session::autoplay";

/// True when the snapshot is a well-formed, unfinished game on an AI turn.
pub fn needs_ai_turn(state: &GameState) -> bool {
    !state.is_over()
        && state.winner.is_none()
        && state.validate().is_ok()
        && !state.is_human_turn()
}

pub struct AutoplayScheduler {
    stop: CancellationToken,
    handle: JoinHandle<()>,
}

impl AutoplayScheduler {
    pub fn spawn(session: Arc<SessionClient>, delay: Duration) -> Self {
        let stop = CancellationToken::new();
        let rx = session.subscribe();
        let handle = spawn_named_task("clue-autoplay", run(session, rx, delay, stop.clone()));
        Self { stop, handle }
    }

    pub async fn shutdown(self) {
        self.stop.cancel();
        if let Err(err) = self.handle.await {
            warn!(target: LOG_TARGET, error = %err, "autoplay task ended abnormally");
        }
    }
}

fn armed_version(snapshot: &Option<Snapshot>) -> Option<u64> {
    snapshot
        .as_ref()
        .filter(|s| needs_ai_turn(&s.state))
        .map(|s| s.version)
}

async fn run(
    session: Arc<SessionClient>,
    mut rx: watch::Receiver<Option<Snapshot>>,
    delay: Duration,
    stop: CancellationToken,
) {
    debug!(target: LOG_TARGET, delay_ms = delay.as_millis() as u64, "autoplay started");
    loop {
        let armed = armed_version(&rx.borrow_and_update());

        if let Some(version) = armed {
            debug!(target: LOG_TARGET, version, "AI turn armed");
            tokio::select! {
                _ = stop.cancelled() => break,
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    debug!(target: LOG_TARGET, version, "newer snapshot; re-arming");
                    continue;
                }
                _ = sleep(delay) => {
                    match session.advance_ai_turn(version).await {
                        Ok(AiAdvance::Advanced(snapshot)) => {
                            info!(target: LOG_TARGET, version = snapshot.version, "AI turn advanced");
                        }
                        Ok(AiAdvance::Stale) => {
                            debug!(target: LOG_TARGET, version, "trigger went stale");
                        }
                        Ok(AiAdvance::NotAiTurn) => {
                            debug!(target: LOG_TARGET, version, "no AI turn to play");
                        }
                        Ok(AiAdvance::SuspicionOpen) => {
                            debug!(target: LOG_TARGET, version, "suspicion result still held");
                        }
                        Err(err) => {
                            warn!(
                                target: LOG_TARGET,
                                version,
                                error = %err,
                                "AI turn failed; waiting for the next snapshot"
                            );
                        }
                    }
                    // An advance installs a newer snapshot, which is picked up at
                    // the top of the loop as already changed.
                    if rx.has_changed().unwrap_or(false) {
                        continue;
                    }
                }
            }
        }

        tokio::select! {
            _ = stop.cancelled() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }
    debug!(target: LOG_TARGET, "autoplay stopped");
}

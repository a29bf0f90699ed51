use std::future::Future;

use tokio::task::JoinHandle;
use tracing::Instrument;

/// Spawns a background task inside a `task` span carrying its stable name.
pub fn spawn_named_task<F, S>(name: S, future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
    S: Into<String>,
{
    let name: String = name.into();
    let span = tracing::info_span!("task", task_name = %name);
    tokio::spawn(future.instrument(span))
}

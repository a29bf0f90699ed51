pub mod backend;
pub mod config;
pub mod domain;
pub mod engine;
pub mod session;
pub mod tokio_tools;
pub mod ui;

#[cfg(test)]
pub mod test_utils;

pub use config::ClientConfig;
pub use session::{AutoplayScheduler, SessionClient, SessionError, Snapshot};

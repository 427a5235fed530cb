use thiserror::Error;

// `Busy` and `Persistence` are transient: the caller is expected to retry or
// tell the user. Everything else is a contract violation on the caller's side.
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("No tournament is running")]
    NotInitialized,
    #[error("{0}")]
    InvalidState(String),
    #[error("Unknown side: {0:?}")]
    InvalidSide(String),
    #[error("Invalid tournament config: {0}")]
    InvalidConfig(String),
    #[error("Another update is already in progress")]
    Busy,
    #[error("Failed to persist tournament state: {0}")]
    Persistence(anyhow::Error),
}

// ⚠️ Error types for the league client, store and configuration layer

use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, LeagueError>;

/// Errors raised inside the library.
///
/// The `api` module never lets these reach a page: reads downgrade them to
/// empty results and mutations turn them into a failed `MutationResponse`.
#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered with status {0}")]
    Status(u16),

    #[error("failed to decode payload: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(String),
}

impl From<serde_json::Error> for LeagueError {
    fn from(err: serde_json::Error) -> Self {
        LeagueError::Decode(err.to_string())
    }
}

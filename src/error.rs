use std::path::PathBuf;

use thiserror::Error;

/// Unexpected repository failures.
///
/// A missing record is not an error: lookups return `None` and mutations
/// return `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("repository lock poisoned during {0}")]
    LockPoisoned(&'static str),
    #[error("no identifiers left in {0}")]
    IdsExhausted(&'static str),
    #[error("remote repository error: {0}")]
    Remote(String),
    #[error("record decode error: {0}")]
    Decode(String),
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Decode(err.to_string())
        } else {
            RepositoryError::Remote(err.to_string())
        }
    }
}

/// Failures loading a [`ShellConfig`](crate::ShellConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

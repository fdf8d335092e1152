use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while drilling.
///
/// Only `Protocol` is recoverable: the feedback loop treats it as a round
/// without mistakes. The rest abort the run.
#[derive(Error, Debug)]
pub enum DrillError {
    #[error("unable to read word list {path}: {source}")]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown bundled word list {name} (available: {available})")]
    UnknownWordList { name: String, available: String },

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("unexpected output from typing test: {0}")]
    Protocol(String),

    #[error("unable to run typing test {exe}: {source}")]
    Launch {
        exe: String,
        #[source]
        source: std::io::Error,
    },
}

impl DrillError {
    /// Whether the feedback loop may carry on after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DrillError::Protocol(_))
    }
}

impl From<serde_json::Error> for DrillError {
    fn from(e: serde_json::Error) -> Self {
        DrillError::Protocol(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DrillError>;

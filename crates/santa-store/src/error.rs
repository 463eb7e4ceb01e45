use std::path::PathBuf;

use santa_core::SantaError;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("timestamp formatting failed: {0}")]
    Time(#[from] time::error::Format),
    #[error(transparent)]
    Core(#[from] SantaError),
    #[error("group not found: {0}")]
    GroupNotFound(String),
    #[error("participant {participant} is not in group {group}")]
    ParticipantNotFound { group: String, participant: String },
    #[error("assignments already generated for group {0}")]
    AlreadyGenerated(String),
    #[error("group {group} is full ({max} participants)")]
    GroupFull { group: String, max: usize },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("stored row out of range: {0}")]
    RowDecode(String),
}

impl StoreError {
    /// True when the caller can fix the request (missing group, full group,
    /// too few participants, ...). False for storage failures and core bugs.
    pub fn is_user_facing(&self) -> bool {
        match self {
            Self::Sqlite(_) | Self::Io { .. } | Self::Time(_) | Self::RowDecode(_) => false,
            Self::Core(e) => e.is_user_facing(),
            _ => true,
        }
    }
}

//! Sync error types.

use std::path::PathBuf;

use thiserror::Error;
use tierlist_model::ModelError;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Tier list not found: {0}")]
    UnknownSlug(String),

    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid tier list JSON in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to replace {target_path} with {temp_path}")]
    AtomicWrite {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backend refused the payload.
    #[error("Sync rejected: {0}")]
    Rejected(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, SyncError>;

//! Recoverable load errors.
//!
//! Nothing here is fatal to a running session: a malformed config falls
//! back to defaults and a malformed dictionary falls back to empty, with
//! the error reported to the caller for surfacing.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read dictionary {path}: {source}")]
    DictionaryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dictionary {path}: {source}")]
    DictionaryParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

//! src/error.rs
//! ============================================================================
//! # AppError: Unified Error Type for the Remote File Browser
//!
//! Every fallible operation in the crate returns `Result<T, AppError>`. The
//! protocol-level variants (`ListingFailed`, `Unauthorized`, `DeletionRejected`,
//! `LookupInconsistency`, `Transport`) each map to exactly one user-visible
//! notification; none of them terminate the process.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Unified error type for all file browser operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Network-level failure (DNS, connection refused, timeout), as opposed
    /// to an ordinary non-2xx HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The listing endpoint answered with a non-success envelope code.
    #[error("listing failed with code {code}: {raw}")]
    ListingFailed { code: i64, raw: String },

    /// The delete endpoint answered HTTP 401: token missing or invalid.
    #[error("delete of {path:?} refused: missing or invalid authorization")]
    Unauthorized { path: String },

    /// The delete endpoint answered with a non-success envelope code. Carries
    /// the raw body for diagnostics.
    #[error("deletion rejected with code {code}: {raw}")]
    DeletionRejected { code: i64, raw: String },

    /// The UI referenced an entry name absent from the current listing.
    #[error("entry {name:?} is not part of the current listing")]
    LookupInconsistency { name: String },

    /// Response body could not be parsed as the expected JSON shape.
    #[error("malformed response payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Standard IO error, auto-converted from `io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TOML config parsing error.
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Config/settings file I/O error with path.
    #[error("failed to read settings file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Async task failure or join error.
    #[error("async task failed: {0}")]
    Task(String),

    /// Any other error, with description.
    #[error("unexpected error: {0}")]
    Other(String),
}

// Allow conversion from `anyhow::Error` as fallback.
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Other(e.to_string())
    }
}

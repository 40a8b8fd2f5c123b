//! Error types.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures of an init run.
#[derive(Debug, Error)]
pub enum InitError {
    /// The previous config exists but could not be read.
    #[error("failed to read existing config {path}")]
    ReadExisting {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The previous config is not valid JSON of the expected shape.
    #[error("failed to parse existing config {path}")]
    ParseExisting {
        /// File that was being parsed.
        path: PathBuf,
        /// Parser error with line and column.
        #[source]
        source: serde_json::Error,
    },
    /// Rendering the new config failed.
    #[error("failed to serialize configuration")]
    Serialize(#[source] serde_json::Error),
    /// The new config could not be written.
    #[error("failed to write config {path}")]
    Write {
        /// Destination as given by the caller.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The `--env-file` could not be read or parsed.
    #[error("failed to load env file")]
    EnvFile(#[from] dotenvy::Error),
}

/// Reasons a connection string could not be split into its parts.
///
/// These never abort a run; the caller logs them and falls back to empty
/// database fields.
#[derive(Debug, Error)]
pub enum DsnError {
    /// Not a URL at all.
    #[error("invalid database URL")]
    InvalidUrl {
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// A part decoded to bytes that are not UTF-8.
    #[error("database URL {field} is not valid UTF-8 once percent-decoded")]
    InvalidEncoding {
        /// Which part failed to decode.
        field: &'static str,
    },
}

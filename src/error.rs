//! Error handling for ghdl.
//!
//! This module provides centralized error handling. The crate-level [`Error`]
//! is what escapes a pipeline run; the per-unit errors ([`FetchError`],
//! [`MatchError`], [`DownloadError`]) are caught at the boundary of the unit of
//! work that produced them, logged, and reduced to a status.

use reqwest::StatusCode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can escape a pipeline run.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration was rejected before any I/O happened.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The run observed an interrupt and stopped early.
    #[error("Interrupted by user")]
    Interrupted,

    /// Error from the Reqwest library, typically while building the client.
    #[error("HTTP client error: {source}")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },
}

/// A configuration that does not have the expected shape.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Not a valid config")]
    NotAnObject,

    #[error("\"{field}\" is required{context}")]
    Missing {
        field: &'static str,
        context: &'static str,
    },

    #[error("\"{field}\" must be {expected}, current value: \"{value}\"")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Not a valid repo config, current value: \"{0}\"")]
    InvalidRepo(String),

    #[error("\"{pattern}\" is not a valid regular expression: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to read the config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path:?} is not a valid json file: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to retrieve the latest release of one repository.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error {0}")]
    Status(StatusCode),

    #[error("request failed: {0}")]
    Network(#[from] reqwest_middleware::Error),

    #[error("failed to read response body: {0}")]
    Body(#[from] reqwest::Error),

    #[error("malformed release metadata: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    #[error("interrupted")]
    Interrupted,
}

/// Failure while deciding whether to queue one asset.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("{0:?} exists and is not a regular file")]
    NotARegularFile(PathBuf),

    #[error("failed to inspect {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure while downloading one asset.
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("missing or invalid Content-Length header: {0}")]
    ContentLength(String),

    #[error("HTTP error {0}")]
    Status(StatusCode),

    #[error("request failed: {0}")]
    Network(#[from] reqwest_middleware::Error),

    #[error("transfer failed: {0}")]
    Transfer(#[from] reqwest::Error),

    #[error("invalid token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("size mismatch: expected {expected} bytes, received {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    #[error("cancelled")]
    Cancelled,
}

/// Result type alias for operations that can fail with a ghdl error.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for logxlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a scan before it starts or abort reading a single file.
///
/// Problems found inside source text are never errors; they are recorded as
/// [`Diagnostic`](crate::Diagnostic)s and the scan carries on.
#[derive(Error, Debug)]
pub enum LogxError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Invalid call or wrapper pattern
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),
}

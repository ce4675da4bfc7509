//! Error handling for the driftkit library
//!
//! This module provides a unified error type for every fallible helper in the
//! crate: header lookups, buffer reordering preconditions, trimmed statistics
//! and the result-file writers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::writer::FileMode;

/// A specialized Result type for driftkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for driftkit operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Header parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed numeric input
    #[error("Parse error: {0}")]
    Parse(String),

    /// A required header key is absent
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A header key is present but its value cannot be used
    #[error("Invalid field {key}: {reason}")]
    InvalidField { key: String, reason: String },

    /// Buffer length does not cover the requested dimensions
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Too few samples left after trimming
    #[error("Insufficient samples: need at least {needed}, got {got}")]
    InsufficientSamples { needed: usize, got: usize },

    /// Bit width outside the supported range
    #[error("Unsupported width: {nbits} bits (maximum {max})")]
    UnsupportedWidth { nbits: u32, max: u32 },

    /// Routine is disabled until explicitly enabled by the caller
    #[error("Untested routine: {0}")]
    Untested(&'static str),

    /// Operation requires an open file handle
    #[error("File not open: {}", .0.display())]
    NotOpen(PathBuf),

    /// Handle is open in a mode that does not permit writing
    #[error("File {} not writable in mode {mode}", .path.display())]
    NotWritable { path: PathBuf, mode: FileMode },

    /// Handle is open in a mode that does not permit reading
    #[error("File {} not readable in mode {mode}", .path.display())]
    NotReadable { path: PathBuf, mode: FileMode },
}

// Helper constructors for common error scenarios

impl Error {
    /// Create a dimensions error with a custom message
    pub fn dimensions<S: Into<String>>(msg: S) -> Self {
        Error::InvalidDimensions(msg.into())
    }

    /// Create a parse error with a custom message
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a missing field error for a header key
    pub fn missing<S: Into<String>>(key: S) -> Self {
        Error::MissingField(key.into())
    }

    /// Create an invalid field error for a header key
    pub fn invalid_field<K: Into<String>, R: Into<String>>(key: K, reason: R) -> Self {
        Error::InvalidField {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_dimensions_constructor() {
        let err = Error::dimensions("6 x 3 exceeds 17");
        assert!(matches!(err, Error::InvalidDimensions(_)));
        assert_eq!(err.to_string(), "Invalid dimensions: 6 x 3 exceeds 17");
    }

    #[test]
    fn test_missing_field_display() {
        let err = Error::missing("DELTAF");
        assert_eq!(err.to_string(), "Missing required field: DELTAF");
    }

    #[test]
    fn test_not_writable_display() {
        let err = Error::NotWritable {
            path: PathBuf::from("hits.dat"),
            mode: FileMode::Read,
        };
        assert_eq!(err.to_string(), "File hits.dat not writable in mode r");
    }

    #[test]
    fn test_error_source() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.source().is_some());
        assert!(Error::Untested("bitrev32").source().is_none());
    }
}

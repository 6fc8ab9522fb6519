//! errors.rs - Custom error types for the textprobe-core library.
//!
//! One structured enum covers every failure an evaluation can report, from
//! missing object elements through per-file I/O problems.
//!
//! License: MIT OR APACHE 2.0

use std::path::PathBuf;
use thiserror::Error;

/// This enum represents all possible error types in the `textprobe-core` library.
///
/// Scope matters more than the variant: `MissingElement` aborts the evaluation
/// before any I/O, `PatternCompile` aborts it before any file is opened, and the
/// per-file variants (`Open`, `Read`, `Match`) only skip the file they name.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProbeError {
    #[error("Required object element '{0}' is missing")]
    MissingElement(&'static str),

    #[error("Failed to compile pattern '{pattern}' with the {backend} backend: {message}")]
    PatternCompile {
        pattern: String,
        backend: &'static str,
        message: String,
    },

    #[error("open(): '{}' {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read(): '{}' {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Matching failed in '{}': {message}", path.display())]
    Match { path: PathBuf, message: String },

    #[error("Failed to start file enumeration at '{root}': {message}")]
    EnumeratorStart { root: String, message: String },

    #[error("Failed to serialize collected object: {0}")]
    SerializationError(String),

    #[error("The {0} regex backend is not available in this build")]
    BackendUnavailable(&'static str),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),
}

impl ProbeError {
    /// Short label for the failure, used as the `kind` half of a per-file
    /// `{kind, message}` report.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::MissingElement(_) => "missing_element",
            ProbeError::PatternCompile { .. } => "compile",
            ProbeError::Open { .. } => "open",
            ProbeError::Read { .. } => "read",
            ProbeError::Match { .. } => "match",
            ProbeError::EnumeratorStart { .. } => "enumerator_start",
            ProbeError::SerializationError(_) => "serialization",
            ProbeError::BackendUnavailable(_) => "backend_unavailable",
            ProbeError::IoError(_) => "io",
            ProbeError::AnyhowWrapper(_) => "system",
        }
    }

    /// Whether the error ends the whole evaluation rather than a single file.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ProbeError::Open { .. } | ProbeError::Read { .. } | ProbeError::Match { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_file_errors_are_not_fatal() {
        let err = ProbeError::Open {
            path: PathBuf::from("/nope/file"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(err.kind(), "open");
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "open(): '/nope/file' No such file or directory");
    }

    #[test]
    fn test_missing_element_is_fatal() {
        let err = ProbeError::MissingElement("pattern");
        assert!(err.is_fatal());
        assert_eq!(err.kind(), "missing_element");
    }
}

// textprobe-core/src/enumerator.rs
//! The seam between the probe and whatever produces candidate files.
//!
//! A host plugs its own directory walker in through [`FileEnumerator`].
//! [`LiteralEnumerator`] covers the common case of a literal location and does
//! no recursion.
//!
//! License: MIT OR APACHE 2.0

use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::{Behaviors, FileTarget, RecurseDirection};
use crate::errors::ProbeError;
use crate::item::FILE_SEPARATOR;
use crate::scanner::join_path;

/// One candidate file, as a directory and a file name inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub filename: String,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            filename: filename.into(),
        }
    }
}

/// A lazy, finite, single-pass sequence of candidate files.
pub type FileEntries<'a> = Box<dyn Iterator<Item = FileEntry> + 'a>;

/// Produces the candidate files for a target under the given behaviors.
pub trait FileEnumerator {
    /// Starts enumeration. An `Err` means enumeration could not start at all
    /// (for instance an invalid root), as opposed to an empty sequence.
    fn open<'a>(
        &'a self,
        target: &FileTarget,
        behaviors: &Behaviors,
    ) -> Result<FileEntries<'a>, ProbeError>;
}

/// Splits a full path at its last separator.
///
/// A file directly under the root keeps the root as its path; a bare name
/// is taken relative to the current directory.
pub fn split_filepath(filepath: &str) -> (String, String) {
    match filepath.rsplit_once(FILE_SEPARATOR) {
        Some(("", filename)) => (FILE_SEPARATOR.to_string(), filename.to_string()),
        Some((path, filename)) => (path.to_string(), filename.to_string()),
        None => (".".to_string(), filepath.to_string()),
    }
}

/// Resolves literal `filepath` or `path` + `filename` targets without recursion.
///
/// Yields the single named file when it exists and is a regular file, and
/// nothing otherwise. A `path` root that is missing or not a directory fails
/// to start.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiteralEnumerator;

impl LiteralEnumerator {
    pub fn new() -> Self {
        Self
    }
}

impl FileEnumerator for LiteralEnumerator {
    fn open<'a>(
        &'a self,
        target: &FileTarget,
        behaviors: &Behaviors,
    ) -> Result<FileEntries<'a>, ProbeError> {
        if behaviors.recurse_direction != RecurseDirection::None {
            warn!(
                "Recursion '{:?}' requested but the literal enumerator does not recurse.",
                behaviors.recurse_direction
            );
        }

        let entry = match target {
            FileTarget::Filepath(filepath) => {
                if filepath.is_empty() || filepath.ends_with(FILE_SEPARATOR) {
                    return Err(ProbeError::EnumeratorStart {
                        root: filepath.clone(),
                        message: "filepath does not name a file".to_string(),
                    });
                }
                let (path, filename) = split_filepath(filepath);
                FileEntry::new(path, filename)
            }
            FileTarget::PathAndFilename { path, filename } => {
                if path.is_empty() {
                    return Err(ProbeError::EnumeratorStart {
                        root: path.clone(),
                        message: "empty path".to_string(),
                    });
                }
                let root = Path::new(path);
                if !root.is_dir() {
                    let message = if root.exists() {
                        "not a directory"
                    } else {
                        "no such directory"
                    };
                    return Err(ProbeError::EnumeratorStart {
                        root: path.clone(),
                        message: message.to_string(),
                    });
                }
                FileEntry::new(path.clone(), filename.clone())
            }
        };

        let full_path = join_path(&entry.path, &entry.filename);
        if Path::new(&full_path).is_file() {
            debug!("Literal enumerator found '{}'", full_path);
            Ok(Box::new(std::iter::once(entry)))
        } else {
            debug!("Literal enumerator: '{}' does not exist", full_path);
            Ok(Box::new(std::iter::empty()))
        }
    }
}

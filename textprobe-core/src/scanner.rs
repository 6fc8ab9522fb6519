// textprobe-core/src/scanner.rs
//! Per-file scanning.
//!
//! A file is read fully into memory, then the compiled pattern is run over it
//! until it stops matching. Every match is counted so instance numbers stay
//! correct, but captures are only extracted for the ordinals the selector wants.
//!
//! License: MIT OR APACHE 2.0

use std::fs::File;
use std::path::PathBuf;

use log::{debug, warn};

use crate::buffer::{ContentBuffer, DEFAULT_CHUNK_SIZE};
use crate::engine::{Exec, MatchCursor, Pattern};
use crate::errors::ProbeError;
use crate::instance::InstanceSelector;
use crate::item::{build_item, log_captured_match_debug, TextFileContentItem, FILE_SEPARATOR};

/// Joins a directory and a file name with exactly one separator between them.
///
/// An empty `path` leaves `filename` untouched.
pub fn join_path(path: &str, filename: &str) -> String {
    if path.is_empty() {
        filename.to_string()
    } else if path.ends_with(FILE_SEPARATOR) {
        format!("{}{}", path, filename)
    } else {
        format!("{}{}{}", path, FILE_SEPARATOR, filename)
    }
}

/// The result of scanning one file.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Items for the wanted matches, in match order.
    pub items: Vec<TextFileContentItem>,
    /// Total number of matches seen, wanted or not.
    pub matches: u32,
    /// The failure that ended this file early, if any.
    pub error: Option<ProbeError>,
}

impl ScanOutcome {
    fn failed(error: ProbeError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The `{kind, message}` pair for the error, if any.
    pub fn error_report(&self) -> Option<(&'static str, String)> {
        self.error.as_ref().map(|e| (e.kind(), e.to_string()))
    }
}

/// Scans files with one shared pattern and instance selector.
pub struct FileScanner<'a> {
    pattern: &'a Pattern,
    selector: &'a dyn InstanceSelector,
    chunk_size: usize,
}

impl<'a> FileScanner<'a> {
    pub fn new(pattern: &'a Pattern, selector: &'a dyn InstanceSelector) -> Self {
        Self {
            pattern,
            selector,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Opens, reads and scans `path`/`filename`.
    ///
    /// Open and read failures are returned in the outcome; they never affect
    /// other files. The file handle is closed before scanning starts.
    pub fn process_file(&self, path: &str, filename: &str) -> ScanOutcome {
        let whole_path = join_path(path, filename);
        debug!("Processing file '{}'", whole_path);

        let buffer = {
            let mut file = match File::open(&whole_path) {
                Ok(file) => file,
                Err(source) => {
                    return ScanOutcome::failed(ProbeError::Open {
                        path: PathBuf::from(whole_path),
                        source,
                    })
                }
            };
            match ContentBuffer::read_from(&mut file, self.chunk_size) {
                Ok(buffer) => buffer,
                Err(source) => {
                    return ScanOutcome::failed(ProbeError::Read {
                        path: PathBuf::from(whole_path),
                        source,
                    })
                }
            }
        };

        if buffer.haystack().len() < buffer.len() {
            debug!(
                "'{}' contains a NUL byte at offset {}; scanning stops there.",
                whole_path,
                buffer.haystack().len()
            );
        }
        self.scan_buffer(path, filename, buffer.haystack())
    }

    /// Runs the exhaustive match loop over an in-memory haystack.
    pub fn scan_buffer(&self, path: &str, filename: &str, haystack: &[u8]) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        let mut cursor = MatchCursor::new();
        let mut ordinal: u32 = 0;

        loop {
            let Some(candidate) = ordinal.checked_add(1) else {
                outcome.error = Some(ProbeError::Match {
                    path: PathBuf::from(join_path(path, filename)),
                    message: "instance counter overflow".to_string(),
                });
                break;
            };
            let wanted = self.selector.wants(candidate);

            match self.pattern.exec_next(haystack, &mut cursor, wanted) {
                Ok(Exec::NoMatch) => break,
                Ok(Exec::Matched(captures)) => {
                    ordinal = candidate;
                    if let Some(captures) = captures {
                        let item = build_item(path, filename, self.pattern.as_str(), ordinal, &captures);
                        log_captured_match_debug(&item.filepath, ordinal, &item.text, item.subexpression.len());
                        outcome.items.push(item);
                    }
                }
                Err(e) => {
                    warn!(
                        "Matching stopped in '{}' after {} instance(s): {}",
                        join_path(path, filename),
                        ordinal,
                        e
                    );
                    outcome.error = Some(ProbeError::Match {
                        path: PathBuf::from(join_path(path, filename)),
                        message: e.to_string(),
                    });
                    break;
                }
            }
        }

        outcome.matches = ordinal;
        debug!(
            "Finished '{}': {} match(es), {} item(s)",
            join_path(path, filename),
            outcome.matches,
            outcome.items.len()
        );
        outcome
    }
}

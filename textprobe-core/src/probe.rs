// textprobe-core/src/probe.rs
//! Evaluation entry points.
//!
//! `probe_main` resolves the object, compiles the pattern once, walks the
//! enumerator and scans each candidate file in order, collecting items and
//! diagnostics into a [`CollectedObject`].

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::{ProbeObject, ProbeOptions, ResolvedObject};
use crate::engine::Pattern;
use crate::enumerator::{FileEnumerator, LiteralEnumerator};
use crate::errors::ProbeError;
use crate::item::TextFileContentItem;
use crate::scanner::FileScanner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// A diagnostic attached to the collected object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub level: MessageLevel,
    pub text: String,
}

/// Collection-level status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionFlag {
    #[default]
    Complete,
    /// The evaluation could not run to completion at the system level.
    Error,
}

/// Everything one evaluation produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedObject {
    pub flag: CollectionFlag,
    pub items: Vec<TextFileContentItem>,
    pub messages: Vec<Message>,
}

impl CollectedObject {
    pub fn add_message(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.messages.push(Message {
            level,
            text: text.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.flag == CollectionFlag::Error
            || self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }

    pub fn to_json_pretty(&self) -> Result<String, ProbeError> {
        serde_json::to_string_pretty(self).map_err(|e| ProbeError::SerializationError(e.to_string()))
    }

    fn fail(&mut self, err: &ProbeError) {
        self.add_message(MessageLevel::Error, err.to_string());
        self.flag = CollectionFlag::Error;
    }
}

/// Evaluates one probe object.
///
/// Returns `Err` only for problems detected before any I/O: a missing required
/// element or an unavailable backend. A pattern that fails to compile, or an
/// enumerator that cannot start, yields a collected object flagged `Error` with
/// a single error message. Per-file failures add an error message and the
/// remaining files are still scanned.
pub fn probe_main(
    object: &ProbeObject,
    enumerator: &dyn FileEnumerator,
    options: &ProbeOptions,
) -> Result<CollectedObject, ProbeError> {
    let resolved = object.resolve()?;
    probe_resolved(&resolved, enumerator, options)
}

/// Same as [`probe_main`] for an already resolved object.
pub fn probe_resolved(
    resolved: &ResolvedObject,
    enumerator: &dyn FileEnumerator,
    options: &ProbeOptions,
) -> Result<CollectedObject, ProbeError> {
    info!(
        "Starting evaluation of pattern '{}' on '{}' with backend {}.",
        resolved.pattern,
        resolved.target.root(),
        options.backend
    );
    let mut collected = CollectedObject::default();

    let pattern = match Pattern::compile_with(
        &resolved.pattern,
        resolved.behaviors.pattern_flags(),
        options.backend,
    ) {
        Ok(pattern) => pattern,
        Err(err @ ProbeError::PatternCompile { .. }) => {
            error!("{}", err);
            collected.fail(&err);
            return Ok(collected);
        }
        Err(err) => return Err(err),
    };

    let scanner = FileScanner::new(&pattern, &resolved.instance)
        .with_chunk_size(options.read_chunk_size);

    let entries = match enumerator.open(&resolved.target, &resolved.behaviors) {
        Ok(entries) => entries,
        Err(err) => {
            error!("{}", err);
            collected.fail(&err);
            return Ok(collected);
        }
    };

    let mut files = 0usize;
    for entry in entries {
        files += 1;
        let outcome = scanner.process_file(&entry.path, &entry.filename);
        collected.items.extend(outcome.items);
        if let Some(err) = outcome.error {
            warn!("Skipping rest of '{}/{}': {}", entry.path, entry.filename, err);
            collected.add_message(MessageLevel::Error, err.to_string());
        }
    }

    info!(
        "Evaluation finished: {} file(s), {} item(s), {} message(s).",
        files,
        collected.items.len(),
        collected.messages.len()
    );
    Ok(collected)
}

/// Evaluates an object against literal locations only, with no recursion.
pub fn probe_literal(object: &ProbeObject, options: &ProbeOptions) -> Result<CollectedObject, ProbeError> {
    probe_main(object, &LiteralEnumerator::new(), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::InstanceEntity;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_probe_literal_scenario() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("data"), "abc123def456")?;
        let object = ProbeObject {
            path: Some(dir.path().to_string_lossy().into_owned()),
            filename: Some("data".to_string()),
            pattern: Some("[0-9]+".to_string()),
            instance: Some(InstanceEntity::equals(2)),
            ..ProbeObject::default()
        };

        let collected = probe_literal(&object, &ProbeOptions::default())?;
        assert_eq!(collected.flag, CollectionFlag::Complete);
        assert_eq!(collected.items.len(), 1);
        assert_eq!(collected.items[0].text, "456");
        assert_eq!(collected.items[0].instance, 2);
        assert!(collected.messages.is_empty());
        Ok(())
    }

    #[test]
    fn test_compile_error_yields_single_message() -> anyhow::Result<()> {
        let object = ProbeObject {
            filepath: Some("/nonexistent/file".to_string()),
            pattern: Some("(".to_string()),
            instance: Some(InstanceEntity::equals(1)),
            ..ProbeObject::default()
        };
        let collected = probe_literal(&object, &ProbeOptions::default())?;
        assert!(collected.items.is_empty());
        assert_eq!(collected.flag, CollectionFlag::Error);
        assert_eq!(collected.messages.len(), 1);
        assert_eq!(collected.messages[0].level, MessageLevel::Error);
        Ok(())
    }

    #[test]
    fn test_serialized_shape() {
        let mut collected = CollectedObject::default();
        collected.add_message(MessageLevel::Warning, "careful");
        let value = serde_json::to_value(&collected).unwrap();
        assert_eq!(value["flag"], "complete");
        assert_eq!(value["messages"][0]["level"], "warning");
        assert!(!collected.has_errors());
    }
}

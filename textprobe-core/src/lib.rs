// textprobe-core/src/lib.rs
//! # textprobe Core Library
//!
//! `textprobe-core` evaluates text-file-content objects: given a file location,
//! a regular expression and an instance selector, it scans each candidate file
//! for every occurrence of the pattern and reports the selected occurrences,
//! with their capture groups, as structured items.
//!
//! ## Modules
//!
//! * `engine`: The `MatchEngine` trait, the compiled `Pattern` and its match cursor.
//! * `engines`: Concrete backends (`regex` always, `pcre2` behind a cargo feature).
//! * `instance`: The `InstanceSelector` trait and the `InstanceEntity` comparison object.
//! * `item`: The `TextFileContentItem` record and the item builder.
//! * `buffer`: Chunked reading of file content into a terminated buffer.
//! * `scanner`: Per-file open, read and exhaustive match loop.
//! * `config`: The probe object, behaviors and engine options.
//! * `enumerator`: The `FileEnumerator` seam and a literal, non-recursive enumerator.
//! * `probe`: Evaluation entry points and the `CollectedObject` result.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use textprobe_core::{probe_literal, InstanceEntity, ProbeObject, ProbeOptions};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let object = ProbeObject {
//!         filepath: Some("/etc/ssh/sshd_config".to_string()),
//!         pattern: Some(r"^\s*PermitRootLogin\s+(\S+)".to_string()),
//!         instance: Some(InstanceEntity::greater_than_or_equal(1)),
//!         ..ProbeObject::default()
//!     };
//!
//!     let collected = probe_literal(&object, &ProbeOptions::default())?;
//!     for item in &collected.items {
//!         println!("{} #{}: {:?}", item.filepath, item.instance, item.subexpression);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`ProbeError`]. Only failures detected before any
//! I/O are returned as `Err`; everything else becomes a message on the
//! [`CollectedObject`].
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod buffer;
pub mod config;
pub mod engine;
pub mod engines;
pub mod enumerator;
pub mod errors;
pub mod instance;
pub mod item;
pub mod probe;
pub mod scanner;

/// Re-exports the probe object and option types.
pub use config::{
    Behaviors,
    BehaviorsInput,
    FileTarget,
    ProbeObject,
    ProbeOptions,
    RecurseDirection,
    ResolvedObject,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::ProbeError;

/// Re-exports the backend-neutral matching API.
pub use engine::{Backend, Captures, Exec, MatchCursor, MatchEngine, Pattern, PatternFlags, MAX_CAPTURE_SLOTS};

pub use instance::{InstanceEntity, InstanceSelector, Operation, VarCheck};
pub use item::{build_item, TextFileContentItem};
pub use buffer::ContentBuffer;
pub use scanner::{join_path, FileScanner, ScanOutcome};
pub use enumerator::{FileEntries, FileEntry, FileEnumerator, LiteralEnumerator};

/// Re-exports the evaluation entry points and result types.
pub use probe::{
    probe_literal,
    probe_main,
    probe_resolved,
    CollectedObject,
    CollectionFlag,
    Message,
    MessageLevel,
};

// textprobe-core/src/engine.rs
//! Defines the `MatchEngine` trait and the backend-neutral `Pattern` built on it.
//!
//! Two regular-expression libraries can sit behind the trait (the `regex` crate
//! and, with the `pcre2` cargo feature, PCRE2). Everything above this module
//! talks to a compiled [`Pattern`] only, so the scanner never sees a
//! backend-specific type.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engines;
use crate::errors::ProbeError;

/// Maximum number of capture slots (whole match included) reported per match.
///
/// Groups past this limit are silently dropped rather than reported as an error.
pub const MAX_CAPTURE_SLOTS: usize = 20;

/// Byte offsets `(start, end)` of a match or group inside the scanned buffer.
pub type Span = (usize, usize);

/// A failure raised by a backend while executing an already compiled pattern.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ExecError(pub String);

/// The regular-expression library a [`Pattern`] is compiled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// The `regex` crate, always compiled in.
    Regex,
    /// PCRE2 through the `pcre2` crate. Requires the `pcre2` cargo feature.
    Pcre2,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Regex => "regex",
            Backend::Pcre2 => "pcre2",
        }
    }

    /// Whether this build carries an implementation for the backend.
    pub fn is_available(&self) -> bool {
        match self {
            Backend::Regex => true,
            Backend::Pcre2 => cfg!(feature = "pcre2"),
        }
    }
}

/// The build-time choice: PCRE2 when the `pcre2` feature is enabled, otherwise `regex`.
impl Default for Backend {
    fn default() -> Self {
        if cfg!(feature = "pcre2") {
            Backend::Pcre2
        } else {
            Backend::Regex
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compile-time options applied to a pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternFlags {
    pub case_insensitive: bool,
    /// `^` and `$` match at line boundaries.
    pub multiline: bool,
    /// `.` also matches a newline.
    pub dotall: bool,
}

/// A trait implemented by every regex backend.
///
/// Implementations only report spans; cursor bookkeeping and text extraction
/// live in [`Pattern`] so both backends iterate identically.
pub trait MatchEngine: Send + Sync + fmt::Debug {
    fn backend(&self) -> Backend;

    /// Finds the leftmost match starting at or after `start`.
    ///
    /// Used when the caller only needs to know that a match exists, so no
    /// capture storage is allocated.
    fn find_at(&self, haystack: &[u8], start: usize) -> Result<Option<Span>, ExecError>;

    /// Finds the leftmost match starting at or after `start` and returns the
    /// span of the whole match followed by every group in declaration order,
    /// `None` marking a group that did not participate.
    ///
    /// At most [`MAX_CAPTURE_SLOTS`] entries are returned.
    fn captures_at(
        &self,
        haystack: &[u8],
        start: usize,
    ) -> Result<Option<Vec<Option<Span>>>, ExecError>;
}

/// Monotonic offset into a file's buffer where the next match attempt begins.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MatchCursor {
    offset: usize,
}

impl MatchCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Moves the cursor past a match ending at `match_end`.
    ///
    /// A match ending exactly where the previous attempt started (a zero-length
    /// match at the cursor) moves the cursor one byte forward instead, so the
    /// next attempt always starts further along.
    pub fn advance(&mut self, match_end: usize) {
        self.offset = if match_end == self.offset {
            match_end + 1
        } else {
            match_end
        };
    }
}

/// Text of one successful match: the whole match followed by every
/// participating group, in group order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captures {
    groups: Vec<String>,
}

impl Captures {
    /// The whole match.
    pub fn text(&self) -> &str {
        self.groups.first().map(String::as_str).unwrap_or_default()
    }

    /// Participating groups 1.., non-participating ones already omitted.
    pub fn subexpressions(&self) -> &[String] {
        self.groups.get(1..).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Outcome of one match attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exec {
    NoMatch,
    /// A match was found; captures are present only when they were requested.
    Matched(Option<Captures>),
}

/// A compiled pattern, created once per evaluation and shared read-only by
/// every file scan.
#[derive(Debug)]
pub struct Pattern {
    text: String,
    flags: PatternFlags,
    engine: Box<dyn MatchEngine>,
}

impl Pattern {
    /// Compiles `text` with the build's default backend.
    pub fn compile(text: &str, flags: PatternFlags) -> Result<Self, ProbeError> {
        Self::compile_with(text, flags, Backend::default())
    }

    pub fn compile_with(
        text: &str,
        flags: PatternFlags,
        backend: Backend,
    ) -> Result<Self, ProbeError> {
        debug!(
            "Compiling pattern '{}' with backend {} and flags {:?}",
            text, backend, flags
        );
        let engine = engines::compile_engine(text, flags, backend)?;
        Ok(Self {
            text: text.to_string(),
            flags,
            engine,
        })
    }

    /// The pattern source exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    pub fn backend(&self) -> Backend {
        self.engine.backend()
    }

    /// Attempts the next match at `cursor`, advancing it on success.
    ///
    /// With `want_captures` false only existence is checked and the result is
    /// `Exec::Matched(None)`. A cursor already past the end of the buffer
    /// yields `Exec::NoMatch`.
    pub fn exec_next(
        &self,
        haystack: &[u8],
        cursor: &mut MatchCursor,
        want_captures: bool,
    ) -> Result<Exec, ExecError> {
        let start = cursor.offset();
        if start > haystack.len() {
            return Ok(Exec::NoMatch);
        }

        if !want_captures {
            return match self.engine.find_at(haystack, start)? {
                None => Ok(Exec::NoMatch),
                Some((_, end)) => {
                    cursor.advance(end);
                    Ok(Exec::Matched(None))
                }
            };
        }

        let Some(spans) = self.engine.captures_at(haystack, start)? else {
            return Ok(Exec::NoMatch);
        };
        let (_, end) = spans
            .first()
            .copied()
            .flatten()
            .ok_or_else(|| ExecError("backend reported a match without a whole-match span".to_string()))?;
        cursor.advance(end);

        let groups = spans
            .iter()
            .flatten()
            .map(|&(s, e)| String::from_utf8_lossy(&haystack[s..e]).into_owned())
            .collect();
        Ok(Exec::Matched(Some(Captures { groups })))
    }
}

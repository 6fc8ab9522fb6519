// textprobe-core/src/engines/pcre2_engine.rs
//! A `MatchEngine` implementation on top of PCRE2.
//!
//! Patterns are compiled in UTF mode. PCRE2 refuses to start a match inside a
//! multi-byte character, so a start offset that lands on a continuation byte
//! is moved forward to the next character boundary first. Content that is not
//! valid UTF-8 makes every match attempt fail with an `ExecError`.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;

use log::debug;
use pcre2::bytes::{Regex, RegexBuilder};

use crate::engine::{Backend, ExecError, MatchEngine, PatternFlags, Span, MAX_CAPTURE_SLOTS};
use crate::errors::ProbeError;

pub struct Pcre2Engine {
    regex: Regex,
}

impl fmt::Debug for Pcre2Engine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Pcre2Engine")
            .field("pattern", &self.regex.as_str())
            .finish()
    }
}

impl Pcre2Engine {
    pub fn compile(pattern: &str, flags: PatternFlags) -> Result<Self, ProbeError> {
        let regex = RegexBuilder::new()
            .utf(true)
            .caseless(flags.case_insensitive)
            .multi_line(flags.multiline)
            .dotall(flags.dotall)
            .jit_if_available(true)
            .build(pattern)
            .map_err(|e| ProbeError::PatternCompile {
                pattern: pattern.to_string(),
                backend: Backend::Pcre2.name(),
                message: e.to_string(),
            })?;

        debug!(
            target: "textprobe_core::engine",
            "Pattern '{}' compiled with {} capture slots.",
            pattern,
            regex.captures_len()
        );
        Ok(Self { regex })
    }
}

fn char_boundary_at_or_after(haystack: &[u8], mut start: usize) -> usize {
    while start < haystack.len() && (haystack[start] & 0xC0) == 0x80 {
        start += 1;
    }
    start
}

impl MatchEngine for Pcre2Engine {
    fn backend(&self) -> Backend {
        Backend::Pcre2
    }

    fn find_at(&self, haystack: &[u8], start: usize) -> Result<Option<Span>, ExecError> {
        let start = char_boundary_at_or_after(haystack, start);
        self.regex
            .find_at(haystack, start)
            .map(|m| m.map(|m| (m.start(), m.end())))
            .map_err(|e| ExecError(e.to_string()))
    }

    fn captures_at(
        &self,
        haystack: &[u8],
        start: usize,
    ) -> Result<Option<Vec<Option<Span>>>, ExecError> {
        let start = char_boundary_at_or_after(haystack, start);
        let mut locs = self.regex.capture_locations();
        let found = self
            .regex
            .captures_read_at(&mut locs, haystack, start)
            .map_err(|e| ExecError(e.to_string()))?;
        if found.is_none() {
            return Ok(None);
        }
        let slots = locs.len().min(MAX_CAPTURE_SLOTS);
        Ok(Some((0..slots).map(|i| locs.get(i)).collect()))
    }
}

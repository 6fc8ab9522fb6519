// textprobe-core/src/engines/regex_engine.rs
//! A `MatchEngine` implementation on top of the `regex` crate.
//!
//! Uses the byte-oriented API so file content that is not valid UTF-8 can still
//! be scanned; group text is converted lossily when it is materialized.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::bytes::{Regex, RegexBuilder};

use crate::engine::{Backend, ExecError, MatchEngine, PatternFlags, Span, MAX_CAPTURE_SLOTS};
use crate::errors::ProbeError;

/// Upper bound on the compiled program size.
pub const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

#[derive(Debug)]
pub struct RegexEngine {
    regex: Regex,
}

impl RegexEngine {
    pub fn compile(pattern: &str, flags: PatternFlags) -> Result<Self, ProbeError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(flags.case_insensitive)
            .multi_line(flags.multiline)
            .dot_matches_new_line(flags.dotall)
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
            .map_err(|e| ProbeError::PatternCompile {
                pattern: pattern.to_string(),
                backend: Backend::Regex.name(),
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

impl MatchEngine for RegexEngine {
    fn backend(&self) -> Backend {
        Backend::Regex
    }

    fn find_at(&self, haystack: &[u8], start: usize) -> Result<Option<Span>, ExecError> {
        Ok(self.regex.find_at(haystack, start).map(|m| (m.start(), m.end())))
    }

    fn captures_at(
        &self,
        haystack: &[u8],
        start: usize,
    ) -> Result<Option<Vec<Option<Span>>>, ExecError> {
        let mut locs = self.regex.capture_locations();
        if self.regex.captures_read_at(&mut locs, haystack, start).is_none() {
            return Ok(None);
        }
        let slots = locs.len().min(MAX_CAPTURE_SLOTS);
        Ok(Some((0..slots).map(|i| locs.get(i)).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_at_respects_start() {
        let engine = RegexEngine::compile("[0-9]+", PatternFlags::default()).unwrap();
        assert_eq!(engine.find_at(b"12 34", 0).unwrap(), Some((0, 2)));
        assert_eq!(engine.find_at(b"12 34", 2).unwrap(), Some((3, 5)));
        assert_eq!(engine.find_at(b"12 34", 5).unwrap(), None);
    }

    #[test]
    fn test_captures_at_reports_unset_groups() {
        let engine = RegexEngine::compile("(x)?(y)", PatternFlags::default()).unwrap();
        let spans = engine.captures_at(b"ay", 0).unwrap().unwrap();
        assert_eq!(spans, vec![Some((1, 2)), None, Some((1, 2))]);
    }

    #[test]
    fn test_dotall_flag() {
        let plain = RegexEngine::compile("a.b", PatternFlags::default()).unwrap();
        assert_eq!(plain.find_at(b"a\nb", 0).unwrap(), None);

        let dotall = PatternFlags { dotall: true, ..PatternFlags::default() };
        let engine = RegexEngine::compile("a.b", dotall).unwrap();
        assert_eq!(engine.find_at(b"a\nb", 0).unwrap(), Some((0, 3)));
    }

    #[test]
    fn test_invalid_utf8_haystack_is_scanned() {
        let engine = RegexEngine::compile("ok", PatternFlags::default()).unwrap();
        assert_eq!(engine.find_at(b"\xff\xfeok", 0).unwrap(), Some((2, 4)));
    }

    #[test]
    fn test_compile_error_names_backend() {
        match RegexEngine::compile("(", PatternFlags::default()) {
            Err(ProbeError::PatternCompile { backend, pattern, .. }) => {
                assert_eq!(backend, "regex");
                assert_eq!(pattern, "(");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

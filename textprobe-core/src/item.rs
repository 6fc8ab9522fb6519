// textprobe-core/src/item.rs
//! The result record produced for every wanted match, and the helpers that log
//! matched content without leaking it.

use serde::{Deserialize, Serialize};
use log::debug;

use lazy_static::lazy_static;

use crate::engine::Captures;

/// Separator inserted between `path` and `filename`.
pub const FILE_SEPARATOR: char = '/';

lazy_static! {
    /// A static boolean that is initialized once to determine if matched text is allowed in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("TEXTPROBE_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// One `textfilecontent_item`: a single wanted match inside one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TextFileContentItem {
    pub path: String,
    pub filename: String,
    pub filepath: String,
    pub pattern: String,
    pub instance: u32,
    /// Carries the pattern text, not a line of the file. Kept as-is for
    /// compatibility with existing consumers of these items.
    pub line: String,
    pub text: String,
    #[serde(default)]
    pub subexpression: Vec<String>,
}

/// Assembles an item from a wanted match. No validation is performed.
pub fn build_item(
    path: &str,
    filename: &str,
    pattern: &str,
    ordinal: u32,
    captures: &Captures,
) -> TextFileContentItem {
    TextFileContentItem {
        path: path.to_string(),
        filename: filename.to_string(),
        filepath: format!("{}{}{}", path, FILE_SEPARATOR, filename),
        pattern: pattern.to_string(),
        instance: ordinal,
        line: pattern.to_string(),
        text: captures.text().to_string(),
        subexpression: captures.subexpressions().to_vec(),
    }
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_captured_match_debug(filepath: &str, ordinal: u32, matched_text: &str, groups: usize) {
    debug!(
        "Captured instance {} in '{}': text='{}', {} subexpression(s)",
        ordinal,
        filepath,
        get_loggable_content(matched_text),
        groups
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Backend, Exec, MatchCursor, Pattern, PatternFlags};

    fn first_captures(pattern: &str, haystack: &str) -> Captures {
        let pattern = Pattern::compile_with(pattern, PatternFlags::default(), Backend::Regex).unwrap();
        let mut cursor = MatchCursor::new();
        match pattern.exec_next(haystack.as_bytes(), &mut cursor, true).unwrap() {
            Exec::Matched(Some(caps)) => caps,
            other => panic!("expected a match, got {:?}", other),
        }
    }

    #[test]
    fn test_build_item_fields() {
        let caps = first_captures(r"(\w+)=(\d+)", "key=42");
        let item = build_item("/etc", "app.conf", r"(\w+)=(\d+)", 1, &caps);
        assert_eq!(item.path, "/etc");
        assert_eq!(item.filename, "app.conf");
        assert_eq!(item.filepath, "/etc/app.conf");
        assert_eq!(item.instance, 1);
        assert_eq!(item.text, "key=42");
        assert_eq!(item.subexpression, vec!["key".to_string(), "42".to_string()]);
    }

    #[test]
    fn test_line_is_pattern_text() {
        let pattern = r"^\s*PermitRootLogin\s+(\S+)";
        let caps = first_captures(pattern, "PermitRootLogin no");
        let item = build_item("/etc/ssh", "sshd_config", pattern, 1, &caps);
        assert_eq!(item.line, pattern);
        assert_eq!(item.pattern, pattern);
    }

    #[test]
    fn test_filepath_always_inserts_separator() {
        let caps = first_captures("a", "a");
        let item = build_item("/", "x", "a", 1, &caps);
        assert_eq!(item.filepath, "//x");
    }

    #[test]
    fn test_redact_sensitive_short_string() {
        assert_eq!(redact_sensitive("abc"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_redact_sensitive_long_string() {
        assert_eq!(redact_sensitive("123456789"), "[REDACTED: 9 chars]".to_string());
    }
}

//! Malicious code pattern definitions
//!
//! A pattern list is plain text with one code per line. Patterns are matched
//! literally, byte for byte.

use std::borrow::Cow;

use log::warn;
use serde::{Deserialize, Serialize};

/// A named malicious code pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    /// Identifier used in reports (source and line number for loaded lists)
    pub name: String,
    /// The code to search for, as raw bytes
    pub code: Vec<u8>,
}

impl Pattern {
    pub fn new(name: impl Into<String>, code: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }

    /// The code as text, with invalid UTF-8 replaced.
    pub fn code_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.code)
    }
}

/// Parse a pattern list.
///
/// Each non-blank line becomes one pattern named `<source>:<line>`. Trailing
/// carriage returns are stripped; blank lines are skipped because an empty
/// pattern cannot be searched for.
///
/// # Arguments
///
/// * `source` - Name of the list (usually its file name)
/// * `content` - Raw list content; bytes are kept as they are
///
/// # Returns
///
/// Patterns in file order
pub fn parse_patterns(source: &str, content: &[u8]) -> Vec<Pattern> {
    let mut patterns = Vec::new();

    let content = content.strip_suffix(b"\n").unwrap_or(content);
    if content.is_empty() {
        return patterns;
    }

    for (index, line) in content.split(|&b| b == b'\n').enumerate() {
        let code = line.strip_suffix(b"\r").unwrap_or(line);
        if code.is_empty() {
            warn!("Skipping blank pattern at {}:{}", source, index + 1);
            continue;
        }
        patterns.push(Pattern::new(format!("{}:{}", source, index + 1), code));
    }

    patterns
}

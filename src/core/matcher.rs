//! Exact pattern matching (Knuth-Morris-Pratt)
//!
//! Patterns are matched byte by byte; offsets in the results are byte offsets
//! into the scanned text. Matches may overlap.

use crate::core::lps::build_failure_table;

/// Error raised for patterns the matcher cannot search for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

/// A pattern with its precomputed failure table.
///
/// Build one per pattern and reuse it across every transmission that has to be
/// scanned for it.
#[derive(Debug, Clone)]
pub struct Matcher<'p> {
    pattern: &'p [u8],
    table: Vec<usize>,
}

impl<'p> Matcher<'p> {
    /// Prepare a matcher for a non-empty pattern.
    pub fn new(pattern: &'p [u8]) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::InvalidPattern(
                "pattern must not be empty".to_string(),
            ));
        }

        Ok(Self {
            pattern,
            table: build_failure_table(pattern),
        })
    }

    /// The pattern this matcher searches for.
    pub fn pattern(&self) -> &'p [u8] {
        self.pattern
    }

    /// Start offsets of every occurrence of the pattern in `text`, ascending.
    pub fn find_all(&self, text: &[u8]) -> Vec<usize> {
        let mut offsets = Vec::new();
        self.scan(text, |offset| offsets.push(offset));
        offsets
    }

    /// Number of occurrences of the pattern in `text`.
    pub fn count(&self, text: &[u8]) -> usize {
        let mut count = 0;
        self.scan(text, |_| count += 1);
        count
    }

    fn scan<F: FnMut(usize)>(&self, text: &[u8], mut on_match: F) {
        let m = self.pattern.len();
        let mut i = 0;
        let mut j = 0;

        while i < text.len() {
            if self.pattern[j] == text[i] {
                i += 1;
                j += 1;
                if j == m {
                    on_match(i - m);
                    // Keep the longest border so overlapping hits are found
                    j = self.table[j - 1];
                }
            } else if j == 0 {
                i += 1;
            } else {
                j = self.table[j - 1];
            }
        }
    }
}

/// Find all occurrences of `pattern` in `text`.
///
/// # Arguments
///
/// * `text` - Text to scan
/// * `pattern` - Pattern to look for (must not be empty)
///
/// # Returns
///
/// Ascending start offsets of every (possibly overlapping) occurrence, or
/// `PatternError::InvalidPattern` for an empty pattern
pub fn find_all(text: &[u8], pattern: &[u8]) -> Result<Vec<usize>, PatternError> {
    Ok(Matcher::new(pattern)?.find_all(text))
}

/// Count the occurrences of `pattern` in `text` without collecting offsets.
pub fn count_matches(text: &[u8], pattern: &[u8]) -> Result<usize, PatternError> {
    Ok(Matcher::new(pattern)?.count(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(text: &[u8], pattern: &[u8]) -> Vec<usize> {
        if pattern.len() > text.len() {
            return Vec::new();
        }
        (0..=text.len() - pattern.len())
            .filter(|&o| &text[o..o + pattern.len()] == pattern)
            .collect()
    }

    #[test]
    fn test_overlapping_matches() {
        assert_eq!(find_all(b"aaa", b"aa").unwrap(), vec![0, 1]);
        assert_eq!(find_all(b"aaaa", b"aa").unwrap(), vec![0, 1, 2]);
        assert_eq!(find_all(b"abababa", b"aba").unwrap(), vec![0, 2, 4]);
    }

    #[test]
    fn test_no_match() {
        assert!(find_all(b"abcdef", b"xyz").unwrap().is_empty());
        assert!(find_all(b"", b"a").unwrap().is_empty());
    }

    #[test]
    fn test_pattern_longer_than_text() {
        assert!(find_all(b"ab", b"abc").unwrap().is_empty());
    }

    #[test]
    fn test_whole_text_match() {
        assert_eq!(find_all(b"malware", b"malware").unwrap(), vec![0]);
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert!(matches!(
            find_all(b"abc", b""),
            Err(PatternError::InvalidPattern(_))
        ));
        assert!(count_matches(b"abc", b"").is_err());
    }

    #[test]
    fn test_matches_naive_scan() {
        let text = b"ABABDABACDABABCABCABCABCABC";
        for pattern in [&b"ABABC"[..], b"ABC", b"CAB", b"ABABCABCAB", b"D", b"ZZ"] {
            assert_eq!(find_all(text, pattern).unwrap(), naive(text, pattern));
        }
    }

    #[test]
    fn test_count_agrees_with_offsets() {
        let text = b"abcabcabcab";
        assert_eq!(count_matches(text, b"abcab").unwrap(), 3);
        assert_eq!(find_all(text, b"abcab").unwrap(), vec![0, 3, 6]);
    }

    #[test]
    fn test_matcher_reuse() {
        let matcher = Matcher::new(b"c0de").unwrap();
        assert_eq!(matcher.pattern(), b"c0de");
        assert_eq!(matcher.find_all(b"xxc0dexc0de"), vec![2, 7]);
        assert_eq!(matcher.find_all(b"c0d"), Vec::<usize>::new());
        assert_eq!(matcher.count(b"c0dec0de"), 2);
    }
}

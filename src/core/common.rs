//! Longest common substring of two texts (dynamic programming)
//!
//! `dp[i][j]` is the length of the longest common run ending at `a[i]` and
//! `b[j]`. Only the previous row is needed to fill the next one, so two rows of
//! `b.len() + 1` cells are kept instead of the full table.

use std::borrow::Cow;

/// Longest run of bytes appearing contiguously in both texts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommonSubstring {
    /// Offset of the run in the first text
    pub start: usize,
    /// Offset of the run in the second text
    pub other_start: usize,
    /// The shared bytes
    pub bytes: Vec<u8>,
}

impl CommonSubstring {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The shared run as text, replacing invalid UTF-8 sequences.
    pub fn as_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// Find the longest substring common to `a` and `b`.
///
/// Ties are broken by row-major scan order over `a` then `b`: the run whose end
/// cell is reached first is kept. If the texts share no byte at all (or one of
/// them is empty) the result is empty with both offsets at 0.
pub fn longest_common_substring(a: &[u8], b: &[u8]) -> CommonSubstring {
    // Column 0 is the implicit j = -1 boundary and always stays 0
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    let mut best_len = 0;
    let mut best_end_a = 0;
    let mut best_end_b = 0;

    for (i, &byte_a) in a.iter().enumerate() {
        for (j, &byte_b) in b.iter().enumerate() {
            curr[j + 1] = if byte_a == byte_b { prev[j] + 1 } else { 0 };

            if curr[j + 1] > best_len {
                best_len = curr[j + 1];
                best_end_a = i;
                best_end_b = j;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    if best_len == 0 {
        return CommonSubstring::default();
    }

    let start = best_end_a + 1 - best_len;
    CommonSubstring {
        start,
        other_start: best_end_b + 1 - best_len,
        bytes: a[start..=best_end_a].to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotated_texts() {
        let result = longest_common_substring(b"abcdxyz", b"xyzabcd");
        assert_eq!(result.bytes, b"abcd");
        assert_eq!(result.start, 0);
        assert_eq!(result.other_start, 3);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(longest_common_substring(b"", b"abc").is_empty());
        assert!(longest_common_substring(b"abc", b"").is_empty());
        assert!(longest_common_substring(b"", b"").is_empty());
    }

    #[test]
    fn test_nothing_in_common() {
        let result = longest_common_substring(b"abc", b"xyz");
        assert_eq!(result, CommonSubstring::default());
    }

    #[test]
    fn test_single_byte_in_common() {
        // A length-one answer on the first row or column is still reported
        let result = longest_common_substring(b"qa", b"aw");
        assert_eq!(result.bytes, b"a");
        assert_eq!(result.start, 1);
        assert_eq!(result.other_start, 0);

        let result = longest_common_substring(b"a", b"xa");
        assert_eq!(result.bytes, b"a");
        assert_eq!(result.other_start, 1);
    }

    #[test]
    fn test_row_major_tie_break() {
        // "ab" and "cd" both have length 2; "ab" ends on an earlier row of `a`
        let result = longest_common_substring(b"ab-cd", b"cd+ab");
        assert_eq!(result.bytes, b"ab");
        assert_eq!(result.start, 0);
        assert_eq!(result.other_start, 3);

        // Same row: the earlier column in `b` wins
        let result = longest_common_substring(b"aa", b"xaya");
        assert_eq!(result.bytes, b"a");
        assert_eq!(result.other_start, 1);
    }

    #[test]
    fn test_result_is_substring_of_both() {
        let a = b"A1B2C3D4E5F6";
        let b = b"zzC3D4E5yy";
        let result = longest_common_substring(a, b);
        assert_eq!(result.as_str_lossy(), "C3D4E5");
        assert_eq!(&a[result.start..result.start + result.len()], &result.bytes[..]);
        assert_eq!(
            &b[result.other_start..result.other_start + result.len()],
            &result.bytes[..]
        );
    }

    #[test]
    fn test_identical_texts() {
        let result = longest_common_substring(b"deadbeef", b"deadbeef");
        assert_eq!(result.bytes, b"deadbeef");
        assert_eq!(result.start, 0);
    }
}

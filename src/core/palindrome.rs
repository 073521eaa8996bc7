//! Longest palindromic substring (Manacher's algorithm)

use std::borrow::Cow;

/// Longest palindromic run found in a text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palindrome {
    /// Byte offset of the run in the original text
    pub start: usize,
    /// The palindromic bytes
    pub bytes: Vec<u8>,
}

impl Palindrome {
    /// Length of the palindrome in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The palindrome as text, replacing invalid UTF-8 sequences.
    pub fn as_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// Interleave a separator between every byte and at both ends.
///
/// `None` is the separator, so it can never compare equal to a text byte and
/// even- and odd-length palindromes are both centered on a single slot.
fn interleave(text: &[u8]) -> Vec<Option<u8>> {
    let mut out = Vec::with_capacity(2 * text.len() + 1);
    out.push(None);
    for &byte in text {
        out.push(Some(byte));
        out.push(None);
    }
    out
}

/// Find the longest palindromic substring of `text`.
///
/// When several palindromes share the maximal length, the one with the lowest
/// start offset wins. An empty text yields an empty palindrome at offset 0.
pub fn longest_palindrome(text: &[u8]) -> Palindrome {
    let slots = interleave(text);
    let n = slots.len();
    let mut radius = vec![0usize; n];
    let mut center = 0;
    let mut right = 0;

    for i in 0..n {
        if i < right {
            let mirror = 2 * center - i;
            radius[i] = (right - i).min(radius[mirror]);
        }

        while i + radius[i] + 1 < n
            && i >= radius[i] + 1
            && slots[i + radius[i] + 1] == slots[i - radius[i] - 1]
        {
            radius[i] += 1;
        }

        if i + radius[i] > right {
            center = i;
            right = i + radius[i];
        }
    }

    // First maximum in left-to-right order
    let mut best_radius = 0;
    let mut best_center = 0;
    for (i, &r) in radius.iter().enumerate() {
        if r > best_radius {
            best_radius = r;
            best_center = i;
        }
    }

    // best_center >= best_radius, so this is plain floor division
    let start = (best_center - best_radius) / 2;

    Palindrome {
        start,
        bytes: text[start..start + best_radius].to_vec(),
    }
}

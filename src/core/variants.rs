//! Single-deletion variants of a pattern

use std::collections::BTreeSet;

/// Every distinct string obtained by deleting exactly one byte of `pattern`.
///
/// Deleting different positions of a run of equal bytes gives the same
/// variant, so the result is a set. Iteration order is lexicographic, which is
/// the order the frequency search visits variants in.
pub fn delete_one_char(pattern: &[u8]) -> BTreeSet<Vec<u8>> {
    (0..pattern.len())
        .map(|p| {
            let mut variant = Vec::with_capacity(pattern.len() - 1);
            variant.extend_from_slice(&pattern[..p]);
            variant.extend_from_slice(&pattern[p + 1..]);
            variant
        })
        .collect()
}

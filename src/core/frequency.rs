//! Near-match frequency search over single-deletion variants

use std::borrow::Cow;

use log::debug;

use crate::core::matcher::{Matcher, PatternError};
use crate::core::variants::delete_one_char;

/// The variant that occurred most often in a single transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantFrequency {
    /// The variant bytes (pattern minus one byte)
    pub variant: Vec<u8>,
    /// Number of (possibly overlapping) occurrences
    pub count: usize,
    /// Index of the transmission where `count` was reached
    pub transmission: usize,
}

impl VariantFrequency {
    pub fn variant_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.variant)
    }
}

/// Find which single-deletion variant of `pattern` occurs most often.
///
/// Variants are visited in lexicographic order and transmissions in the order
/// given; only a strictly larger count replaces the current best, so the first
/// (variant, transmission) pair reaching the maximum wins. Returns `Ok(None)`
/// when no variant occurs anywhere.
///
/// # Arguments
///
/// * `transmissions` - Texts to scan, in a stable order
/// * `pattern` - The original pattern (must not be empty)
///
/// # Returns
///
/// The best variant with its count and transmission index
pub fn most_frequent_variant<T: AsRef<[u8]>>(
    transmissions: &[T],
    pattern: &[u8],
) -> Result<Option<VariantFrequency>, PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::InvalidPattern(
            "pattern must not be empty".to_string(),
        ));
    }

    let mut best: Option<VariantFrequency> = None;

    for variant in delete_one_char(pattern) {
        // A one-byte pattern only yields the empty variant
        if variant.is_empty() {
            continue;
        }

        let matcher = Matcher::new(&variant)?;
        for (index, transmission) in transmissions.iter().enumerate() {
            let count = matcher.count(transmission.as_ref());
            let best_count = best.as_ref().map_or(0, |b| b.count);

            if count > best_count {
                debug!(
                    "variant {:?} occurs {} times in transmission {}",
                    String::from_utf8_lossy(&variant),
                    count,
                    index
                );
                best = Some(VariantFrequency {
                    variant: variant.clone(),
                    count,
                    transmission: index,
                });
            }
        }
    }

    Ok(best)
}

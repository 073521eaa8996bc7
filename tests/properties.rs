//! Property tests for the string-analysis engine
//!
//! Each engine entry point is checked against a brute-force reference on small
//! random texts over a tiny alphabet, so repeats and overlaps are common.

use proptest::prelude::*;

use transmission_analyzer::core::common::longest_common_substring;
use transmission_analyzer::core::frequency::most_frequent_variant;
use transmission_analyzer::core::lps::build_failure_table;
use transmission_analyzer::core::matcher::find_all;
use transmission_analyzer::core::palindrome::longest_palindrome;
use transmission_analyzer::core::variants::delete_one_char;

fn text(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(vec![b'a', b'b', b'c']), 0..max_len)
}

fn naive_find_all(text: &[u8], pattern: &[u8]) -> Vec<usize> {
    if pattern.len() > text.len() {
        return Vec::new();
    }
    (0..=text.len() - pattern.len())
        .filter(|&o| &text[o..o + pattern.len()] == pattern)
        .collect()
}

fn is_palindrome(run: &[u8]) -> bool {
    run.iter().eq(run.iter().rev())
}

proptest! {
    #[test]
    fn failure_table_is_a_border_table(pattern in text(24)) {
        let table = build_failure_table(&pattern);
        prop_assert_eq!(table.len(), pattern.len());
        for (i, &len) in table.iter().enumerate() {
            prop_assert!(len <= i);
            prop_assert_eq!(&pattern[..len], &pattern[i + 1 - len..=i]);
            // No longer proper border exists
            for longer in len + 1..=i {
                prop_assert_ne!(&pattern[..longer], &pattern[i + 1 - longer..=i]);
            }
        }
    }

    #[test]
    fn find_all_is_sound_and_exhaustive(haystack in text(64), pattern in text(5)) {
        prop_assume!(!pattern.is_empty());
        prop_assert_eq!(find_all(&haystack, &pattern).unwrap(), naive_find_all(&haystack, &pattern));
    }

    #[test]
    fn palindrome_is_maximal_and_located(haystack in text(40)) {
        let result = longest_palindrome(&haystack);
        prop_assert!(is_palindrome(&result.bytes));
        prop_assert_eq!(&haystack[result.start..result.start + result.len()], &result.bytes[..]);

        for i in 0..haystack.len() {
            for j in i + 1..=haystack.len() {
                if is_palindrome(&haystack[i..j]) {
                    prop_assert!(j - i <= result.len());
                    // Equal length palindromes never start earlier
                    if j - i == result.len() {
                        prop_assert!(i >= result.start);
                    }
                }
            }
        }
    }

    #[test]
    fn common_substring_is_shared_and_maximal(a in text(30), b in text(30)) {
        let result = longest_common_substring(&a, &b);
        let len = result.len();
        prop_assert_eq!(&a[result.start..result.start + len], &result.bytes[..]);
        prop_assert_eq!(&b[result.other_start..result.other_start + len], &result.bytes[..]);

        let longer = len + 1;
        if longer <= a.len() {
            for window in a.windows(longer) {
                prop_assert!(naive_find_all(&b, window).is_empty());
            }
        }
    }

    #[test]
    fn variants_drop_exactly_one_byte(pattern in text(12)) {
        let variants = delete_one_char(&pattern);
        prop_assert!(variants.len() <= pattern.len());
        for variant in &variants {
            prop_assert_eq!(variant.len() + 1, pattern.len());
        }
    }

    #[test]
    fn frequency_reports_the_maximum(transmissions in prop::collection::vec(text(30), 0..4), pattern in text(5)) {
        prop_assume!(!pattern.is_empty());
        let best = most_frequent_variant(&transmissions, &pattern).unwrap();

        let max = delete_one_char(&pattern)
            .iter()
            .filter(|v| !v.is_empty())
            .flat_map(|v| transmissions.iter().map(move |t| naive_find_all(t, v).len()))
            .max()
            .unwrap_or(0);

        match best {
            None => prop_assert_eq!(max, 0),
            Some(best) => {
                prop_assert_eq!(best.count, max);
                prop_assert_eq!(
                    naive_find_all(&transmissions[best.transmission], &best.variant).len(),
                    max
                );
            }
        }
    }

    #[test]
    fn engine_is_idempotent(a in text(30), b in text(30)) {
        prop_assert_eq!(longest_palindrome(&a), longest_palindrome(&a));
        prop_assert_eq!(longest_common_substring(&a, &b), longest_common_substring(&a, &b));
    }
}

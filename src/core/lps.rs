//! Failure table (longest proper prefix that is also a suffix) for KMP scans.

/// Build the failure table for a pattern.
///
/// `table[i]` holds the length of the longest proper prefix of `pattern[..=i]`
/// that is also a suffix of it. An empty pattern produces an empty table.
///
/// # Arguments
///
/// * `pattern` - Pattern bytes
///
/// # Returns
///
/// One entry per pattern position, with `table[0] == 0` and `table[i] <= i`
pub fn build_failure_table(pattern: &[u8]) -> Vec<usize> {
    let mut table = vec![0; pattern.len()];
    let mut len = 0;
    let mut i = 1;

    while i < pattern.len() {
        if pattern[i] == pattern[len] {
            len += 1;
            table[i] = len;
            i += 1;
        } else if len == 0 {
            table[i] = 0;
            i += 1;
        } else {
            // Retry the same position against a shorter border
            len = table[len - 1];
        }
    }

    table
}

//! Structured results of a transmission analysis
//!
//! Everything here is plain data, serializable so the formatter can export it
//! as JSON, CSV or HTML.

use serde::{Deserialize, Serialize};

/// Complete analysis of a set of transmissions against a pattern list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub transmissions: Vec<TransmissionSummary>,
    pub patterns: Vec<PatternReport>,
    pub palindromes: Vec<PalindromeReport>,
    pub common_substrings: Vec<CommonSubstringReport>,
}

impl AnalysisReport {
    /// Total exact matches over every pattern and transmission.
    pub fn total_matches(&self) -> usize {
        self.patterns.iter().map(PatternReport::total_matches).sum()
    }

    /// Patterns found at least once in any transmission.
    pub fn detected_patterns(&self) -> impl Iterator<Item = &PatternReport> {
        self.patterns.iter().filter(|p| p.total_matches() > 0)
    }
}

/// Size and fingerprint of one transmission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransmissionSummary {
    pub name: String,
    /// Length in bytes
    pub length: usize,
    /// Lowercase hex SHA-256 of the content
    pub sha256: String,
}

/// Matches of one pattern across every transmission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternReport {
    pub name: String,
    pub code: String,
    /// One entry per transmission, in transmission order
    pub occurrences: Vec<Occurrences>,
    /// Most frequent single-deletion variant, if any occurs
    pub best_variant: Option<VariantReport>,
}

impl PatternReport {
    pub fn total_matches(&self) -> usize {
        self.occurrences.iter().map(|o| o.offsets.len()).sum()
    }
}

/// Start offsets of a pattern in one transmission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrences {
    pub transmission: String,
    pub offsets: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantReport {
    pub variant: String,
    pub count: usize,
    pub transmission: String,
}

/// Longest palindrome of one transmission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalindromeReport {
    pub transmission: String,
    pub palindrome: String,
    pub start: usize,
    pub length: usize,
}

/// Longest common substring of a pair of transmissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonSubstringReport {
    pub first: String,
    pub second: String,
    /// Position of `first` in the transmission list
    pub first_index: usize,
    /// Position of `second` in the transmission list
    pub second_index: usize,
    pub substring: String,
    /// Offset in `first`
    pub first_start: usize,
    /// Offset in `second`
    pub second_start: usize,
    pub length: usize,
}

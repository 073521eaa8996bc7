//! Core transmission analyzer implementation
//!
//! The TransmissionAnalyzer runs every engine entry point over a set of named
//! transmissions and patterns and assembles the results into one report.

use std::time::Instant;

use indicatif::ProgressBar;
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::AnalyzerConfig;
use crate::core::common::longest_common_substring;
use crate::core::frequency::most_frequent_variant;
use crate::core::matcher::{Matcher, PatternError};
use crate::core::palindrome::longest_palindrome;
use crate::core::patterns::Pattern;
use crate::core::report::{
    AnalysisReport, CommonSubstringReport, Occurrences, PalindromeReport, PatternReport,
    TransmissionSummary, VariantReport,
};
use crate::utils::file_utils::fingerprint;

/// Error raised when an analysis cannot run
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("pattern {name} is invalid: {source}")]
    Pattern {
        name: String,
        #[source]
        source: PatternError,
    },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// A named transmission.
///
/// Content is raw bytes; offsets in the report are byte offsets into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transmission {
    pub name: String,
    pub content: Vec<u8>,
}

impl Transmission {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    fn bytes(&self) -> &[u8] {
        &self.content
    }
}

/// Core transmission analyzer structure
pub struct TransmissionAnalyzer {
    /// Worker threads (0 = available parallelism)
    parallel: usize,

    /// Optional progress bar, advanced once per analysis step
    progress: Option<ProgressBar>,
}

impl TransmissionAnalyzer {
    /// Create a new TransmissionAnalyzer instance
    ///
    /// # Arguments
    ///
    /// * `config` - Analyzer configuration
    ///
    /// # Returns
    ///
    /// A new TransmissionAnalyzer instance
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            parallel: config.parallel,
            progress: None,
        }
    }

    /// Report progress on `progress_bar`, one tick per pattern, transmission
    /// and transmission pair.
    pub fn with_progress(mut self, progress_bar: ProgressBar) -> Self {
        self.progress = Some(progress_bar);
        self
    }

    /// Number of progress ticks an analysis of this size produces
    pub fn total_steps(transmissions: usize, patterns: usize) -> u64 {
        let pairs = transmissions * transmissions.saturating_sub(1) / 2;
        (patterns + transmissions + pairs) as u64
    }

    /// Analyze transmissions against a pattern list
    ///
    /// # Arguments
    ///
    /// * `transmissions` - Transmissions in report order
    /// * `patterns` - Patterns in report order (none may be empty)
    ///
    /// # Returns
    ///
    /// The full analysis report; identical for identical inputs regardless of
    /// the number of worker threads
    pub fn analyze(
        &self,
        transmissions: &[Transmission],
        patterns: &[Pattern],
    ) -> Result<AnalysisReport, AnalysisError> {
        info!(
            "Analyzing {} transmissions against {} patterns",
            transmissions.len(),
            patterns.len()
        );
        let start_time = Instant::now();

        // Reject bad patterns before any work is scheduled
        for pattern in patterns {
            Matcher::new(&pattern.code).map_err(|source| AnalysisError::Pattern {
                name: pattern.name.clone(),
                source,
            })?;
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.worker_count())
            .build()?;

        let report = pool.install(|| -> Result<AnalysisReport, AnalysisError> {
            let pattern_reports = patterns
                .par_iter()
                .map(|pattern| self.analyze_pattern(transmissions, pattern))
                .collect::<Result<Vec<_>, _>>()?;

            let palindromes = transmissions
                .par_iter()
                .map(|transmission| self.analyze_palindrome(transmission))
                .collect();

            let pairs: Vec<(usize, usize)> = (0..transmissions.len())
                .flat_map(|i| (i + 1..transmissions.len()).map(move |j| (i, j)))
                .collect();
            let common_substrings = pairs
                .par_iter()
                .map(|&(i, j)| self.analyze_pair(transmissions, i, j))
                .collect();

            Ok(AnalysisReport {
                transmissions: transmissions.iter().map(summarize).collect(),
                patterns: pattern_reports,
                palindromes,
                common_substrings,
            })
        })?;

        info!("Analysis completed in {:?}", start_time.elapsed());
        Ok(report)
    }

    fn worker_count(&self) -> usize {
        if self.parallel == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            self.parallel
        }
    }

    fn tick(&self) {
        if let Some(pb) = &self.progress {
            pb.inc(1);
        }
    }

    fn analyze_pattern(
        &self,
        transmissions: &[Transmission],
        pattern: &Pattern,
    ) -> Result<PatternReport, AnalysisError> {
        let to_error = |source| AnalysisError::Pattern {
            name: pattern.name.clone(),
            source,
        };
        let matcher = Matcher::new(&pattern.code).map_err(to_error)?;

        let occurrences: Vec<Occurrences> = transmissions
            .iter()
            .map(|transmission| Occurrences {
                transmission: transmission.name.clone(),
                offsets: matcher.find_all(transmission.bytes()),
            })
            .collect();

        let texts: Vec<&[u8]> = transmissions.iter().map(Transmission::bytes).collect();
        let best_variant = most_frequent_variant(&texts, &pattern.code)
            .map_err(to_error)?
            .map(|best| VariantReport {
                variant: best.variant_lossy().into_owned(),
                count: best.count,
                transmission: transmissions[best.transmission].name.clone(),
            });

        debug!(
            "Pattern {} matched {} times",
            pattern.name,
            occurrences.iter().map(|o| o.offsets.len()).sum::<usize>()
        );
        self.tick();

        Ok(PatternReport {
            name: pattern.name.clone(),
            code: pattern.code_lossy().into_owned(),
            occurrences,
            best_variant,
        })
    }

    fn analyze_palindrome(&self, transmission: &Transmission) -> PalindromeReport {
        let palindrome = longest_palindrome(transmission.bytes());
        debug!(
            "Longest palindrome in {} has length {} at {}",
            transmission.name,
            palindrome.len(),
            palindrome.start
        );
        self.tick();

        PalindromeReport {
            transmission: transmission.name.clone(),
            palindrome: palindrome.as_str_lossy().into_owned(),
            start: palindrome.start,
            length: palindrome.len(),
        }
    }

    fn analyze_pair(
        &self,
        transmissions: &[Transmission],
        i: usize,
        j: usize,
    ) -> CommonSubstringReport {
        let (first, second) = (&transmissions[i], &transmissions[j]);
        let common = longest_common_substring(first.bytes(), second.bytes());
        debug!(
            "Longest common substring of {} and {} has length {}",
            first.name,
            second.name,
            common.len()
        );
        self.tick();

        CommonSubstringReport {
            first: first.name.clone(),
            second: second.name.clone(),
            first_index: i,
            second_index: j,
            substring: common.as_str_lossy().into_owned(),
            first_start: common.start,
            second_start: common.other_start,
            length: common.len(),
        }
    }
}

fn summarize(transmission: &Transmission) -> TransmissionSummary {
    TransmissionSummary {
        name: transmission.name.clone(),
        length: transmission.content.len(),
        sha256: fingerprint(transmission.bytes()),
    }
}

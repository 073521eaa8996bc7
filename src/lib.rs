//! Transmission Analyzer - scans intercepted transmissions for known malicious code
//!
//! This library finds every occurrence of each malicious code pattern in a set
//! of transmissions, the most frequent near-variant of each pattern, the longest
//! palindrome of each transmission and the longest substring shared by each
//! pair of transmissions.

pub mod core;
pub mod utils;

// Re-export main analyzer types for convenience
pub use crate::core::analyzer::{AnalysisError, Transmission, TransmissionAnalyzer};
pub use crate::core::matcher::{find_all, PatternError};
pub use crate::core::patterns::Pattern;
pub use crate::core::report::AnalysisReport;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Analyze transmission files against a pattern file
///
/// This is a convenience function for simple use cases; it runs with the
/// default configuration.
///
/// # Arguments
///
/// * `transmission_paths` - Transmission files, in report order
/// * `patterns_path` - Pattern list, one code per line
///
/// # Returns
///
/// The analysis report
pub fn analyze_files<P: AsRef<std::path::Path>, Q: AsRef<std::path::Path>>(
    transmission_paths: &[P],
    patterns_path: Q,
) -> anyhow::Result<AnalysisReport> {
    let config = config::AnalyzerConfig::default();
    app::run_analyzer(transmission_paths, patterns_path.as_ref(), &config, None)
}

/// Library configuration
pub mod config {
    use std::path::{Path, PathBuf};

    use serde::{Deserialize, Serialize};
    use serde_json::Value;

    use crate::utils::file_utils::DEFAULT_TRANSMISSION_MATCH;

    /// Error raised while loading a configuration file
    #[derive(Debug, thiserror::Error)]
    pub enum ConfigError {
        #[error("configuration file not found: {}", .0.display())]
        NotFound(PathBuf),

        #[error("failed to read configuration file {}: {source}", .path.display())]
        Io {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },

        #[error("invalid JSON in configuration file {}: {source}", .path.display())]
        Parse {
            path: PathBuf,
            #[source]
            source: serde_json::Error,
        },
    }

    /// Settings shared by the analyzer and the command-line driver.
    ///
    /// Every field has a default, so a configuration file only needs the keys
    /// it wants to change.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct AnalyzerConfig {
        /// Worker threads (0 = available parallelism)
        pub parallel: usize,
        /// Transmission files, in report order
        pub transmissions: Vec<PathBuf>,
        /// Directory searched for transmission files
        pub transmission_dir: Option<PathBuf>,
        /// Regex a discovered transmission file name must match
        pub transmission_match: String,
        /// Pattern list, one code per line
        pub patterns: PathBuf,
        pub log_level: String,
        pub log_file: Option<PathBuf>,
    }

    impl Default for AnalyzerConfig {
        fn default() -> Self {
            Self {
                parallel: 0,
                transmissions: Vec::new(),
                transmission_dir: None,
                transmission_match: DEFAULT_TRANSMISSION_MATCH.to_string(),
                patterns: PathBuf::from("mcode.txt"),
                log_level: "info".to_string(),
                log_file: None,
            }
        }
    }

    /// Create default configuration
    pub fn default_config() -> Value {
        serde_json::json!({
            "parallel": 0,
            "transmissions": [],
            "transmission_dir": null,
            "transmission_match": DEFAULT_TRANSMISSION_MATCH,
            "patterns": "mcode.txt",
            "log_level": "info",
            "log_file": null
        })
    }

    /// Load configuration from a JSON file
    pub fn load_config(path: &Path) -> Result<AnalyzerConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

}

/// Command-line application functionality
pub mod app {
    use std::path::Path;

    use anyhow::Context;
    use indicatif::ProgressBar;
    use log::info;

    use crate::config::AnalyzerConfig;
    use crate::core::analyzer::TransmissionAnalyzer;
    use crate::core::report::AnalysisReport;
    use crate::utils::file_utils::{read_patterns, read_transmission};

    /// Load transmissions and patterns from disk and analyze them
    ///
    /// # Arguments
    ///
    /// * `transmission_paths` - Transmission files, in report order
    /// * `patterns_path` - Pattern list
    /// * `config` - Configuration options
    /// * `progress` - Optional progress bar advanced during the analysis
    ///
    /// # Returns
    ///
    /// The analysis report
    pub fn run_analyzer<P: AsRef<Path>>(
        transmission_paths: &[P],
        patterns_path: &Path,
        config: &AnalyzerConfig,
        progress: Option<ProgressBar>,
    ) -> anyhow::Result<AnalysisReport> {
        let transmissions = transmission_paths
            .iter()
            .map(|path| read_transmission(path.as_ref()))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let patterns = read_patterns(patterns_path)?;
        info!(
            "Loaded {} transmissions and {} patterns from {}",
            transmissions.len(),
            patterns.len(),
            patterns_path.display()
        );

        let mut analyzer = TransmissionAnalyzer::new(config);
        if let Some(pb) = progress {
            pb.set_length(TransmissionAnalyzer::total_steps(
                transmissions.len(),
                patterns.len(),
            ));
            analyzer = analyzer.with_progress(pb);
        }

        analyzer
            .analyze(&transmissions, &patterns)
            .context("Analysis failed")
    }
}

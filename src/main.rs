//! Transmission Analyzer - scans intercepted transmissions for known malicious code
//!
//! The main entry point for the analyzer application. It parses command-line
//! arguments, loads transmissions and patterns, runs the analysis and prints or
//! exports the report.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use anyhow::Result;
use clap::{ArgAction, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, LevelFilter};

use transmission_analyzer::app::run_analyzer;
use transmission_analyzer::config::{load_config, AnalyzerConfig};
use transmission_analyzer::utils::file_utils;
use transmission_analyzer::utils::output_formatter;
use transmission_analyzer::AnalysisReport;

/// Transmissions analyzed when none are given on the command line or in the
/// configuration file
const DEFAULT_TRANSMISSIONS: [&str; 3] = [
    "transmission1.txt",
    "transmission2.txt",
    "transmission3.txt",
];

/// Command line argument structure
#[derive(Parser, Debug)]
#[command(
    name = "transmission_analyzer",
    version,
    about = "Scans intercepted transmissions for known malicious code",
    long_about = "This tool analyzes transmissions and reports:
- Every occurrence of each malicious code pattern
- The most frequent variant of each pattern with one character removed
- The longest palindrome in each transmission
- The longest substring shared by each pair of transmissions"
)]
struct Args {
    /// Transmission file(s) to analyze
    #[arg(name = "transmissions")]
    transmissions: Vec<PathBuf>,

    /// Analyze transmission files found in this directory
    #[arg(long = "dir")]
    dir: Option<PathBuf>,

    /// Regex a file name must match to be picked up by --dir
    #[arg(long = "match")]
    name_match: Option<String>,

    /// Malicious code list, one pattern per line (default: mcode.txt)
    #[arg(short = 'p', long = "patterns")]
    patterns: Option<PathBuf>,

    /// Write the plain text report to this file
    #[arg(long = "output")]
    output: Option<PathBuf>,

    /// Export results to JSON file
    #[arg(long = "json")]
    json: Option<PathBuf>,

    /// Export results to HTML report
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// Export results to CSV file
    #[arg(long = "csv")]
    csv: Option<PathBuf>,

    /// Directory to store all output files
    #[arg(long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Output in markdown format (wrapped in triple backticks)
    #[arg(long = "md", action = ArgAction::SetTrue)]
    md: bool,

    /// Suppress terminal output
    #[arg(long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,

    /// Show only summary information
    #[arg(long = "summary-only", action = ArgAction::SetTrue)]
    summary_only: bool,

    /// Path to configuration file
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Number of parallel workers (0=auto)
    #[arg(long = "parallel")]
    parallel: Option<usize>,

    /// Set logging level (default: info)
    #[arg(long = "log-level")]
    log_level: Option<LevelFilter>,

    /// Log file path (default: stderr)
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

/// Main entry point function
fn main() -> Result<()> {
    let start_time = Instant::now();

    let args = Args::parse();

    // Configuration file first, command-line flags override it
    let config = merge_args(load_config_or_default(&args.config), &args);

    setup_logging(&config);

    let transmission_paths = get_transmissions_to_analyze(&config)?;
    if transmission_paths.is_empty() {
        eprintln!("{}", "Error: No transmissions specified or found for analysis".red());
        eprintln!("Run with --help for usage information");
        process::exit(1);
    }

    let progress_bar = if args.quiet {
        None
    } else {
        println!(
            "\n{} {} transmissions against {}...",
            "Analyzing".bold(),
            transmission_paths.len(),
            config.patterns.display()
        );
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} steps")?
                .progress_chars("#>-"),
        );
        Some(pb)
    };

    let report = run_analyzer(
        &transmission_paths,
        &config.patterns,
        &config,
        progress_bar.clone(),
    )?;

    if let Some(pb) = progress_bar {
        pb.finish_with_message("Analysis complete");
    }

    export_all_results(&report, &args)?;

    if !args.quiet {
        println!("\n{}", "Analysis Complete".bold());
        println!("{} {}", "Transmissions analyzed:".green(), report.transmissions.len());
        println!("{} {}", "Total matches:".green(), report.total_matches());
        println!(
            "{} {:.2} seconds",
            "Time elapsed:".green(),
            start_time.elapsed().as_secs_f64()
        );

        println!("\n{}", "=".repeat(80).bold());
        if args.summary_only {
            println!("{}", output_formatter::create_summary(&report));
        } else {
            println!("{}", output_formatter::format_report(&report, args.md));
        }
    }

    Ok(())
}

/// Load the configuration file if one was given, falling back to defaults
fn load_config_or_default(config_path: &Option<PathBuf>) -> AnalyzerConfig {
    match config_path {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                // Logging is not set up yet
                eprintln!("{} {}", "Warning:".yellow(), e);
                AnalyzerConfig::default()
            }
        },
        None => AnalyzerConfig::default(),
    }
}

/// Apply command-line overrides on top of the loaded configuration
fn merge_args(mut config: AnalyzerConfig, args: &Args) -> AnalyzerConfig {
    if !args.transmissions.is_empty() {
        config.transmissions = args.transmissions.clone();
    }
    if let Some(dir) = &args.dir {
        config.transmission_dir = Some(dir.clone());
    }
    if let Some(name_match) = &args.name_match {
        config.transmission_match = name_match.clone();
    }
    if let Some(patterns) = &args.patterns {
        config.patterns = patterns.clone();
    }
    if let Some(parallel) = args.parallel {
        config.parallel = parallel;
    }
    if let Some(level) = args.log_level {
        config.log_level = level.to_string();
    }
    if let Some(log_file) = &args.log_file {
        config.log_file = Some(log_file.clone());
    }
    config
}

/// Set up logging with optional file output
fn setup_logging(config: &AnalyzerConfig) {
    let mut builder = env_logger::Builder::new();

    let level = config.log_level.parse().unwrap_or(LevelFilter::Info);
    builder.filter_level(level);

    builder.format(|buf, record| {
        use chrono::Local;
        use std::io::Write;
        writeln!(
            buf,
            "{} - {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Some(log_file) = &config.log_file {
        match File::create(log_file) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Cannot open log file {}: {}", log_file.display(), e),
        }
    }

    builder.init();
}

/// Get list of transmission files from the configuration
fn get_transmissions_to_analyze(config: &AnalyzerConfig) -> Result<Vec<PathBuf>> {
    let mut paths = config.transmissions.clone();

    if let Some(dir) = &config.transmission_dir {
        let found = file_utils::discover_transmissions(dir, &config.transmission_match)?;
        info!("Found {} transmission files in {}", found.len(), dir.display());
        paths.extend(found);
    }

    if paths.is_empty() && config.transmission_dir.is_none() {
        paths = DEFAULT_TRANSMISSIONS.iter().map(PathBuf::from).collect();
    }

    for path in &paths {
        if !path.is_file() {
            error!("Transmission not found: {}", path.display());
        }
    }

    Ok(paths)
}

/// Export the report in every format requested on the command line
fn export_all_results(report: &AnalysisReport, args: &Args) -> Result<()> {
    if let Some(output_dir) = &args.output_dir {
        std::fs::create_dir_all(output_dir)?;
    }

    if let Some(path) = &args.output {
        let path = generate_output_path(args, path);
        output_formatter::write_text_report(report, &path)?;
        info!("Text report written to {}", path.display());
    }

    if let Some(path) = &args.json {
        let path = generate_output_path(args, path);
        output_formatter::export_results_json(report, &path)?;
        info!("JSON report written to {}", path.display());
    }

    if let Some(path) = &args.html {
        let path = generate_output_path(args, path);
        output_formatter::create_html_report(report, &path)?;
        info!("HTML report written to {}", path.display());
    }

    if let Some(path) = &args.csv {
        let path = generate_output_path(args, path);
        output_formatter::create_csv_report(report, &path)?;
        info!("CSV report written to {}", path.display());
    }

    Ok(())
}

/// Place relative output paths under the output directory, if one is set
fn generate_output_path(args: &Args, path: &Path) -> PathBuf {
    match &args.output_dir {
        Some(output_dir) if path.is_relative() => output_dir.join(path),
        _ => path.to_path_buf(),
    }
}

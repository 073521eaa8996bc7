//! Utility modules for the transmission analyzer
//!
//! File loading and output formatting used by the command-line driver.

pub mod file_utils;
pub mod output_formatter;

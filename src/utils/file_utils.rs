//! File handling utilities
//!
//! This module reads transmissions and pattern lists from disk, discovers
//! transmission files in a directory and fingerprints their content.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use regex::Regex;
use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::core::analyzer::Transmission;
use crate::core::patterns::{parse_patterns, Pattern};

/// Default file name filter for transmission discovery
pub const DEFAULT_TRANSMISSION_MATCH: &str = r"^transmission\d*\.txt$";

/// Read a file as raw bytes.
///
/// Content is never decoded, so offsets stay byte offsets into the file. Text
/// that is not valid UTF-8 is only replaced when a report is rendered.
///
/// # Arguments
///
/// * `file_path` - Path to the file
///
/// # Returns
///
/// The file content
pub fn read_bytes(file_path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(file_path)
        .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

    if std::str::from_utf8(&bytes).is_err() {
        warn!(
            "File {} is not valid UTF-8, reports will show replacement characters",
            file_path.display()
        );
    }

    Ok(bytes)
}

/// Display name for a path: its file name, or the whole path if it has none.
pub fn display_name(file_path: &Path) -> String {
    file_path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| file_path.to_string_lossy().to_string())
}

/// Read a transmission file.
///
/// A transmission is a single line; anything after the first line break is
/// ignored. An empty file is an empty transmission.
pub fn read_transmission(file_path: &Path) -> Result<Transmission> {
    let content = read_bytes(file_path)?;
    let (line, rest) = match content.iter().position(|&b| b == b'\n') {
        Some(end) => (&content[..end], &content[end + 1..]),
        None => (&content[..], &[][..]),
    };
    let line = line.strip_suffix(b"\r").unwrap_or(line);

    if !rest.is_empty() {
        debug!(
            "Ignoring content after the first line of {}",
            file_path.display()
        );
    }

    Ok(Transmission::new(display_name(file_path), line))
}

/// Read a pattern list, one pattern per line (blank lines skipped).
pub fn read_patterns(file_path: &Path) -> Result<Vec<Pattern>> {
    let content = read_bytes(file_path)?;
    Ok(parse_patterns(&display_name(file_path), &content))
}

/// Find transmission files directly inside a directory.
///
/// # Arguments
///
/// * `dir` - Directory to search (not recursed into)
/// * `name_pattern` - Regex the file name must match
///
/// # Returns
///
/// Matching file paths sorted by file name
pub fn discover_transmissions(dir: &Path, name_pattern: &str) -> Result<Vec<PathBuf>> {
    let name_regex = Regex::new(name_pattern)
        .with_context(|| format!("Invalid transmission file pattern: {}", name_pattern))?;

    if !dir.is_dir() {
        anyhow::bail!("Directory not found: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if name_regex.is_match(&file_name) {
            files.push(entry.path().to_path_buf());
        } else {
            debug!("Skipping {}: name does not match", entry.path().display());
        }
    }

    Ok(files)
}

/// Lowercase hex SHA-256 digest of `content`.
pub fn fingerprint(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

//! Core module for transmission analysis
//!
//! This module contains the string-analysis engine (exact matching, palindromes,
//! common substrings, near-match variants) and the analyzer that runs it over a
//! set of transmissions.

pub mod analyzer;
pub mod common;
pub mod frequency;
pub mod lps;
pub mod matcher;
pub mod palindrome;
pub mod patterns;
pub mod report;
pub mod variants;

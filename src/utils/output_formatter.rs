//! Output formatter for analysis results
//!
//! This module handles formatting and exporting analysis reports in various
//! formats, including console output, plain text, JSON, HTML, and CSV.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use handlebars::Handlebars;
use serde_json::json;

use crate::core::report::AnalysisReport;

const SECTION_RULE: &str = "==============";
const PATTERN_RULE: &str = "- - - - - - - - - - - - --";

/// Styling hooks so the console and the plain text report share one layout.
struct Style {
    color: bool,
}

impl Style {
    fn heading(&self, text: &str) -> String {
        if self.color {
            text.yellow().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn label(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn value(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Short label for the n-th transmission in pair listings (`T1`, `T2`, ...).
fn short_label(index: usize) -> String {
    format!("T{}", index + 1)
}

fn render(report: &AnalysisReport, style: &Style) -> String {
    let mut output = String::new();

    for pattern in &report.patterns {
        output.push_str(&format!("{} {}\n", style.heading("Code:"), pattern.code));

        for occurrences in &pattern.occurrences {
            output.push_str(&format!(
                "{} ==> {} times\n",
                style.label(&occurrences.transmission),
                occurrences.offsets.len()
            ));
            let offsets: Vec<String> = occurrences.offsets.iter().map(|o| o.to_string()).collect();
            output.push_str(&offsets.join(", "));
            output.push('\n');
        }

        output.push_str("Most frequent variant: ");
        match &pattern.best_variant {
            Some(best) => output.push_str(&format!(
                "{} ({} times in {})\n",
                style.value(&best.variant),
                best.count,
                best.transmission
            )),
            None => output.push_str("none found\n"),
        }
        output.push_str(PATTERN_RULE);
        output.push('\n');
    }

    output.push_str(SECTION_RULE);
    output.push('\n');
    output.push_str(&style.heading("Longest palindrome:"));
    output.push('\n');

    for palindrome in &report.palindromes {
        output.push_str(&format!(
            "{} ==> Position: {}\n",
            style.label(&palindrome.transmission),
            palindrome.start
        ));
        output.push_str(&style.value(&palindrome.palindrome));
        output.push_str("\n----\n");
    }

    output.push_str(SECTION_RULE);
    output.push('\n');
    output.push_str(&style.heading("Longest common substrings:"));
    output.push('\n');

    for common in &report.common_substrings {
        output.push_str(&format!(
            "{}-{} ==> {}\n",
            short_label(common.first_index),
            short_label(common.second_index),
            style.value(&common.substring)
        ));
    }

    output
}

/// Format an analysis report for console output
///
/// # Arguments
///
/// * `report` - Analysis report
/// * `use_markdown` - Whether to wrap the output in markdown triple backticks
///
/// # Returns
///
/// Formatted string for console output
pub fn format_report(report: &AnalysisReport, use_markdown: bool) -> String {
    // Color codes would end up inside the fenced block
    let body = render(report, &Style { color: !use_markdown });

    if use_markdown {
        format!("```\n{}```\n", body)
    } else {
        body
    }
}

/// Render the report without terminal colors.
pub fn render_plain(report: &AnalysisReport) -> String {
    render(report, &Style { color: false })
}

/// Write the plain text report to a file
pub fn write_text_report(report: &AnalysisReport, output_path: &Path) -> Result<()> {
    let mut file = File::create(output_path).with_context(|| {
        format!("Failed to create text report: {}", output_path.display())
    })?;

    file.write_all(render_plain(report).as_bytes())
        .context("Failed to write text report")?;

    Ok(())
}

/// Export the report to a JSON file
///
/// # Arguments
///
/// * `report` - Analysis report
/// * `output_path` - Path where the JSON file will be written
///
/// # Returns
///
/// Result indicating success or failure
pub fn export_results_json(report: &AnalysisReport, output_path: &Path) -> Result<()> {
    let file = File::create(output_path).with_context(|| {
        format!("Failed to create JSON output file: {}", output_path.display())
    })?;

    serde_json::to_writer_pretty(file, report).context("Failed to write JSON data")?;

    Ok(())
}

/// Create a CSV report with one row per finding
///
/// Columns are `section`, `subject`, `transmission` and `value`.
pub fn create_csv_report(report: &AnalysisReport, output_path: &Path) -> Result<()> {
    let file = File::create(output_path).with_context(|| {
        format!("Failed to create CSV output file: {}", output_path.display())
    })?;

    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(["section", "subject", "transmission", "value"])
        .context("Failed to write CSV header")?;

    for pattern in &report.patterns {
        for occurrences in &pattern.occurrences {
            for offset in &occurrences.offsets {
                let offset = offset.to_string();
                writer
                    .write_record([
                        "match",
                        pattern.code.as_str(),
                        occurrences.transmission.as_str(),
                        offset.as_str(),
                    ])
                    .context("Failed to write CSV record")?;
            }
        }

        if let Some(best) = &pattern.best_variant {
            let value = format!("{} x{}", best.variant, best.count);
            writer
                .write_record([
                    "variant",
                    pattern.code.as_str(),
                    best.transmission.as_str(),
                    value.as_str(),
                ])
                .context("Failed to write CSV record")?;
        }
    }

    for palindrome in &report.palindromes {
        let start = palindrome.start.to_string();
        writer
            .write_record([
                "palindrome",
                palindrome.palindrome.as_str(),
                palindrome.transmission.as_str(),
                start.as_str(),
            ])
            .context("Failed to write CSV record")?;
    }

    for common in &report.common_substrings {
        let pair = format!("{}+{}", common.first, common.second);
        let offsets = format!("{}/{}", common.first_start, common.second_start);
        writer
            .write_record([
                "common_substring",
                common.substring.as_str(),
                pair.as_str(),
                offsets.as_str(),
            ])
            .context("Failed to write CSV record")?;
    }

    writer.flush().context("Failed to flush CSV writer")?;

    Ok(())
}

const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Transmission Analysis Report</title>
    <style>
        body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 1200px; margin: 0 auto; padding: 20px; }
        h1 { color: #2c3e50; border-bottom: 2px solid #3498db; padding-bottom: 10px; }
        h2 { color: #2980b9; margin-top: 30px; }
        .section { background-color: #f8f9fa; border-radius: 5px; padding: 15px; margin-bottom: 20px; box-shadow: 0 2px 5px rgba(0,0,0,0.1); }
        .timestamp { color: #7f8c8d; font-size: 0.9em; margin-bottom: 30px; }
        .summary { background-color: #e8f4f8; padding: 15px; border-radius: 5px; margin-bottom: 30px; }
        table { border-collapse: collapse; width: 100%; }
        td, th { border-bottom: 1px solid #eee; padding: 5px; text-align: left; }
        code { background-color: #eef; padding: 0 4px; }
    </style>
</head>
<body>
    <h1>Transmission Analysis Report</h1>
    <div class="timestamp">Generated on: {{timestamp}}</div>

    <div class="summary">
        <h2>Analysis Summary</h2>
        <p>Transmissions analyzed: {{transmission_count}}</p>
        <p>Patterns checked: {{pattern_count}}</p>
        <p>Total matches: {{total_matches}}</p>
    </div>

    <h2>Transmissions</h2>
    <div class="section">
        <table>
            <tr><th>Name</th><th>Length</th><th>SHA-256</th></tr>
            {{#each report.transmissions}}
            <tr><td>{{name}}</td><td>{{length}}</td><td><code>{{sha256}}</code></td></tr>
            {{/each}}
        </table>
    </div>

    <h2>Malicious Code</h2>
    {{#each report.patterns}}
    <div class="section">
        <h3><code>{{code}}</code> ({{name}})</h3>
        <table>
            {{#each occurrences}}
            <tr><td>{{transmission}}</td><td>{{len offsets}} times</td><td>{{#each offsets}}{{this}} {{/each}}</td></tr>
            {{/each}}
        </table>
        {{#if best_variant}}
        <p>Most frequent variant: <code>{{best_variant.variant}}</code> ({{best_variant.count}} times in {{best_variant.transmission}})</p>
        {{/if}}
    </div>
    {{/each}}

    <h2>Longest Palindromes</h2>
    <div class="section">
        <table>
            {{#each report.palindromes}}
            <tr><td>{{transmission}}</td><td>Position {{start}}</td><td><code>{{palindrome}}</code></td></tr>
            {{/each}}
        </table>
    </div>

    <h2>Longest Common Substrings</h2>
    <div class="section">
        <table>
            {{#each report.common_substrings}}
            <tr><td>{{first}} / {{second}}</td><td><code>{{substring}}</code></td></tr>
            {{/each}}
        </table>
    </div>
</body>
</html>
"#;

/// Create an HTML report
///
/// # Arguments
///
/// * `report` - Analysis report
/// * `output_path` - Path where the HTML file will be written
///
/// # Returns
///
/// Result indicating success or failure
pub fn create_html_report(report: &AnalysisReport, output_path: &Path) -> Result<()> {
    let mut handlebars = Handlebars::new();
    handlebars
        .register_template_string("report", HTML_TEMPLATE)
        .context("Failed to register HTML template")?;

    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let template_data = json!({
        "timestamp": timestamp,
        "transmission_count": report.transmissions.len(),
        "pattern_count": report.patterns.len(),
        "total_matches": report.total_matches(),
        "report": report,
    });

    let html = handlebars
        .render("report", &template_data)
        .context("Failed to render HTML template")?;

    let mut file = File::create(output_path).with_context(|| {
        format!("Failed to create HTML output file: {}", output_path.display())
    })?;

    file.write_all(html.as_bytes())
        .context("Failed to write HTML data")?;

    Ok(())
}

/// Create a short summary of a report
pub fn create_summary(report: &AnalysisReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n\n", "Analysis Summary".yellow().bold()));
    output.push_str(&format!("Transmissions analyzed: {}\n", report.transmissions.len()));
    output.push_str(&format!("Patterns checked: {}\n", report.patterns.len()));
    output.push_str(&format!("Total matches: {}\n", report.total_matches()));

    let detected: Vec<&str> = report
        .detected_patterns()
        .map(|p| p.code.as_str())
        .collect();
    if !detected.is_empty() {
        output.push_str(&format!(
            "{} {}\n",
            "Detected codes:".cyan().bold(),
            detected.join(", ")
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::{
        CommonSubstringReport, Occurrences, PalindromeReport, PatternReport,
        TransmissionSummary, VariantReport,
    };

    fn sample_report() -> AnalysisReport {
        AnalysisReport {
            transmissions: vec![
                TransmissionSummary {
                    name: "transmission1.txt".to_string(),
                    length: 8,
                    sha256: "00".repeat(32),
                },
                TransmissionSummary {
                    name: "transmission2.txt".to_string(),
                    length: 6,
                    sha256: "11".repeat(32),
                },
            ],
            patterns: vec![PatternReport {
                name: "mcode.txt:1".to_string(),
                code: "abc".to_string(),
                occurrences: vec![
                    Occurrences {
                        transmission: "transmission1.txt".to_string(),
                        offsets: vec![0, 5],
                    },
                    Occurrences {
                        transmission: "transmission2.txt".to_string(),
                        offsets: vec![],
                    },
                ],
                best_variant: Some(VariantReport {
                    variant: "ab".to_string(),
                    count: 2,
                    transmission: "transmission1.txt".to_string(),
                }),
            }],
            palindromes: vec![PalindromeReport {
                transmission: "transmission1.txt".to_string(),
                palindrome: "cac".to_string(),
                start: 2,
                length: 3,
            }],
            common_substrings: vec![CommonSubstringReport {
                first: "transmission1.txt".to_string(),
                second: "transmission2.txt".to_string(),
                first_index: 0,
                second_index: 1,
                substring: "ab".to_string(),
                first_start: 0,
                second_start: 4,
                length: 2,
            }],
        }
    }

    #[test]
    fn test_render_plain_layout() {
        let text = render_plain(&sample_report());
        assert!(text.starts_with("Code: abc\n"));
        assert!(text.contains("transmission1.txt ==> 2 times\n0, 5\n"));
        assert!(text.contains("transmission2.txt ==> 0 times\n\n"));
        assert!(text.contains("Most frequent variant: ab (2 times in transmission1.txt)"));
        assert!(text.contains("transmission1.txt ==> Position: 2\ncac\n----"));
        assert!(text.contains("T1-T2 ==> ab\n"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_markdown_wraps_output() {
        let text = format_report(&sample_report(), true);
        assert!(text.starts_with("```\n"));
        assert!(text.ends_with("```\n"));
    }

    #[test]
    fn test_missing_variant() {
        let mut report = sample_report();
        report.patterns[0].best_variant = None;
        assert!(render_plain(&report).contains("Most frequent variant: none found"));
    }

    #[test]
    fn test_exports() {
        let dir = tempfile::tempdir().unwrap();
        let report = sample_report();

        let json_path = dir.path().join("report.json");
        export_results_json(&report, &json_path).unwrap();
        let parsed: AnalysisReport =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed, report);

        let csv_path = dir.path().join("report.csv");
        create_csv_report(&report, &csv_path).unwrap();
        let csv_text = std::fs::read_to_string(&csv_path).unwrap();
        assert!(csv_text.starts_with("section,subject,transmission,value\n"));
        assert!(csv_text.contains("match,abc,transmission1.txt,5\n"));
        assert!(csv_text.contains("variant,abc,transmission1.txt,ab x2\n"));
        assert!(csv_text.contains("palindrome,cac,transmission1.txt,2\n"));
        assert!(csv_text.contains("common_substring,ab,transmission1.txt+transmission2.txt,0/4\n"));

        let html_path = dir.path().join("report.html");
        create_html_report(&report, &html_path).unwrap();
        let html = std::fs::read_to_string(&html_path).unwrap();
        assert!(html.contains("Total matches: 2"));
        assert!(html.contains("<code>cac</code>"));

        let text_path = dir.path().join("checking.txt");
        write_text_report(&report, &text_path).unwrap();
        assert_eq!(std::fs::read_to_string(&text_path).unwrap(), render_plain(&report));
    }

    #[test]
    fn test_pair_labels_follow_list_position() {
        let mut report = sample_report();
        // Same file name from two directories
        report.transmissions[1].name = "transmission1.txt".to_string();
        report.common_substrings[0].second = "transmission1.txt".to_string();

        let text = render_plain(&report);
        assert!(text.contains("T1-T2 ==> ab\n"));
        assert!(!text.contains("T1-T1"));
    }

    #[test]
    fn test_summary_lists_detected_codes() {
        let summary = create_summary(&sample_report());
        assert!(summary.contains("Total matches: 2"));
        assert!(summary.contains("abc"));
    }
}

/// Simple example demonstrating how to use the Transmission Analyzer library

use anyhow::Result;
use transmission_analyzer::analyze_files;

fn main() -> Result<()> {
    let dir = tempfile::tempdir()?;

    // Create sample transmissions and a malicious code list
    let transmissions = vec![
        dir.path().join("transmission1.txt"),
        dir.path().join("transmission2.txt"),
    ];
    std::fs::write(&transmissions[0], "a1b2c3racecar0ffee0a1b2c3\n")?;
    std::fs::write(&transmissions[1], "0ffee0deadbeefa1b2c3\n")?;

    let patterns = dir.path().join("mcode.txt");
    std::fs::write(&patterns, "a1b2c3\nbeef\n")?;

    println!("Analyzing {} transmissions", transmissions.len());

    let report = analyze_files(&transmissions, &patterns)?;

    for pattern in &report.patterns {
        println!("\nCode: {}", pattern.code);
        for occurrence in &pattern.occurrences {
            println!("  {} at {:?}", occurrence.transmission, occurrence.offsets);
        }
        if let Some(best) = &pattern.best_variant {
            println!(
                "  most frequent variant: {} ({} times in {})",
                best.variant, best.count, best.transmission
            );
        }
    }

    for palindrome in &report.palindromes {
        println!(
            "\nLongest palindrome in {}: {} at {}",
            palindrome.transmission, palindrome.palindrome, palindrome.start
        );
    }

    for common in &report.common_substrings {
        println!(
            "\n{} / {} share: {}",
            common.first, common.second, common.substring
        );
    }

    Ok(())
}

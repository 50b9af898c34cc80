//! Progress display module
//!
//! Provides styled spinners and result summaries for the pentesting aesthetic.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::analyze::DuplicateReport;
use crate::engine::RunState;
use crate::stats::StatsSnapshot;

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║   ██╗    ██╗ ██████╗ ██████╗ ██████╗ ██╗     ██╗███████╗████████╗           ║
║   ██║    ██║██╔═══██╗██╔══██╗██╔══██╗██║     ██║██╔════╝╚══██╔══╝           ║
║   ██║ █╗ ██║██║   ██║██████╔╝██║  ██║██║     ██║███████╗   ██║              ║
║   ██║███╗██║██║   ██║██╔══██╗██║  ██║██║     ██║╚════██║   ██║              ║
║   ╚███╔███╔╝╚██████╔╝██║  ██║██████╔╝███████╗██║███████║   ██║              ║
║    ╚══╝╚══╝  ╚═════╝ ╚═╝  ╚═╝╚═════╝ ╚══════╝╚═╝╚══════╝   ╚═╝              ║
║                                                                              ║
║   ███████╗ ██████╗ ██████╗  ██████╗ ███████╗                                ║
║   ██╔════╝██╔═══██╗██╔══██╗██╔════╝ ██╔════╝                                ║
║   █████╗  ██║   ██║██████╔╝██║  ███╗█████╗                                  ║
║   ██╔══╝  ██║   ██║██╔══██╗██║   ██║██╔══╝                                  ║
║   ██║     ╚██████╔╝██║  ██║╚██████╔╝███████╗                                ║
║   ╚═╝      ╚═════╝ ╚═╝  ╚═╝ ╚═════╝ ╚══════╝                                ║
║                                                                              ║
║                  Name-Based Password Candidate Generation                      ║
║                         For Penetration Testing                               ║
║                                                              v1.0.0          ║
╚══════════════════════════════════════════════════════════════════════════════╝
"#;

    println!("{}", banner.green());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".green(), text);
}

/// Create a styled spinner for indeterminate progress
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();

    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
    );

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Print final generation statistics
pub fn print_generation_summary(
    snapshot: &StatsSnapshot,
    state: RunState,
    seed_count: usize,
    output_path: &str,
) {
    println!();
    println!("{}", "═".repeat(60).green());
    println!("{}", "                    GENERATION COMPLETE".green().bold());
    println!("{}", "═".repeat(60).green());
    println!();

    println!(
        "  {} {}",
        "Words generated:    ".green(),
        format_number(snapshot.generated).green().bold()
    );
    println!(
        "  {} {}",
        "Duplicates skipped: ".yellow(),
        format_number(snapshot.duplicates)
    );
    println!("  {} {}", "Name seeds:         ".green(), seed_count);
    println!();

    println!(
        "  {} {}",
        "Duration:           ".green(),
        format_duration(snapshot.elapsed)
    );
    println!(
        "  {} {:.0} words/sec",
        "Throughput:         ".green(),
        snapshot.words_per_second
    );

    if snapshot.monitoring_available {
        println!(
            "  {} {} MB",
            "Peak memory:        ".green(),
            snapshot.peak_memory_mb
        );
        println!(
            "  {} {:.1}/100",
            "Efficiency score:   ".green(),
            snapshot.efficiency_score
        );
    } else {
        println!(
            "  {} {}",
            "Resource monitor:   ".yellow(),
            "unavailable".yellow()
        );
    }

    println!();
    println!("  {} {}", "Output:             ".green(), output_path);

    if state == RunState::HaltedResourceLimit {
        println!();
        print_warning("Generation stopped early due to high memory usage");
        print_warning("The wordlist is valid but incomplete");
    }

    println!();
    println!("{}", "═".repeat(60).green());
}

/// Print a duplicate analysis report
pub fn print_analysis_report(report: &DuplicateReport, path: &str) {
    println!();
    println!("{}", "═".repeat(60).green());
    println!("{}", "                    DUPLICATE ANALYSIS".green().bold());
    println!("{}", "═".repeat(60).green());
    println!();

    println!("  {} {}", "File:             ".green(), path);
    println!(
        "  {} {}",
        "Size:             ".green(),
        report.file_size_human()
    );
    println!();

    println!(
        "  {} {}",
        "Total words:      ".green(),
        format_number(report.total_words)
    );
    println!(
        "  {} {}",
        "Unique words:     ".green(),
        format_number(report.unique_words)
    );
    println!(
        "  {} {}",
        "Duplicated words: ".yellow(),
        format_number(report.duplicated_words)
    );
    println!(
        "  {} {}",
        "Redundant copies: ".yellow(),
        format_number(report.extra_copies)
    );
    println!(
        "  {} {:.2}%",
        "Duplication rate: ".yellow(),
        report.duplicate_percentage
    );

    if !report.top_duplicates.is_empty() {
        println!();
        print_header("Most duplicated");
        for (word, count) in &report.top_duplicates {
            print_bullet(&format!("{} ({}x)", word, count));
        }
    } else {
        println!();
        print_success("No duplicate lines found");
    }

    println!();
    println!("{}", "═".repeat(60).green());
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30.0s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h 1m");
    }
}

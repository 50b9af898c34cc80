//! Command-line interface definition for wordlist-forge
//!
//! Provides argument parsing and validation for the wordlist generator.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Name-based password wordlist generator for penetration testing
///
/// Expands first/middle/last names into password candidates using case,
/// leet-speak, numeric and special-character patterns, with duplicate
/// suppression and resource-aware early termination.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wordlist-forge",
    author = "m0h1nd4",
    version,
    about = "Name-based password wordlist generator for penetration testing",
    long_about = r#"
╔══════════════════════════════════════════════════════════════════════════════╗
║                          WORDLIST-FORGE v1.0.0                               ║
║                  Name-Based Password Candidate Generation                     ║
║                         For Penetration Testing                               ║
╚══════════════════════════════════════════════════════════════════════════════╝

Generate targeted password wordlists from personal names. Two engines are
available: compact (fast, exact duplicate suppression) and exhaustive (broad
pattern coverage, Bloom-filter duplicate suppression for bounded memory).

EXAMPLES:
    # Compact generation for a target
    wordlist-forge --first-name john --last-name doe

    # Exhaustive mode with a middle name and custom bounds
    wordlist-forge --first-name john --middle-name q --last-name doe \
        --mode exhaustive --min-length 6 --max-length 16

    # Disable leet-speak and special characters
    wordlist-forge --first-name john --last-name doe \
        --no-leet --no-special-chars

    # Count exact duplicates in an existing wordlist
    wordlist-forge --analyze rockyou.txt
"#,
    after_help = "For more information, visit: https://github.com/m0h1nd4/wordlist-forge"
)]
pub struct Args {
    /// Target's first name
    #[arg(long, value_name = "NAME")]
    pub first_name: Option<String>,

    /// Target's last name
    #[arg(long, value_name = "NAME")]
    pub last_name: Option<String>,

    /// Target's middle name (optional)
    #[arg(long, value_name = "NAME")]
    pub middle_name: Option<String>,

    /// Generation mode
    #[arg(short, long, value_enum, default_value_t = Mode::Compact)]
    pub mode: Mode,

    /// Output file (auto-generated under ./wordlists if not provided)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Minimum candidate length
    #[arg(long, value_name = "LEN", default_value_t = 3)]
    pub min_length: usize,

    /// Maximum candidate length
    #[arg(long, value_name = "LEN", default_value_t = 12)]
    pub max_length: usize,

    /// Disable leet-speak substitutions
    #[arg(long, default_value_t = false)]
    pub no_leet: bool,

    /// Disable capitalization variants
    #[arg(long, default_value_t = false)]
    pub no_capitals: bool,

    /// Disable appended numbers
    #[arg(long, default_value_t = false)]
    pub no_append_numbers: bool,

    /// Disable prepended numbers
    #[arg(long, default_value_t = false)]
    pub no_prepend_numbers: bool,

    /// Disable special characters
    #[arg(long, default_value_t = false)]
    pub no_special_chars: bool,

    /// Analyze an existing wordlist for exact duplicates instead of generating
    #[arg(long, value_name = "FILE", conflicts_with_all = ["first_name", "last_name", "middle_name"])]
    pub analyze: Option<PathBuf>,

    /// Quiet mode - minimal output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Generation engine variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Narrow pattern set with an exact duplicate set (fast, low memory)
    Compact,
    /// Broad pattern set with Bloom-filter deduplication (capped per seed)
    Exhaustive,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Compact => "compact",
            Mode::Exhaustive => "exhaustive",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Args {
    /// Whether the invocation runs the duplicate analyzer
    pub fn is_analysis(&self) -> bool {
        self.analyze.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_args_parse() {
        let args = Args::parse_from([
            "wordlist-forge",
            "--first-name",
            "john",
            "--last-name",
            "doe",
            "--mode",
            "exhaustive",
            "--no-leet",
        ]);

        assert_eq!(args.first_name.as_deref(), Some("john"));
        assert_eq!(args.mode, Mode::Exhaustive);
        assert!(args.no_leet);
        assert!(!args.no_capitals);
        assert!(!args.is_analysis());
        assert_eq!(args.min_length, 3);
        assert_eq!(args.max_length, 12);
    }

    #[test]
    fn test_analysis_args_parse() {
        let args = Args::parse_from(["wordlist-forge", "--analyze", "wordlist.txt"]);

        assert!(args.is_analysis());
        assert_eq!(args.analyze.unwrap(), PathBuf::from("wordlist.txt"));
    }

    #[test]
    fn test_analysis_conflicts_with_names() {
        let result = Args::try_parse_from([
            "wordlist-forge",
            "--analyze",
            "wordlist.txt",
            "--first-name",
            "john",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_mode_as_str() {
        assert_eq!(Mode::Compact.as_str(), "compact");
        assert_eq!(Mode::Exhaustive.as_str(), "exhaustive");
    }
}

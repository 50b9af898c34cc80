//! # Wordlist Forge
//!
//! Name-based password wordlist generator for penetration testing.
//!
//! ## Features
//!
//! - **Name seeds**: Expands first/middle/last names into combination seeds
//! - **Pattern transforms**: Case, leet-speak, numeric and special-character variants
//! - **Dual engines**: Compact (exact dedup) and exhaustive (Bloom-filter dedup)
//! - **Resource governor**: Samples process memory and halts a runaway run early
//! - **Streaming output**: Candidates are written as they are generated
//! - **Duplicate analysis**: Counts exact duplicate lines in existing wordlists
//!
//! ## Usage
//!
//! ```bash
//! # Compact generation for a target
//! wordlist-forge --first-name john --last-name doe
//!
//! # Exhaustive mode with custom length bounds
//! wordlist-forge --first-name john --last-name doe --mode exhaustive --max-length 16
//!
//! # Analyze an existing wordlist for duplicates
//! wordlist-forge --analyze rockyou.txt
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use wordlist_forge::cli::Mode;
//! use wordlist_forge::config::GeneratorConfig;
//! use wordlist_forge::engine::create_generator;
//! use wordlist_forge::monitor::create_probe;
//!
//! let config = GeneratorConfig::new("john", "doe", None, 3, 12).unwrap();
//! let mut engine = create_generator(Mode::Compact, config, create_probe(), None);
//!
//! while let Some(candidate) = engine.next() {
//!     println!("{}", candidate);
//! }
//! ```

pub mod analyze;
pub mod cli;
pub mod config;
pub mod dedup;
pub mod engine;
pub mod monitor;
pub mod output;
pub mod patterns;
pub mod progress;
pub mod seeds;
pub mod stats;

pub use cli::{Args, Mode};
pub use config::GeneratorConfig;
pub use engine::{create_generator, RunState, WordlistGenerator};

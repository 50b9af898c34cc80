//! Wordlist duplicate analysis
//!
//! Counts exact (case-sensitive) duplicate lines in an existing wordlist
//! using a memory-mapped scan, so large files never need to be read into a
//! single allocation.

use ahash::RandomState;
use bytesize::ByteSize;
use hashbrown::HashMap;
use std::fs::File;
use std::path::Path;

/// Number of top duplicated words carried in the report
const TOP_DUPLICATES: usize = 20;

/// Result of a duplicate analysis pass
#[derive(Debug, Clone, Default)]
pub struct DuplicateReport {
    /// Non-empty lines processed
    pub total_words: u64,
    /// Distinct words observed
    pub unique_words: u64,
    /// Distinct words appearing more than once
    pub duplicated_words: u64,
    /// Redundant copies beyond the first occurrence of each duplicated word
    pub extra_copies: u64,
    /// Duplicated distinct words as a percentage of all distinct words
    pub duplicate_percentage: f64,
    /// Most duplicated words, by count descending then word ascending
    pub top_duplicates: Vec<(String, u64)>,
    /// Input file size in bytes
    pub file_size: u64,
}

impl DuplicateReport {
    pub fn file_size_human(&self) -> String {
        ByteSize(self.file_size).to_string()
    }
}

/// Count exact duplicate lines in a wordlist file
///
/// Lines are trimmed before counting; empty lines are skipped. Invalid UTF-8
/// is decoded lossily rather than aborting the pass.
pub fn analyze_file(path: &Path) -> anyhow::Result<DuplicateReport> {
    let file = File::open(path)
        .map_err(|e| anyhow::anyhow!("cannot open wordlist {:?}: {}", path, e))?;
    let file_size = file.metadata()?.len();

    // Zero-length files cannot be mapped; there is nothing to count anyway
    if file_size == 0 {
        return Ok(DuplicateReport::default());
    }

    let mmap = unsafe { memmap2::Mmap::map(&file)? };

    let mut counts: HashMap<String, u64, RandomState> = HashMap::with_hasher(RandomState::new());
    let mut total_words = 0u64;

    let mut position = 0usize;
    while position < mmap.len() {
        let remaining = &mmap[position..];
        let line_end = memchr::memchr(b'\n', remaining)
            .map(|i| i + 1)
            .unwrap_or(remaining.len());

        let line_bytes = &remaining[..line_end];
        position += line_end;

        let line_bytes = line_bytes.strip_suffix(b"\n").unwrap_or(line_bytes);
        let line_bytes = line_bytes.strip_suffix(b"\r").unwrap_or(line_bytes);

        let word = match std::str::from_utf8(line_bytes) {
            Ok(s) => s.trim(),
            Err(_) => {
                log::warn!("invalid UTF-8 line at byte {}, decoding lossily", position);
                let owned = String::from_utf8_lossy(line_bytes).into_owned();
                let trimmed = owned.trim().to_string();
                if trimmed.is_empty() {
                    continue;
                }
                total_words += 1;
                *counts.entry(trimmed).or_insert(0) += 1;
                continue;
            }
        };

        if word.is_empty() {
            continue;
        }

        total_words += 1;
        *counts.entry(word.to_string()).or_insert(0) += 1;
    }

    Ok(build_report(counts, total_words, file_size))
}

fn build_report(
    counts: HashMap<String, u64, RandomState>,
    total_words: u64,
    file_size: u64,
) -> DuplicateReport {
    let unique_words = counts.len() as u64;

    let mut duplicates: Vec<(String, u64)> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .collect();

    let duplicated_words = duplicates.len() as u64;
    let extra_copies: u64 = duplicates.iter().map(|(_, count)| count - 1).sum();

    let duplicate_percentage = if unique_words > 0 {
        duplicated_words as f64 / unique_words as f64 * 100.0
    } else {
        0.0
    };

    duplicates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    duplicates.truncate(TOP_DUPLICATES);

    DuplicateReport {
        total_words,
        unique_words,
        duplicated_words,
        extra_copies,
        duplicate_percentage,
        top_duplicates: duplicates,
        file_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_wordlist(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_counts_exact_duplicates() {
        let file = write_wordlist(&[
            "password", "admin", "password", "letmein", "password", "admin",
        ]);

        let report = analyze_file(file.path()).unwrap();

        assert_eq!(report.total_words, 6);
        assert_eq!(report.unique_words, 3);
        assert_eq!(report.duplicated_words, 2);
        assert_eq!(report.extra_copies, 3); // 2 extra "password" + 1 extra "admin"
        assert_eq!(report.top_duplicates[0], ("password".to_string(), 3));
        assert_eq!(report.top_duplicates[1], ("admin".to_string(), 2));
    }

    #[test]
    fn test_case_sensitive_counting() {
        let file = write_wordlist(&["Password", "password", "PASSWORD"]);

        let report = analyze_file(file.path()).unwrap();

        assert_eq!(report.unique_words, 3);
        assert_eq!(report.duplicated_words, 0);
        assert_eq!(report.extra_copies, 0);
    }

    #[test]
    fn test_skips_empty_and_whitespace_lines() {
        let file = write_wordlist(&["word", "", "   ", "word"]);

        let report = analyze_file(file.path()).unwrap();

        assert_eq!(report.total_words, 2);
        assert_eq!(report.unique_words, 1);
        assert_eq!(report.duplicated_words, 1);
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let file = write_wordlist(&["  secret", "secret  ", "secret"]);

        let report = analyze_file(file.path()).unwrap();

        assert_eq!(report.unique_words, 1);
        assert_eq!(report.top_duplicates[0], ("secret".to_string(), 3));
    }

    #[test]
    fn test_empty_file() {
        let file = NamedTempFile::new().unwrap();

        let report = analyze_file(file.path()).unwrap();

        assert_eq!(report.total_words, 0);
        assert_eq!(report.unique_words, 0);
        assert_eq!(report.duplicate_percentage, 0.0);
        assert!(report.top_duplicates.is_empty());
    }

    #[test]
    fn test_no_trailing_newline() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "alpha\nbeta\nalpha").unwrap();
        file.flush().unwrap();

        let report = analyze_file(file.path()).unwrap();

        assert_eq!(report.total_words, 3);
        assert_eq!(report.duplicated_words, 1);
    }

    #[test]
    fn test_duplicate_percentage() {
        let file = write_wordlist(&["a1", "a1", "b2", "c3", "d4"]);

        let report = analyze_file(file.path()).unwrap();

        // 1 duplicated word out of 4 unique
        assert!((report.duplicate_percentage - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_file_errors() {
        let result = analyze_file(Path::new("/nonexistent/wordlist.txt"));
        assert!(result.is_err());
    }
}

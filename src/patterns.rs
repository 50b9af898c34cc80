//! Pattern transform library
//!
//! Pure transforms that expand one base word into bounded sets of password
//! candidates. Two profiles share the same surface: `compact` favors a small,
//! fast variant set; `exhaustive` casts a wider net and relies on the engine
//! to cap per-seed volume.
//!
//! Number and special-character variants are capped at a fixed 20-character
//! length regardless of the configured bounds; the engine re-filters every
//! candidate against `[min_length, max_length]` anyway.

use crate::seeds::capitalize;

/// Absolute length ceiling on affixed variants (char count)
pub const HARD_LENGTH_CAP: usize = 20;

#[inline]
fn push_capped(out: &mut Vec<String>, candidate: String) {
    if candidate.chars().count() <= HARD_LENGTH_CAP {
        out.push(candidate);
    }
}

/// Replace a letter class in both cases with a fixed substitute
fn replace_class(word: &str, lower: char, replacement: char) -> String {
    word.chars()
        .map(|c| {
            if c.to_lowercase().next() == Some(lower) {
                replacement
            } else {
                c
            }
        })
        .collect()
}

/// Narrow, fast transform profile
pub mod compact {
    use super::*;

    const NUMBERS: &[&str] = &["1", "12", "123", "1234", "007", "69", "2024", "2023"];
    const SPECIALS: &[char] = &['!', '@', '#', '$'];

    /// Case variants: all-uppercase and capitalized
    pub fn capitalization(word: &str) -> Vec<String> {
        vec![word.to_uppercase(), capitalize(word)]
    }

    /// Whole-word single-class leet substitutions, original first
    pub fn leet(word: &str) -> Vec<String> {
        let mut out = vec![word.to_string()];
        let lower = word.to_lowercase();

        if lower.contains('a') {
            out.push(replace_class(word, 'a', '4'));
            out.push(replace_class(word, 'a', '@'));
        }
        if lower.contains('e') {
            out.push(replace_class(word, 'e', '3'));
        }
        if lower.contains('i') {
            out.push(replace_class(word, 'i', '1'));
        }
        if lower.contains('o') {
            out.push(replace_class(word, 'o', '0'));
        }
        if lower.contains('s') {
            out.push(replace_class(word, 's', '5'));
            out.push(replace_class(word, 's', '$'));
        }

        out
    }

    /// Common numeric tokens plus single digits appended
    pub fn number_append(word: &str) -> Vec<String> {
        let mut out = Vec::with_capacity(NUMBERS.len() + 10);
        for num in NUMBERS {
            push_capped(&mut out, format!("{}{}", word, num));
        }
        for digit in 0..10 {
            push_capped(&mut out, format!("{}{}", word, digit));
        }
        out
    }

    /// Leading numeric tokens, a reduced set of the append list
    pub fn number_prepend(word: &str) -> Vec<String> {
        let mut out = Vec::with_capacity(10);
        for num in &NUMBERS[..5] {
            push_capped(&mut out, format!("{}{}", num, word));
        }
        for digit in 0..5 {
            push_capped(&mut out, format!("{}{}", digit, word));
        }
        out
    }

    /// Symbol prefix and suffix variants
    pub fn special_chars(word: &str) -> Vec<String> {
        let mut out = Vec::with_capacity(SPECIALS.len() * 2);
        for &ch in SPECIALS {
            push_capped(&mut out, format!("{}{}", ch, word));
            push_capped(&mut out, format!("{}{}", word, ch));
        }
        out
    }
}

/// Broad transform profile, capped downstream by the engine
pub mod exhaustive {
    use super::*;

    const NUMBERS: &[&str] = &["1", "12", "123", "1234", "12345", "007", "69", "420", "777"];
    const YEARS: &[&str] = &["2024", "2023", "2022", "2021", "2020"];
    const SPECIALS: &[char] = &['!', '@', '#', '$', '%', '&', '*'];
    const SEPARATORS: &[char] = &[' ', '-', '_', '.'];

    const LEET_SUBSTITUTIONS: &[(char, char)] = &[
        ('a', '4'),
        ('a', '@'),
        ('e', '3'),
        ('i', '1'),
        ('i', '!'),
        ('o', '0'),
        ('s', '5'),
        ('s', '$'),
        ('t', '7'),
    ];

    /// Case variants plus a camel-case join on the first separator found
    pub fn capitalization(word: &str) -> Vec<String> {
        let mut out = vec![word.to_uppercase(), capitalize(word)];

        for &sep in SEPARATORS {
            if word.contains(sep) {
                let mut parts = word.split(sep);
                let mut camel = parts.next().unwrap_or_default().to_string();
                for part in parts {
                    camel.push_str(&capitalize(part));
                }
                out.push(camel);
                break;
            }
        }

        out
    }

    /// Per substitution pair: a lowercased variant and a case-preserving one
    pub fn leet(word: &str) -> Vec<String> {
        let mut out = vec![word.to_string()];
        let lower = word.to_lowercase();

        for &(target, replacement) in LEET_SUBSTITUTIONS {
            if lower.contains(target) {
                out.push(lower.replace(target, &replacement.to_string()));
                out.push(replace_class(word, target, replacement));
            }
        }

        out
    }

    /// Numeric tokens, recent years, single digits, and tens steps appended
    pub fn number_append(word: &str) -> Vec<String> {
        let mut out = Vec::with_capacity(NUMBERS.len() + YEARS.len() + 19);
        for num in NUMBERS {
            push_capped(&mut out, format!("{}{}", word, num));
        }
        for year in YEARS {
            push_capped(&mut out, format!("{}{}", word, year));
        }
        for digit in 0..10 {
            push_capped(&mut out, format!("{}{}", word, digit));
        }
        for tens in (10..100).step_by(10) {
            push_capped(&mut out, format!("{}{}", word, tens));
        }
        out
    }

    /// Reduced token set, recent years, and single digits prepended
    pub fn number_prepend(word: &str) -> Vec<String> {
        let mut out = Vec::with_capacity(NUMBERS.len() + 13);
        for num in &NUMBERS[..8] {
            push_capped(&mut out, format!("{}{}", num, word));
        }
        for year in &YEARS[..3] {
            push_capped(&mut out, format!("{}{}", year, word));
        }
        for digit in 0..10 {
            push_capped(&mut out, format!("{}{}", digit, word));
        }
        out
    }

    /// Prefix, suffix, symmetric wrap, and limited prefix/suffix crosses
    pub fn special_chars(word: &str) -> Vec<String> {
        let mut out = Vec::with_capacity(SPECIALS.len() * 3 + 4);
        for &ch in SPECIALS {
            push_capped(&mut out, format!("{}{}", ch, word));
            push_capped(&mut out, format!("{}{}", word, ch));
            if matches!(ch, '!' | '@' | '#') {
                push_capped(&mut out, format!("{}{}{}", ch, word, ch));
            }
        }
        for &prefix in &SPECIALS[..2] {
            for &suffix in &SPECIALS[..2] {
                push_capped(&mut out, format!("{}{}{}", prefix, word, suffix));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_leet_covers_digits() {
        let variants = compact::leet("test");

        assert_eq!(variants[0], "test");
        assert!(variants.iter().any(|v| v.contains('3'))); // e -> 3
        assert!(variants.iter().any(|v| v.contains('5'))); // s -> 5
    }

    #[test]
    fn test_compact_leet_case_insensitive_targets() {
        let variants = compact::leet("PASS");
        assert!(variants.contains(&"P455".to_string()));
    }

    #[test]
    fn test_compact_capitalization() {
        let variants = compact::capitalization("alice");

        assert!(variants.contains(&"ALICE".to_string()));
        assert!(variants.contains(&"Alice".to_string()));
    }

    #[test]
    fn test_exhaustive_camel_case_on_separator() {
        let variants = exhaustive::capitalization("john_doe");
        assert!(variants.contains(&"johnDoe".to_string()));

        let variants = exhaustive::capitalization("mary-jane-watson");
        assert!(variants.contains(&"maryJaneWatson".to_string()));
    }

    #[test]
    fn test_exhaustive_leet_preserves_case() {
        let variants = exhaustive::leet("Test");

        // Lowercased-then-substituted variant
        assert!(variants.contains(&"7es7".to_string()));
        // Case-preserving variant only swaps targeted characters
        assert!(variants.contains(&"T3st".to_string()));
    }

    #[test]
    fn test_number_append_tokens() {
        let variants = compact::number_append("doe");

        assert!(variants.contains(&"doe123".to_string()));
        assert!(variants.contains(&"doe2024".to_string()));
        assert!(variants.contains(&"doe7".to_string()));
    }

    #[test]
    fn test_number_prepend_reduced_set() {
        let variants = compact::number_prepend("doe");

        assert!(variants.contains(&"007doe".to_string()));
        assert!(variants.contains(&"4doe".to_string()));
        // 69 is sixth in the token list, prepend only takes the first five
        assert!(!variants.contains(&"69doe".to_string()));
        assert!(!variants.contains(&"9doe".to_string()));
    }

    #[test]
    fn test_hard_length_cap_enforced() {
        let long_word = "a".repeat(19);

        for variant in compact::number_append(&long_word)
            .into_iter()
            .chain(exhaustive::number_append(&long_word))
            .chain(exhaustive::special_chars(&long_word))
        {
            assert!(
                variant.chars().count() <= HARD_LENGTH_CAP,
                "variant {:?} exceeds cap",
                variant
            );
        }
    }

    #[test]
    fn test_exhaustive_special_wraps_and_crosses() {
        let variants = exhaustive::special_chars("doe");

        assert!(variants.contains(&"!doe!".to_string()));
        assert!(variants.contains(&"@doe@".to_string()));
        assert!(variants.contains(&"!doe@".to_string()));
        assert!(variants.contains(&"@doe!".to_string()));
        // % is not in the wrap set
        assert!(!variants.contains(&"%doe%".to_string()));
    }

    #[test]
    fn test_exhaustive_number_append_years_and_tens() {
        let variants = exhaustive::number_append("doe");

        assert!(variants.contains(&"doe2020".to_string()));
        assert!(variants.contains(&"doe90".to_string()));
        assert!(variants.contains(&"doe420".to_string()));
    }
}

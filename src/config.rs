//! Generator configuration
//!
//! Immutable configuration record for a generation run: normalized target
//! names, length bounds, and the five pattern feature toggles.

use thiserror::Error;

/// Errors raised while constructing a [`GeneratorConfig`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("first name must not be empty")]
    EmptyFirstName,

    #[error("last name must not be empty")]
    EmptyLastName,

    #[error("minimum length {min} exceeds maximum length {max}")]
    InvalidLengthBounds { min: usize, max: usize },
}

/// Configuration for one generation run
///
/// Names are normalized (trimmed, lower-cased) at construction. A run never
/// mutates its configuration; toggles are plain fields so callers can flip
/// them before handing the config to the engine factory.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub min_length: usize,
    pub max_length: usize,
    pub enable_leet: bool,
    pub enable_capitals: bool,
    pub append_numbers: bool,
    pub prepend_numbers: bool,
    pub special_chars: bool,
}

impl GeneratorConfig {
    /// Create a configuration with all pattern toggles enabled
    ///
    /// Fails fast when the first or last name normalizes to an empty string
    /// or the length bounds are inverted.
    pub fn new(
        first_name: &str,
        last_name: &str,
        middle_name: Option<&str>,
        min_length: usize,
        max_length: usize,
    ) -> Result<Self, ConfigError> {
        let first_name = normalize(first_name);
        let last_name = normalize(last_name);
        let middle_name = middle_name.map(normalize).filter(|m| !m.is_empty());

        if first_name.is_empty() {
            return Err(ConfigError::EmptyFirstName);
        }
        if last_name.is_empty() {
            return Err(ConfigError::EmptyLastName);
        }
        if min_length > max_length {
            return Err(ConfigError::InvalidLengthBounds {
                min: min_length,
                max: max_length,
            });
        }

        Ok(Self {
            first_name,
            last_name,
            middle_name,
            min_length,
            max_length,
            enable_leet: true,
            enable_capitals: true,
            append_numbers: true,
            prepend_numbers: true,
            special_chars: true,
        })
    }

    /// Check a candidate against the configured length bounds (char count)
    #[inline]
    pub fn within_bounds(&self, word: &str) -> bool {
        let len = if word.is_ascii() {
            word.len()
        } else {
            word.chars().count()
        };
        self.min_length <= len && len <= self.max_length
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

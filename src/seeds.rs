//! Name seed builder
//!
//! Expands the configured names into the bounded set of base words that all
//! pattern variations grow from. The pattern count is a constant regardless
//! of name length, which keeps the later combinatorial stages in check.

use crate::config::GeneratorConfig;
use ahash::RandomState;
use hashbrown::HashSet;

/// Build the seed set for a generation run
///
/// Returned sorted so that seed iteration order is fixed for the run.
pub fn build_seed_set(config: &GeneratorConfig) -> Vec<String> {
    let mut seeds: HashSet<String, RandomState> = HashSet::with_hasher(RandomState::new());

    let first = config.first_name.as_str();
    let last = config.last_name.as_str();
    let middle = config.middle_name.as_deref();

    let mut parts = vec![first, last];
    if let Some(m) = middle {
        parts.push(m);
    }

    // Individual names with basic case variants
    for part in &parts {
        seeds.insert((*part).to_string());
        seeds.insert(part.to_uppercase());
        seeds.insert(capitalize(part));
    }

    // Fixed first/last combination patterns
    seeds.insert(format!("{}{}", first, last));
    seeds.insert(format!("{}{}", last, first));
    seeds.insert(format!("{}_{}", first, last));
    seeds.insert(format!("{}.{}", first, last));
    seeds.insert(format!("{}-{}", first, last));
    seeds.insert(format!("{}{}", initial(first), last));
    seeds.insert(format!("{}{}", first, initial(last)));
    seeds.insert(format!("{}{}", initial(first), initial(last)));
    seeds.insert(format!("{}123", first));
    seeds.insert(format!("{}123", last));
    seeds.insert(format!("admin{}", last));
    seeds.insert(format!("{}admin", first));

    // Limited middle name combinations
    if let Some(m) = middle {
        seeds.insert(format!("{}{}{}", first, initial(m), last));
        seeds.insert(format!("{}{}{}", initial(first), initial(m), initial(last)));
        seeds.insert(format!("{}{}", m, last));
        seeds.insert(format!("{}{}", first, m));
    }

    let mut seeds: Vec<String> = seeds
        .into_iter()
        .filter(|word| config.within_bounds(word))
        .collect();
    seeds.sort_unstable();
    seeds
}

/// First character to uppercase, remainder to lowercase
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

fn initial(name: &str) -> String {
    name.chars().take(1).collect()
}

//! Deterministic text-to-identifier normalization with collision suffixing.

use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::OnceLock;

fn non_alnum_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"))
}

/// Converts arbitrary text into a snake_case identifier.
///
/// Lowercases the input, replaces every run of characters outside `[a-z0-9]`
/// with a single `_`, trims `_` at both ends, substitutes `node` for an empty
/// result, and prefixes `node_` when the result starts with a digit.
pub fn sanitize_id(text: &str) -> String {
    let lowered = text.to_lowercase();
    let replaced = non_alnum_regex().replace_all(&lowered, "_");
    let trimmed = replaced.trim_matches('_');
    if trimmed.is_empty() {
        return "node".to_string();
    }
    if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("node_{trimmed}");
    }
    trimmed.to_string()
}

/// Like [`sanitize_id`], but avoids collisions against `existing` by
/// appending `_2`, `_3`, ... until a free name is found. The accepted name is
/// inserted into the set.
pub fn sanitize_id_unique(text: &str, existing: &mut FxHashSet<String>) -> String {
    let base = sanitize_id(text);
    let mut candidate = base.clone();
    let mut n = 2u32;
    while existing.contains(&candidate) {
        candidate = format!("{base}_{n}");
        n += 1;
    }
    existing.insert(candidate.clone());
    candidate
}

//! Utility functions for column matching.

/// Normalizes a header or synonym for comparison: lowercases and turns
/// separators into single spaces, so `Search_Volume`, `search-volume` and
/// `Search  Volume` compare equal.
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

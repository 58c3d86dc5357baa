//! Tokenization for match scoring: split on non-alphanumerics, lowercase,
//! drop short noise words.

use std::collections::HashSet;

/// Tokens shorter than this are treated as noise ("a", "to", "is").
pub const MIN_TOKEN_LEN: usize = 3;

/// Splits `text` into a deduplicated set of lowercase tokens.
///
/// Maximal runs of ASCII letters and digits are candidate tokens; everything
/// else separates them. Tokens shorter than [`MIN_TOKEN_LEN`] are dropped.
/// Empty input yields the empty set.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| word.len() >= MIN_TOKEN_LEN)
        .map(|word| word.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tokens: &[&str]) -> HashSet<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_empty_input_yields_empty_set() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_punctuation_only_yields_empty_set() {
        assert!(tokenize("  ,.!?-_/ ").is_empty());
    }

    #[test]
    fn test_splits_on_punctuation_and_drops_short_tokens() {
        // "go" and "ab" are length 2, filtered out
        assert_eq!(tokenize("Go, go-getter! 2024 AB"), set(&["getter", "2024"]));
    }

    #[test]
    fn test_lowercases_and_deduplicates() {
        assert_eq!(tokenize("Rust rust RUST"), set(&["rust"]));
    }

    #[test]
    fn test_digits_are_tokens() {
        assert_eq!(tokenize("release 2024"), set(&["release", "2024"]));
    }

    #[test]
    fn test_non_ascii_characters_separate_tokens() {
        // 'é' is not an ASCII alphanumeric, so it splits the word
        assert_eq!(tokenize("café naïve"), set(&["caf"]));
    }

    #[test]
    fn test_alphanumeric_runs_stay_whole() {
        assert_eq!(tokenize("sql2019 server"), set(&["sql2019", "server"]));
    }

    #[test]
    fn test_retokenizing_output_is_identity() {
        let tokens = tokenize("Senior Rust Engineer (remote, 2024)!");
        let rejoined = tokens.iter().cloned().collect::<Vec<_>>().join(" ");
        assert_eq!(tokenize(&rejoined), tokens);
    }
}

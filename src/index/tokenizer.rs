// file: src/index/tokenizer.rs
// description: lowercase word tokenizer with stop-word filtering
// reference: unicode-aware alphanumeric splitting

use crate::config::IndexConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sorted so membership can use binary search.
const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at", "be",
    "because", "been", "before", "being", "between", "both", "but", "by", "can", "could", "did",
    "do", "does", "doing", "during", "each", "few", "for", "from", "further", "had", "has",
    "have", "having", "he", "her", "here", "hers", "him", "his", "how", "i", "if", "in", "into",
    "is", "it", "its", "itself", "just", "me", "more", "most", "my", "no", "nor", "not", "of",
    "off", "on", "once", "only", "or", "other", "our", "ours", "out", "over", "own", "same",
    "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "then", "there", "these", "they", "this", "those", "through", "to", "too", "under", "until",
    "up", "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
    "why", "will", "with", "would", "you", "your", "yours",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokenizer {
    min_token_len: usize,
    extra_stop_words: BTreeSet<String>,
}

impl Tokenizer {
    pub fn new(min_token_len: usize, extra_stop_words: &[String]) -> Self {
        Self {
            min_token_len: min_token_len.max(1),
            extra_stop_words: extra_stop_words
                .iter()
                .map(|word| word.trim().to_lowercase())
                .filter(|word| !word.is_empty())
                .collect(),
        }
    }

    pub fn from_config(config: &IndexConfig) -> Self {
        Self::new(config.min_token_len, &config.extra_stop_words)
    }

    /// Lowercases, splits on every non-alphanumeric character and drops
    /// stop-words and tokens shorter than the configured minimum.
    pub fn tokenize<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(str::to_lowercase)
            .filter(move |word| word.chars().count() >= self.min_token_len)
            .filter(move |word| !self.is_stop_word(word))
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        STOP_WORDS.binary_search(&word).is_ok() || self.extra_stop_words.contains(word)
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(2, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(tokenizer: &Tokenizer, text: &str) -> Vec<String> {
        tokenizer.tokenize(text).collect()
    }

    #[test]
    fn test_stop_words_sorted() {
        let mut sorted = STOP_WORDS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted, STOP_WORDS.to_vec());
    }

    #[test]
    fn test_tokenize_title() {
        let tokenizer = Tokenizer::default();
        assert_eq!(
            tokens(&tokenizer, "10 Usability Heuristics for User Interface Design"),
            vec!["10", "usability", "heuristics", "user", "interface", "design"]
        );
    }

    #[test]
    fn test_split_on_punctuation() {
        let tokenizer = Tokenizer::default();
        assert_eq!(
            tokens(&tokenizer, "F-Shaped pattern: users' scanning (on mobile)!"),
            vec!["shaped", "pattern", "users", "scanning", "mobile"]
        );
    }

    #[test]
    fn test_unicode_lowercase() {
        let tokenizer = Tokenizer::default();
        assert_eq!(tokens(&tokenizer, "ÜBER Café"), vec!["über", "café"]);
    }

    #[test]
    fn test_extra_stop_words_and_min_len() {
        let tokenizer = Tokenizer::new(4, &["NNG".to_string()]);
        assert_eq!(
            tokens(&tokenizer, "NNG ux research on menus"),
            vec!["research", "menus"]
        );
    }

    #[test]
    fn test_only_stop_words() {
        let tokenizer = Tokenizer::default();
        assert!(tokens(&tokenizer, "the and of to").is_empty());
        assert!(tokens(&tokenizer, "").is_empty());
    }
}

//! Text normalization for word-frequency analysis.
//!
//! The cleaning mirrors the classic corpus-linguistics preparation step:
//! strip ASCII punctuation, split on whitespace, and drop common English
//! stop-words. Tokens keep their original case; only the stop-word match is
//! case-insensitive.
//!
//! # Example
//!
//! ```rust
//! use chatlens::text::clean_text;
//!
//! assert_eq!(clean_text("Hello, hello THE world!"), "Hello hello world");
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

/// ASCII punctuation characters removed before tokenization.
pub const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// The standard English stop-word list.
///
/// Entries are stored lowercase; matching is case-insensitive. Contraction
/// forms are listed with their apostrophes even though cleaned tokens can no
/// longer contain them, keeping the list identical to the published corpus.
pub const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

/// Returns `true` if `word` matches a stop-word, ignoring case.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORD_SET.contains(word.to_lowercase().as_str())
}

/// Removes every ASCII punctuation character from `text`.
///
/// Whitespace and all other characters (including non-ASCII) pass through.
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !PUNCTUATION.contains(*c)).collect()
}

/// Normalizes `text` for word counting.
///
/// Strips punctuation, splits on whitespace, drops stop-words, and rejoins
/// the surviving tokens with single spaces. Idempotent: cleaning already
/// cleaned text returns it unchanged.
pub fn clean_text(text: &str) -> String {
    strip_punctuation(text)
        .split_whitespace()
        .filter(|word| !is_stop_word(word))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_punctuation() {
        assert_eq!(strip_punctuation("Hello, world!"), "Hello world");
        assert_eq!(strip_punctuation("don't"), "dont");
        assert_eq!(strip_punctuation("a-b_c.d"), "abcd");
        assert_eq!(strip_punctuation("no punctuation"), "no punctuation");
    }

    #[test]
    fn test_strip_punctuation_keeps_unicode() {
        assert_eq!(strip_punctuation("привет, мир!"), "привет мир");
    }

    #[test]
    fn test_is_stop_word_case_insensitive() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("The"));
        assert!(is_stop_word("AND"));
        assert!(!is_stop_word("Hello"));
    }

    #[test]
    fn test_clean_text_preserves_token_case() {
        // Stop-words go regardless of case; survivors keep theirs.
        assert_eq!(clean_text("Hello, hello WORLD!"), "Hello hello WORLD");
    }

    #[test]
    fn test_clean_text_removes_stop_words() {
        assert_eq!(clean_text("the quick and the dead"), "quick dead");
    }

    #[test]
    fn test_clean_text_empty() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("the and of"), "");
        assert_eq!(clean_text("..."), "");
    }

    #[test]
    fn test_clean_text_idempotent() {
        let once = clean_text("What a Wonderful, wonderful World!");
        let twice = clean_text(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("lots   of \t spacing"), "lots spacing");
    }
}

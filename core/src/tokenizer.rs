use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    /// Line tokenizer for the keyword index: keeps `[a-z0-9_-]`.
    pub static ref KEYWORD: Tokenizer = Tokenizer::new(r"[^a-z0-9_\-]");
    /// Passage tokenizer for TF-IDF ranking: additionally keeps `.` so
    /// versions and file names (`v1.2`, `config.toml`) survive as one term.
    pub static ref PASSAGE: Tokenizer = Tokenizer::new(r"[^a-z0-9_\-.]");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "the","a","an","and","or","but","in","on","at","to","for",
            "of","with","by","from","is","are","was","were","be","been",
            "being","have","has","had","do","does","did","will","would",
            "could","should","may","might","must","shall","can","need",
            "this","that","these","those","i","you","he","she","it","we",
            "they","what","which","who","whom","when","where","why","how",
            "all","each","every","both","few","more","most","other","some",
            "such","no","nor","not","only","own","same","so","than","too",
            "very","just","also","now","here","there","then","if","else"
        ];
        words.iter().copied().collect()
    };
}

/// Minimum number of characters a token needs to become a term.
pub const MIN_TERM_LEN: usize = 3;

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// A compiled tokenization rule. Instances are immutable and shared by reference.
#[derive(Debug)]
pub struct Tokenizer {
    strip: Regex,
}

impl Tokenizer {
    fn new(pattern: &str) -> Self {
        Self { strip: Regex::new(pattern).expect("valid regex") }
    }

    /// Lowercase, blank out every character outside the alphabet, split on
    /// whitespace and drop short tokens and stopwords. Order and duplicates
    /// are preserved.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.strip
            .replace_all(&lowered, " ")
            .split_whitespace()
            .filter(|t| t.len() >= MIN_TERM_LEN && !is_stopword(t))
            .map(str::to_owned)
            .collect()
    }
}

/// Tokenize with the keyword-index alphabet.
pub fn tokenize(text: &str) -> Vec<String> {
    KEYWORD.tokenize(text)
}

/// Tokenize with the passage alphabet (keeps dots).
pub fn tokenize_passage(text: &str) -> Vec<String> {
    PASSAGE.tokenize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("Deployed the API to Railway!");
        assert_eq!(t, vec!["deployed", "api", "railway"]);
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let t = tokenize("retry retry backoff retry");
        assert_eq!(t, vec!["retry", "retry", "backoff", "retry"]);
    }

    #[test]
    fn keeps_hyphen_and_underscore() {
        let t = tokenize("rate-limit snake_case");
        assert_eq!(t, vec!["rate-limit", "snake_case"]);
    }

    #[test]
    fn passage_keeps_dots() {
        assert_eq!(tokenize("bumped to v1.2.3"), vec!["bumped"]);
        assert_eq!(tokenize_passage("bumped to v1.2.3"), vec!["bumped", "v1.2.3"]);
    }

    #[test]
    fn non_ascii_splits_tokens() {
        assert_eq!(tokenize("café→menu"), vec!["caf", "menu"]);
    }
}

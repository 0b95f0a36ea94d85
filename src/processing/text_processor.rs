//! Text normalization ahead of vectorization

use crate::processing::lemmatizer::lemmatize;
use std::collections::HashSet;
use std::sync::LazyLock;

/// English stopword list, shared by the normalizer and the vectorizer.
pub static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
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
    ]
    .into_iter()
    .collect()
});

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

/// Deterministic cleanup: lowercase, strip ASCII punctuation and digits,
/// drop stopwords, lemmatize, rejoin with single spaces.
///
/// Normalization cannot fail and is idempotent:
/// `normalize(&normalize(x)) == normalize(x)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let stripped: String = text
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_ascii_punctuation() && !c.is_ascii_digit())
            .collect();

        self.normalize_tokens(stripped.split_whitespace())
    }

    fn normalize_tokens<'a>(&self, tokens: impl Iterator<Item = &'a str>) -> String {
        // Stopwords are checked again after lemmatization: a lemma may itself
        // be a stopword, and leaving it in would break idempotence.
        tokens
            .filter(|token| !is_stop_word(token))
            .map(lemmatize)
            .filter(|lemma| !lemma.is_empty() && !is_stop_word(lemma))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Normalize with the shared normalizer.
pub fn normalize(text: &str) -> String {
    TextNormalizer.normalize(text)
}

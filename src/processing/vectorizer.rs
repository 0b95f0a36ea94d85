//! TF-IDF vectorization over a small in-memory corpus

use crate::config::ScoringConfig;
use crate::error::{Result, RankerError};
use crate::processing::text_processor::is_stop_word;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

/// Two or more word characters between word boundaries.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid token regex"));

#[derive(Debug, Clone, PartialEq)]
pub struct VectorizerConfig {
    /// Inclusive `(min_n, max_n)` n-gram sizes.
    pub ngram_range: (usize, usize),
    pub max_features: Option<usize>,
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Maximum share of documents a term may appear in. Only enforced on
    /// corpora of more than two documents.
    pub max_df: f32,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            ngram_range: (1, 2),
            max_features: Some(5000),
            min_df: 1,
            max_df: 1.0,
        }
    }
}

impl From<&ScoringConfig> for VectorizerConfig {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            ngram_range: (1, 2),
            max_features: Some(config.max_features),
            min_df: config.min_df.max(1),
            max_df: config.max_df,
        }
    }
}

/// Document-term weights; one L2-normalized row per input document.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    vocabulary: Vec<String>,
    idf: Vec<f64>,
    rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(|row| row.as_slice())
    }

    pub fn n_documents(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    config: VectorizerConfig,
}

impl TfidfVectorizer {
    pub fn new(config: VectorizerConfig) -> Self {
        Self { config }
    }

    /// Tokenize, drop stopwords, and emit every n-gram in the configured range.
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let lowered = document.to_lowercase();
        let tokens: Vec<&str> = TOKEN_PATTERN
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|token| !is_stop_word(token))
            .collect();

        let (min_n, max_n) = self.config.ngram_range;
        let mut terms = Vec::new();
        for n in min_n.max(1)..=max_n {
            if n > tokens.len() {
                break;
            }
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        terms
    }

    pub fn fit_transform(&self, documents: &[&str]) -> Result<TfidfMatrix> {
        let n_documents = documents.len();
        if n_documents == 0 {
            return Err(RankerError::Vectorization("empty corpus".to_string()));
        }

        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut counts = HashMap::new();
                for term in self.analyze(doc) {
                    *counts.entry(term).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        // BTreeMap keeps terms ordered so feature selection is deterministic
        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        let mut corpus_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for doc_counts in &counts {
            for (term, count) in doc_counts {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
                *corpus_frequency.entry(term.as_str()).or_insert(0) += count;
            }
        }

        let max_doc_count = self.max_document_count(n_documents)?;
        let mut candidates: Vec<(&str, usize)> = corpus_frequency
            .into_iter()
            .filter(|(term, _)| {
                let df = document_frequency[term];
                df >= self.config.min_df && df <= max_doc_count
            })
            .collect();

        if let Some(limit) = self.config.max_features {
            // stable: equal frequencies keep alphabetical order
            candidates.sort_by(|a, b| b.1.cmp(&a.1));
            candidates.truncate(limit);
        }

        let mut vocabulary: Vec<String> = candidates.into_iter().map(|(term, _)| term.to_string()).collect();
        vocabulary.sort();

        if vocabulary.is_empty() {
            return Err(RankerError::Vectorization(
                "empty vocabulary; documents contain no terms after stopword filtering".to_string(),
            ));
        }

        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = document_frequency[term.as_str()] as f64;
                ((1.0 + n_documents as f64) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let rows = counts
            .iter()
            .map(|doc_counts| {
                let mut row: Vec<f64> = vocabulary
                    .iter()
                    .zip(&idf)
                    .map(|(term, idf)| doc_counts.get(term).copied().unwrap_or(0) as f64 * idf)
                    .collect();
                l2_normalize(&mut row);
                row
            })
            .collect();

        Ok(TfidfMatrix { vocabulary, idf, rows })
    }

    fn max_document_count(&self, n_documents: usize) -> Result<usize> {
        if n_documents <= 2 {
            return Ok(n_documents);
        }

        let max_doc_count = (self.config.max_df as f64 * n_documents as f64).floor() as usize;
        if max_doc_count < self.config.min_df {
            return Err(RankerError::Vectorization(format!(
                "max_df {} keeps fewer documents ({}) than min_df {}",
                self.config.max_df, max_doc_count, self.config.min_df
            )));
        }
        Ok(max_doc_count)
    }
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        row.iter_mut().for_each(|x| *x /= norm);
    }
}

//! Documents entering the pipeline and the ranked results leaving it

use crate::error::{Result, RankerError};
use crate::input::file_detector::FileType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One uploaded resume: an identifier, its raw bytes and the declared extension.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub identifier: String,
    pub bytes: Vec<u8>,
    pub extension: String,
}

impl Document {
    pub fn new(identifier: impl Into<String>, bytes: Vec<u8>, extension: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            bytes,
            extension: extension.into(),
        }
    }

    /// Read a document from disk. The identifier is the file name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let identifier = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| RankerError::InvalidInput(format!("Not a file path: {}", path.display())))?;

        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
            .unwrap_or_default();

        let bytes = std::fs::read(path)?;
        Ok(Self::new(identifier, bytes, extension))
    }

    pub fn file_type(&self) -> Result<FileType> {
        FileType::from_extension(&self.extension)
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub identifier: String,
    pub score: f32,
    pub file_type: FileType,
}

/// A document that could not be scored, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub identifier: String,
    pub reason: String,
}

/// Score results sorted by score, highest first. Exact ties keep input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedBatch {
    results: Vec<ScoreResult>,
}

impl RankedBatch {
    /// Sort results collected in input order.
    pub fn from_results(results: Vec<ScoreResult>) -> Self {
        Self::from_indexed(results.into_iter().enumerate().collect())
    }

    /// Sort results tagged with their input position. Used when documents
    /// finish out of order.
    pub fn from_indexed(mut indexed: Vec<(usize, ScoreResult)>) -> Self {
        indexed.sort_by_key(|(index, _)| *index);
        // sort_by is stable, so equal scores stay in input order
        indexed.sort_by(|(_, a), (_, b)| b.score.total_cmp(&a.score));

        Self {
            results: indexed.into_iter().map(|(_, result)| result).collect(),
        }
    }

    pub fn best_match(&self) -> Option<&ScoreResult> {
        self.results.first()
    }

    pub fn results(&self) -> &[ScoreResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreResult> {
        self.results.iter()
    }

    /// `(identifier, score)` pairs in rank order.
    pub fn pairs(&self) -> Vec<(String, f32)> {
        self.results
            .iter()
            .map(|result| (result.identifier.clone(), result.score))
            .collect()
    }
}

impl IntoIterator for RankedBatch {
    type Item = ScoreResult;
    type IntoIter = std::vec::IntoIter<ScoreResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(identifier: &str, score: f32) -> ScoreResult {
        ScoreResult {
            identifier: identifier.to_string(),
            score,
            file_type: FileType::Txt,
        }
    }

    #[test]
    fn test_ties_keep_input_order() {
        let batch = RankedBatch::from_results(vec![result("A", 0.9), result("B", 0.9), result("C", 0.5)]);
        let order: Vec<&str> = batch.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(order, vec!["A", "B", "C"]);
        assert_eq!(batch.best_match().unwrap().identifier, "A");
    }

    #[test]
    fn test_indexed_results_restore_input_order() {
        // completion order C, B, A
        let batch = RankedBatch::from_indexed(vec![
            (2, result("C", 0.5)),
            (1, result("B", 0.9)),
            (0, result("A", 0.9)),
        ]);
        assert_eq!(
            batch.pairs(),
            vec![("A".to_string(), 0.9), ("B".to_string(), 0.9), ("C".to_string(), 0.5)]
        );
    }

    #[test]
    fn test_empty_batch_has_no_best_match() {
        let batch = RankedBatch::from_results(Vec::new());
        assert!(batch.is_empty());
        assert!(batch.best_match().is_none());
    }

    #[test]
    fn test_document_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Resume.TXT");
        std::fs::write(&path, "Rust developer").unwrap();

        let doc = Document::from_path(&path).unwrap();
        assert_eq!(doc.identifier, "Resume.TXT");
        assert_eq!(doc.file_type().unwrap(), FileType::Txt);
        assert_eq!(doc.size(), 14);
    }
}

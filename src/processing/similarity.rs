//! TF-IDF cosine similarity between a resume and a job description

use crate::config::ScoringConfig;
use crate::error::Result;
use crate::processing::sections::{DocumentSections, SectionType};
use crate::processing::text_processor::TextNormalizer;
use crate::processing::vectorizer::{TfidfVectorizer, VectorizerConfig};
use crate::processing::weights::WeightVector;
use log::debug;
use serde::{Deserialize, Serialize};

/// Per-section breakdown behind a section-weighted score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    pub section_type: SectionType,
    pub weight: f32,
    pub score: f32,
}

#[derive(Debug, Clone, Default)]
pub struct SimilarityScorer {
    vectorizer: TfidfVectorizer,
}

impl SimilarityScorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            vectorizer: TfidfVectorizer::new(VectorizerConfig::from(config)),
        }
    }

    /// Holistic similarity of two normalized texts, always in `[0, 1]`.
    ///
    /// `weights` is accepted for callers that carry a weighting profile, but
    /// no sub-weight is applied here; see [`Self::score_sections`] for the
    /// section-weighted variant. Vectorization failures (degenerate text with
    /// no usable terms) score `0.0` instead of failing.
    pub fn score(&self, document: &str, query: &str, _weights: Option<&WeightVector>) -> f32 {
        match self.try_score(document, query) {
            Ok(score) => score,
            Err(e) => {
                debug!("Similarity fell back to 0.0: {}", e);
                0.0
            }
        }
    }

    fn try_score(&self, document: &str, query: &str) -> Result<f32> {
        let matrix = self.vectorizer.fit_transform(&[document, query])?;
        let similarity = match (matrix.row(0), matrix.row(1)) {
            (Some(a), Some(b)) => cosine_similarity(a, b),
            _ => 0.0,
        };
        Ok(clamp_score(similarity))
    }

    /// Weighted combination of per-section similarities.
    ///
    /// Each weighted section present in `sections` is normalized and scored
    /// against `query`; the result is `Σ wᵢ·sᵢ / Σ wᵢ` over those sections.
    /// With no weighted section (or only zero weights) the holistic score of
    /// the full text is returned instead.
    pub fn score_sections(
        &self,
        normalizer: &TextNormalizer,
        sections: &DocumentSections,
        query: &str,
        weights: &WeightVector,
    ) -> (f32, Vec<SectionScore>) {
        let breakdown: Vec<SectionScore> = SectionType::WEIGHTED
            .iter()
            .filter_map(|section_type| {
                let content = normalizer.normalize(&sections.content(*section_type));
                if content.is_empty() {
                    return None;
                }
                Some(SectionScore {
                    section_type: *section_type,
                    weight: weights.weight_for(section_type),
                    score: self.score(&content, query, Some(weights)),
                })
            })
            .collect();

        let total_weight: f32 = breakdown.iter().map(|s| s.weight).sum();
        if total_weight <= 0.0 {
            let holistic = self.score(&normalizer.normalize(&sections.full_text), query, Some(weights));
            return (holistic, breakdown);
        }

        let combined = breakdown.iter().map(|s| s.weight * s.score).sum::<f32>() / total_weight;
        (clamp_score(combined as f64), breakdown)
    }
}

/// `dot(a, b) / (|a| * |b|)`, or `0.0` when either vector has zero norm.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

fn clamp_score(score: f64) -> f32 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::sections::SectionSegmenter;
    use crate::processing::text_processor::normalize;

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-12);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_zero_cases() {
        let scorer = SimilarityScorer::default();
        assert_eq!(scorer.score("", "python developer", None), 0.0);
        assert_eq!(scorer.score("python developer", "", None), 0.0);
        assert_eq!(scorer.score("", "", None), 0.0);
    }

    #[test]
    fn test_identical_texts_score_one() {
        let scorer = SimilarityScorer::default();
        let text = normalize("Rust engineer building Rust services and Rust tooling");
        let score = scorer.score(&text, &text, None);
        assert!(score > 0.999 && score <= 1.0, "score was {}", score);
    }

    #[test]
    fn test_related_beats_unrelated() {
        let scorer = SimilarityScorer::default();
        let job = normalize("Looking for a Python backend engineer with SQL experience");
        let related = normalize("Experienced Python developer, SQL and backend systems");
        let unrelated = normalize("Graphic designer skilled in Photoshop and Illustrator");

        let related_score = scorer.score(&related, &job, None);
        let unrelated_score = scorer.score(&unrelated, &job, None);
        assert!(related_score > unrelated_score);
        assert_eq!(unrelated_score, 0.0);
    }

    #[test]
    fn test_weights_do_not_change_holistic_score() {
        let scorer = SimilarityScorer::default();
        let weights = WeightVector::new(0.7, 0.1, 0.1, 0.1).unwrap();
        let a = normalize("python sql backend");
        let b = normalize("python frontend");
        assert_eq!(scorer.score(&a, &b, None), scorer.score(&a, &b, Some(&weights)));
    }

    #[test]
    fn test_section_weighted_score() {
        let scorer = SimilarityScorer::default();
        let normalizer = TextNormalizer::new();
        let sections = SectionSegmenter::new()
            .segment("Skills\nPython SQL backend\nEducation\nArt history degree");
        let query = normalize("Python backend engineer with SQL");

        let skills_heavy = WeightVector::new(0.9, 0.1, 0.0, 0.0).unwrap();
        let education_heavy = WeightVector::new(0.1, 0.9, 0.0, 0.0).unwrap();

        let (high, breakdown) = scorer.score_sections(&normalizer, &sections, &query, &skills_heavy);
        let (low, _) = scorer.score_sections(&normalizer, &sections, &query, &education_heavy);

        assert_eq!(breakdown.len(), 2);
        assert!(high > low);
        assert!((0.0..=1.0).contains(&high));
    }

    #[test]
    fn test_section_weighting_falls_back_without_sections() {
        let scorer = SimilarityScorer::default();
        let normalizer = TextNormalizer::new();
        let sections = SectionSegmenter::new().segment("Python developer with SQL");
        let query = normalize("Python SQL");

        let (score, breakdown) =
            scorer.score_sections(&normalizer, &sections, &query, &WeightVector::default());
        assert!(breakdown.is_empty());
        assert_eq!(score, scorer.score(&normalize("Python developer with SQL"), &query, None));
    }
}

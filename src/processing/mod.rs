//! Text processing and scoring module

pub mod document;
pub mod lemmatizer;
pub mod ranker;
pub mod sections;
pub mod similarity;
pub mod text_processor;
pub mod vectorizer;
pub mod weights;

pub use document::{Document, RankedBatch, ScoreResult, SkippedDocument};
pub use ranker::{BatchRanker, RankingOutcome};
pub use similarity::SimilarityScorer;
pub use text_processor::TextNormalizer;
pub use weights::WeightVector;

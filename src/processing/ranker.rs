//! Batch ranking of resumes against one job description
//!
//! Every document goes through extract → normalize → score on its own worker.
//! Workers are capped by a semaphore, extraction runs on the blocking pool
//! under a time budget, and results are re-tagged with their input position
//! before sorting so that ties follow input order, not completion order.

use crate::config::Config;
use crate::error::{Result, RankerError};
use crate::input::manager::InputManager;
use crate::processing::document::{Document, RankedBatch, ScoreResult, SkippedDocument};
use crate::processing::sections::SectionSegmenter;
use crate::processing::similarity::SimilarityScorer;
use crate::processing::text_processor::TextNormalizer;
use crate::processing::weights::WeightVector;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingOutcome {
    pub ranked: RankedBatch,
    /// Documents left out of the ranking, in input order.
    pub skipped: Vec<SkippedDocument>,
    pub total_documents: usize,
}

impl RankingOutcome {
    pub fn best_match(&self) -> Option<&ScoreResult> {
        self.ranked.best_match()
    }
}

/// Normalization and scoring shared by all workers of one ranker.
struct ScoringStage {
    normalizer: TextNormalizer,
    scorer: SimilarityScorer,
    segmenter: SectionSegmenter,
    weights: Option<WeightVector>,
    section_weighting: bool,
}

impl ScoringStage {
    fn score_text(&self, text: &str, query: &str) -> f32 {
        if let (Some(weights), true) = (&self.weights, self.section_weighting) {
            let sections = self.segmenter.segment(text);
            if sections.has_weighted_sections() {
                let (score, breakdown) = self.scorer.score_sections(&self.normalizer, &sections, query, weights);
                debug!("Section scores: {:?}", breakdown);
                return score;
            }
            debug!("No section headings found, scoring the whole text");
        }
        self.scorer
            .score(&self.normalizer.normalize(text), query, self.weights.as_ref())
    }
}

#[derive(Clone)]
pub struct BatchRanker {
    input: InputManager,
    stage: Arc<ScoringStage>,
    max_workers: usize,
    extraction_timeout: Duration,
}

impl BatchRanker {
    pub fn new(config: &Config) -> Self {
        Self {
            input: InputManager::new(&config.input),
            stage: Arc::new(ScoringStage {
                normalizer: TextNormalizer::new(),
                scorer: SimilarityScorer::new(&config.scoring),
                segmenter: SectionSegmenter::new(),
                weights: Some(config.scoring.weights),
                section_weighting: config.scoring.section_weighting,
            }),
            max_workers: config.ranking.max_workers.max(1),
            extraction_timeout: config.ranking.extraction_timeout(),
        }
    }

    pub fn with_extraction_timeout(mut self, timeout: Duration) -> Self {
        self.extraction_timeout = timeout;
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    /// Rank `documents` against `job_description`. Documents that fail to
    /// extract are skipped and listed in the outcome; the batch itself never
    /// fails.
    pub async fn rank(&self, job_description: &str, documents: Vec<Document>) -> RankingOutcome {
        let total_documents = documents.len();
        let query: Arc<str> = Arc::from(self.stage.normalizer.normalize(job_description));
        let semaphore = Arc::new(Semaphore::new(self.max_workers));

        let handles: Vec<_> = documents
            .into_iter()
            .map(|document| {
                let identifier = document.identifier.clone();
                let ranker = self.clone();
                let query = Arc::clone(&query);
                let semaphore = Arc::clone(&semaphore);
                let handle = tokio::spawn(async move {
                    // the semaphore is never closed
                    let permit = semaphore.acquire_owned().await.ok();
                    ranker.process(document, query, permit).await
                });
                (identifier, handle)
            })
            .collect();

        let mut scored = Vec::with_capacity(total_documents);
        let mut skipped = Vec::new();
        for (index, (identifier, handle)) in handles.into_iter().enumerate() {
            let outcome = handle.await.unwrap_or_else(|e| {
                Err(RankerError::extraction(identifier.clone(), format!("worker failed: {}", e)))
            });

            match outcome {
                Ok(result) => scored.push((index, result)),
                Err(e) => {
                    warn!("Skipping '{}': {}", identifier, e);
                    skipped.push(SkippedDocument {
                        identifier,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let ranked = RankedBatch::from_indexed(scored);
        info!("Ranked {} of {} documents", ranked.len(), total_documents);

        RankingOutcome {
            ranked,
            skipped,
            total_documents,
        }
    }

    /// Synchronous wrapper around [`Self::rank`] for callers without a runtime.
    pub fn rank_blocking(&self, job_description: &str, documents: Vec<Document>) -> Result<RankingOutcome> {
        run_detached(self.rank(job_description, documents))
    }

    async fn process(
        &self,
        document: Document,
        query: Arc<str>,
        permit: Option<OwnedSemaphorePermit>,
    ) -> Result<ScoreResult> {
        let file_type = document.file_type()?;
        let identifier = document.identifier.clone();

        let extraction = self.spawn_extraction(document, permit);
        let (text, _permit) = match tokio::time::timeout(self.extraction_timeout, extraction).await {
            Ok(Ok((extracted, permit))) => (extracted?, permit),
            Ok(Err(e)) => {
                return Err(RankerError::extraction(identifier, format!("extractor crashed: {}", e)));
            }
            Err(_) => {
                return Err(RankerError::ExtractionTimeout {
                    file: identifier,
                    timeout: self.extraction_timeout,
                });
            }
        };

        let stage = Arc::clone(&self.stage);
        let score = tokio::task::spawn_blocking(move || stage.score_text(&text, &query))
            .await
            .unwrap_or_else(|e| {
                warn!("Scoring '{}' failed, using 0.0: {}", identifier, e);
                0.0
            });

        debug!("Scored '{}': {:.4}", identifier, score);
        Ok(ScoreResult {
            identifier,
            score,
            file_type,
        })
    }

    /// Extract on the blocking pool. The worker permit travels with the
    /// closure, so an extraction abandoned on timeout keeps its slot until
    /// the thread is actually free again.
    fn spawn_extraction(
        &self,
        document: Document,
        permit: Option<OwnedSemaphorePermit>,
    ) -> JoinHandle<(Result<String>, Option<OwnedSemaphorePermit>)> {
        let input = self.input.clone();
        tokio::task::spawn_blocking(move || (input.extract(&document), permit))
    }
}

/// Drive `future` on a fresh multi-threaded runtime and shut it down without
/// joining blocking tasks. Extractions that blew their time budget keep
/// running on detached threads instead of holding up the caller.
pub fn run_detached<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let output = runtime.block_on(future);
    runtime.shutdown_background();
    Ok(output)
}

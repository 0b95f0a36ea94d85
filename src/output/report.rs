//! Report structures handed to the output formatters

use crate::input::file_detector::FileType;
use crate::processing::document::{ScoreResult, SkippedDocument};
use crate::processing::ranker::RankingOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ranking run, ready for rendering or export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    /// Identifier of this run. Defaults to the creation time in milliseconds.
    pub analysis_id: u64,

    pub job_title: String,

    pub created_at: DateTime<Utc>,

    /// Ranked rows, best first
    pub results: Vec<ReportRow>,

    pub best_match: Option<ReportRow>,

    /// Documents that could not be scored
    pub skipped: Vec<SkippedDocument>,

    pub total_documents: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub rank: usize,
    pub filename: String,
    pub score: f32,
    pub file_type: FileType,
}

impl ReportRow {
    fn from_result(rank: usize, result: &ScoreResult) -> Self {
        Self {
            rank,
            filename: result.identifier.clone(),
            score: result.score,
            file_type: result.file_type,
        }
    }

    pub fn score_percentage(&self) -> f32 {
        self.score * 100.0
    }
}

impl RankingReport {
    pub fn new(job_title: impl Into<String>, outcome: &RankingOutcome) -> Self {
        Self::at(job_title, outcome, Utc::now())
    }

    pub fn at(job_title: impl Into<String>, outcome: &RankingOutcome, created_at: DateTime<Utc>) -> Self {
        let results: Vec<ReportRow> = outcome
            .ranked
            .iter()
            .enumerate()
            .map(|(i, result)| ReportRow::from_result(i + 1, result))
            .collect();

        Self {
            analysis_id: created_at.timestamp_millis().max(0) as u64,
            job_title: job_title.into(),
            created_at,
            best_match: results.first().cloned(),
            results,
            skipped: outcome.skipped.clone(),
            total_documents: outcome.total_documents,
        }
    }

    pub fn with_analysis_id(mut self, analysis_id: u64) -> Self {
        self.analysis_id = analysis_id;
        self
    }

    /// The compact export shape:
    /// `{analysis_id, job_title, created_at, results: [[filename, score], ...]}`.
    pub fn export(&self) -> RankingExport {
        RankingExport {
            analysis_id: self.analysis_id,
            job_title: self.job_title.clone(),
            created_at: self.created_at.to_rfc3339(),
            results: self
                .results
                .iter()
                .map(|row| (row.filename.clone(), row.score))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingExport {
    pub analysis_id: u64,
    pub job_title: String,
    pub created_at: String,
    pub results: Vec<(String, f32)>,
}

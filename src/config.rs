//! Configuration management for the resume ranker

use crate::error::{Result, RankerError};
use crate::processing::weights::WeightVector;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub input: InputConfig,
    pub ranking: RankingConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub allowed_extensions: Vec<String>,
    pub max_file_size_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    pub max_workers: usize,
    pub extraction_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub max_features: usize,
    pub min_df: usize,
    pub max_df: f32,
    pub section_weighting: bool,
    pub weights: WeightVector,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Csv,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputConfig {
                allowed_extensions: ["pdf", "doc", "docx", "txt"]
                    .iter()
                    .map(|ext| ext.to_string())
                    .collect(),
                max_file_size_bytes: 10 * 1024 * 1024,
            },
            ranking: RankingConfig {
                max_workers: 4,
                extraction_timeout_secs: 30,
            },
            scoring: ScoringConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            min_df: 1,
            max_df: 1.0,
            section_weighting: false,
            weights: WeightVector::default(),
        }
    }
}

impl RankingConfig {
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }
}

impl Config {
    /// Load the user config, writing the defaults on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| RankerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| RankerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-ranker")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.ranking.max_workers == 0 {
            return Err(RankerError::Configuration(
                "ranking.max_workers must be at least 1".to_string(),
            ));
        }
        if self.ranking.extraction_timeout_secs == 0 {
            return Err(RankerError::Configuration(
                "ranking.extraction_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.scoring.max_features == 0 {
            return Err(RankerError::Configuration(
                "scoring.max_features must be at least 1".to_string(),
            ));
        }
        if !(self.scoring.max_df > 0.0 && self.scoring.max_df <= 1.0) {
            return Err(RankerError::Configuration(format!(
                "scoring.max_df must be in (0, 1], got {}",
                self.scoring.max_df
            )));
        }
        self.scoring.weights.validate()?;
        Ok(())
    }
}

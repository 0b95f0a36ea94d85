//! CLI interface for the resume ranker

use crate::config::OutputFormat;
use crate::processing::weights::WeightVector;
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-ranker")]
#[command(about = "Rank resumes against a job description")]
#[command(long_about = "Rank PDF, DOCX and TXT resumes by TF-IDF cosine similarity to a job description")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank resumes against a job description
    Rank(RankArgs),

    /// Print the text extracted from one file
    Extract {
        /// Path to a PDF, DOCX or TXT file
        file: PathBuf,

        /// Print the normalized text used for scoring
        #[arg(short, long)]
        normalized: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args)]
#[command(group(ArgGroup::new("job_source").required(true).args(["job", "job_text"])))]
pub struct RankArgs {
    /// Path to the job description file (TXT, PDF, DOCX)
    #[arg(short, long)]
    pub job: Option<PathBuf>,

    /// Job description given inline
    #[arg(long)]
    pub job_text: Option<String>,

    /// Resume files to rank
    #[arg(required = true, num_args = 1..)]
    pub resumes: Vec<PathBuf>,

    /// Job title shown in reports (defaults to the job file name)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Output format: console, json, csv
    #[arg(short, long, value_parser = parse_output_format)]
    pub output: Option<OutputFormat>,

    /// Save output to file; without a path a name is derived from the job title
    #[arg(short, long, num_args = 0..=1, require_equals = true)]
    pub save: Option<Option<PathBuf>>,

    /// Section weights as skills,education,experience,certifications
    #[arg(short, long, value_parser = parse_weights)]
    pub weights: Option<WeightVector>,

    /// Score resume sections separately and combine them by weight
    #[arg(long)]
    pub sections: bool,

    /// Maximum number of documents processed at once
    #[arg(long)]
    pub workers: Option<usize>,

    /// List skipped documents with their reasons
    #[arg(short, long)]
    pub detailed: bool,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "csv" => Ok(OutputFormat::Csv),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, csv", format)),
    }
}

pub fn parse_weights(input: &str) -> Result<WeightVector, String> {
    WeightVector::parse(input).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_rank_arguments() {
        let cli = Cli::try_parse_from([
            "resume-ranker",
            "rank",
            "--job",
            "job.txt",
            "a.pdf",
            "b.docx",
            "--output",
            "csv",
            "--weights",
            "0.5,0.2,0.2,0.1",
            "--sections",
            "--save=out/ranking.csv",
        ])
        .unwrap();

        match cli.command {
            Commands::Rank(args) => {
                assert_eq!(args.job, Some(PathBuf::from("job.txt")));
                assert_eq!(args.resumes.len(), 2);
                assert_eq!(args.output, Some(OutputFormat::Csv));
                assert!(args.sections);
                assert_eq!(args.save, Some(Some(PathBuf::from("out/ranking.csv"))));
                assert!((args.weights.unwrap().skills - 0.5).abs() < f32::EPSILON);
            }
            _ => panic!("expected rank command"),
        }
    }

    #[test]
    fn test_rank_requires_one_job_source() {
        assert!(Cli::try_parse_from(["resume-ranker", "rank", "a.pdf"]).is_err());
        assert!(Cli::try_parse_from([
            "resume-ranker",
            "rank",
            "--job",
            "job.txt",
            "--job-text",
            "python",
            "a.pdf"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["resume-ranker", "rank", "--job-text", "python", "a.pdf"]).is_ok());
    }

    #[test]
    fn test_invalid_weights_rejected() {
        assert!(Cli::try_parse_from([
            "resume-ranker",
            "rank",
            "--job-text",
            "python",
            "--weights",
            "0.9,0.9,0.0,0.0",
            "a.pdf"
        ])
        .is_err());
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert!(parse_output_format("html").is_err());
    }
}

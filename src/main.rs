//! Resume ranker: rank resumes against a job description

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_ranker::cli::{Cli, Commands, ConfigAction, RankArgs};
use resume_ranker::input::InputManager;
use resume_ranker::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_ranker::output::RankingReport;
use resume_ranker::processing::ranker::run_detached;
use resume_ranker::processing::{BatchRanker, SkippedDocument, TextNormalizer};
use resume_ranker::{Config, RankerError, Result};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_detached(run_command(cli.command, config, &config_path)).and_then(|result| result) {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Rank(args) => run_rank(args, config).await,

        Commands::Extract { file, normalized } => {
            let input_manager = InputManager::new(&config.input);
            let text = input_manager.extract_path(&file)?;
            if normalized {
                println!("{}", TextNormalizer::new().normalize(&text));
            } else {
                println!("{}", text);
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| RankerError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                println!("{}", content);
                Ok(())
            }
            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset: {}", config_path.display());
                Ok(())
            }
            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
                Ok(())
            }
        },
    }
}

async fn run_rank(args: RankArgs, mut config: Config) -> Result<()> {
    if let Some(weights) = args.weights {
        config.scoring.weights = weights;
    }
    if args.sections {
        config.scoring.section_weighting = true;
    }
    if let Some(workers) = args.workers {
        config.ranking.max_workers = workers;
    }
    config.validate()?;

    if !config.output.color_output {
        colored::control::set_override(false);
    }

    let input_manager = InputManager::new(&config.input);
    let job_text = match (&args.job, &args.job_text) {
        (Some(path), _) => input_manager.extract_path(path)?,
        (None, Some(text)) => text.clone(),
        (None, None) => {
            return Err(RankerError::InvalidInput(
                "Provide a job description with --job or --job-text".to_string(),
            ))
        }
    };
    let job_title = args
        .title
        .clone()
        .or_else(|| job_title_from_path(args.job.as_deref()))
        .unwrap_or_else(|| "Untitled position".to_string());

    // Files that can't be read never reach the ranker
    let mut documents = Vec::with_capacity(args.resumes.len());
    let mut unreadable = Vec::new();
    for path in &args.resumes {
        match input_manager.load_document(path) {
            Ok(document) => documents.push(document),
            Err(e) => {
                warn!("Skipping '{}': {}", path.display(), e);
                unreadable.push(skipped(path, e.to_string()));
            }
        }
    }

    info!("Ranking {} resumes for '{}'", args.resumes.len(), job_title);
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .map_err(|e| RankerError::OutputFormatting(e.to_string()))?,
    );
    spinner.set_message(format!("Scoring {} resumes...", documents.len()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let ranker = BatchRanker::new(&config);
    let mut outcome = ranker.rank(&job_text, documents).await;
    spinner.finish_and_clear();

    outcome.total_documents += unreadable.len();
    unreadable.append(&mut outcome.skipped);
    outcome.skipped = unreadable;

    let report = RankingReport::new(job_title, &outcome);
    let format = args.output.unwrap_or(config.output.format);
    let generator = ReportGenerator::new(config.output.color_output && args.save.is_none(), args.detailed);
    let content = generator.generate_report(&report, format)?;

    match args.save {
        Some(path) => {
            let path = path.unwrap_or_else(|| PathBuf::from(suggest_filename(&format, &report.job_title, true)));
            save_report_to_file(&content, &path)?;
            println!("💾 Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }

    Ok(())
}

fn skipped(path: &Path, reason: String) -> SkippedDocument {
    SkippedDocument {
        identifier: path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string()),
        reason,
    }
}

fn job_title_from_path(path: Option<&Path>) -> Option<String> {
    path.and_then(|p| p.file_stem())
        .map(|stem| stem.to_string_lossy().replace(['_', '-'], " "))
        .filter(|title| !title.trim().is_empty())
}

//! Output formatters for ranking reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{RankingReport, ReportRow};
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting ranking reports
pub trait OutputFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String>;
}

/// Console formatter with colors and a ranking table
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter emitting the compact export shape
pub struct JsonFormatter {
    pretty: bool,
}

/// CSV formatter, one row per ranked resume
pub struct CsvFormatter;

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    csv_formatter: CsvFormatter,
}

const CSV_HEADER: &str = "Filename,Score,File Type,Analysis Date";

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, percentage: f32) -> String {
        let (badge, color) = match percentage {
            p if p >= 60.0 => ("STRONG", Color::Green),
            p if p >= 40.0 => ("GOOD", Color::BrightGreen),
            p if p >= 20.0 => ("FAIR", Color::Yellow),
            p if p > 0.0 => ("WEAK", Color::BrightRed),
            _ => ("NO MATCH", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_row(&self, row: &ReportRow) -> String {
        let percentage = row.score_percentage();
        format!(
            "{:>3}. {:<40} {:>6.2}%  {:<5} {}\n",
            row.rank,
            truncate(&row.filename, 40),
            percentage,
            row.file_type,
            self.format_score_badge(percentage)
        )
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME RANKING", 1));
        output.push_str(&format!(
            "Job: {} | Analysis #{} | {}\n",
            self.colorize(&report.job_title, Color::Cyan),
            report.analysis_id,
            report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str(&self.format_header("Ranking", 2));
        if report.results.is_empty() {
            output.push_str(&self.colorize("  No resumes could be scored.\n", Color::Yellow));
        } else {
            for row in &report.results {
                output.push_str(&self.format_row(row));
            }
        }

        if let Some(best) = &report.best_match {
            output.push_str(&format!(
                "\n🏆 Best match: {} ({:.2}%)\n",
                self.colorize(&best.filename, Color::Green),
                best.score_percentage()
            ));
        }

        output.push_str(&format!(
            "\nScored {} of {} resumes",
            report.results.len(),
            report.total_documents
        ));
        if !report.skipped.is_empty() {
            output.push_str(&format!(
                ", {}",
                self.colorize(&format!("{} skipped", report.skipped.len()), Color::Yellow)
            ));
        }
        output.push('\n');

        if self.detailed && !report.skipped.is_empty() {
            output.push_str(&self.format_header("Skipped", 3));
            for skipped in &report.skipped {
                output.push_str(&format!(
                    "  • {}: {}\n",
                    skipped.identifier,
                    self.colorize(&skipped.reason, Color::Red)
                ));
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let export = report.export();
        if self.pretty {
            Ok(serde_json::to_string_pretty(&export)?)
        } else {
            Ok(serde_json::to_string(&export)?)
        }
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let analysis_date = report.created_at.format("%Y-%m-%d %H:%M:%S").to_string();

        let mut output = String::from(CSV_HEADER);
        output.push_str("\r\n");
        for row in &report.results {
            let fields = [
                csv_field(&row.filename),
                format!("{:.2}", row.score),
                csv_field(row.file_type.extension()),
                csv_field(&analysis_date),
            ];
            output.push_str(&fields.join(","));
            output.push_str("\r\n");
        }
        Ok(output)
    }
}

/// Quote a field when it holds a delimiter, quote or line break; embedded
/// quotes are doubled.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            csv_formatter: CsvFormatter,
        }
    }

    pub fn generate_report(&self, report: &RankingReport, format: OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Csv => &self.csv_formatter,
        };
        formatter.format_report(report)
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// File name for a saved report, derived from the job title.
pub fn suggest_filename(format: &OutputFormat, job_title: &str, timestamp: bool) -> String {
    let slug: String = job_title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("_");
    let base_name = if slug.is_empty() { "resumes".to_string() } else { slug };

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_ranking{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_ranking{}.json", base_name, timestamp_suffix),
        OutputFormat::Csv => format!("{}_ranking{}.csv", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::file_detector::FileType;
    use crate::processing::document::{RankedBatch, ScoreResult, SkippedDocument};
    use crate::processing::ranker::RankingOutcome;
    use chrono::{TimeZone, Utc};

    fn sample_report() -> RankingReport {
        let result = |identifier: &str, score: f32, file_type| ScoreResult {
            identifier: identifier.to_string(),
            score,
            file_type,
        };
        let outcome = RankingOutcome {
            ranked: RankedBatch::from_results(vec![
                result("smith, jane.pdf", 0.4567, FileType::Pdf),
                result("doe.docx", 0.1, FileType::Docx),
            ]),
            skipped: vec![SkippedDocument {
                identifier: "old.doc".to_string(),
                reason: "legacy .doc".to_string(),
            }],
            total_documents: 3,
        };
        RankingReport::at(
            "Backend Engineer",
            &outcome,
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        )
        .with_analysis_id(42)
    }

    #[test]
    fn test_csv_output() {
        let csv = CsvFormatter.format_report(&sample_report()).unwrap();
        let lines: Vec<&str> = csv.split("\r\n").collect();

        assert_eq!(lines[0], "Filename,Score,File Type,Analysis Date");
        assert_eq!(lines[1], "\"smith, jane.pdf\",0.46,pdf,2024-03-01 09:30:00");
        assert_eq!(lines[2], "doe.docx,0.10,docx,2024-03-01 09:30:00");
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_json_output() {
        let json = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["analysis_id"], 42);
        assert_eq!(value["job_title"], "Backend Engineer");
        assert_eq!(value["results"].as_array().unwrap().len(), 2);
        assert_eq!(value["results"][1][0], "doe.docx");
    }

    #[test]
    fn test_console_output_without_colors() {
        let text = ConsoleFormatter::new(false, true).format_report(&sample_report()).unwrap();

        assert!(text.contains("RESUME RANKING"));
        assert!(text.contains("Best match: smith, jane.pdf (45.67%)"));
        assert!(text.contains("Scored 2 of 3 resumes, 1 skipped"));
        assert!(text.contains("old.doc: legacy .doc"));
        assert!(text.contains("[GOOD]"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::new(false, false);
        let report = sample_report();
        let csv = generator.generate_report(&report, OutputFormat::Csv).unwrap();
        assert!(csv.starts_with(CSV_HEADER));
        let json = generator.generate_report(&report, OutputFormat::Json).unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&json).is_ok());
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(&OutputFormat::Csv, "Senior Backend Engineer (Remote)", false),
            "senior_backend_engineer_remote_ranking.csv"
        );
        assert_eq!(suggest_filename(&OutputFormat::Json, "", false), "resumes_ranking.json");
    }

    #[test]
    fn test_save_report_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.csv");
        save_report_to_file("Filename,Score\r\n", &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Filename,Score\r\n");
    }
}

//! Report rendering and export

pub mod formatter;
pub mod report;

pub use formatter::{OutputFormatter, ReportGenerator};
pub use report::{RankingExport, RankingReport, ReportRow};

//! Report generation for enriched inventories.
//!
//! One section per OS family, in three formats:
//! - CSV: spreadsheet import, one header per family section
//! - JSON: structured data for programmatic integration
//! - Summary: compact shell-friendly status counts plus flagged devices

mod csv;
mod json;
mod summary;

pub use csv::CsvReporter;
pub use json::JsonReporter;
pub use summary::SummaryReporter;

use crate::model::{EnrichedDevice, OsFamily};
use chrono::NaiveDate;
use indexmap::IndexMap;
use regex::Regex;
use std::io::Write;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Csv,
    Json,
    Summary,
}

/// Report configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportConfig {
    /// The "today" the attributes were computed against; stamped into the
    /// report when set.
    pub today: Option<NaiveDate>,
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render a report for the enriched inventory.
    fn generate(
        &self,
        rows: &[EnrichedDevice],
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Write the report to a writer.
    fn write_report(
        &self,
        rows: &[EnrichedDevice],
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate(rows, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// The format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a reporter for the requested format.
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Csv => Box::new(CsvReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Summary => Box::new(SummaryReporter::new()),
    }
}

/// Group rows per family, preserving input order within each group and
/// [`OsFamily::ALL`] order across groups. Families with no rows are omitted.
pub(crate) fn group_by_family(
    rows: &[EnrichedDevice],
) -> IndexMap<OsFamily, Vec<&EnrichedDevice>> {
    let mut groups: IndexMap<OsFamily, Vec<&EnrichedDevice>> = IndexMap::new();
    for family in OsFamily::ALL {
        let members: Vec<&EnrichedDevice> =
            rows.iter().filter(|r| r.family == family).collect();
        if !members.is_empty() {
            groups.insert(family, members);
        }
    }
    groups
}

/// Section title for a family, restricted to spreadsheet-safe characters
/// so the CSV sections import cleanly as sheet names.
pub(crate) fn section_title(family: OsFamily) -> String {
    static SAFE_CHARS: OnceLock<Regex> = OnceLock::new();
    let re = SAFE_CHARS.get_or_init(|| Regex::new(r"[^a-zA-Z0-9 ()_-]").expect("static regex"));
    format!("{} Versions", re.replace_all(family.label(), ""))
}

//! Pipeline orchestration: inventory → build data → lifecycle → report.
//!
//! The engine stays pure; this module owns the run-level concerns — row
//! classification, the memoizing resolver, stats, and exit codes.

use crate::error::Result;
use crate::inventory::read_inventory;
use crate::lifecycle::SupportResolver;
use crate::model::{BuildData, EnrichedDevice, OsFamily, SupportStatus};
use crate::reports::{create_reporter, ReportConfig, ReportFormat};
use chrono::NaiveDate;
use std::path::Path;

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Every classified device is supported (or the run was told not to fail)
    pub const SUCCESS: i32 = 0;
    /// EOL or unmatched-version devices were found
    pub const FINDINGS: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

/// Configuration for one check run.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Report format to render
    pub format: ReportFormat,
    /// The "today" to classify against; defaults to the system date
    pub today: Option<NaiveDate>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Summary,
            today: None,
        }
    }
}

/// Statistics from one check run.
#[derive(Debug, Default, Clone)]
pub struct CheckStats {
    /// Rows read from the inventory
    pub rows_total: usize,
    /// Rows whose OS column matched a supported family
    pub rows_classified: usize,
    /// Rows skipped (unrecognized platform)
    pub rows_unclassified: usize,
    /// Rows flagged for CI (EOL or unknown version)
    pub findings: usize,
    /// Memo hits in the resolver
    pub cache_hits: u64,
    /// Distinct (family, version) pairs resolved
    pub distinct_versions: usize,
}

impl CheckStats {
    /// Log a summary of the run.
    pub fn log_summary(&self) {
        tracing::info!(
            "Check complete: {} rows ({} classified, {} skipped), {} findings, \
             {} distinct versions, {} memo hits",
            self.rows_total,
            self.rows_classified,
            self.rows_unclassified,
            self.findings,
            self.distinct_versions,
            self.cache_hits,
        );
    }

    /// Whether the run should fail a CI gate.
    #[must_use]
    pub const fn has_findings(&self) -> bool {
        self.findings > 0
    }
}

/// The outcome of a check run: the rendered report plus its inputs.
#[derive(Debug)]
pub struct CheckOutcome {
    pub report: String,
    pub rows: Vec<EnrichedDevice>,
    pub stats: CheckStats,
}

/// Enrich every classifiable inventory row against the build data.
///
/// Rows whose OS column matches no supported family are skipped (and
/// counted); everything else flows through the resolver, so duplicate
/// version strings cost one engine run each.
pub fn enrich_inventory(
    records: &[crate::model::DeviceRecord],
    data: BuildData,
    today: NaiveDate,
) -> (Vec<EnrichedDevice>, CheckStats) {
    let mut resolver = SupportResolver::new(data, today);
    let mut stats = CheckStats {
        rows_total: records.len(),
        ..Default::default()
    };

    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let Some(family) = OsFamily::detect(&record.os) else {
            tracing::debug!(os = %record.os, "skipping unrecognized platform");
            stats.rows_unclassified += 1;
            continue;
        };

        let attributes = resolver.resolve(record.os_version.as_deref(), family);
        stats.rows_classified += 1;
        if attributes.supported.is_finding() {
            stats.findings += 1;
        }
        if attributes.supported == SupportStatus::InvalidData {
            tracing::warn!(
                device = record.device_name.as_deref().unwrap_or("?"),
                family = family.label(),
                "reference data for this row could not be interpreted"
            );
        }

        rows.push(EnrichedDevice {
            record: record.clone(),
            family,
            attributes,
        });
    }

    stats.cache_hits = resolver.cache_hits();
    stats.distinct_versions = resolver.distinct_pairs();
    (rows, stats)
}

/// Run a full check: read the inventory, enrich it, render the report.
pub fn run_check(
    inventory_path: &Path,
    data: BuildData,
    config: &CheckConfig,
) -> Result<CheckOutcome> {
    let records = read_inventory(inventory_path)?;
    let today = config
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let (rows, stats) = enrich_inventory(&records, data, today);
    stats.log_summary();

    let reporter = create_reporter(config.format);
    let report_config = ReportConfig { today: Some(today) };
    let report = reporter
        .generate(&rows, &report_config)
        .map_err(|e| crate::error::FleetEolError::report(
            "rendering check report",
            crate::error::ReportErrorKind::JsonSerializationError(e.to_string()),
        ))?;

    Ok(CheckOutcome {
        report,
        rows,
        stats,
    })
}

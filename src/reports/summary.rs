//! Compact terminal summary.

use super::json::status_counts;
use super::{group_by_family, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::model::{EnrichedDevice, NOT_AVAILABLE};
use std::fmt::Write as _;

/// Shell-friendly summary: per-family status counts, then the flagged
/// devices (EOL or unmatched version).
pub struct SummaryReporter;

impl SummaryReporter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(
        &self,
        rows: &[EnrichedDevice],
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut out = String::new();

        writeln!(out, "OS Lifecycle Summary")?;
        if let Some(today) = config.today {
            writeln!(out, "As of {today}")?;
        }
        writeln!(out, "====================")?;

        if rows.is_empty() {
            writeln!(out, "\nNo classifiable devices in inventory.")?;
            return Ok(out);
        }

        for (family, members) in group_by_family(rows) {
            writeln!(out, "\n{} ({} devices)", family.label(), members.len())?;
            for (status, count) in status_counts(&members) {
                writeln!(out, "  {:<16} {count}", status.label())?;
            }
        }

        let flagged: Vec<&EnrichedDevice> = rows
            .iter()
            .filter(|r| r.attributes.supported.is_finding())
            .collect();
        if !flagged.is_empty() {
            writeln!(out, "\nFlagged devices:")?;
            for row in flagged {
                writeln!(
                    out,
                    "  {:<24} {:<12} {:<18} {}",
                    row.record.device_name.as_deref().unwrap_or(NOT_AVAILABLE),
                    row.family.label(),
                    row.record.os_version.as_deref().unwrap_or(NOT_AVAILABLE),
                    row.attributes.supported.label(),
                )?;
            }
        }

        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::enriched;
    use super::*;
    use crate::model::{OsFamily, SupportStatus};

    #[test]
    fn summary_lists_counts_and_flagged_devices() {
        let rows = vec![
            enriched("LAPTOP-01", OsFamily::Windows, SupportStatus::EndOfLife),
            enriched("LAPTOP-02", OsFamily::Windows, SupportStatus::Supported),
            enriched("PIXEL-7", OsFamily::Android, SupportStatus::NoEol),
        ];
        let output = SummaryReporter::new()
            .generate(&rows, &ReportConfig::default())
            .expect("summary");

        assert!(output.contains("Windows (2 devices)"));
        assert!(output.contains("End of Life      1"));
        assert!(output.contains("Flagged devices:"));
        assert!(output.contains("LAPTOP-01"));
        assert!(!output.contains("PIXEL-7"), "NoEol is not a finding");
    }

    #[test]
    fn empty_inventory_says_so() {
        let output = SummaryReporter::new()
            .generate(&[], &ReportConfig::default())
            .expect("summary");
        assert!(output.contains("No classifiable devices"));
    }
}

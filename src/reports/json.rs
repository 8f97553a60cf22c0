//! JSON report generator.

use super::{group_by_family, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::model::{EnrichedDevice, SupportStatus};
use serde::Serialize;

/// JSON report generator.
pub struct JsonReporter;

impl JsonReporter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    generated: Option<String>,
    families: Vec<FamilySection<'a>>,
}

#[derive(Serialize)]
struct FamilySection<'a> {
    family: &'static str,
    device_count: usize,
    findings: usize,
    rows: Vec<&'a EnrichedDevice>,
}

impl ReportGenerator for JsonReporter {
    fn generate(
        &self,
        rows: &[EnrichedDevice],
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let families = group_by_family(rows)
            .into_iter()
            .map(|(family, members)| FamilySection {
                family: family.label(),
                device_count: members.len(),
                findings: members
                    .iter()
                    .filter(|r| r.attributes.supported.is_finding())
                    .count(),
                rows: members,
            })
            .collect();

        let report = JsonReport {
            generated: config.today.map(|d| d.to_string()),
            families,
        };

        serde_json::to_string_pretty(&report)
            .map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

/// Count rows per status, exposed for the summary view as well.
pub(crate) fn status_counts(rows: &[&EnrichedDevice]) -> Vec<(SupportStatus, usize)> {
    let statuses = [
        SupportStatus::EndOfLife,
        SupportStatus::UnknownVersion,
        SupportStatus::InvalidVersion,
        SupportStatus::InvalidData,
        SupportStatus::Unknown,
        SupportStatus::NoEol,
        SupportStatus::Supported,
    ];
    statuses
        .into_iter()
        .filter_map(|status| {
            let count = rows
                .iter()
                .filter(|r| r.attributes.supported == status)
                .count();
            (count > 0).then_some((status, count))
        })
        .collect()
}

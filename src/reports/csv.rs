//! CSV report generator.
//!
//! One `# <Family> Versions` section per family, each with its own header
//! row, suitable for spreadsheet import.

use super::{group_by_family, section_title, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::model::{EnrichedDevice, FamilyDetails, NOT_AVAILABLE};

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for CsvReporter {
    fn generate(
        &self,
        rows: &[EnrichedDevice],
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut content = String::new();

        for (family, members) in group_by_family(rows) {
            content.push_str(&format!("# {}\n", section_title(family)));

            let conditional = FamilyDetails::for_family(family).column_header();
            content.push_str(&format!(
                "Device Name,OS,OS Version,Supported,Release Date,Version Age,EOL Date,{conditional}\n"
            ));

            for row in members {
                write_row(&mut content, row);
            }
            content.push('\n');
        }

        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

fn write_row(content: &mut String, row: &EnrichedDevice) {
    let attrs = &row.attributes;
    content.push_str(&format!(
        "\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\"\n",
        escape_csv(row.record.device_name.as_deref().unwrap_or(NOT_AVAILABLE)),
        escape_csv(&row.record.os),
        escape_csv(row.record.os_version.as_deref().unwrap_or(NOT_AVAILABLE)),
        attrs.supported.label(),
        escape_csv(&attrs.release_date),
        escape_csv(&attrs.version_age),
        escape_csv(&attrs.eol),
        escape_csv(&attrs.details.column_value()),
    ));
}

/// Escape a string for CSV embedding: double-quote escaping per RFC 4180,
/// plus newline flattening since fields are already wrapped in double quotes.
fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"").replace('\n', " ")
}

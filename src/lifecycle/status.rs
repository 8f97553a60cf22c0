//! Status derivation: matched cycles to per-row attribute records.

use crate::model::{
    DateOrBool, FamilyDetails, OsAttributes, OsFamily, ReleaseCycle, SupportStatus, NOT_AVAILABLE,
};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Derive the output attributes for a matched cycle.
///
/// Never fails: any parse error while interpreting the matched data is
/// classified as [`SupportStatus::InvalidData`] with all other fields at
/// their "N/A" defaults.
#[must_use]
pub fn derive_attributes(
    cycle: &ReleaseCycle,
    raw_version: &str,
    family: OsFamily,
    today: NaiveDate,
) -> OsAttributes {
    derive_checked(cycle, raw_version, family, today)
        .unwrap_or_else(|_| OsAttributes::fallback(SupportStatus::InvalidData, family))
}

fn derive_checked(
    cycle: &ReleaseCycle,
    raw_version: &str,
    family: OsFamily,
    today: NaiveDate,
) -> Result<OsAttributes, chrono::ParseError> {
    let supported = classify_support(cycle.eol.as_ref(), today)?;

    let (release_date, version_age) = match cycle.release_date.as_deref() {
        None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
        Some(s) if s.trim().is_empty() || s == NOT_AVAILABLE => {
            (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string())
        }
        Some(s) => {
            let released = NaiveDate::parse_from_str(s, DATE_FORMAT)?;
            let age_days = today.signed_duration_since(released).num_days();
            (s.to_string(), format_version_age(age_days))
        }
    };

    let eol = cycle
        .eol
        .as_ref()
        .map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string);

    let details = match family {
        OsFamily::Windows => FamilyDetails::Windows {
            release_label: cycle
                .release_label
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        },
        OsFamily::Android => FamilyDetails::Android {
            codename: cycle
                .codename
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        },
        // Exact string comparison against the version as the inventory gave
        // it, not the normalized key.
        OsFamily::Ios | OsFamily::MacOs => FamilyDetails::Apple {
            is_latest: cycle.latest.as_deref() == Some(raw_version),
        },
    };

    Ok(OsAttributes {
        supported,
        release_date,
        version_age,
        eol,
        details,
    })
}

/// Classify the EOL field. The comparison is inclusive: an EOL date equal to
/// "today" still counts as supported.
fn classify_support(
    eol: Option<&DateOrBool>,
    today: NaiveDate,
) -> Result<SupportStatus, chrono::ParseError> {
    Ok(match eol {
        None => SupportStatus::Unknown,
        Some(DateOrBool::Bool(false)) => SupportStatus::NoEol,
        Some(DateOrBool::Bool(true)) => SupportStatus::EndOfLife,
        Some(DateOrBool::Date(s)) => {
            let eol_date = NaiveDate::parse_from_str(s, DATE_FORMAT)?;
            if today <= eol_date {
                SupportStatus::Supported
            } else {
                SupportStatus::EndOfLife
            }
        }
    })
}

/// Render a release age in days as a human-readable string.
///
/// Whole months are `days / 30`; past a year the remainder becomes a
/// one-decimal fraction in months, so 400 days reads "1.1 years".
fn format_version_age(age_days: i64) -> String {
    if age_days < 0 {
        return "Future Release".to_string();
    }
    match age_days {
        0 => "Today".to_string(),
        1 => "1 day".to_string(),
        d if d < 30 => format!("{d} days"),
        d if d < 365 => {
            let months = d / 30;
            if months == 1 {
                "1 month".to_string()
            } else {
                format!("{months} months")
            }
        }
        d => {
            let years = d / 365;
            let remaining_months = (d % 365) / 30;
            if remaining_months > 0 {
                format!("{years}.{remaining_months} years")
            } else if years == 1 {
                "1 year".to_string()
            } else {
                format!("{years} years")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
    }

    fn cycle_with_eol(eol: DateOrBool) -> ReleaseCycle {
        ReleaseCycle {
            cycle: "13".to_string(),
            eol: Some(eol),
            ..Default::default()
        }
    }

    #[test]
    fn eol_date_in_future_is_supported() {
        let cycle = cycle_with_eol(DateOrBool::Date("2025-10-14".to_string()));
        let attrs = derive_attributes(&cycle, "13", OsFamily::Android, today());
        assert_eq!(attrs.supported, SupportStatus::Supported);
        assert_eq!(attrs.eol, "2025-10-14");
    }

    #[test]
    fn eol_date_equal_to_today_is_still_supported() {
        let cycle = cycle_with_eol(DateOrBool::Date("2024-06-15".to_string()));
        let attrs = derive_attributes(&cycle, "13", OsFamily::Android, today());
        assert_eq!(attrs.supported, SupportStatus::Supported);
    }

    #[test]
    fn eol_date_in_past_is_end_of_life() {
        let cycle = cycle_with_eol(DateOrBool::Date("2024-06-14".to_string()));
        let attrs = derive_attributes(&cycle, "13", OsFamily::Android, today());
        assert_eq!(attrs.supported, SupportStatus::EndOfLife);
    }

    #[test]
    fn eol_false_means_no_eol() {
        let cycle = cycle_with_eol(DateOrBool::Bool(false));
        let attrs = derive_attributes(&cycle, "13", OsFamily::Android, today());
        assert_eq!(attrs.supported, SupportStatus::NoEol);
        assert_eq!(attrs.eol, "false");
    }

    #[test]
    fn eol_true_means_already_reached() {
        let cycle = cycle_with_eol(DateOrBool::Bool(true));
        let attrs = derive_attributes(&cycle, "13", OsFamily::Android, today());
        assert_eq!(attrs.supported, SupportStatus::EndOfLife);
    }

    #[test]
    fn missing_eol_is_unknown() {
        let cycle = ReleaseCycle {
            cycle: "13".to_string(),
            ..Default::default()
        };
        let attrs = derive_attributes(&cycle, "13", OsFamily::Android, today());
        assert_eq!(attrs.supported, SupportStatus::Unknown);
        assert_eq!(attrs.eol, NOT_AVAILABLE);
    }

    #[test]
    fn malformed_eol_date_is_invalid_data() {
        let cycle = cycle_with_eol(DateOrBool::Date("14-10-2025".to_string()));
        let attrs = derive_attributes(&cycle, "13", OsFamily::Android, today());
        assert_eq!(attrs.supported, SupportStatus::InvalidData);
        assert_eq!(attrs.release_date, NOT_AVAILABLE);
        assert_eq!(attrs.eol, NOT_AVAILABLE);
    }

    #[test]
    fn malformed_release_date_is_invalid_data() {
        let cycle = ReleaseCycle {
            cycle: "13".to_string(),
            release_date: Some("October 18".to_string()),
            eol: Some(DateOrBool::Bool(false)),
            ..Default::default()
        };
        let attrs = derive_attributes(&cycle, "13", OsFamily::Android, today());
        assert_eq!(attrs.supported, SupportStatus::InvalidData);
    }

    #[test]
    fn windows_release_label_carried_through() {
        let cycle = ReleaseCycle {
            cycle: "22H2".to_string(),
            release_label: Some("22H2 (W)".to_string()),
            eol: Some(DateOrBool::Date("2025-10-14".to_string())),
            ..Default::default()
        };
        let attrs = derive_attributes(&cycle, "10.0.19045.3393", OsFamily::Windows, today());
        assert_eq!(
            attrs.details,
            FamilyDetails::Windows {
                release_label: "22H2 (W)".to_string()
            }
        );
    }

    #[test]
    fn android_codename_carried_through() {
        let cycle = ReleaseCycle {
            cycle: "13".to_string(),
            codename: Some("Tiramisu".to_string()),
            eol: Some(DateOrBool::Bool(false)),
            ..Default::default()
        };
        let attrs = derive_attributes(&cycle, "13", OsFamily::Android, today());
        assert_eq!(
            attrs.details,
            FamilyDetails::Android {
                codename: "Tiramisu".to_string()
            }
        );
    }

    #[test]
    fn apple_is_latest_compares_raw_version_exactly() {
        let cycle = ReleaseCycle {
            cycle: "17".to_string(),
            latest: Some("17.4.1".to_string()),
            eol: Some(DateOrBool::Bool(false)),
            ..Default::default()
        };

        let exact = derive_attributes(&cycle, "17.4.1", OsFamily::Ios, today());
        assert_eq!(exact.details, FamilyDetails::Apple { is_latest: true });

        // The normalized key "17" would match, but the comparison is raw.
        let older = derive_attributes(&cycle, "17.4", OsFamily::Ios, today());
        assert_eq!(older.details, FamilyDetails::Apple { is_latest: false });
    }

    #[test]
    fn version_age_formatting_table() {
        assert_eq!(format_version_age(-10), "Future Release");
        assert_eq!(format_version_age(0), "Today");
        assert_eq!(format_version_age(1), "1 day");
        assert_eq!(format_version_age(15), "15 days");
        assert_eq!(format_version_age(29), "29 days");
        assert_eq!(format_version_age(30), "1 month");
        assert_eq!(format_version_age(59), "1 month");
        assert_eq!(format_version_age(60), "2 months");
        assert_eq!(format_version_age(364), "12 months");
        assert_eq!(format_version_age(365), "1 year");
        assert_eq!(format_version_age(394), "1 year");
        assert_eq!(format_version_age(400), "1.1 years");
        assert_eq!(format_version_age(730), "2 years");
        assert_eq!(format_version_age(1000), "2.9 years");
    }

    #[test]
    fn version_age_from_release_date() {
        let cycle = ReleaseCycle {
            cycle: "13".to_string(),
            release_date: Some("2024-06-14".to_string()),
            eol: Some(DateOrBool::Bool(false)),
            ..Default::default()
        };
        let attrs = derive_attributes(&cycle, "13", OsFamily::Android, today());
        assert_eq!(attrs.release_date, "2024-06-14");
        assert_eq!(attrs.version_age, "1 day");
    }

    #[test]
    fn future_release_date() {
        let cycle = ReleaseCycle {
            cycle: "15".to_string(),
            release_date: Some("2024-09-01".to_string()),
            eol: Some(DateOrBool::Bool(false)),
            ..Default::default()
        };
        let attrs = derive_attributes(&cycle, "15", OsFamily::Android, today());
        assert_eq!(attrs.version_age, "Future Release");
    }
}

//! Release-cycle reference data ("build data") from endoflife.date.

use crate::model::OsFamily;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// Union type for endoflife.date fields that can be a date string or boolean.
///
/// The API returns `"eol": "2025-10-14"` or `"eol": false` (no planned end of
/// life) or `"eol": true` (already reached).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateOrBool {
    /// A date string (e.g., "2025-10-14")
    Date(String),
    /// A boolean milestone flag
    Bool(bool),
}

impl DateOrBool {
    /// Parse as a `NaiveDate`, if the value is a date string.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
            Self::Bool(_) => None,
        }
    }
}

impl std::fmt::Display for DateOrBool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// One release cycle of an OS family's build data.
///
/// Fields beyond `cycle` are optional; the matcher and status engine default
/// them per row rather than rejecting the record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseCycle {
    /// Release-line identifier (e.g., "22H2", "13", "17")
    #[serde(deserialize_with = "string_or_number")]
    pub cycle: String,
    /// Full version string of the newest build in this cycle
    #[serde(default)]
    pub latest: Option<String>,
    /// ISO date the cycle became available
    #[serde(default)]
    pub release_date: Option<String>,
    /// EOL date, or `false` meaning no planned end of life
    #[serde(default)]
    pub eol: Option<DateOrBool>,
    /// Marketing label; Windows labels carry a "(W)" marker on the
    /// Workstation/consumer SKU
    #[serde(default)]
    pub release_label: Option<String>,
    /// Human-friendly name (Android dessert names)
    #[serde(default)]
    pub codename: Option<String>,
}

/// Accept both `"cycle": "13"` and `"cycle": 13`; some datasets publish
/// numeric cycles.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        String(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::String(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// The complete reference dataset: one cycle list per OS family.
///
/// Read-only once built. The xxh3 fingerprint pins the dataset identity for
/// memoization (results depend on the data, not just the inputs).
#[derive(Debug, Clone)]
pub struct BuildData {
    families: IndexMap<OsFamily, Vec<ReleaseCycle>>,
    fingerprint: u64,
}

impl BuildData {
    #[must_use]
    pub fn new(families: IndexMap<OsFamily, Vec<ReleaseCycle>>) -> Self {
        let fingerprint = fingerprint_of(&families);
        Self {
            families,
            fingerprint,
        }
    }

    /// Cycle list for a family, in dataset order (newest-first in practice).
    /// Families absent from the dataset yield an empty list.
    #[must_use]
    pub fn cycles(&self, family: OsFamily) -> &[ReleaseCycle] {
        self.families.get(&family).map_or(&[], Vec::as_slice)
    }

    /// xxh3 hash of the serialized cycle lists.
    #[must_use]
    pub const fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    #[must_use]
    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.families.values().all(Vec::is_empty)
    }
}

fn fingerprint_of(families: &IndexMap<OsFamily, Vec<ReleaseCycle>>) -> u64 {
    let mut buf = Vec::new();
    for (family, cycles) in families {
        buf.extend_from_slice(family.slug().as_bytes());
        if let Ok(bytes) = serde_json::to_vec(cycles) {
            buf.extend_from_slice(&bytes);
        }
    }
    xxh3_64(&buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::indexmap;

    #[test]
    fn date_or_bool_deserialization() {
        let date: DateOrBool = serde_json::from_str("\"2025-10-14\"").expect("date");
        assert!(matches!(date, DateOrBool::Date(_)));

        let flag: DateOrBool = serde_json::from_str("false").expect("bool");
        assert_eq!(flag, DateOrBool::Bool(false));
    }

    #[test]
    fn date_or_bool_as_date() {
        let d = DateOrBool::Date("2025-10-14".to_string());
        assert_eq!(d.as_date(), NaiveDate::from_ymd_opt(2025, 10, 14));
        assert!(DateOrBool::Bool(true).as_date().is_none());
        assert!(DateOrBool::Date("not-a-date".to_string()).as_date().is_none());
    }

    #[test]
    fn date_or_bool_display_matches_raw_value() {
        assert_eq!(DateOrBool::Date("2025-10-14".to_string()).to_string(), "2025-10-14");
        assert_eq!(DateOrBool::Bool(false).to_string(), "false");
        assert_eq!(DateOrBool::Bool(true).to_string(), "true");
    }

    #[test]
    fn release_cycle_deserialization() {
        let json = r#"{
            "cycle": "22H2",
            "latest": "10.0.19045.3393",
            "releaseDate": "2022-10-18",
            "eol": "2025-10-14",
            "releaseLabel": "22H2 (W)",
            "lts": false
        }"#;
        let cycle: ReleaseCycle = serde_json::from_str(json).expect("cycle");
        assert_eq!(cycle.cycle, "22H2");
        assert_eq!(cycle.latest.as_deref(), Some("10.0.19045.3393"));
        assert_eq!(cycle.release_label.as_deref(), Some("22H2 (W)"));
        assert!(cycle.codename.is_none());
    }

    #[test]
    fn release_cycle_numeric_cycle_becomes_string() {
        let cycle: ReleaseCycle = serde_json::from_str(r#"{"cycle": 13}"#).expect("cycle");
        assert_eq!(cycle.cycle, "13");
    }

    #[test]
    fn release_cycle_sparse_record() {
        let cycle: ReleaseCycle = serde_json::from_str(r#"{"cycle": "9"}"#).expect("cycle");
        assert!(cycle.latest.is_none());
        assert!(cycle.eol.is_none());
        assert!(cycle.release_date.is_none());
    }

    #[test]
    fn build_data_fingerprint_tracks_content() {
        let a = BuildData::new(indexmap! {
            OsFamily::Android => vec![ReleaseCycle { cycle: "13".to_string(), ..Default::default() }],
        });
        let b = BuildData::new(indexmap! {
            OsFamily::Android => vec![ReleaseCycle { cycle: "13".to_string(), ..Default::default() }],
        });
        let c = BuildData::new(indexmap! {
            OsFamily::Android => vec![ReleaseCycle { cycle: "14".to_string(), ..Default::default() }],
        });

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn build_data_missing_family_is_empty_slice() {
        let data = BuildData::new(IndexMap::new());
        assert!(data.cycles(OsFamily::Windows).is_empty());
        assert!(data.is_empty());
    }
}

//! Per-row output attributes produced by the status engine.

use crate::model::OsFamily;
use serde::{Deserialize, Serialize};

/// Placeholder for fields the engine could not populate.
pub const NOT_AVAILABLE: &str = "N/A";

/// Support-status classification for one device row.
///
/// Terminal per row; a pure function of (matched-or-not, EOL field type,
/// date comparison). Error conditions are statuses, not faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportStatus {
    /// EOL date is today or later
    Supported,
    /// EOL date has passed (or the dataset flags the cycle as reached)
    EndOfLife,
    /// The dataset explicitly declares no planned end of life
    NoEol,
    /// The version normalized cleanly but matched no reference cycle
    UnknownVersion,
    /// The raw version was empty or yielded no usable key
    InvalidVersion,
    /// Matched data could not be interpreted (malformed date, bad field)
    InvalidData,
    /// Cycle matched but its EOL policy is absent from the dataset
    Unknown,
}

impl SupportStatus {
    /// Display label used in report columns.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Supported => "Supported",
            Self::EndOfLife => "End of Life",
            Self::NoEol => "No EoL",
            Self::UnknownVersion => "Unknown Version",
            Self::InvalidVersion => "Invalid Version",
            Self::InvalidData => "Invalid Data",
            Self::Unknown => "Unknown",
        }
    }

    /// Severity weight (higher = worse), used for summary ordering and the
    /// CI exit code.
    #[must_use]
    pub const fn severity(&self) -> u8 {
        match self {
            Self::Supported | Self::NoEol => 0,
            Self::Unknown | Self::InvalidVersion | Self::InvalidData => 1,
            Self::UnknownVersion => 2,
            Self::EndOfLife => 3,
        }
    }

    /// Whether this row should flag the run in CI (EOL or unmatched version).
    #[must_use]
    pub const fn is_finding(&self) -> bool {
        self.severity() >= 2
    }
}

impl std::fmt::Display for SupportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Family-conditional output fields.
///
/// Each family contributes exactly one extra column: Windows the release
/// label, Android the codename, iOS/iPadOS and macOS the "is latest" flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyDetails {
    Windows { release_label: String },
    Android { codename: String },
    /// Shared by iOS/iPadOS and macOS
    Apple { is_latest: bool },
}

impl FamilyDetails {
    /// The family's default details when nothing was matched.
    #[must_use]
    pub fn for_family(family: OsFamily) -> Self {
        match family {
            OsFamily::Windows => Self::Windows {
                release_label: NOT_AVAILABLE.to_string(),
            },
            OsFamily::Android => Self::Android {
                codename: NOT_AVAILABLE.to_string(),
            },
            OsFamily::Ios | OsFamily::MacOs => Self::Apple { is_latest: false },
        }
    }

    /// Header of the conditional report column for this variant.
    #[must_use]
    pub const fn column_header(&self) -> &'static str {
        match self {
            Self::Windows { .. } => "Release Label",
            Self::Android { .. } => "Codename",
            Self::Apple { .. } => "Latest Version",
        }
    }

    /// Value of the conditional report column.
    #[must_use]
    pub fn column_value(&self) -> String {
        match self {
            Self::Windows { release_label } => release_label.clone(),
            Self::Android { codename } => codename.clone(),
            Self::Apple { is_latest } => is_latest.to_string(),
        }
    }
}

/// The fixed-shape attribute record computed per inventory row.
///
/// Unpopulated fields hold `"N/A"`; the record is always complete, whatever
/// the input looked like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsAttributes {
    pub supported: SupportStatus,
    /// ISO release date of the matched cycle, or "N/A"
    pub release_date: String,
    /// Human-readable age of the release, or "N/A"
    pub version_age: String,
    /// Raw EOL value from the dataset ("2025-10-14", "false"), or "N/A"
    pub eol: String,
    pub details: FamilyDetails,
}

impl OsAttributes {
    /// Build the all-defaults record carrying only a status, used for every
    /// non-matched path (invalid version, unknown version, invalid data).
    #[must_use]
    pub fn fallback(status: SupportStatus, family: OsFamily) -> Self {
        Self {
            supported: status,
            release_date: NOT_AVAILABLE.to_string(),
            version_age: NOT_AVAILABLE.to_string(),
            eol: NOT_AVAILABLE.to_string(),
            details: FamilyDetails::for_family(family),
        }
    }
}

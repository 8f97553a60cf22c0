//! OS family classification.

use serde::{Deserialize, Serialize};

/// The platform categories the lifecycle engine knows how to match.
///
/// Each family has its own match-key granularity and cycle-matching strategy;
/// see [`crate::lifecycle`] for the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsFamily {
    Windows,
    Android,
    /// iOS and iPadOS share one reference dataset.
    Ios,
    MacOs,
}

impl OsFamily {
    /// All families, in fetch/report order.
    pub const ALL: [Self; 4] = [Self::Windows, Self::Android, Self::Ios, Self::MacOs];

    /// Display label, matching the vocabulary of MDM inventory exports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Android => "Android",
            Self::Ios => "iOS/iPadOS",
            Self::MacOs => "macOS",
        }
    }

    /// endoflife.date product slug for this family's build data.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Android => "android",
            Self::Ios => "ios",
            Self::MacOs => "macos",
        }
    }

    /// Classify an inventory OS column value.
    ///
    /// Case-insensitive containment, so `"Windows 10 Enterprise"` maps to
    /// `Windows` and `"Android (fully managed)"` to `Android`. Returns `None`
    /// for platforms outside the supported set (Linux, ChromeOS, ...).
    #[must_use]
    pub fn detect(os_column: &str) -> Option<Self> {
        let lower = os_column.to_lowercase();
        if lower.contains("windows") {
            Some(Self::Windows)
        } else if lower.contains("android") {
            Some(Self::Android)
        } else if lower.contains("ipados") || lower.contains("ios") {
            Some(Self::Ios)
        } else if lower.contains("macos") || lower.contains("mac os") {
            Some(Self::MacOs)
        } else {
            None
        }
    }
}

impl std::fmt::Display for OsFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for OsFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "windows" => Ok(Self::Windows),
            "android" => Ok(Self::Android),
            "ios" | "ipados" | "ios/ipados" => Ok(Self::Ios),
            "macos" | "mac" => Ok(Self::MacOs),
            other => Err(format!(
                "unknown OS family '{other}' (expected windows, android, ios, macos)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_from_inventory_labels() {
        assert_eq!(OsFamily::detect("Windows 10 Enterprise"), Some(OsFamily::Windows));
        assert_eq!(OsFamily::detect("Android (fully managed)"), Some(OsFamily::Android));
        assert_eq!(OsFamily::detect("iOS/iPadOS"), Some(OsFamily::Ios));
        assert_eq!(OsFamily::detect("iPadOS"), Some(OsFamily::Ios));
        assert_eq!(OsFamily::detect("macOS"), Some(OsFamily::MacOs));
        assert_eq!(OsFamily::detect("Linux (Ubuntu)"), None);
        assert_eq!(OsFamily::detect(""), None);
    }

    #[test]
    fn detect_is_case_insensitive() {
        assert_eq!(OsFamily::detect("WINDOWS"), Some(OsFamily::Windows));
        assert_eq!(OsFamily::detect("ios"), Some(OsFamily::Ios));
    }

    #[test]
    fn from_str_accepts_slugs_and_aliases() {
        assert_eq!("windows".parse::<OsFamily>(), Ok(OsFamily::Windows));
        assert_eq!("iPadOS".parse::<OsFamily>(), Ok(OsFamily::Ios));
        assert_eq!("mac".parse::<OsFamily>(), Ok(OsFamily::MacOs));
        assert!("chromeos".parse::<OsFamily>().is_err());
    }

    #[test]
    fn labels_and_slugs_are_stable() {
        for family in OsFamily::ALL {
            assert!(!family.label().is_empty());
            assert!(family.slug().chars().all(|c| c.is_ascii_lowercase()));
        }
    }
}

//! Version normalization: raw version strings to canonical match keys.

use crate::model::OsFamily;

/// Number of dot-separated segments the family's reference data is keyed on.
///
/// Windows build data is keyed on the three-segment build number
/// (`10.0.19045`), Android cycles on major.minor, Apple platforms on the
/// major version alone.
pub(crate) const fn granularity(family: OsFamily) -> usize {
    match family {
        OsFamily::Windows => 3,
        OsFamily::Android => 2,
        OsFamily::Ios | OsFamily::MacOs => 1,
    }
}

/// Derive the canonical match key for a raw version string.
///
/// Surrounding whitespace is stripped; an absent or blank version yields an
/// empty key, which the matcher treats as unmatchable. Never fails.
#[must_use]
pub fn normalize(raw_version: Option<&str>, family: OsFamily) -> String {
    let trimmed = raw_version.unwrap_or("").trim();
    if trimmed.is_empty() {
        return String::new();
    }
    truncate_segments(trimmed, granularity(family))
}

/// Keep at most `n` leading dot-separated segments of a version string.
pub(crate) fn truncate_segments(version: &str, n: usize) -> String {
    version.split('.').take(n).collect::<Vec<_>>().join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_keeps_three_segments() {
        assert_eq!(
            normalize(Some("10.0.19045.3393"), OsFamily::Windows),
            "10.0.19045"
        );
        assert_eq!(normalize(Some("10.0.19045"), OsFamily::Windows), "10.0.19045");
    }

    #[test]
    fn windows_short_version_keeps_what_exists() {
        assert_eq!(normalize(Some("10.0"), OsFamily::Windows), "10.0");
    }

    #[test]
    fn android_keeps_two_segments_or_one() {
        assert_eq!(normalize(Some("13.0"), OsFamily::Android), "13.0");
        assert_eq!(normalize(Some("13"), OsFamily::Android), "13");
        assert_eq!(normalize(Some("13.0.1"), OsFamily::Android), "13.0");
    }

    #[test]
    fn apple_families_keep_major_only() {
        assert_eq!(normalize(Some("17.4.1"), OsFamily::Ios), "17");
        assert_eq!(normalize(Some("14.2"), OsFamily::MacOs), "14");
    }

    #[test]
    fn whitespace_is_stripped() {
        assert_eq!(normalize(Some("  17.4.1 "), OsFamily::Ios), "17");
    }

    #[test]
    fn degenerate_input_yields_empty_key() {
        assert_eq!(normalize(None, OsFamily::Windows), "");
        assert_eq!(normalize(Some(""), OsFamily::Android), "");
        assert_eq!(normalize(Some("   "), OsFamily::MacOs), "");
    }
}

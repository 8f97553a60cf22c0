//! Property-based tests for the lifecycle engine: totality, determinism,
//! and normalization invariants under arbitrary input.

use chrono::NaiveDate;
use fleet_eol::lifecycle::normalize;
use fleet_eol::model::{DateOrBool, OsFamily, ReleaseCycle, SupportStatus};
use fleet_eol::compute_os_attributes;
use proptest::prelude::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
}

fn any_family() -> impl Strategy<Value = OsFamily> {
    prop::sample::select(OsFamily::ALL.to_vec())
}

/// Cycle records with plausible-to-hostile field contents.
fn any_cycle() -> impl Strategy<Value = ReleaseCycle> {
    (
        "[0-9A-Za-z.]{0,12}",
        prop::option::of("[0-9.]{0,20}"),
        prop::option::of(prop_oneof![
            Just("2022-10-18".to_string()),
            Just("2025-10-14".to_string()),
            "[0-9a-z -]{0,12}",
        ]),
        prop::option::of(prop_oneof![
            any::<bool>().prop_map(DateOrBool::Bool),
            "[0-9-]{0,12}".prop_map(DateOrBool::Date),
        ]),
    )
        .prop_map(|(cycle, latest, release_date, eol)| ReleaseCycle {
            cycle,
            latest,
            release_date,
            eol,
            ..Default::default()
        })
}

proptest! {
    /// The engine is total: any version string against any dataset yields a
    /// complete record without panicking.
    #[test]
    fn never_panics_on_arbitrary_input(
        raw in prop::option::of(".{0,40}"),
        family in any_family(),
        cycles in prop::collection::vec(any_cycle(), 0..8),
    ) {
        let attrs = compute_os_attributes(raw.as_deref(), family, &cycles, today());
        prop_assert!(!attrs.release_date.is_empty());
        prop_assert!(!attrs.eol.is_empty());
    }

    /// Identical inputs always produce identical output.
    #[test]
    fn deterministic(
        raw in prop::option::of("[0-9.]{0,20}"),
        family in any_family(),
        cycles in prop::collection::vec(any_cycle(), 0..8),
    ) {
        let first = compute_os_attributes(raw.as_deref(), family, &cycles, today());
        let second = compute_os_attributes(raw.as_deref(), family, &cycles, today());
        prop_assert_eq!(first, second);
    }

    /// Normalization is idempotent and never grows the input.
    #[test]
    fn normalize_is_idempotent(raw in ".{0,40}", family in any_family()) {
        let once = normalize(Some(&raw), family);
        let twice = normalize(Some(&once), family);
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.len() <= raw.trim().len());
    }

    /// A blank version is always classified InvalidVersion, regardless of the
    /// dataset contents.
    #[test]
    fn blank_versions_are_invalid(
        family in any_family(),
        cycles in prop::collection::vec(any_cycle(), 0..8),
        pad in " {0,5}",
    ) {
        let attrs = compute_os_attributes(Some(&pad), family, &cycles, today());
        prop_assert_eq!(attrs.supported, SupportStatus::InvalidVersion);
    }

    /// Versions that match nothing classify as UnknownVersion against an
    /// empty dataset.
    #[test]
    fn nonblank_versions_against_empty_dataset(
        raw in "[0-9][0-9.]{0,10}",
        family in any_family(),
    ) {
        let attrs = compute_os_attributes(Some(&raw), family, &[], today());
        prop_assert_eq!(attrs.supported, SupportStatus::UnknownVersion);
    }
}

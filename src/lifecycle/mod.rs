//! The version-matching and status-derivation engine.
//!
//! Three stages, each total (no error paths escape):
//!
//! 1. [`normalize`] — reduce a raw version string to the match key at the
//!    family's granularity (three segments for Windows, two for Android, one
//!    for the Apple platforms).
//! 2. [`match_cycle`] — find the reference cycle the key belongs to, with
//!    the Windows `"(W)"` tie-break and the Android major-version fallback.
//! 3. [`derive_attributes`] — classify support against a caller-supplied
//!    "today", format the version age, and fill the family-conditional
//!    fields.
//!
//! [`compute_os_attributes`] chains the three; [`SupportResolver`] wraps it
//! with memoization for duplicate-heavy inventories.

mod matcher;
mod normalize;
mod resolver;
mod status;

pub use matcher::match_cycle;
pub use normalize::normalize;
pub use resolver::SupportResolver;
pub use status::derive_attributes;

use crate::model::{OsAttributes, OsFamily, ReleaseCycle, SupportStatus};
use chrono::NaiveDate;

/// Compute the lifecycle attributes for one inventory row.
///
/// Pure and total: every input, however malformed, yields a complete
/// [`OsAttributes`] record, and identical inputs with an identical `today`
/// yield identical output.
#[must_use]
pub fn compute_os_attributes(
    raw_version: Option<&str>,
    family: OsFamily,
    cycles: &[ReleaseCycle],
    today: NaiveDate,
) -> OsAttributes {
    let key = normalize(raw_version, family);
    if key.is_empty() {
        return OsAttributes::fallback(SupportStatus::InvalidVersion, family);
    }
    match match_cycle(&key, family, cycles) {
        Some(cycle) => {
            derive_attributes(cycle, raw_version.unwrap_or("").trim(), family, today)
        }
        None => OsAttributes::fallback(SupportStatus::UnknownVersion, family),
    }
}

//! Memoized lookups over a fixed build-data snapshot.

use super::compute_os_attributes;
use crate::model::{BuildData, OsAttributes, OsFamily};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Memoizing wrapper around [`compute_os_attributes`].
///
/// Fleet inventories repeat the same (family, version) pair across hundreds
/// of devices, so the resolver caches per distinct pair. Results also depend
/// on the dataset and on "today"; both are fixed at construction (the
/// dataset's fingerprint pins its identity), which keeps the memo key down
/// to the pair itself. No global state is involved.
pub struct SupportResolver {
    data: BuildData,
    today: NaiveDate,
    memo: HashMap<(OsFamily, String), OsAttributes>,
    hits: u64,
}

impl SupportResolver {
    #[must_use]
    pub fn new(data: BuildData, today: NaiveDate) -> Self {
        Self {
            data,
            today,
            memo: HashMap::new(),
            hits: 0,
        }
    }

    /// Resolve one row, consulting the memo first.
    pub fn resolve(&mut self, raw_version: Option<&str>, family: OsFamily) -> OsAttributes {
        let raw = raw_version.unwrap_or("").trim().to_string();
        if let Some(cached) = self.memo.get(&(family, raw.clone())) {
            self.hits += 1;
            return cached.clone();
        }

        let attrs =
            compute_os_attributes(raw_version, family, self.data.cycles(family), self.today);
        self.memo.insert((family, raw), attrs.clone());
        attrs
    }

    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Fingerprint of the dataset this resolver answers from.
    #[must_use]
    pub const fn dataset_fingerprint(&self) -> u64 {
        self.data.fingerprint()
    }

    /// Number of lookups answered from the memo.
    #[must_use]
    pub const fn cache_hits(&self) -> u64 {
        self.hits
    }

    /// Number of distinct (family, version) pairs seen.
    #[must_use]
    pub fn distinct_pairs(&self) -> usize {
        self.memo.len()
    }
}

//! Release matching: canonical keys to reference cycles.

use super::normalize::truncate_segments;
use crate::model::{OsFamily, ReleaseCycle};

/// Marker endoflife.date puts on Windows release labels to distinguish the
/// Workstation/consumer SKU from the Server SKU sharing a build number.
const WORKSTATION_MARKER: &str = "(W)";

/// Find the reference cycle a match key belongs to, or `None`.
///
/// An empty key never matches. Ties resolve to the first cycle in list
/// order, which in practice means the newest entry of the dataset; the only
/// stronger preference is the Windows `"(W)"` tie-break.
#[must_use]
pub fn match_cycle<'a>(
    key: &str,
    family: OsFamily,
    cycles: &'a [ReleaseCycle],
) -> Option<&'a ReleaseCycle> {
    if key.is_empty() {
        return None;
    }
    match family {
        OsFamily::Windows => match_windows(key, cycles),
        OsFamily::Android => match_android(key, cycles),
        OsFamily::Ios | OsFamily::MacOs => cycles.iter().find(|c| c.cycle == key),
    }
}

/// Windows matches on the first three segments of each cycle's `latest`
/// build, not on `cycle` (the cycle field holds marketing versions like
/// "22H2"). Client and server lines can share a build number, so multiple
/// hits prefer the Workstation label.
fn match_windows<'a>(key: &str, cycles: &'a [ReleaseCycle]) -> Option<&'a ReleaseCycle> {
    let candidates: Vec<&ReleaseCycle> = cycles
        .iter()
        .filter(|c| {
            c.latest
                .as_deref()
                .is_some_and(|latest| truncate_segments(latest, 3) == key)
        })
        .collect();

    match candidates.as_slice() {
        [] => None,
        [only] => Some(only),
        many => Some(
            many.iter()
                .find(|c| {
                    c.release_label
                        .as_deref()
                        .is_some_and(|label| label.contains(WORKSTATION_MARKER))
                })
                .copied()
                .unwrap_or(many[0]),
        ),
    }
}

/// Android tries the minor-level cycle first, then falls back to the major
/// version; some cycles in the dataset are published major-only.
fn match_android<'a>(key: &str, cycles: &'a [ReleaseCycle]) -> Option<&'a ReleaseCycle> {
    if let Some(cycle) = cycles.iter().find(|c| c.cycle == key) {
        return Some(cycle);
    }
    let major = truncate_segments(key, 1);
    if major != key {
        return cycles.iter().find(|c| c.cycle == major);
    }
    None
}

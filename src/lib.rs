//! **OS support-lifecycle analysis for device-fleet inventories.**
//!
//! `fleet-eol` takes a device inventory export (one row per device, with an
//! OS column and an OS version column) and answers, for every device: is
//! this OS build still supported, when does support end, and how old is it?
//! Release-cycle reference data comes from the `endoflife.date` API and is
//! cached locally.
//!
//! ## Key Features
//!
//! - **Family-aware version matching**: Windows builds match on the first
//!   three dot-segments of a cycle's latest build (with a Workstation
//!   tie-break), Android on `major.minor` with a major-only fallback, and
//!   iOS/iPadOS and macOS on the major version.
//! - **Total classification**: every row gets a [`model::SupportStatus`] —
//!   malformed versions and broken reference data become statuses, never
//!   errors, so one bad row cannot abort a fleet-wide run.
//! - **Offline operation**: point `--build-data` at a directory of
//!   previously fetched cycle files and no network access is needed.
//! - **CI-friendly reports**: CSV, JSON, or a terminal summary, with exit
//!   codes that gate on end-of-life or unrecognized-version findings.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the data model — [`model::OsFamily`],
//!   [`model::ReleaseCycle`], [`model::BuildData`], and the computed
//!   [`model::OsAttributes`].
//! - **[`lifecycle`]**: the pure classification engine:
//!   normalize → match → derive, plus the memoizing
//!   [`lifecycle::SupportResolver`].
//! - **[`enrichment`]**: the `endoflife.date` client with its TTL file
//!   cache and the offline directory loader. Requires the `enrichment`
//!   feature for network access.
//! - **[`inventory`]**: reads inventory exports (JSON arrays of row
//!   objects) into [`model::DeviceRecord`]s.
//! - **[`reports`]**: CSV / JSON / summary generators over enriched rows.
//! - **[`pipeline`]**: ties it together for the CLI.
//!
//! ## Getting Started
//!
//! ```no_run
//! use fleet_eol::enrichment::{BuildDataClient, BuildDataConfig};
//! use fleet_eol::pipeline::{run_check, CheckConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BuildDataClient::new(BuildDataConfig::default());
//!     let (data, _stats) = client.fetch_all()?;
//!
//!     let outcome = run_check(
//!         Path::new("devices.json"),
//!         data,
//!         &CheckConfig::default(),
//!     )?;
//!     print!("{}", outcome.report);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `enrichment` (default): enables fetching cycle data from
//!   `endoflife.date` over HTTPS. Without it, only `--build-data`
//!   directories work.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // # Errors / # Panics doc sections are aspirational here
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Day-count arithmetic casts are bounded in practice
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation
)]

pub mod enrichment;
pub mod error;
pub mod inventory;
pub mod lifecycle;
pub mod model;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use enrichment::{BuildDataClient, BuildDataConfig, FetchStats};
pub use error::{FleetEolError, Result};
pub use inventory::{read_inventory, read_inventory_str};
pub use lifecycle::{compute_os_attributes, SupportResolver};
pub use model::{
    BuildData, DateOrBool, DeviceRecord, EnrichedDevice, FamilyDetails, OsAttributes, OsFamily,
    ReleaseCycle, SupportStatus,
};
pub use pipeline::{run_check, CheckConfig, CheckOutcome, CheckStats};
pub use reports::{create_reporter, ReportConfig, ReportFormat, ReportGenerator};

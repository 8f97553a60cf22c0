//! Build-data acquisition.
//!
//! The lifecycle engine consumes build data as an in-memory
//! [`crate::model::BuildData`]; this module is the collaborator that
//! produces it, either from the endoflife.date API (behind the `enrichment`
//! feature, with file-based TTL caching) or from local per-family JSON
//! files for offline runs.

mod client;

pub use client::{BuildDataClient, BuildDataConfig, FetchStats};

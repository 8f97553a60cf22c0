//! Core data model: OS families, release-cycle reference data, and the
//! per-row attribute records the engine produces.

mod attributes;
mod cycle;
mod device;
mod family;

pub use attributes::{FamilyDetails, OsAttributes, SupportStatus, NOT_AVAILABLE};
pub use cycle::{BuildData, DateOrBool, ReleaseCycle};
pub use device::{DeviceRecord, EnrichedDevice};
pub use family::OsFamily;

//! Device-inventory rows and their enriched form.

use crate::model::{OsAttributes, OsFamily};
use serde::{Deserialize, Serialize};

/// One row of the device inventory, as read from the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Device name column, if the export carries one
    pub device_name: Option<String>,
    /// The OS column as exported (e.g., "Windows 10 Enterprise")
    pub os: String,
    /// The raw OS version cell, reduced to its leading version token
    pub os_version: Option<String>,
}

impl DeviceRecord {
    #[must_use]
    pub fn new(device_name: Option<String>, os: String, os_version: Option<String>) -> Self {
        Self {
            device_name,
            os,
            os_version,
        }
    }
}

/// An inventory row paired with its classified family and the computed
/// lifecycle attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedDevice {
    #[serde(flatten)]
    pub record: DeviceRecord,
    pub family: OsFamily,
    pub attributes: OsAttributes,
}

//! Device-inventory row source.
//!
//! Reads the exported inventory (a JSON array of row objects) into
//! [`crate::model::DeviceRecord`]s. Column names follow the MDM export
//! vocabulary (`Device name`, `OS`, `OS version`) and are matched
//! case-insensitively; the engine itself never sees the file format.

mod reader;

pub use reader::{extract_version_token, read_inventory, read_inventory_str};

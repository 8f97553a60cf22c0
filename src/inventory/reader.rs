//! JSON inventory reader.

use crate::error::{FleetEolError, InventoryErrorKind, Result};
use crate::model::DeviceRecord;
use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Accepted spellings of each column, lowercased.
const DEVICE_NAME_COLUMNS: &[&str] = &["device name", "devicename", "device", "name"];
const OS_COLUMNS: &[&str] = &["os", "operating system"];
const OS_VERSION_COLUMNS: &[&str] = &["os version", "osversion", "version"];

/// Read an inventory export from disk.
pub fn read_inventory(path: &Path) -> Result<Vec<DeviceRecord>> {
    let content = fs::read_to_string(path).map_err(|e| FleetEolError::io(path, e))?;
    read_inventory_str(&content).map_err(|e| match e {
        FleetEolError::Inventory { context, source } => FleetEolError::Inventory {
            context: format!("{}: {context}", path.display()),
            source,
        },
        other => other,
    })
}

/// Parse an inventory export from a JSON string.
///
/// Each element must be an object; the OS column is required (a row without
/// it cannot be classified), the rest are optional. Version cells are
/// reduced to their leading version token, and numeric cells are accepted
/// as-is since sloppy exports serialize versions as numbers.
pub fn read_inventory_str(content: &str) -> Result<Vec<DeviceRecord>> {
    let value: Value = serde_json::from_str(content)?;
    let rows = value.as_array().ok_or_else(|| {
        FleetEolError::inventory(
            "top-level value",
            InventoryErrorKind::NotAnArray(json_type_name(&value).to_string()),
        )
    })?;

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let obj = row.as_object().ok_or_else(|| {
            FleetEolError::inventory(
                format!("row {index}"),
                InventoryErrorKind::NotAnObject(json_type_name(row).to_string()),
            )
        })?;

        let os = field_as_string(obj, OS_COLUMNS).ok_or_else(|| {
            FleetEolError::inventory(
                "row validation",
                InventoryErrorKind::MissingColumn {
                    column: "OS".to_string(),
                    row: index,
                },
            )
        })?;

        let device_name = field_as_string(obj, DEVICE_NAME_COLUMNS);
        let os_version =
            field_as_string(obj, OS_VERSION_COLUMNS).and_then(|v| extract_version_token(&v));

        records.push(DeviceRecord::new(device_name, os, os_version));
    }

    tracing::debug!(rows = records.len(), "inventory loaded");
    Ok(records)
}

/// Reduce a version cell to its leading dotted-number token.
///
/// Exports append build annotations ("17.4.1 (21E236)") or hold junk
/// ("unknown"); only the leading token is a version. Returns `None` when the
/// cell does not start with a digit, which downstream classifies as an
/// invalid version.
#[must_use]
pub fn extract_version_token(cell: &str) -> Option<String> {
    static VERSION_TOKEN: OnceLock<Regex> = OnceLock::new();
    let re = VERSION_TOKEN.get_or_init(|| Regex::new(r"^[\d.]+").expect("static regex"));
    re.find(cell.trim()).map(|m| m.as_str().to_string())
}

/// Case-insensitive column lookup, stringifying numeric cells.
fn field_as_string(obj: &serde_json::Map<String, Value>, names: &[&str]) -> Option<String> {
    let (_, value) = obj.iter().find(|(key, _)| {
        let key = key.trim().to_lowercase();
        names.iter().any(|name| key == *name)
    })?;

    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

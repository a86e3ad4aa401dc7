//! Table rows → YAML / JSON text.

use crate::error::SerializeError;
use crate::table::JsonFileRow;

/// Serialize rows to a YAML sequence.
pub fn serialize(rows: &[JsonFileRow]) -> Result<String, SerializeError> {
    // Convert to serde_json::Value first for consistent field ordering
    let value = serde_json::to_value(rows).map_err(|e| SerializeError {
        message: format!("failed to convert rows to JSON value: {}", e),
    })?;

    let yaml = serde_saphyr::to_string(&value).map_err(|e| SerializeError {
        message: format!("failed to serialize to YAML: {}", e),
    })?;

    Ok(yaml)
}

/// Serialize rows to a pretty-printed JSON array.
pub fn serialize_json(rows: &[JsonFileRow]) -> Result<String, SerializeError> {
    serde_json::to_string_pretty(rows).map_err(|e| SerializeError {
        message: format!("failed to serialize to JSON: {}", e),
    })
}

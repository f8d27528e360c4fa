//! YAML documents via `serde_yaml`.

use crate::formats::{FormatError, FormatHandler};
use crate::StructuredValue;

#[cfg(test)]
#[path = "yaml_tests.rs"]
mod tests;

/// YAML handler.
///
/// Mapping keys must be strings. Comments are dropped by the parser; the
/// reconciler puts them back into the updated text. A document holding only
/// comments parses to an empty mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormat;

impl FormatHandler for YamlFormat {
    fn name(&self) -> &str {
        "yaml"
    }

    fn extensions(&self) -> &[&str] {
        &["yml", "yaml"]
    }

    fn parse(&self, text: &str) -> Result<StructuredValue, FormatError> {
        let has_content = text.lines().any(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#') && line != "---"
        });
        if !has_content {
            return Ok(StructuredValue::Object(serde_json::Map::new()));
        }
        serde_yaml::from_str(text).map_err(|e| FormatError::Malformed(e.to_string()))
    }

    fn serialize(&self, value: &StructuredValue) -> Result<String, FormatError> {
        serde_yaml::to_string(value).map_err(|e| FormatError::Unrepresentable(e.to_string()))
    }
}

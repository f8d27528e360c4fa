//! JSON documents via `serde_json`.

use crate::formats::{FormatError, FormatHandler};
use crate::StructuredValue;

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;

/// JSON handler.
///
/// Output is pretty-printed with two-space indentation and ends with a newline.
/// Key order is preserved from the parsed document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl FormatHandler for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn parse(&self, text: &str) -> Result<StructuredValue, FormatError> {
        serde_json::from_str(text).map_err(|e| FormatError::Malformed(e.to_string()))
    }

    fn serialize(&self, value: &StructuredValue) -> Result<String, FormatError> {
        let mut text = serde_json::to_string_pretty(value)
            .map_err(|e| FormatError::Unrepresentable(e.to_string()))?;
        text.push('\n');
        Ok(text)
    }
}

//! INI and Java-style properties documents via `rust-ini`.
//!
//! Top-level scalars live in the general (unnamed) section and each nested
//! mapping becomes a `[section]`. Deeper nesting and sequences have no
//! representation in this format and are rejected on serialization. Every
//! parsed value is a string; the change detector compares loosely so that
//! `port = 8080` matches a proposed number `8080`.
//!
//! Besides the INI `#` and `;` comments, lines starting with the properties
//! `!` marker are comments.

use ini::{EscapePolicy, Ini, ParseOption, WriteOption};

use crate::formats::{scalar_text, FormatError, FormatHandler};
use crate::StructuredValue;

#[cfg(test)]
#[path = "properties_tests.rs"]
mod tests;

/// INI/properties handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertiesFormat;

impl FormatHandler for PropertiesFormat {
    fn name(&self) -> &str {
        "properties"
    }

    fn extensions(&self) -> &[&str] {
        &["ini", "properties"]
    }

    fn comment_markers(&self) -> &[char] {
        &['#', ';', '!']
    }

    fn parse(&self, text: &str) -> Result<StructuredValue, FormatError> {
        // Backslashes are kept verbatim so Windows paths survive a round trip.
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let document = Ini::load_from_str_opt(&blank_bang_comments(text), options)
            .map_err(|e| FormatError::Malformed(e.to_string()))?;

        let mut root = serde_json::Map::new();
        for (section, properties) in document.iter() {
            let entries = properties
                .iter()
                .map(|(k, v)| (k.to_string(), StructuredValue::String(v.to_string())));
            match section {
                None => root.extend(entries),
                Some(name) => {
                    let slot = root
                        .entry(name.to_string())
                        .or_insert_with(|| StructuredValue::Object(serde_json::Map::new()));
                    if let StructuredValue::Object(map) = slot {
                        map.extend(entries);
                    }
                }
            }
        }

        Ok(StructuredValue::Object(root))
    }

    fn serialize(&self, value: &StructuredValue) -> Result<String, FormatError> {
        let StructuredValue::Object(root) = value else {
            return Err(FormatError::Unrepresentable(
                "a properties document must be a mapping".into(),
            ));
        };

        let mut document = Ini::new();
        for (key, value) in root {
            match value {
                StructuredValue::Object(section) => {
                    for (name, entry) in section {
                        let text = scalar_text(entry).map_err(|_| {
                            FormatError::Unrepresentable(format!(
                                "'{key}.{name}' is nested deeper than one section level"
                            ))
                        })?;
                        document.with_section(Some(key.as_str())).set(name.as_str(), text);
                    }
                }
                StructuredValue::Array(_) => {
                    return Err(FormatError::Unrepresentable(format!(
                        "'{key}' is a sequence, which properties files cannot hold"
                    )))
                }
                scalar => {
                    document
                        .with_general_section()
                        .set(key.as_str(), scalar_text(scalar)?);
                }
            }
        }

        let mut buffer = Vec::new();
        let options = WriteOption {
            escape_policy: EscapePolicy::Nothing,
            ..WriteOption::default()
        };
        document
            .write_to_opt(&mut buffer, options)
            .map_err(|e| FormatError::Unrepresentable(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| FormatError::Unrepresentable(e.to_string()))
    }
}

// rust-ini only knows `#` and `;`; a `!` line would otherwise swallow the
// following line into its key. Line count is kept for parser positions.
fn blank_bang_comments(text: &str) -> String {
    text.split_inclusive('\n')
        .map(|line| {
            if line.trim_start().starts_with('!') {
                if line.ends_with('\n') {
                    "\n"
                } else {
                    ""
                }
            } else {
                line
            }
        })
        .collect()
}

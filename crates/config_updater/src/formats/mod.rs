//! Format handlers for the supported configuration file types.
//!
//! A [`FormatHandler`] binds a format name and a set of file extensions to a
//! parse/serialize pair operating on [`StructuredValue`]. Handlers are held by
//! a [`FormatRegistry`] built once at start-up and injected wherever a file
//! format has to be resolved.
//!
//! The built-in handlers, in registration order:
//!
//! | name         | extensions           |
//! |--------------|----------------------|
//! | `json`       | `json`               |
//! | `yaml`       | `yml`, `yaml`        |
//! | `properties` | `ini`, `properties`  |
//! | `xml`        | `xml`                |

use std::fmt::Debug;
use std::path::Path;

use thiserror::Error;

use crate::reconciler::COMMENT_MARKERS;
use crate::StructuredValue;

pub mod json;
pub mod properties;
pub mod registry;
pub mod xml;
pub mod yaml;

pub use json::JsonFormat;
pub use properties::PropertiesFormat;
pub use registry::{FormatDescriptor, FormatRegistry};
pub use xml::XmlFormat;
pub use yaml::YamlFormat;

/// Failure reported by a format handler.
///
/// Handlers know nothing about the file they operate on; the loader and the
/// updater attach the path when converting into
/// [`ConfigUpdateError`](crate::ConfigUpdateError).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// The text is not a valid document in this format.
    #[error("{0}")]
    Malformed(String),

    /// The value cannot be expressed in this format.
    #[error("{0}")]
    Unrepresentable(String),
}

/// A named parse/serialize pair bound to one or more file extensions.
///
/// Implementations must be stateless and thread-safe; one instance is shared
/// by every lookup through the registry.
pub trait FormatHandler: Send + Sync + Debug {
    /// Identifier of the format, also accepted as an explicit type tag.
    fn name(&self) -> &str;

    /// File extensions (without the leading dot) handled by this format.
    fn extensions(&self) -> &[&str];

    /// Custom matcher consulted when the extension set does not contain the
    /// requested tag. `tag` is the lower-cased extension or explicit type and
    /// `content` is the raw file text, empty when it has not been read.
    fn matches(&self, _path: &Path, _tag: &str, _content: &str) -> bool {
        false
    }

    /// Line prefixes, after leading whitespace, that mark a comment in this
    /// format.
    fn comment_markers(&self) -> &[char] {
        COMMENT_MARKERS
    }

    /// Parses raw file text into a structured value.
    fn parse(&self, text: &str) -> Result<StructuredValue, FormatError>;

    /// Renders a structured value as file text.
    fn serialize(&self, value: &StructuredValue) -> Result<String, FormatError>;
}

/// Renders a scalar as the plain text used by attribute and key/value formats.
///
/// Nested values have no plain text representation and are rejected.
pub(crate) fn scalar_text(value: &StructuredValue) -> Result<String, FormatError> {
    match value {
        StructuredValue::Null => Ok(String::new()),
        StructuredValue::Bool(b) => Ok(b.to_string()),
        StructuredValue::Number(n) => Ok(n.to_string()),
        StructuredValue::String(s) => Ok(s.clone()),
        StructuredValue::Array(_) | StructuredValue::Object(_) => Err(
            FormatError::Unrepresentable("expected a scalar value but found a nested value".into()),
        ),
    }
}

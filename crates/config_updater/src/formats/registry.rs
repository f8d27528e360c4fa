//! Lookup of format handlers by explicit type or file extension.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::errors::{ConfigUpdateError, UpdateResult};
use crate::formats::{FormatHandler, JsonFormat, PropertiesFormat, XmlFormat, YamlFormat};

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

/// Read-only description of a registered handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatDescriptor {
    pub name: String,
    pub extensions: Vec<String>,
}

/// Ordered table of format handlers.
///
/// Resolution tries handlers in registration order and returns the first
/// match, so handlers registered earlier win any overlap.
///
/// # Examples
///
/// ```rust
/// use config_updater::FormatRegistry;
/// use std::path::Path;
///
/// let registry = FormatRegistry::new();
/// let handler = registry.resolve(Path::new("settings.yml"), None)?;
/// assert_eq!(handler.name(), "yaml");
///
/// // An explicit type overrides the extension entirely.
/// let handler = registry.resolve(Path::new("settings.conf"), Some("ini"))?;
/// assert_eq!(handler.name(), "properties");
/// # Ok::<(), config_updater::ConfigUpdateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    handlers: Vec<Arc<dyn FormatHandler>>,
}

impl FormatRegistry {
    /// Creates a registry holding the built-in JSON, YAML, properties and XML
    /// handlers.
    pub fn new() -> Self {
        Self::empty()
            .with_handler(Arc::new(JsonFormat))
            .with_handler(Arc::new(YamlFormat))
            .with_handler(Arc::new(PropertiesFormat))
            .with_handler(Arc::new(XmlFormat))
    }

    /// Creates a registry with no handlers.
    pub fn empty() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler after the ones already registered.
    pub fn with_handler(mut self, handler: Arc<dyn FormatHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Lists the registered handlers in resolution order.
    pub fn descriptors(&self) -> Vec<FormatDescriptor> {
        self.handlers
            .iter()
            .map(|h| FormatDescriptor {
                name: h.name().to_string(),
                extensions: h.extensions().iter().map(|e| e.to_string()).collect(),
            })
            .collect()
    }

    /// Resolves the handler for a file.
    ///
    /// `explicit_type` overrides extension-based lookup and is matched against
    /// handler names as well as extensions. Without it the tag is the file
    /// extension. Comparison ignores ASCII case. Custom matchers see no file
    /// content; use [`resolve_with_content`](Self::resolve_with_content) once
    /// the text has been read.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigUpdateError::UnsupportedFormat`] when no handler accepts
    /// the tag.
    pub fn resolve(
        &self,
        path: &Path,
        explicit_type: Option<&str>,
    ) -> UpdateResult<Arc<dyn FormatHandler>> {
        self.resolve_with_content(path, explicit_type, "")
    }

    /// Like [`resolve`](Self::resolve), passing `content` to custom matchers
    /// so they can recognise a format from the file text.
    pub fn resolve_with_content(
        &self,
        path: &Path,
        explicit_type: Option<&str>,
        content: &str,
    ) -> UpdateResult<Arc<dyn FormatHandler>> {
        let tag = match explicit_type {
            Some(t) => t.trim_start_matches('.').to_ascii_lowercase(),
            None => extension_of(path),
        };

        let found = self.handlers.iter().find(|h| {
            let by_name = explicit_type.is_some() && h.name().eq_ignore_ascii_case(&tag);
            let by_extension = h.extensions().iter().any(|e| e.eq_ignore_ascii_case(&tag));
            by_name || by_extension || h.matches(path, &tag, content)
        });

        match found {
            Some(handler) => {
                debug!(
                    path = %path.display(),
                    handler = handler.name(),
                    "Using handler '{}' for file '{}'",
                    handler.name(),
                    path.display()
                );
                Ok(Arc::clone(handler))
            }
            None => Err(ConfigUpdateError::UnsupportedFormat {
                path: path.to_path_buf(),
                format: tag,
            }),
        }
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Lower-cased text after the last `.` of the file name, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
}

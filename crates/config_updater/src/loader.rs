//! Reads configuration files and parses them with the matching handler.

use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::errors::{ConfigUpdateError, UpdateResult};
use crate::formats::{FormatHandler, FormatRegistry};
use crate::storage::ConfigStore;
use crate::StructuredValue;

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

/// A parsed configuration file together with the text it was parsed from.
///
/// `raw_text` is the exact content read from disk (or the substituted default
/// for a missing file) and is the baseline the reconciler diffs against.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub value: StructuredValue,
    pub handler: Arc<dyn FormatHandler>,
    pub raw_text: String,
}

/// Loads configuration files through a [`ConfigStore`].
#[derive(Clone)]
pub struct ConfigLoader {
    registry: Arc<FormatRegistry>,
    store: Arc<dyn ConfigStore>,
}

impl std::fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("registry", &self.registry)
            .field("store", &"Arc<dyn ConfigStore>")
            .finish()
    }
}

impl ConfigLoader {
    /// Creates a loader resolving formats through `registry`.
    pub fn new(registry: Arc<FormatRegistry>, store: Arc<dyn ConfigStore>) -> Self {
        Self { registry, store }
    }

    /// Reads and parses a configuration file.
    ///
    /// When the file does not exist and `default_content` is given, that text
    /// is parsed instead. Text consisting only of whitespace parses to an
    /// empty mapping regardless of format; the built-in handlers also parse
    /// documents holding only comments (or, for XML, only a declaration) to
    /// an empty mapping.
    ///
    /// # Arguments
    ///
    /// * `path` - File to read
    /// * `format_override` - Explicit type used instead of the extension
    /// * `default_content` - Text used when the file is missing
    ///
    /// # Errors
    ///
    /// * `ConfigUpdateError::Io` - The file could not be read
    /// * `ConfigUpdateError::UnsupportedFormat` - No handler matches
    /// * `ConfigUpdateError::Parse` - The handler rejected the text
    pub async fn load(
        &self,
        path: &Path,
        format_override: Option<&str>,
        default_content: Option<&str>,
    ) -> UpdateResult<LoadedConfig> {
        let raw_text = match self.store.read_to_string(path).await {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => match default_content {
                Some(default) => {
                    debug!(path = %path.display(), "File not found, using default content");
                    default.to_string()
                }
                None => return Err(ConfigUpdateError::io(path, e)),
            },
            Err(e) => return Err(ConfigUpdateError::io(path, e)),
        };

        let handler = self
            .registry
            .resolve_with_content(path, format_override, &raw_text)?;

        let value = if raw_text.trim().is_empty() {
            StructuredValue::Object(serde_json::Map::new())
        } else {
            handler
                .parse(&raw_text)
                .map_err(|e| ConfigUpdateError::Parse {
                    path: path.to_path_buf(),
                    format: handler.name().to_string(),
                    reason: e.to_string(),
                })?
        };

        Ok(LoadedConfig {
            value,
            handler,
            raw_text,
        })
    }
}

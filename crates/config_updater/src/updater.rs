//! Update-if-needed orchestration.
//!
//! [`ConfigUpdater`] wires the loader, change detector, merge engine,
//! reconciler and backup manager into the operations exposed by this crate.
//!
//! # Architecture
//!
//! ```text
//! ConfigUpdater::ensure_config
//!     ↓ get_updated_config (check = true)
//! ConfigLoader ─→ needs_update ─→ merge ─→ FormatHandler::serialize ─→ reconcile
//!     ↓ only when something changed
//! BackupManager::backup ─→ ConfigStore::write
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::backup::{BackupManager, BackupRecord};
use crate::change_detector::needs_update;
use crate::errors::{ConfigUpdateError, UpdateResult};
use crate::formats::FormatRegistry;
use crate::loader::ConfigLoader;
use crate::merger::merge;
use crate::options::UpdateOptions;
use crate::reconciler::reconcile_with;
use crate::storage::{ConfigStore, LocalFileSystem};
use crate::StructuredValue;

#[cfg(test)]
#[path = "updater_tests.rs"]
mod tests;

/// Result of an [`ensure_config`](ConfigUpdater::ensure_config) call that
/// wrote to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub file_path: PathBuf,
    pub updated_content: String,
    /// Copy of the previous content, absent when the file did not exist.
    pub backup: Option<BackupRecord>,
}

/// Comment-preserving configuration updater.
///
/// # Examples
///
/// ```no_run
/// use config_updater::ConfigUpdater;
/// use serde_json::json;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), config_updater::ConfigUpdateError> {
/// let updater = ConfigUpdater::default();
///
/// match updater
///     .ensure_config(Path::new("/etc/app/config.yml"), None, &json!({"port": 9090}))
///     .await?
/// {
///     Some(update) => println!("Updated {}", update.file_path.display()),
///     None => println!("Already up to date"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ConfigUpdater {
    registry: Arc<FormatRegistry>,
    loader: ConfigLoader,
    backups: BackupManager,
    store: Arc<dyn ConfigStore>,
}

impl std::fmt::Debug for ConfigUpdater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigUpdater")
            .field("registry", &self.registry)
            .field("store", &"Arc<dyn ConfigStore>")
            .finish()
    }
}

impl ConfigUpdater {
    /// Creates an updater over the given handlers and storage.
    pub fn new(registry: FormatRegistry, store: Arc<dyn ConfigStore>) -> Self {
        let registry = Arc::new(registry);
        Self {
            loader: ConfigLoader::new(Arc::clone(&registry), Arc::clone(&store)),
            backups: BackupManager::new(Arc::clone(&store)),
            registry,
            store,
        }
    }

    /// The handlers this updater resolves formats with.
    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Computes the updated file text without writing anything.
    ///
    /// Returns `None` only when `options.check` is set and the file already
    /// holds every proposed value.
    ///
    /// # Arguments
    ///
    /// * `path` - Configuration file to update
    /// * `file_type` - Explicit format, overriding the file extension
    /// * `config` - Proposed values
    /// * `options` - Merge policy, check flag and default content
    ///
    /// # Errors
    ///
    /// Propagates `Io`, `UnsupportedFormat` and `Parse` errors from loading and
    /// `Serialize` when the merged value cannot be written in the file's
    /// format.
    pub async fn get_updated_config(
        &self,
        path: &Path,
        file_type: Option<&str>,
        config: &StructuredValue,
        options: &UpdateOptions,
    ) -> UpdateResult<Option<String>> {
        let loaded = self
            .loader
            .load(path, file_type, options.default_content.as_deref())
            .await?;

        if options.check && !needs_update(&loaded.value, config) {
            debug!(path = %path.display(), "No change needed");
            return Ok(None);
        }

        let merged = merge(&loaded.value, config, options);
        let serialized = loaded
            .handler
            .serialize(&merged)
            .map_err(|e| ConfigUpdateError::Serialize {
                path: path.to_path_buf(),
                format: loaded.handler.name().to_string(),
                reason: e.to_string(),
            })?;

        Ok(Some(reconcile_with(
            &loaded.raw_text,
            &serialized,
            loaded.handler.comment_markers(),
        )))
    }

    /// Updates the file in place when the proposed values are not already
    /// present, taking a backup first.
    ///
    /// Uses the default [`UpdateOptions`]; see
    /// [`ensure_config_with`](Self::ensure_config_with).
    pub async fn ensure_config(
        &self,
        path: &Path,
        file_type: Option<&str>,
        config: &StructuredValue,
    ) -> UpdateResult<Option<ConfigUpdate>> {
        self.ensure_config_with(path, file_type, config, &UpdateOptions::default())
            .await
    }

    /// Like [`ensure_config`](Self::ensure_config) with a custom merge policy
    /// or default content. `options.check` is always treated as set.
    ///
    /// Returns `None` without touching the disk beyond the initial read when
    /// nothing would change. A failed write is reported after the backup has
    /// been made; the backup stays in place.
    pub async fn ensure_config_with(
        &self,
        path: &Path,
        file_type: Option<&str>,
        config: &StructuredValue,
        options: &UpdateOptions,
    ) -> UpdateResult<Option<ConfigUpdate>> {
        let options = options.clone().with_check(true);
        let Some(updated_content) = self
            .get_updated_config(path, file_type, config, &options)
            .await?
        else {
            info!(path = %path.display(), "Configuration already up to date");
            return Ok(None);
        };

        let backup = self.backups.backup(path).await?;
        self.store
            .write(path, &updated_content)
            .await
            .map_err(|e| ConfigUpdateError::io(path, e))?;

        info!(
            path = %path.display(),
            bytes = updated_content.len(),
            backed_up = backup.is_some(),
            "Configuration updated"
        );
        Ok(Some(ConfigUpdate {
            file_path: path.to_path_buf(),
            updated_content,
            backup,
        }))
    }

    /// Copies the file to a dated backup next to it. Returns `None` when the
    /// file does not exist.
    pub async fn create_backup_file(&self, path: &Path) -> UpdateResult<Option<BackupRecord>> {
        self.backups.backup(path).await
    }
}

impl Default for ConfigUpdater {
    fn default() -> Self {
        Self::new(FormatRegistry::new(), Arc::new(LocalFileSystem))
    }
}

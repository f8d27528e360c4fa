//! Dated backup copies taken before a configuration file is overwritten.
//!
//! Backups are siblings of the original named `<file>.<YYYYMMDD>.bak`. When
//! that name is taken, `.1`, `.2`, ... is appended until a free name is
//! found. Backups are never pruned.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use crate::errors::{ConfigUpdateError, UpdateResult};
use crate::storage::{parent_dir, ConfigStore};

#[cfg(test)]
#[path = "backup_tests.rs"]
mod tests;

/// A backup copy created by [`BackupManager`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRecord {
    /// The file that was backed up.
    pub original: PathBuf,
    /// Location of the copy.
    pub path: PathBuf,
    /// Number of bytes copied.
    pub bytes: u64,
}

/// Creates backup copies through a [`ConfigStore`].
#[derive(Clone)]
pub struct BackupManager {
    store: Arc<dyn ConfigStore>,
}

impl std::fmt::Debug for BackupManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackupManager")
            .field("store", &"Arc<dyn ConfigStore>")
            .finish()
    }
}

impl BackupManager {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// Backs up `path` using today's UTC date.
    ///
    /// Returns `None` when the file does not exist.
    pub async fn backup(&self, path: &Path) -> UpdateResult<Option<BackupRecord>> {
        self.backup_on(path, Utc::now().date_naive()).await
    }

    /// Backs up `path` using `date` in the backup name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigUpdateError::Io` if the directory cannot be listed or
    /// the copy fails.
    pub async fn backup_on(
        &self,
        path: &Path,
        date: NaiveDate,
    ) -> UpdateResult<Option<BackupRecord>> {
        let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            return Ok(None);
        };

        let dir = parent_dir(path);
        let listing = self
            .store
            .list_dir(&dir)
            .await
            .map_err(|e| ConfigUpdateError::io(&dir, e))?;

        if !listing.iter().any(|entry| *entry == file_name) {
            debug!(path = %path.display(), "File does not exist, so skipping backup");
            return Ok(None);
        }

        let backup_path = path.with_file_name(backup_file_name(&file_name, date, &listing));
        let bytes = self
            .store
            .copy(path, &backup_path)
            .await
            .map_err(|e| ConfigUpdateError::io(&backup_path, e))?;

        info!(
            path = %path.display(),
            backup = %backup_path.display(),
            bytes,
            "Created configuration backup"
        );
        Ok(Some(BackupRecord {
            original: path.to_path_buf(),
            path: backup_path,
            bytes,
        }))
    }
}

/// First free backup name for `file_name` on `date` given a directory listing.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use config_updater::backup::backup_file_name;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let listing = vec!["cfg.json".to_string(), "cfg.json.20240101.bak".to_string()];
///
/// assert_eq!(backup_file_name("cfg.json", date, &listing), "cfg.json.20240101.bak.1");
/// ```
pub fn backup_file_name(file_name: &str, date: NaiveDate, listing: &[String]) -> String {
    let base = format!("{file_name}.{}.bak", date.format("%Y%m%d"));
    let taken = |candidate: &str| listing.iter().any(|entry| entry == candidate);

    if !taken(&base) {
        return base;
    }
    let mut suffix = 1u32;
    loop {
        let candidate = format!("{base}.{suffix}");
        if !taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

//! File-system access used by the loader, backup manager and updater.
//!
//! The [`ConfigStore`] trait is the seam between the update logic and the
//! disk. [`LocalFileSystem`] is the production implementation on top of
//! `tokio::fs`; tests substitute stores that fail on demand.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;

/// Asynchronous file-system capabilities.
///
/// Errors are returned untouched so callers can distinguish
/// [`io::ErrorKind::NotFound`] and attach the path they were working on.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Reads a whole file as UTF-8 text.
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Lists the entry names (not paths) of a directory.
    async fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>>;

    /// Streams the contents of `from` into a newly created `to`, returning the
    /// number of bytes copied.
    async fn copy(&self, from: &Path, to: &Path) -> io::Result<u64>;

    /// Replaces the contents of `path`, creating it when missing.
    async fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// [`ConfigStore`] backed by the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

#[async_trait]
impl ConfigStore for LocalFileSystem {
    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path).await
    }

    async fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut entries = fs::read_dir(dir).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    async fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        let mut source = File::open(from).await?;
        let mut target = File::create(to).await?;
        let copied = tokio::io::copy(&mut source, &mut target).await?;
        target.flush().await?;
        Ok(copied)
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents).await
    }
}

/// Directory containing `path`; the current directory for bare file names.
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

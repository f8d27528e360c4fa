//! Comment-preserving configuration file updates.
//!
//! Given a configuration file and a set of proposed values, this crate decides
//! whether the file already holds those values and, if not, produces updated
//! text that keeps the comments and layout of the original wherever possible.
//! Supported formats are JSON, YAML, INI/properties and XML; further formats
//! plug in through [`FormatHandler`].
//!
//! # Pipeline
//!
//! 1. [`ConfigLoader`] reads the file (or a default body when it is missing)
//!    and parses it with the handler resolved by [`FormatRegistry`].
//! 2. [`needs_update`] checks whether every proposed value is already present.
//! 3. [`merge`] combines the existing and proposed values per [`MergePolicy`].
//! 4. The handler serializes the merged value.
//! 5. [`reconcile`] splices the original comment lines back into the output.
//! 6. [`ConfigUpdater::ensure_config`] backs up the old file and writes the
//!    result.
//!
//! # Examples
//!
//! ```rust
//! use config_updater::{ConfigUpdater, UpdateOptions};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("service.yml");
//! std::fs::write(&path, "# listener\nport: 8080\n")?;
//!
//! let updater = ConfigUpdater::default();
//! let text = updater
//!     .get_updated_config(&path, None, &json!({"port": 9090}), &UpdateOptions::default())
//!     .await?;
//!
//! assert_eq!(text.as_deref(), Some("# listener\nport: 9090\n"));
//! # Ok(())
//! # }
//! ```

pub mod backup;
pub mod change_detector;
pub mod errors;
pub mod formats;
pub mod loader;
pub mod merger;
pub mod options;
pub mod reconciler;
pub mod storage;
pub mod updater;

/// Format-neutral tree of mappings, sequences and scalars.
///
/// Mappings keep insertion order so serialized output follows the order keys
/// were first seen in.
pub type StructuredValue = serde_json::Value;

pub use backup::{BackupManager, BackupRecord};
pub use change_detector::{loosely_equal, needs_update};
pub use errors::{ConfigUpdateError, UpdateResult};
pub use formats::{FormatDescriptor, FormatError, FormatHandler, FormatRegistry};
pub use loader::{ConfigLoader, LoadedConfig};
pub use merger::{deep_merge, merge, shallow_merge};
pub use options::{MergePolicy, UpdateOptions};
pub use reconciler::{diff_segments, reconcile, reconcile_with, DiffSegment, SegmentKind};
pub use storage::{ConfigStore, LocalFileSystem};
pub use updater::{ConfigUpdate, ConfigUpdater};

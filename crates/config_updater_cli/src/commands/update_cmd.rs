//! Preview, ensure, check and backup of a single configuration file.

use std::path::{Path, PathBuf};

use clap::Args;
use config_updater::{BackupRecord, ConfigUpdate, ConfigUpdater, StructuredValue, UpdateOptions};
use tracing::{debug, info, instrument};

use crate::commands::proposal::{build_proposal, parse_key_val};
use crate::config::AppConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "update_cmd_tests.rs"]
mod tests;

/// Arguments shared by the commands that compute an update.
#[derive(Args, Debug, Clone, Default)]
pub struct UpdateArgs {
    /// Configuration file to update
    pub path: PathBuf,

    /// Format of the file, overriding its extension (e.g. "yaml", "ini")
    #[arg(short = 't', long = "type")]
    pub file_type: Option<String>,

    /// Proposed values as a JSON object
    #[arg(long)]
    pub json: Option<String>,

    /// File holding proposed values, in any supported format
    #[arg(long)]
    pub from: Option<PathBuf>,

    /// Format of the --from file, overriding its extension
    #[arg(long)]
    pub from_type: Option<String>,

    /// Proposed value as KEY.PATH=VALUE; may be repeated
    #[arg(long = "set", value_parser = parse_key_val)]
    pub set: Vec<(String, String)>,

    /// Replace the whole configuration with the proposed values
    #[arg(long)]
    pub replace: bool,

    /// Overwrite top-level keys instead of merging nested values
    #[arg(long, conflicts_with = "replace")]
    pub shallow: bool,

    /// Only produce output when the file would change
    #[arg(long)]
    pub check: bool,

    /// Text to start from when the file does not exist
    #[arg(long)]
    pub default_content: Option<String>,

    /// Fail when the file does not exist instead of creating it
    #[arg(long, conflicts_with = "default_content")]
    pub no_default: bool,

    /// Path to the settings file
    #[arg(long)]
    pub settings: Option<String>,
}

impl UpdateArgs {
    /// Applies the command-line flags on top of the settings file options.
    pub fn options(&self, base: UpdateOptions) -> UpdateOptions {
        let mut options = base;
        if self.replace {
            options.replace_config = true;
        }
        if self.shallow {
            options.deep_merge = false;
        }
        if self.check {
            options.check = true;
        }
        if let Some(content) = &self.default_content {
            options.default_content = Some(content.clone());
        }
        if self.no_default {
            options.default_content = None;
        }
        options
    }

    async fn prepare(&self) -> Result<(StructuredValue, UpdateOptions), Error> {
        let settings = AppConfig::resolve(self.settings.as_deref())?;
        let options = self.options(settings.options);
        let proposal = build_proposal(
            self.json.as_deref(),
            self.from.as_deref(),
            self.from_type.as_deref(),
            &self.set,
        )
        .await?;
        debug!(policy = ?options.merge_policy(), "Prepared proposal");
        Ok((proposal, options))
    }
}

/// Computes the updated file content without writing it.
#[instrument]
pub async fn preview(args: &UpdateArgs) -> Result<Option<String>, Error> {
    let (proposal, options) = args.prepare().await?;
    let updated = ConfigUpdater::default()
        .get_updated_config(&args.path, args.file_type.as_deref(), &proposal, &options)
        .await?;
    Ok(updated)
}

/// Updates the file in place when needed, backing up the previous content.
#[instrument]
pub async fn ensure(args: &UpdateArgs) -> Result<Option<ConfigUpdate>, Error> {
    let (proposal, options) = args.prepare().await?;
    let update = ConfigUpdater::default()
        .ensure_config_with(&args.path, args.file_type.as_deref(), &proposal, &options)
        .await?;
    Ok(update)
}

/// Returns `true` when the file is missing any of the proposed values.
#[instrument]
pub async fn check(args: &UpdateArgs) -> Result<bool, Error> {
    let (proposal, options) = args.prepare().await?;
    let options = options.with_check(true);
    let needed = ConfigUpdater::default()
        .get_updated_config(&args.path, args.file_type.as_deref(), &proposal, &options)
        .await?
        .is_some();

    info!(path = %args.path.display(), needed, "Checked configuration");
    Ok(needed)
}

/// Creates a dated backup of `path`, returning `None` when it does not exist.
#[instrument]
pub async fn backup(path: &Path) -> Result<Option<BackupRecord>, Error> {
    Ok(ConfigUpdater::default().create_backup_file(path).await?)
}

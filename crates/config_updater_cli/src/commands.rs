//! Command modules for the config-updater CLI.
//!
//! - `formats_cmd`: Lists the registered format handlers
//! - `proposal`: Builds the proposed values from `--json`, `--from` and `--set`
//! - `update_cmd`: Preview, ensure, check and backup of a configuration file

pub mod formats_cmd;
pub mod proposal;
pub mod update_cmd;

use config_updater::ConfigUpdateError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the config-updater CLI.
#[derive(Error, Debug)]
pub enum Error {
    /// The settings file could not be read, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command-line arguments were provided.
    ///
    /// Returned for malformed `--set` pairs, a `--json` value that is not an
    /// object, or a command given no proposed values at all.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Loading, updating or backing up a configuration file failed.
    #[error(transparent)]
    Update(#[from] ConfigUpdateError),

    /// Failed to render command output.
    #[error("Failed to render output: {0}")]
    Output(String),
}

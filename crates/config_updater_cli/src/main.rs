use std::path::PathBuf;

use clap::{Parser, Subcommand};
use config_updater::FormatRegistry;
use config_updater_cli::commands::{
    formats_cmd,
    update_cmd::{self, UpdateArgs},
};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// config-updater: Update configuration files without losing their comments
#[derive(Parser)]
#[command(name = "config-updater")]
#[command(about = "Update configuration files without losing their comments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the updated file content without writing it
    Preview(UpdateArgs),

    /// Update the file in place when needed, keeping a dated backup
    Ensure(UpdateArgs),

    /// Exit with status 1 when the file is missing any proposed value
    Check(UpdateArgs),

    /// Create a dated backup copy of a file
    Backup {
        /// File to back up
        path: PathBuf,
    },

    /// List the supported formats
    Formats {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the CLI version
    Version,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().pretty().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("CONFIG_UPDATER_LOG"))
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Preview(args) => match update_cmd::preview(args).await {
            Ok(Some(content)) => print!("{content}"),
            Ok(None) => println!("{} is up to date", args.path.display()),
            Err(e) => {
                error!("Error: {e}");
                std::process::exit(1);
            }
        },
        Commands::Ensure(args) => match update_cmd::ensure(args).await {
            Ok(Some(update)) => {
                println!("Updated {}", update.file_path.display());
                if let Some(backup) = update.backup {
                    println!("Backup written to {}", backup.path.display());
                }
            }
            Ok(None) => println!("{} is up to date", args.path.display()),
            Err(e) => {
                error!("Error: {e}");
                std::process::exit(1);
            }
        },
        Commands::Check(args) => match update_cmd::check(args).await {
            Ok(true) => {
                println!("{} needs an update", args.path.display());
                std::process::exit(1);
            }
            Ok(false) => println!("{} is up to date", args.path.display()),
            Err(e) => {
                error!("Error: {e}");
                std::process::exit(2);
            }
        },
        Commands::Backup { path } => match update_cmd::backup(path).await {
            Ok(Some(record)) => println!("Backup written to {}", record.path.display()),
            Ok(None) => println!("{} does not exist, nothing to back up", path.display()),
            Err(e) => {
                error!("Error: {e}");
                std::process::exit(1);
            }
        },
        Commands::Formats { json } => match formats_cmd::render(&FormatRegistry::new(), *json) {
            Ok(output) => print!("{output}"),
            Err(e) => {
                error!("Error: {e}");
                std::process::exit(1);
            }
        },
        Commands::Version => {
            println!(
                "config-updater version {}",
                option_env!("CONFIG_UPDATER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
        }
    }
}

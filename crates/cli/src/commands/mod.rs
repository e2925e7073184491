//! CLI command definitions and execution
//!
//! Every command takes path strings and goes through `PathFactory`, so the
//! same command works on local files and `gs://` objects.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use dpath_core::{ConfigManager, PathFactory, TextEncoding};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};
use crate::store::LazyGcsStore;

mod cat;
mod check;
mod exists;
mod mkdir;
mod put;

/// dpath - one interface for local paths and gs:// objects
#[derive(Parser, Debug)]
#[command(name = "dpath")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    /// Text encoding (defaults to the configured encoding, normally utf-8)
    #[arg(long, global = true, env = "DPATH_ENCODING")]
    pub encoding: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the text content of a file or object
    Cat(cat::CatArgs),

    /// Write stdin as the text content of a file or object
    Put(put::PutArgs),

    /// Report whether a file or object exists
    Exists(exists::ExistsArgs),

    /// Create a directory and its parents (no-op for objects)
    Mkdir(mkdir::MkdirArgs),

    /// Validate path strings without touching any backend
    Check(check::CheckArgs),
}

/// Shared state for commands that perform I/O
pub struct Context {
    /// Builds handles for command arguments
    pub factory: PathFactory,
    /// Encoding for reads and writes
    pub encoding: TextEncoding,
    /// Output formatter
    pub formatter: Formatter,
}

impl Context {
    /// Load configuration; the object-storage client connects on first use
    fn load(encoding: Option<&str>, formatter: Formatter) -> Result<Self, ExitCode> {
        let config = ConfigManager::new()
            .and_then(|manager| manager.load())
            .map_err(|e| {
                formatter.error(&format!("Failed to load configuration: {e}"));
                ExitCode::from_error(&e)
            })?;

        let encoding = match encoding {
            Some(name) => name.parse::<TextEncoding>().map_err(|e| {
                formatter.error(&e.to_string());
                ExitCode::from_error(&e)
            })?,
            None => config.defaults.encoding,
        };

        tracing::debug!(%encoding, endpoint = %config.storage.endpoint, "loaded configuration");

        Ok(Self {
            factory: PathFactory::new(Arc::new(LazyGcsStore::new(config.storage))),
            encoding,
            formatter,
        })
    }
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };
    let formatter = Formatter::new(output_config);

    if let Commands::Check(args) = cli.command {
        return check::execute(args, &formatter);
    }

    let ctx = match Context::load(cli.encoding.as_deref(), formatter) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    match cli.command {
        Commands::Cat(args) => cat::execute(args, &ctx).await,
        Commands::Put(args) => put::execute(args, &ctx).await,
        Commands::Exists(args) => exists::execute(args, &ctx).await,
        Commands::Mkdir(args) => mkdir::execute(args, &ctx).await,
        Commands::Check(args) => check::execute(args, &ctx.formatter),
    }
}

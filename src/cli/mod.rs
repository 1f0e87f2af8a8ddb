//! Command-line interface.

pub mod completions;
pub mod config;
pub mod context;
pub mod deploy;
pub mod login;
pub mod logout;
pub mod output;
pub mod preload;
pub mod run;
pub mod status;
pub mod sync;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::environment::EnvName;
use crate::error::Result;

/// Epikit - tooling for Episerver headless SPA projects.
#[derive(Parser)]
#[command(
    name = "epikit",
    about = "Authenticate against, inspect and generate code from an Episerver CMS",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub target: TargetArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Which application and CMS instance a command works against.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Deployment environment (dev, int, prep, prod or their long names)
    #[arg(short, long, global = true, value_name = "ENV")]
    pub env: Option<EnvName>,

    /// CMS base URL, overriding EPI_URL
    #[arg(short, long, global = true, value_name = "URL")]
    pub domain: Option<String>,

    /// Disable TLS certificate checks (breaks server identity verification)
    #[arg(short, long, global = true)]
    pub insecure: bool,

    /// Application root directory
    #[arg(short = 'C', long, global = true, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Log in to the CMS and store the credential
    Login {
        /// Username; insecure, only use from scripts that don't append to shell history
        #[arg(short, long)]
        username: Option<String>,
        /// Password; insecure, only use from scripts that don't append to shell history
        #[arg(short, long)]
        password: Option<String>,
        /// Reauthenticate even when a valid credential is present
        #[arg(short, long)]
        force: bool,
    },

    /// Remove the stored credential
    Logout,

    /// Show the resolved target and authentication state
    Status,

    /// Generate TypeScript models from the CMS content types
    Sync {
        /// Output directory, overriding EPI_MODEL_PATH
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
        /// Maximum concurrent content type requests
        #[arg(long, default_value_t = crate::core::constants::SYNC_CONCURRENCY)]
        concurrency: usize,
        /// Do not write schema.json
        #[arg(long)]
        no_schema: bool,
    },

    /// Upload a build artifact to the CMS
    Deploy {
        /// Package to upload
        file: PathBuf,
        /// Service path on the CMS
        #[arg(long, default_value = crate::core::constants::DEPLOY_PATH)]
        path: String,
    },

    /// Print the resolved configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Expand a @PreLoad annotation in a source file
    Preload {
        /// Annotated source file
        file: PathBuf,
        /// Glob of components below the annotated directory
        #[arg(long, default_value = "**/*.tsx")]
        pattern: String,
        /// Extension stripped to form module names
        #[arg(long, default_value = ".tsx")]
        extension: String,
        /// Rewrite the file in place instead of printing it
        #[arg(short, long)]
        write: bool,
    },

    /// Run a command with the configuration overrides in its environment
    Run {
        /// Command and arguments to run
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command, returning the process exit code.
pub fn execute(cli: Cli) -> Result<u8> {
    let target = cli.target;

    match cli.command {
        Command::Login {
            username,
            password,
            force,
        } => login::execute(&target, username, password, force)?,
        Command::Logout => logout::execute(&target)?,
        Command::Status => status::execute(&target)?,
        Command::Sync {
            output,
            concurrency,
            no_schema,
        } => sync::execute(&target, output, concurrency, !no_schema)?,
        Command::Deploy { file, path } => deploy::execute(&target, &file, &path)?,
        Command::Config { json } => config::execute(&target, json)?,
        Command::Preload {
            file,
            pattern,
            extension,
            write,
        } => preload::execute(&file, pattern, extension, write)?,
        Command::Run { command } => return run::execute(&target, &command),
        Command::Completions { shell } => completions::execute(shell)?,
    }

    Ok(0)
}

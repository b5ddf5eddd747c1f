//! CLI struct definitions for the shellbind command-line interface.
//!
//! All clap-derived types live here. Dispatch logic lives in `lib.rs`.
//! The per-function argument surfaces are not declared here; they are
//! generated at runtime by `core::surface` from each registered
//! signature.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "shellbind",
    version = env!("CARGO_PKG_VERSION"),
    about = "Expose native callables as first-class shell commands."
)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Render a module's shell stub and install it under the stub home
    Source(SourceCli),
    /// Parse arguments for a module function and invoke it
    Run(RunCli),
    /// List registered modules and their definitions
    List(ListCli),
}

#[derive(clap::Args, Debug)]
pub(crate) struct SourceCli {
    /// Module to build the stub for
    pub module: String,
    /// Stub home directory (overrides SHELLBIND_HOME and config)
    #[clap(long)]
    pub home: Option<PathBuf>,
    /// TOML config file with stub settings
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Print the stub to stdout instead of installing it
    #[clap(long)]
    pub stdout: bool,
}

#[derive(clap::Args, Debug)]
#[clap(disable_help_flag = true)]
pub(crate) struct RunCli {
    /// Module containing the function
    pub module: String,
    /// Function to invoke
    pub function: String,
    /// Arguments forwarded to the function's generated surface
    #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub(crate) struct ListCli {
    /// Limit output to one module
    pub module: Option<String>,
    /// Output format: 'text' or 'json'
    #[clap(long, default_value = "text")]
    pub format: String,
}

//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "clientstore",
    version,
    about = "Inspect and manage the persisted client session store"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log level filter (overrides the config file; RUST_LOG wins over both).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rehydrate the stored session, optionally apply a login or logout, and
    /// print the resulting state as JSON.
    Session(SessionArgs),

    /// Clear the persisted session.
    Purge,

    /// Print the design tokens as JSON.
    Theme,

    /// Check that the required build assets exist.
    ValidateAssets(ValidateAssetsArgs),
}

#[derive(Parser)]
pub struct SessionArgs {
    /// Log in as this user before printing.
    #[arg(long, value_name = "USER_ID", conflicts_with = "logout")]
    pub login: Option<String>,

    /// Display name to attach to the login.
    #[arg(long, value_name = "NAME", requires = "login")]
    pub name: Option<String>,

    /// Company to attach to the login.
    #[arg(long, value_name = "COMPANY_ID", requires = "login")]
    pub company: Option<String>,

    /// Log out before printing.
    #[arg(long)]
    pub logout: bool,
}

#[derive(Parser)]
pub struct ValidateAssetsArgs {
    /// Project root the asset paths are relative to (default: from config).
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

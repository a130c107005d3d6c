//! CLI definitions for FormPilot.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// FormPilot CLI.
#[derive(Parser)]
#[command(name = "formpilot")]
#[command(about = "Adaptive form automation for multi-frame legacy e-forms")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/formpilot.toml", global = true)]
    pub config: PathBuf,

    /// Run options when no subcommand is given
    #[command(flatten)]
    pub run: RunArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Fill the form, run the dialog tasks and commit (default)
    Run(RunArgs),

    /// Validate the configuration file and exit
    Validate,
}

#[derive(clap::Args, Default)]
pub(crate) struct RunArgs {
    /// Form URL, overriding `target.url`
    #[arg(long, env = "FORMPILOT_URL")]
    pub url: Option<String>,

    /// Run Chrome headless, overriding `browser.headless`
    #[arg(long)]
    pub headless: bool,

    /// Screenshot directory, overriding `artifacts.dir`
    #[arg(long)]
    pub artifacts_dir: Option<PathBuf>,

    /// Reuse an open tab whose URL contains the target URL
    #[arg(long)]
    pub attach: bool,

    /// Leave the page and any launched Chrome running afterwards
    #[arg(long)]
    pub keep_open: bool,

    /// Seed for synthesized values, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

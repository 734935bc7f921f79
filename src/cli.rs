use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stremio-addon")]
#[command(about = "Stremio addon manifest tools", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a manifest file
    Lint(LintArgs),
    /// Serve a manifest that declares no resources (landing page and
    /// manifest only)
    Serve(ServeArgs),
}

#[derive(clap::Args, Debug)]
pub struct LintArgs {
    /// Path to the manifest JSON file
    pub manifest: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Path to the manifest JSON file
    #[arg(long)]
    pub manifest: PathBuf,

    /// Configuration file (defaults to $STREMIO_ADDON_CONFIG or
    /// config/stremio-addon.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

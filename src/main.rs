mod cli;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Commands, LintArgs, ServeArgs};
use stremio_addon::config::{AddonConfig, LogConfig};
use stremio_addon::manifest::Manifest;
use stremio_addon::{Addon, observability};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Lint(args) => lint(args),
        Commands::Serve(args) => serve(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn lint(args: LintArgs) -> Result<(), AnyError> {
    observability::init_tracing(&LogConfig::default());

    let manifest = read_manifest(&args.manifest)?;
    println!(
        "ok: {} {} ({} resources, {} catalogs)",
        manifest.id,
        manifest.version,
        manifest.resources.len(),
        manifest.catalogs.len()
    );
    Ok(())
}

async fn serve(args: ServeArgs) -> Result<(), AnyError> {
    let config = match args.config {
        Some(path) => AddonConfig::load_from_path(path)?,
        None => AddonConfig::load()?,
    };
    observability::init_tracing(&config.log);

    let manifest = read_manifest(&args.manifest)?;
    Addon::from_manifest(manifest, config)?.serve().await?;
    Ok(())
}

fn read_manifest(path: &Path) -> Result<Manifest, AnyError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    Ok(Manifest::from_json(&json)?)
}

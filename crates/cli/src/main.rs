use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tooling::{ToolManifest, ToolRegistry};
use tracing::{info, warn};

mod config;

use config::{Config, ManifestConfig};

#[derive(Parser)]
#[command(
    name = "guidance",
    about = "Inspect the career-guidance assistant's tool registry"
)]
struct Cli {
    /// Manifest file to load instead of the configured one
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every registered tool
    List,
    /// Show the full descriptor for one tool
    Show { id: String },
    /// Validate a manifest file without loading it into the registry
    Check { path: PathBuf },
}

fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::List => {
            let registry = open_registry(cli.manifest.as_deref())?;
            list_tools(&registry);
            Ok(())
        }
        Command::Show { id } => {
            let registry = open_registry(cli.manifest.as_deref())?;
            show_tool(&registry, &id)
        }
        Command::Check { path } => check_manifest(&path),
    }
}

/// Resolution order: --manifest flag, GUIDANCE_MANIFEST, config file,
/// compiled-in manifest.
fn open_registry(override_path: Option<&Path>) -> Result<ToolRegistry> {
    if let Some(path) = override_path {
        return Ok(ToolRegistry::load(path)?);
    }

    let manifest_config = match Config::load_from_env() {
        Ok(config) => config.manifest,
        Err(_) => {
            warn!("Could not load config, using defaults");
            ManifestConfig::default()
        }
    }
    .with_env_overrides();

    match manifest_config.path {
        Some(path) => Ok(ToolRegistry::load(&path)?),
        None => Ok(ToolRegistry::builtin()),
    }
}

fn list_tools(registry: &ToolRegistry) {
    for descriptor in registry.descriptors() {
        println!("{:<24} {}", descriptor.id, descriptor.description);
    }
}

fn show_tool(registry: &ToolRegistry, id: &str) -> Result<()> {
    let descriptor = registry.get(id)?;

    println!("{}", descriptor.id);
    println!("  {}", descriptor.description);
    println!();
    println!("Functionality: {}", descriptor.functionality);
    if !descriptor.features.is_empty() {
        println!("Features:");
        for feature in &descriptor.features {
            println!("  - {feature}");
        }
    }
    if !descriptor.use_cases.is_empty() {
        println!("Use cases:");
        for use_case in &descriptor.use_cases {
            println!("  - {use_case}");
        }
    }
    Ok(())
}

fn check_manifest(path: &Path) -> Result<()> {
    let manifest = ToolManifest::from_path(path)?;
    info!(tools = manifest.len(), path = %path.display(), "manifest is valid");
    println!("ok: {} tools", manifest.len());
    Ok(())
}

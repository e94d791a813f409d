//! kustdeps - list the files a kustomization depends on
//!
//! Prints patch files, generator inputs and resources of a kustomization,
//! following nested kustomization directories depth-first.

mod cli;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

use kustdeps::config::ConfigLoader;
use kustdeps::{OutputFormat, Resolver};

/// kustdeps - list the files a kustomization depends on
#[derive(Parser, Debug)]
#[command(name = "kustdeps")]
#[command(about = "List the files a kustomization depends on", long_about = None)]
#[command(subcommand_negates_reqs = true)]
struct Args {
    /// Path to the root kustomization file
    ///
    /// A file literally named `config` or `version` is read as a subcommand;
    /// pass it as `./config` or `./version` instead.
    #[arg(required = true, value_name = "MANIFEST")]
    manifest: Option<PathBuf>,

    /// Output format (defaults to the configured format)
    #[arg(long, short = 'o', value_enum)]
    output: Option<OutputFormat>,

    /// File name to look for inside nested kustomization directories (repeatable, probed in order)
    #[arg(long = "manifest-name", short = 'n', value_name = "NAME")]
    manifest_names: Vec<String>,

    /// Do not fail on kustomizations that include themselves
    #[arg(long)]
    no_cycle_check: bool,

    /// Enable debug logging
    #[arg(long, short = 'd')]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: cli::ConfigSubcommand,
    },
    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let mut args = Args::parse();

    cli::init_logging(args.debug);

    match args.command.take() {
        Some(Command::Config { subcommand }) => return cli::handle_config_command(subcommand),
        Some(Command::Version) => {
            cli::display_version();
            return Ok(());
        }
        None => {}
    }

    let manifest = args
        .manifest
        .as_deref()
        .context("A kustomization file path is required")?;

    resolve_manifest(&args, manifest)
}

/// Resolve `manifest` and print its dependencies
fn resolve_manifest(args: &Args, manifest: &Path) -> Result<()> {
    let mut config = ConfigLoader::load_lenient();

    if !args.manifest_names.is_empty() {
        config.manifest_names = args.manifest_names.clone();
    }
    if args.no_cycle_check {
        config.detect_cycles = false;
    }
    let format = args.output.unwrap_or(config.output);

    tracing::debug!(
        "Configuration: manifestNames={:?}, detectCycles={}, output={}",
        config.manifest_names,
        config.detect_cycles,
        format
    );

    let options = config
        .resolve_options()
        .context("Invalid resolver settings")?;
    let resolver = Resolver::new(options);

    let (_, dependencies) = resolver
        .resolve(manifest)
        .with_context(|| format!("Failed to resolve {}", manifest.display()))?;

    tracing::info!(
        "Resolved {} dependencies for {}",
        dependencies.len(),
        manifest.display()
    );

    let rendered = kustdeps::render(&dependencies, format)?;
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|_| stdout.flush())
        .context("Failed to write output")?;

    Ok(())
}

//! relbuild: release-build a Rust project for a list of target triples.

mod commands;
mod logging;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand};

use manifest::RelbuildManifest;

#[derive(Parser)]
#[command(name = "relbuild", version, about = "Release builds for a list of target triples")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every target in order, stopping at the first failure
    Build {
        /// Target triple to build (repeatable; overrides relbuild.toml)
        #[arg(long = "target", value_name = "TRIPLE")]
        targets: Vec<String>,
        /// TOML file with `targets = [...]` (overrides relbuild.toml)
        #[arg(long, value_name = "FILE")]
        targets_file: Option<PathBuf>,
        /// Print the build commands without running them
        #[arg(long)]
        dry_run: bool,
    },
    /// Inspect configured targets
    Target {
        #[command(subcommand)]
        action: TargetAction,
    },
    /// Write a starter relbuild.toml in the current directory
    Init {
        /// Overwrite an existing relbuild.toml
        #[arg(long)]
        force: bool,
    },
    /// Check the build command, rustup and installed targets
    Doctor,
}

#[derive(Subcommand)]
enum TargetAction {
    /// List targets in build order
    List {
        /// Target triple (repeatable; overrides relbuild.toml)
        #[arg(long = "target", value_name = "TRIPLE")]
        targets: Vec<String>,
        /// TOML file with `targets = [...]`
        #[arg(long, value_name = "FILE")]
        targets_file: Option<PathBuf>,
        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Build {
            targets,
            targets_file,
            dry_run,
        } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            commands::build::run(
                &project_dir,
                manifest.as_ref(),
                &targets,
                targets_file.as_deref(),
                dry_run,
            )
        }

        Commands::Target { action } => match action {
            TargetAction::List {
                targets,
                targets_file,
                json,
            } => {
                let (manifest, _) = load_manifest_optional(&cwd)?;
                commands::target::list(manifest.as_ref(), &targets, targets_file.as_deref(), json)?;
                Ok(0)
            }
        },

        Commands::Init { force } => {
            commands::init::run(&cwd, force)?;
            Ok(0)
        }

        Commands::Doctor => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            commands::doctor::run(&project_dir, manifest.as_ref())?;
            Ok(0)
        }
    }
}

fn load_manifest_optional(cwd: &Path) -> anyhow::Result<(Option<RelbuildManifest>, Option<PathBuf>)> {
    match RelbuildManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}

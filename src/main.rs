use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use semver_stamp::cli::{self, Operation};
use semver_stamp::config::{self, VersionConfig};
use semver_stamp::domain::VersionBump;
use semver_stamp::env::SystemEnvironment;
use semver_stamp::{logging, ui};

#[derive(Parser)]
#[command(
    name = "semver-stamp",
    version,
    about = "Resolve and persist semantic versions with optional CI build numbers"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Version properties file (overrides configuration)")]
    store: Option<PathBuf>,

    #[arg(long, help = "Treat this as a CI build and include the build number")]
    remote_build: bool,

    #[arg(long, help = "Append -RELEASE to release versions")]
    include_release_tag: bool,

    #[arg(long, help = "Append the build number to release versions")]
    include_build_number: bool,

    #[arg(long, value_name = "NAME", help = "Environment variable holding the build number")]
    build_number_var: Option<String>,

    #[arg(short = 't', long, value_name = "TYPE", help = "Override the artifact type")]
    artifact_type: Option<String>,

    #[arg(short, long, help = "Show debug logging and a status line")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Copy, Debug)]
enum Command {
    /// Print the current version
    Print,
    /// Increment the major version
    BumpMajor,
    /// Increment the minor version
    BumpMinor,
    /// Increment the patch version
    BumpPatch,
    /// Decrement the patch version (no-op at 0)
    DropPatch,
}

impl Command {
    fn operation(self) -> Operation {
        match self {
            Command::Print => Operation::Resolve,
            Command::BumpMajor => Operation::Bump(VersionBump::Major),
            Command::BumpMinor => Operation::Bump(VersionBump::Minor),
            Command::BumpPatch => Operation::Bump(VersionBump::Patch),
            Command::DropPatch => Operation::Bump(VersionBump::DropPatch),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Command::Print => "print",
            Command::BumpMajor => "bump-major",
            Command::BumpMinor => "bump-minor",
            Command::BumpPatch => "bump-patch",
            Command::DropPatch => "drop-patch",
        }
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init(args.verbose) {
        eprintln!("Warning: could not initialize logging: {}", e);
    }

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Command-line flags take precedence over the configuration file
fn apply_overrides(config: &mut VersionConfig, args: &Args) {
    if let Some(store) = &args.store {
        config.store_path = store.clone();
    }
    if let Some(var) = &args.build_number_var {
        config.ci_build_number_env_var = Some(var.clone());
    }
    if let Some(artifact_type) = &args.artifact_type {
        config.artifact_type = Some(artifact_type.clone());
    }
    config.remote_build |= args.remote_build;
    config.include_release_tag |= args.include_release_tag;
    config.include_build_number |= args.include_build_number;
}

fn run(args: Args) -> Result<()> {
    let mut config =
        config::load_config(args.config.as_deref()).context("Failed to load configuration")?;
    apply_overrides(&mut config, &args);

    let store = config.store_path.display().to_string();
    let result = cli::run_workflow(args.command.operation(), &config, &SystemEnvironment)
        .with_context(|| format!("{} failed for '{}'", args.command.name(), store))?;

    ui::display_degradations(&result.degradations);
    if args.verbose {
        ui::display_status(args.command.name(), &store, &result.version);
    }
    ui::display_version(&result.version);

    Ok(())
}

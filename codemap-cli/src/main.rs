//! Codemap CLI - source structure mapper for TypeScript and JavaScript

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use codemap_core::config;
use codemap_core::{render_json, render_text, scan_path};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "codemap")]
#[command(about = "Maps the function/class structure and call dependencies of TypeScript and JavaScript sources")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze source files (TypeScript, TSX, JavaScript, JSX)
    Analyze {
        /// Path to source file or directory
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate a configuration file
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without running analysis
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the loaded configuration
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            config,
        } => run_analyze(&path, format, config.as_deref()),
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => run_config_validate(path.as_deref()),
            ConfigAction::Show { path } => run_config_show(path.as_deref()),
        },
    }
}

/// The directory configs are discovered from: the path itself, or the parent
/// when analyzing a single file
fn project_root_of(path: &Path) -> PathBuf {
    if path.is_file() {
        path.parent().unwrap_or(Path::new(".")).to_path_buf()
    } else {
        path.to_path_buf()
    }
}

fn run_analyze(path: &Path, format: OutputFormat, config_path: Option<&Path>) -> anyhow::Result<()> {
    let root = project_root_of(path);
    let resolved = config::load_and_resolve(&root, config_path)?;

    let structures = scan_path(path, Some(&resolved))
        .with_context(|| format!("analysis failed for {}", path.display()))?;

    match format {
        OutputFormat::Text => print!("{}", render_text(&structures)),
        OutputFormat::Json => println!("{}", render_json(&structures)),
    }

    Ok(())
}

/// Load the config for the validate/show subcommands, from an explicit path
/// or by discovery from the current directory
fn load_for_inspection(
    path: Option<&Path>,
) -> anyhow::Result<Option<(config::CodemapConfig, PathBuf)>> {
    match path {
        Some(p) => {
            let cfg = config::load_config_file(p)?;
            Ok(Some((cfg, p.to_path_buf())))
        }
        None => {
            let cwd = std::env::current_dir().context("failed to resolve current directory")?;
            config::discover_config(&cwd)
        }
    }
}

fn run_config_validate(path: Option<&Path>) -> anyhow::Result<()> {
    match load_for_inspection(path)? {
        Some((config, source)) => {
            // load_config_file already validated; resolve to catch glob
            // compilation issues too
            config.resolve()?;
            println!("Config OK: {}", source.display());
        }
        None => {
            println!("No config file found; defaults apply");
        }
    }
    Ok(())
}

fn run_config_show(path: Option<&Path>) -> anyhow::Result<()> {
    match load_for_inspection(path)? {
        Some((config, source)) => {
            println!("# loaded from {}", source.display());
            println!(
                "{}",
                serde_json::to_string_pretty(&config).context("failed to render config")?
            );
        }
        None => {
            println!("No config file found; defaults apply");
        }
    }
    Ok(())
}

//! lintmsg CLI tool.
//!
//! Usage:
//! ```bash
//! lintmsg render [OPTIONS] <FILE>
//! lintmsg detect
//! lintmsg classifications
//! lintmsg extract [FILE]
//! lintmsg init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use lintmsg_core::RenderMode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Render lint findings for humans, agents and editors
#[derive(Parser)]
#[command(name = "lintmsg")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a finding file (JSON or TOML)
    Render {
        /// Finding file to render
        file: PathBuf,

        /// Force a render mode (default: settings and auto-detection)
        #[arg(short, long)]
        mode: Option<ModeArg>,

        /// Use short field names in structured output
        #[arg(long)]
        compress: bool,

        /// Pretty-print structured output
        #[arg(long)]
        pretty: bool,
    },

    /// Show which render mode the environment selects
    Detect,

    /// List the classification knowledge base
    Classifications,

    /// Extract the hidden trailer from hybrid text (stdin if no file)
    Extract {
        /// File containing hybrid output
        file: Option<PathBuf>,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Render mode selectable on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ModeArg {
    /// Plain text for terminals and CI logs.
    Human,
    /// JSON for automated agents.
    Structured,
    /// Human text with a hidden machine trailer.
    Hybrid,
}

impl From<ModeArg> for RenderMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Human => Self::Human,
            ModeArg::Structured => Self::Structured,
            ModeArg::Hybrid => Self::Hybrid,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // stdout carries rendered output; keep logs off it.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cwd = PathBuf::from(".");
    let source = config_resolver::resolve(&cwd, cli.config.as_deref());

    match cli.command {
        Commands::Render {
            file,
            mode,
            compress,
            pretty,
        } => commands::render::run(
            &file,
            &commands::render::RenderArgs {
                mode: mode.map(Into::into),
                compress,
                pretty,
            },
            &source,
        ),
        Commands::Detect => commands::detect::run(&source),
        Commands::Classifications => {
            commands::classifications::run();
            Ok(())
        }
        Commands::Extract { file } => commands::extract::run(file.as_deref()),
        Commands::Init { force } => commands::init::run(force),
    }
}

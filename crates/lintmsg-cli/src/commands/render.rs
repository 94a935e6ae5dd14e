//! Render command implementation.

use anyhow::{Context, Result};
use lintmsg_core::{EnvSnapshot, Finding, RenderConfig, RenderError, RenderMode, Rendered};
use std::path::Path;

use crate::config_resolver::ConfigSource;

/// Exit code for findings rejected at the render boundary.
const EXIT_INVALID_FINDING: i32 = 2;

/// Command-line overrides for a render.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderArgs {
    /// Forced mode.
    pub mode: Option<RenderMode>,
    /// Force compression on.
    pub compress: bool,
    /// Pretty-print structured output.
    pub pretty: bool,
}

/// Runs the render command.
pub fn run(file: &Path, args: &RenderArgs, source: &ConfigSource) -> Result<()> {
    let config = source.load()?;
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read finding: {}", file.display()))?;

    let finding = match parse_finding(file, &content) {
        Ok(finding) => finding,
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            std::process::exit(EXIT_INVALID_FINDING);
        }
    };

    let render_config = resolve_config(&EnvSnapshot::from_process(), &config.messaging, args);
    tracing::debug!(
        "Rendering {} in {} mode (compression: {})",
        file.display(),
        render_config.mode,
        render_config.compression
    );
    lintmsg_core::install(render_config);

    match lintmsg_core::render(&finding) {
        Rendered::Structured(record) if args.pretty => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        rendered => println!("{rendered}"),
    }
    Ok(())
}

/// Settings and environment first, then command-line flags on top.
fn resolve_config(
    env: &EnvSnapshot,
    settings: &lintmsg_core::MessagingSettings,
    args: &RenderArgs,
) -> RenderConfig {
    let mut config =
        RenderConfig::from_settings(env, settings, lintmsg_core::compression_enabled());
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if args.compress {
        config.compression = true;
    }
    config
}

/// Parses TOML for `.toml` files and JSON for everything else.
fn parse_finding(file: &Path, content: &str) -> Result<Finding, RenderError> {
    let is_toml = file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        Finding::from_toml(content)
    } else {
        Finding::from_json(content)
    }
}

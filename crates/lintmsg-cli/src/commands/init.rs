//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# lintmsg configuration

[messaging]
# Force a render mode: "human", "structured" or "hybrid".
# The LINTMSG_MODE environment variable still wins over this.
# mode = "human"

# Use short field names in structured output
compression = false

# Pick the mode from known agent variables (CURSOR_AGENT, AI_AGENT, ...)
auto_agent_detection = false
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("lintmsg.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created lintmsg.toml");
    println!("\nNext steps:");
    println!("  1. Edit lintmsg.toml to choose a mode");
    println!("  2. Run: lintmsg detect");

    Ok(())
}

//! Detect command implementation.

use anyhow::Result;
use lintmsg_core::environment::{self, CI_ENV_VAR, KNOWN_AGENTS, MODE_ENV_VAR};
use lintmsg_core::EnvSnapshot;

use crate::config_resolver::ConfigSource;

/// Runs the detect command.
pub fn run(source: &ConfigSource) -> Result<()> {
    let env = EnvSnapshot::from_process();
    let config = source.load()?;

    let detection = environment::detect(&env);
    println!("Process default: {} ({})", detection.mode, detection.source);

    let with_settings = environment::detect_with_settings(&env, &config.messaging);
    println!(
        "With settings:   {} ({})",
        with_settings.mode, with_settings.source
    );
    if let Some(path) = source.path() {
        println!("Config file:     {}", path.display());
    }

    println!("\nSignals:");
    print_signal(&env, MODE_ENV_VAR, "explicit override");
    for agent in KNOWN_AGENTS {
        print_signal(&env, agent.env_var, agent.description);
    }
    print_signal(&env, CI_ENV_VAR, "continuous integration");

    Ok(())
}

fn print_signal(env: &EnvSnapshot, name: &str, description: &str) {
    let marker = if env.is_set(name) { "set" } else { "-" };
    println!("  {name:<26} {marker:<4} {description}");
}

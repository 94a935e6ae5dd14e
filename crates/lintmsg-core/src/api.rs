//! Entry points for rule modules and runtime callers.
//!
//! These read the process-wide configuration once per call. Hosts that
//! manage configuration themselves should use [`Renderer`] directly.

use crate::config::{MessagingSettings, RenderConfig};
use crate::environment::EnvSnapshot;
use crate::error::RenderError;
use crate::formatter::{Rendered, Renderer};
use crate::global;
use crate::types::{Finding, RenderMode};

/// Renders a finding under the current process-wide configuration.
#[must_use]
pub fn render(finding: &Finding) -> Rendered {
    Renderer::new(global::render_config()).render(finding)
}

/// Renders a finding to its final string under the current configuration.
#[must_use]
pub fn format_message(finding: &Finding) -> String {
    render(finding).into_string()
}

/// Renders a finding for a run with explicit settings.
///
/// The mode follows `LINTMSG_MODE` > `settings.mode` > opt-in agent
/// detection > human; compression falls back to the process-wide flag.
#[must_use]
pub fn format_message_with(finding: &Finding, settings: &MessagingSettings) -> String {
    let config = RenderConfig::from_settings(
        &EnvSnapshot::from_process(),
        settings,
        global::compression_enabled(),
    );
    Renderer::new(config).render(finding).into_string()
}

/// Renders a finding as a structured payload regardless of the active
/// mode, honouring the process-wide compression flag.
#[must_use]
pub fn format_agent_message(finding: &Finding) -> String {
    let config =
        RenderConfig::new(RenderMode::Structured).with_compression(global::compression_enabled());
    Renderer::new(config).render(finding).into_string()
}

/// Parses a JSON finding and renders it under `config`.
///
/// # Errors
///
/// Returns [`RenderError::InvalidSeverity`] for a severity outside the
/// five known values, or [`RenderError::MalformedFinding`] for input that
/// is not a finding.
pub fn render_json(input: &str, config: RenderConfig) -> Result<String, RenderError> {
    let finding = Finding::from_json(input)?;
    Ok(Renderer::new(config).render(&finding).into_string())
}

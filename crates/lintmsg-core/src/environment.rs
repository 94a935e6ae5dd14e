//! Render-mode auto-detection from environment variables.
//!
//! Detection is a pure function from an [`EnvSnapshot`] to a [`Detection`],
//! so every precedence path can be tested without touching the process
//! environment. Precedence, first match wins:
//!
//! 1. `LINTMSG_MODE` naming a mode (or legacy alias)
//! 2. A known agent signal (see [`KNOWN_AGENTS`])
//! 3. `CI` → human (CI logs are read by people)
//! 4. Default → human

use std::collections::HashMap;

use crate::config::MessagingSettings;
use crate::types::RenderMode;

/// Explicit mode override variable.
pub const MODE_ENV_VAR: &str = "LINTMSG_MODE";

/// Continuous-integration signal variable.
pub const CI_ENV_VAR: &str = "CI";

/// An environment variable that identifies an agent runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSignal {
    /// Short identifier, e.g. `"cursor"`.
    pub name: &'static str,
    /// Variable whose presence signals the agent.
    pub env_var: &'static str,
    /// Mode the agent expects.
    pub mode: RenderMode,
    /// Human description.
    pub description: &'static str,
}

/// Known agent runtimes, checked in order.
///
/// Editor-embedded agents get hybrid output; headless agents get structured
/// output.
pub const KNOWN_AGENTS: &[AgentSignal] = &[
    AgentSignal {
        name: "cursor",
        env_var: "CURSOR_AGENT",
        mode: RenderMode::Hybrid,
        description: "Cursor IDE agent",
    },
    AgentSignal {
        name: "github-copilot",
        env_var: "GITHUB_COPILOT_WORKSPACE",
        mode: RenderMode::Structured,
        description: "GitHub Copilot Workspace",
    },
    AgentSignal {
        name: "anthropic-mcp",
        env_var: "ANTHROPIC_MCP",
        mode: RenderMode::Structured,
        description: "Model Context Protocol agent",
    },
    AgentSignal {
        name: "openai-agent",
        env_var: "OPENAI_AGENT",
        mode: RenderMode::Structured,
        description: "OpenAI agent / code interpreter",
    },
    AgentSignal {
        name: "generic-ai",
        env_var: "AI_AGENT",
        mode: RenderMode::Structured,
        description: "Generic agent (set AI_AGENT=1)",
    },
];

/// Snapshot of the environment variables that affect detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Captures the relevant variables from the current process.
    #[must_use]
    pub fn from_process() -> Self {
        let names = KNOWN_AGENTS
            .iter()
            .map(|a| a.env_var)
            .chain([MODE_ENV_VAR, CI_ENV_VAR]);
        Self::from_pairs(names.filter_map(|name| {
            std::env::var(name)
                .ok()
                .map(|value| (name.to_string(), value))
        }))
    }

    /// Builds a snapshot from explicit name/value pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the value of a variable if it is set and non-empty.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Returns true if the variable is set and non-empty.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// What decided the detected mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSource {
    /// Explicit `LINTMSG_MODE` override.
    Override,
    /// Explicit per-run settings.
    Settings,
    /// A known agent signal.
    Agent(&'static AgentSignal),
    /// The `CI` signal.
    Ci,
    /// Nothing matched.
    Default,
}

impl std::fmt::Display for ModeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Override => write!(f, "{MODE_ENV_VAR} override"),
            Self::Settings => write!(f, "settings"),
            Self::Agent(agent) => write!(f, "{} ({})", agent.description, agent.env_var),
            Self::Ci => write!(f, "CI environment"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Result of auto-detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    /// Detected mode.
    pub mode: RenderMode,
    /// What decided it.
    pub source: ModeSource,
}

impl Detection {
    const fn new(mode: RenderMode, source: ModeSource) -> Self {
        Self { mode, source }
    }
}

/// Parses the override variable, logging and ignoring unrecognised values.
fn override_mode(env: &EnvSnapshot) -> Option<RenderMode> {
    let raw = env.get(MODE_ENV_VAR)?;
    match raw.parse() {
        Ok(mode) => Some(mode),
        Err(_) => {
            tracing::warn!(
                "Ignoring unrecognised {}={:?}, falling back to auto-detection",
                MODE_ENV_VAR,
                raw
            );
            None
        }
    }
}

/// Returns the first known agent whose signal is set.
#[must_use]
pub fn detect_agent(env: &EnvSnapshot) -> Option<&'static AgentSignal> {
    KNOWN_AGENTS.iter().find(|a| env.is_set(a.env_var))
}

/// Detects the render mode from an environment snapshot.
///
/// Never fails: every path ends in a defined mode.
#[must_use]
pub fn detect(env: &EnvSnapshot) -> Detection {
    let detection = if let Some(mode) = override_mode(env) {
        Detection::new(mode, ModeSource::Override)
    } else if let Some(agent) = detect_agent(env) {
        Detection::new(agent.mode, ModeSource::Agent(agent))
    } else if env.is_set(CI_ENV_VAR) {
        Detection::new(RenderMode::Human, ModeSource::Ci)
    } else {
        Detection::new(RenderMode::Human, ModeSource::Default)
    };
    tracing::debug!(
        "Detected render mode {} from {}",
        detection.mode,
        detection.source
    );
    detection
}

/// Resolves the mode for a run with explicit settings.
///
/// Precedence: `LINTMSG_MODE` > `settings.mode` > agent detection (only
/// when `settings.auto_agent_detection` is on) > human. CI is not
/// consulted because it can only ever yield the default.
#[must_use]
pub fn detect_with_settings(env: &EnvSnapshot, settings: &MessagingSettings) -> Detection {
    if let Some(mode) = override_mode(env) {
        return Detection::new(mode, ModeSource::Override);
    }
    if let Some(mode) = settings.mode {
        return Detection::new(mode, ModeSource::Settings);
    }
    if settings.auto_agent_detection {
        if let Some(agent) = detect_agent(env) {
            return Detection::new(agent.mode, ModeSource::Agent(agent));
        }
    }
    Detection::new(RenderMode::Human, ModeSource::Default)
}

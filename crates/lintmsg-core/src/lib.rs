//! # lintmsg-core
//!
//! Diagnostic message rendering for lint findings.
//!
//! A rule builds a [`Finding`] and hands it to an entry point, which renders
//! it for one of three consumers:
//!
//! - [`RenderMode::Human`]: plain text for terminals and CI logs
//! - [`RenderMode::Structured`]: a JSON record for agents, optionally with
//!   [compressed](compression) field names
//! - [`RenderMode::Hybrid`]: human text plus a hidden `<!-- AI_HINT: ... -->`
//!   trailer for editor surfaces
//!
//! The active mode lives in a process-wide [`RenderConfig`] that is
//! auto-detected from the environment (see [`environment`]) and can be
//! forced with [`set_mode`] or restored with [`reset_to_auto_detected`].
//!
//! ## Example
//!
//! ```
//! use lintmsg_core::{icons, Finding, RenderConfig, RenderMode, Renderer, Severity};
//!
//! let finding = Finding::new(
//!     icons::SECURITY,
//!     "SQL Injection",
//!     "SQL Injection detected",
//!     Severity::Critical,
//!     "Use parameterized queries",
//!     "https://owasp.org/sql-injection",
//! )
//! .with_classification("CWE-89");
//!
//! let text = Renderer::new(RenderConfig::new(RenderMode::Human))
//!     .render(&finding)
//!     .into_string();
//! assert!(text.starts_with("🔒 CWE-89: SQL Injection detected"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
pub mod compression;
mod config;
pub mod environment;
mod error;
mod formatter;
mod global;
pub mod knowledge;
mod rule;
pub mod selector;
mod trailer;
mod types;

pub use api::{format_agent_message, format_message, format_message_with, render, render_json};
pub use config::{Config, ConfigError, MessagingSettings, RenderConfig};
pub use environment::{Detection, EnvSnapshot, ModeSource};
pub use error::RenderError;
pub use formatter::{human_text, hybrid_text, structured_record, Rendered, Renderer};
pub use global::{
    compression_enabled, install, render_config, reset_to_auto_detected, reset_with,
    resolve_mode, set_compression, set_mode,
};
pub use rule::{bake_messages, Rule, RuleBox};
pub use selector::{build_ast_selector, AstNode, NodeInfo};
pub use trailer::{
    extract_hybrid_trailer, strip_hybrid_trailer, HybridTrailer, TARGET_MARKER, TRAILER_CLOSE,
    TRAILER_OPEN,
};
pub use types::{icons, Finding, RenderMode, Severity};

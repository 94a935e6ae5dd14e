//! Error types for rendering.

use miette::Diagnostic;

/// Errors raised at the render boundary.
///
/// Missing optional fields and unknown classifications are never errors;
/// they degrade to shorter output. Only malformed required input lands here.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum RenderError {
    /// Severity outside the five-value enum.
    #[error("invalid severity '{value}'")]
    #[diagnostic(
        code(lintmsg::invalid_severity),
        help("severity must be one of CRITICAL, HIGH, MEDIUM, LOW, INFO")
    )]
    InvalidSeverity {
        /// The rejected value.
        value: String,
    },

    /// Render mode name that matches no mode or alias.
    #[error("unknown render mode '{value}'")]
    #[diagnostic(
        code(lintmsg::unknown_mode),
        help("use one of human, structured, hybrid (or CLI, CI, AGENT_JSON, IDE_CURSOR)")
    )]
    UnknownMode {
        /// The rejected value.
        value: String,
    },

    /// Input that could not be read as a finding.
    #[error("malformed finding: {message}")]
    #[diagnostic(code(lintmsg::malformed_finding))]
    MalformedFinding {
        /// Underlying parser message.
        message: String,
    },
}

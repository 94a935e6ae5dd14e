//! Core types for findings and render modes.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RenderError;

/// Severity of a finding.
///
/// Ordered from least to most severe, so `Severity::Critical > Severity::Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Informational, no action required.
    Info,
    /// Low impact.
    Low,
    /// Medium impact.
    Medium,
    /// High impact.
    High,
    /// Critical impact, fix immediately.
    Critical,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Self; 5] = [
        Self::Critical,
        Self::High,
        Self::Medium,
        Self::Low,
        Self::Info,
    ];

    /// Returns the canonical upper-case name (e.g. `"CRITICAL"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Info => "INFO",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = RenderError;

    /// Parses a severity name. Only the five canonical names are accepted
    /// (case-insensitive); anything else is a contract violation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sev| sev.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RenderError::InvalidSeverity {
                value: s.to_string(),
            })
    }
}

/// Output shape selected for a render call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Plain text for terminals and CI logs.
    #[default]
    Human,
    /// JSON payload for automated agents.
    Structured,
    /// Human text with a hidden machine-readable trailer.
    Hybrid,
}

impl RenderMode {
    /// All render modes.
    pub const ALL: [Self; 3] = [Self::Human, Self::Structured, Self::Hybrid];

    /// Returns the lower-case name of this mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Structured => "structured",
            Self::Hybrid => "hybrid",
        }
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = RenderError;

    /// Accepts the mode names plus the legacy aliases `CLI`, `CI`,
    /// `AGENT_JSON` and `IDE_CURSOR`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "human" | "cli" | "ci" => Ok(Self::Human),
            "structured" | "agent_json" | "json" => Ok(Self::Structured),
            "hybrid" | "ide_cursor" => Ok(Self::Hybrid),
            _ => Err(RenderError::UnknownMode {
                value: s.to_string(),
            }),
        }
    }
}

/// Common display glyphs for findings.
pub mod icons {
    /// Security vulnerability.
    pub const SECURITY: &str = "🔒";
    /// General warning.
    pub const WARNING: &str = "⚠️";
    /// Informational note.
    pub const INFO: &str = "ℹ️";
    /// Performance issue.
    pub const PERFORMANCE: &str = "⚡";
    /// Architecture or design issue.
    pub const ARCHITECTURE: &str = "🏗️";
    /// Code quality issue.
    pub const QUALITY: &str = "🔧";
}

/// A single defect report produced by a detection rule.
///
/// Findings are built fresh for every report. Optional fields that are left
/// unset are omitted from rendered output, and the benchmark fields
/// (`owasp`, `cvss`, `compliance`) are filled from the knowledge base when
/// the classification is known.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Display glyph (see [`icons`]).
    pub icon: String,
    /// Short label, e.g. "SQL Injection".
    pub issue_name: String,
    /// Weakness-catalog identifier such as `CWE-89`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_id: Option<String>,
    /// Free-text description.
    pub description: String,
    /// Severity.
    pub severity: Severity,
    /// Remediation text.
    pub fix: String,
    /// Documentation URL.
    pub documentation_link: String,
    /// Opaque locator for the offending construct.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ast_selector: Option<String>,
    /// Ordered guidance strings for agents.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ai_hints: Vec<String>,
    /// OWASP category code, e.g. `A03:2021`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owasp: Option<String>,
    /// CVSS base score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvss: Option<f64>,
    /// Compliance framework references.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance: Option<Vec<String>>,
}

impl Finding {
    /// Creates a finding with the required fields set.
    #[must_use]
    pub fn new(
        icon: impl Into<String>,
        issue_name: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
        fix: impl Into<String>,
        documentation_link: impl Into<String>,
    ) -> Self {
        Self {
            icon: icon.into(),
            issue_name: issue_name.into(),
            classification_id: None,
            description: description.into(),
            severity,
            fix: fix.into(),
            documentation_link: documentation_link.into(),
            ast_selector: None,
            ai_hints: Vec::new(),
            owasp: None,
            cvss: None,
            compliance: None,
        }
    }

    /// Sets the classification identifier (e.g. `CWE-89`).
    #[must_use]
    pub fn with_classification(mut self, id: impl Into<String>) -> Self {
        self.classification_id = Some(id.into());
        self
    }

    /// Sets the AST selector for the offending construct.
    #[must_use]
    pub fn with_ast_selector(mut self, selector: impl Into<String>) -> Self {
        self.ast_selector = Some(selector.into());
        self
    }

    /// Appends an agent hint.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.ai_hints.push(hint.into());
        self
    }

    /// Replaces all agent hints.
    #[must_use]
    pub fn with_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ai_hints = hints.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the OWASP category explicitly.
    #[must_use]
    pub fn with_owasp(mut self, owasp: impl Into<String>) -> Self {
        self.owasp = Some(owasp.into());
        self
    }

    /// Sets the CVSS score explicitly.
    #[must_use]
    pub fn with_cvss(mut self, cvss: f64) -> Self {
        self.cvss = Some(cvss);
        self
    }

    /// Sets the compliance references explicitly.
    #[must_use]
    pub fn with_compliance<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compliance = Some(refs.into_iter().map(Into::into).collect());
        self
    }

    /// Parses a finding from JSON, validating the severity.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MalformedFinding`] if the JSON does not match
    /// the finding shape, or [`RenderError::InvalidSeverity`] if the
    /// severity is not one of the five known values.
    pub fn from_json(input: &str) -> Result<Self, RenderError> {
        let dto: FindingDto =
            serde_json::from_str(input).map_err(|e| RenderError::MalformedFinding {
                message: e.to_string(),
            })?;
        dto.try_into()
    }

    /// Parses a finding from TOML, validating the severity.
    ///
    /// # Errors
    ///
    /// Same as [`Finding::from_json`].
    pub fn from_toml(input: &str) -> Result<Self, RenderError> {
        let dto: FindingDto = toml::from_str(input).map_err(|e| RenderError::MalformedFinding {
            message: e.to_string(),
        })?;
        dto.try_into()
    }
}

/// Raw finding as it arrives from outside the crate.
///
/// Severity stays a string here so that a bad value surfaces as
/// [`RenderError::InvalidSeverity`] rather than a generic parse error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindingDto {
    icon: String,
    issue_name: String,
    #[serde(default, alias = "cwe")]
    classification_id: Option<String>,
    description: String,
    severity: String,
    fix: String,
    documentation_link: String,
    #[serde(default)]
    ast_selector: Option<String>,
    #[serde(default)]
    ai_hints: Vec<String>,
    #[serde(default)]
    owasp: Option<String>,
    #[serde(default)]
    cvss: Option<f64>,
    #[serde(default)]
    compliance: Option<Vec<String>>,
}

impl TryFrom<FindingDto> for Finding {
    type Error = RenderError;

    fn try_from(dto: FindingDto) -> Result<Self, Self::Error> {
        Ok(Self {
            icon: dto.icon,
            issue_name: dto.issue_name,
            classification_id: dto.classification_id,
            description: dto.description,
            severity: dto.severity.parse()?,
            fix: dto.fix,
            documentation_link: dto.documentation_link,
            ast_selector: dto.ast_selector,
            ai_hints: dto.ai_hints,
            owasp: dto.owasp,
            cvss: dto.cvss,
            compliance: dto.compliance,
        })
    }
}

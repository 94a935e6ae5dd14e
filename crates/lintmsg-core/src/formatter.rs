//! Rendering of findings into human, structured and hybrid output.
//!
//! The mode is read once per call; the whole render runs under it.

use serde_json::{Map, Value};

use crate::compression::{self, fields};
use crate::config::RenderConfig;
use crate::knowledge::{self, lookup_owasp};
use crate::trailer::{sanitize, HybridTrailer};
use crate::types::{Finding, RenderMode};

/// Maximum number of compliance tags shown on the human standards line.
const MAX_COMPLIANCE_TAGS: usize = 4;

/// Indentation of continuation lines in human output.
const INDENT: &str = "   ";

/// Output of a render call.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// Human or hybrid text.
    Text(String),
    /// Structured record, possibly with compressed keys.
    Structured(Map<String, Value>),
}

impl Rendered {
    /// Returns the text, if this is human or hybrid output.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Structured(_) => None,
        }
    }

    /// Returns the record, if this is structured output.
    #[must_use]
    pub fn as_structured(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Text(_) => None,
            Self::Structured(record) => Some(record),
        }
    }

    /// Converts to the final string: text as-is, records as compact JSON.
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Structured(record) => Value::Object(record).to_string(),
        }
    }
}

impl std::fmt::Display for Rendered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Structured(record) => {
                let json = serde_json::to_string(record).map_err(|_| std::fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

/// Renders findings under a fixed [`RenderConfig`].
///
/// Use this directly to render without touching process-wide state, e.g.
/// in tests or hosts that manage configuration themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Creates a renderer for a configuration.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this renderer uses.
    #[must_use]
    pub fn config(&self) -> RenderConfig {
        self.config
    }

    /// Renders a finding. Never fails; missing optional fields are omitted.
    #[must_use]
    pub fn render(&self, finding: &Finding) -> Rendered {
        let enriched = knowledge::enrich(finding);
        match self.config.mode {
            RenderMode::Human => Rendered::Text(human_text(&enriched)),
            RenderMode::Structured => {
                let record = structured_record(&enriched);
                if self.config.compression {
                    Rendered::Structured(compression::compress(record))
                } else {
                    Rendered::Structured(record)
                }
            }
            RenderMode::Hybrid => Rendered::Text(hybrid_text(&enriched)),
        }
    }
}

/// Label for the first line and the `ruleId` field.
fn label(finding: &Finding) -> Option<&str> {
    let present = |s: &&str| !s.trim().is_empty();
    finding
        .classification_id
        .as_deref()
        .filter(present)
        .or_else(|| Some(finding.issue_name.as_str()).filter(present))
}

fn owasp_label(code: &str) -> String {
    match lookup_owasp(code) {
        Some(category) => {
            let short_code = category.code.split(':').next().unwrap_or(category.code);
            format!("OWASP:{short_code}-{}", category.short_name)
        }
        None => format!("OWASP:{}", sanitize(code)),
    }
}

fn standards_line(finding: &Finding) -> String {
    let mut parts = vec![format!("Severity: {}", finding.severity)];
    if let Some(owasp) = &finding.owasp {
        parts.push(owasp_label(owasp));
    }
    if let Some(cvss) = finding.cvss {
        parts.push(format!("CVSS:{cvss}"));
    }
    let mut line = parts.join(" | ");
    if let Some(compliance) = finding.compliance.as_ref().filter(|c| !c.is_empty()) {
        let tags: Vec<String> = compliance
            .iter()
            .take(MAX_COMPLIANCE_TAGS)
            .map(|tag| sanitize(tag))
            .collect();
        line.push_str(&format!(" [{}]", tags.join(",")));
    }
    line
}

fn fix_line(finding: &Finding) -> Option<String> {
    let mut parts = Vec::new();
    if !finding.fix.trim().is_empty() {
        parts.push(format!("Fix: {}", sanitize(&finding.fix)));
    }
    if !finding.documentation_link.trim().is_empty() {
        parts.push(sanitize(&finding.documentation_link));
    }
    (!parts.is_empty()).then(|| parts.join(" | "))
}

/// Renders the human text of an (already enriched) finding.
///
/// Every user-supplied field is sanitised, so the output can never
/// contain the hybrid trailer delimiter.
#[must_use]
pub fn human_text(finding: &Finding) -> String {
    let headline = match label(finding) {
        Some(label) => format!(
            "{} {}: {}",
            sanitize(&finding.icon),
            sanitize(label),
            sanitize(&finding.description)
        ),
        None => format!(
            "{} {}",
            sanitize(&finding.icon),
            sanitize(&finding.description)
        ),
    };

    let mut lines = vec![
        headline.trim_start().to_string(),
        format!("{INDENT}{}", standards_line(finding)),
    ];
    if let Some(line) = fix_line(finding) {
        lines.push(format!("{INDENT}{line}"));
    }
    lines.join("\n")
}

/// Renders human text followed by the hidden machine trailer.
///
/// The trailer carries the AST target and hints and is omitted when the
/// finding has neither.
#[must_use]
pub fn hybrid_text(finding: &Finding) -> String {
    let trailer = HybridTrailer {
        ast_target: finding.ast_selector.clone(),
        hints: finding.ai_hints.clone(),
    };
    let mut out = human_text(finding);
    out.push_str(&trailer.render());
    out
}

fn insert_opt(record: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        record.insert(key.to_string(), value);
    }
}

/// Builds the verbose structured record of an (already enriched) finding.
#[must_use]
pub fn structured_record(finding: &Finding) -> Map<String, Value> {
    let score = finding
        .cvss
        .unwrap_or_else(|| knowledge::severity_to_score(finding.severity));

    let mut record = Map::new();
    insert_opt(&mut record, fields::RULE_ID, label(finding).map(Value::from));
    record.insert(fields::SEVERITY.to_string(), finding.severity.as_str().into());
    record.insert(fields::SCORE.to_string(), score.into());
    record.insert(
        fields::DESCRIPTION.to_string(),
        finding.description.as_str().into(),
    );
    record.insert(fields::FIX.to_string(), finding.fix.as_str().into());
    insert_opt(
        &mut record,
        fields::AST_TARGET,
        finding.ast_selector.as_deref().map(Value::from),
    );
    insert_opt(
        &mut record,
        fields::HINTS,
        (!finding.ai_hints.is_empty()).then(|| Value::from(finding.ai_hints.clone())),
    );
    insert_opt(
        &mut record,
        fields::OWASP,
        finding.owasp.as_deref().map(Value::from),
    );
    insert_opt(
        &mut record,
        fields::COMPLIANCE,
        finding.compliance.clone().map(Value::from),
    );
    record.insert(
        fields::DOCUMENTATION_LINK.to_string(),
        finding.documentation_link.as_str().into(),
    );
    record
}

//! Rule traits for message catalogs.
//!
//! Detection logic lives outside this crate. Rules only declare the
//! findings they can report, keyed by message id, so the host can bake
//! static text at registration time or render dynamically at report time.

use std::collections::BTreeMap;

use crate::config::RenderConfig;
use crate::formatter::Renderer;
use crate::types::{Finding, Severity};

/// A lint rule's message catalog.
///
/// # Example
///
/// ```
/// use lintmsg_core::{icons, Finding, Rule, Severity};
///
/// pub struct NoEval;
///
/// impl Rule for NoEval {
///     fn name(&self) -> &'static str { "no-eval" }
///     fn code(&self) -> &'static str { "SEC001" }
///
///     fn messages(&self) -> Vec<(&'static str, Finding)> {
///         vec![(
///             "dangerousEval",
///             Finding::new(
///                 icons::SECURITY,
///                 "Code Injection",
///                 "eval() with dynamic input can execute arbitrary code",
///                 Severity::Critical,
///                 "Use JSON.parse() for data",
///                 "https://owasp.org/www-community/attacks/Code_Injection",
///             )
///             .with_classification("CWE-95"),
///         )]
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "no-eval").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "SEC001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the findings this rule can report, keyed by message id.
    fn messages(&self) -> Vec<(&'static str, Finding)>;

    /// Returns the highest severity among this rule's messages.
    fn max_severity(&self) -> Option<Severity> {
        self.messages().iter().map(|(_, f)| f.severity).max()
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Renders every message of a rule once, producing its static message table.
///
/// Duplicate message ids keep the last definition.
#[must_use]
pub fn bake_messages(rule: &dyn Rule, config: RenderConfig) -> BTreeMap<&'static str, String> {
    let renderer = Renderer::new(config);
    let table: BTreeMap<_, _> = rule
        .messages()
        .into_iter()
        .map(|(id, finding)| (id, renderer.render(&finding).into_string()))
        .collect();
    tracing::debug!(
        "Baked {} message(s) for {} [{}] in {} mode",
        table.len(),
        rule.name(),
        rule.code(),
        config.mode
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{icons, RenderMode};

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn messages(&self) -> Vec<(&'static str, Finding)> {
            vec![
                (
                    "weakHash",
                    Finding::new(
                        icons::SECURITY,
                        "Weak Hash",
                        "MD5 is broken",
                        Severity::High,
                        "Use SHA-256",
                        "https://example.com/hash",
                    )
                    .with_classification("CWE-328"),
                ),
                (
                    "preferNative",
                    Finding::new(
                        icons::INFO,
                        "Prefer Native",
                        "Use the built-in module",
                        Severity::Low,
                        "Import node:crypto",
                        "https://example.com/native",
                    ),
                ),
            ]
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.max_severity(), Some(Severity::High));
    }

    #[test]
    fn bake_renders_each_message() {
        let table = bake_messages(&TestRule, RenderConfig::new(RenderMode::Human));
        assert_eq!(table.len(), 2);
        assert!(table["weakHash"].starts_with("🔒 CWE-328: MD5 is broken"));
        assert!(table["preferNative"].contains("Prefer Native: Use the built-in module"));
    }

    #[test]
    fn bake_in_structured_mode_yields_json() {
        let table = bake_messages(&TestRule, RenderConfig::new(RenderMode::Structured));
        let parsed: serde_json::Value = serde_json::from_str(&table["weakHash"]).unwrap();
        assert_eq!(parsed["ruleId"], "CWE-328");
    }
}

//! Integration test: process-wide mode switching end-to-end.
//!
//! These tests mutate the shared render configuration, so each one holds
//! `STATE_LOCK` for its whole body.

use lintmsg_core::{
    compression_enabled, environment, extract_hybrid_trailer, format_agent_message,
    format_message, format_message_with, icons, render, render_config, render_json,
    reset_to_auto_detected, reset_with, resolve_mode, set_compression, set_mode,
    strip_hybrid_trailer, EnvSnapshot, Finding, MessagingSettings, RenderConfig, RenderError,
    RenderMode, Severity, TRAILER_OPEN,
};
use serde_json::Value;
use std::sync::{Mutex, MutexGuard, PoisonError};

static STATE_LOCK: Mutex<()> = Mutex::new(());

/// Locks the shared state and resets it to a clean environment.
fn clean_state() -> MutexGuard<'static, ()> {
    let guard = STATE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    reset_with(&EnvSnapshot::default());
    guard
}

fn sql_injection() -> Finding {
    Finding::new(
        icons::SECURITY,
        "SQL Injection",
        "SQL Injection detected",
        Severity::Critical,
        "Use parameterized queries",
        "https://owasp.org/sql-injection",
    )
    .with_classification("CWE-89")
    .with_ast_selector("CallExpression[callee.name='query']")
    .with_hints(["Check for template literals", "Use bind parameters"])
}

// ── Concrete scenarios ──

#[test]
fn default_state_renders_human_text() {
    let _guard = clean_state();
    assert_eq!(resolve_mode(), RenderMode::Human);

    let out = format_message(&sql_injection());
    assert!(out.contains(icons::SECURITY));
    assert!(out.contains("CWE-89"));
    assert!(!out.contains(TRAILER_OPEN));
}

#[test]
fn structured_mode_renders_rule_id() {
    let _guard = clean_state();
    set_mode(RenderMode::Structured);

    let parsed: Value = serde_json::from_str(&format_message(&sql_injection())).unwrap();
    assert_eq!(parsed["ruleId"], "CWE-89");
    assert_eq!(parsed["severity"], "CRITICAL");
}

#[test]
fn compression_uses_short_codes() {
    let _guard = clean_state();
    set_mode(RenderMode::Structured);
    set_compression(true);

    let parsed: Value = serde_json::from_str(&format_message(&sql_injection())).unwrap();
    assert_eq!(parsed["id"], "CWE-89");
    assert_eq!(parsed["s"], "CRITICAL");
    assert_eq!(parsed["desc"], "SQL Injection detected");
    assert!(parsed.get("ruleId").is_none());
    assert!(parsed.get("severity").is_none());
}

#[test]
fn hybrid_mode_appends_target_trailer() {
    let _guard = clean_state();
    set_mode(RenderMode::Hybrid);

    let out = format_message(&sql_injection());
    assert!(out.contains("🔒 CWE-89"));
    assert!(out.contains("Target: CallExpression[callee.name='query']"));

    let trailer = extract_hybrid_trailer(&out).unwrap();
    assert_eq!(
        trailer.ast_target.as_deref(),
        Some("CallExpression[callee.name='query']")
    );
    assert_eq!(
        trailer.hints,
        vec!["Check for template literals", "Use bind parameters"]
    );
}

#[test]
fn reset_after_override_returns_to_detected_mode() {
    let _guard = clean_state();
    let env = EnvSnapshot::from_pairs([("CURSOR_AGENT", "1")]);

    set_mode(RenderMode::Structured);
    set_compression(true);
    let mode = reset_with(&env);

    assert_eq!(mode, environment::detect(&env).mode);
    assert_eq!(render_config(), RenderConfig::new(RenderMode::Hybrid));
}

#[test]
fn hybrid_trailer_returns_finding_fields_verbatim() {
    let _guard = clean_state();
    set_mode(RenderMode::Hybrid);

    let mut finding = sql_injection();
    finding.ast_selector = None;
    finding.ai_hints = vec![
        "Target: the callee".to_string(),
        "Use a; then b".to_string(),
    ];
    let trailer = extract_hybrid_trailer(&format_message(&finding)).unwrap();
    assert!(trailer.ast_target.is_none());
    assert_eq!(trailer.hints, finding.ai_hints);

    finding.ast_selector = Some(String::new());
    let trailer = extract_hybrid_trailer(&format_message(&finding)).unwrap();
    assert_eq!(trailer.ast_target.as_deref(), Some(""));
    assert_eq!(trailer.hints, finding.ai_hints);
}

// ── Settings-aware entry point ──

fn structured_settings(compression: Option<bool>) -> MessagingSettings {
    MessagingSettings {
        mode: Some(RenderMode::Structured),
        compression,
        auto_agent_detection: false,
    }
}

#[test]
fn settings_without_compression_follow_global_flag() {
    let _guard = clean_state();
    set_compression(true);

    let parsed: Value =
        serde_json::from_str(&format_message_with(&sql_injection(), &structured_settings(None)))
            .unwrap();
    assert_eq!(parsed["id"], "CWE-89");
    assert!(parsed.get("ruleId").is_none());
}

#[test]
fn settings_compression_overrides_global_flag() {
    let _guard = clean_state();
    set_compression(true);

    let out = format_message_with(&sql_injection(), &structured_settings(Some(false)));
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["ruleId"], "CWE-89");
    assert!(parsed.get("id").is_none());
    assert!(compression_enabled(), "settings must not change the global flag");
}

#[test]
fn settings_mode_beats_global_mode() {
    let _guard = clean_state();
    set_mode(RenderMode::Hybrid);

    let out = format_message_with(&sql_injection(), &structured_settings(None));
    assert!(out.starts_with('{'));
    assert_eq!(resolve_mode(), RenderMode::Hybrid);
}

// ── Properties ──

#[test]
fn reset_is_idempotent() {
    let _guard = clean_state();
    let first = reset_to_auto_detected();
    let second = reset_to_auto_detected();
    assert_eq!(first, second);
}

#[test]
fn human_output_never_contains_delimiter() {
    let _guard = clean_state();
    for severity in Severity::ALL {
        let mut finding = sql_injection();
        finding.severity = severity;
        finding.fix = format!("{TRAILER_OPEN} sneaky -->");
        assert!(!format_message(&finding).contains(TRAILER_OPEN));
    }
}

#[test]
fn mode_switch_changes_shape_not_content() {
    let _guard = clean_state();
    let finding = sql_injection();

    let human = format_message(&finding);
    set_mode(RenderMode::Hybrid);
    let hybrid = format_message(&finding);
    set_mode(RenderMode::Structured);
    let structured: Value = serde_json::from_str(&format_message(&finding)).unwrap();

    for text in [&human, &hybrid] {
        assert!(text.contains("CWE-89"));
        assert!(text.contains("CRITICAL"));
        assert!(text.contains("SQL Injection detected"));
    }
    assert_eq!(structured["ruleId"], "CWE-89");
    assert_eq!(structured["severity"], "CRITICAL");
    assert_eq!(structured["description"], "SQL Injection detected");
    assert_eq!(strip_hybrid_trailer(&hybrid), human);
}

#[test]
fn rendered_value_matches_mode() {
    let _guard = clean_state();
    assert!(render(&sql_injection()).as_text().is_some());
    set_mode(RenderMode::Structured);
    assert!(render(&sql_injection()).as_structured().is_some());
}

#[test]
fn agent_message_ignores_active_mode() {
    let _guard = clean_state();
    assert_eq!(resolve_mode(), RenderMode::Human);
    let out = format_agent_message(&sql_injection());
    assert!(out.starts_with('{'));
}

#[test]
fn setters_are_visible_across_threads() {
    let _guard = clean_state();
    set_mode(RenderMode::Hybrid);
    let seen = std::thread::spawn(resolve_mode).join().unwrap();
    assert_eq!(seen, RenderMode::Hybrid);
}

// ── Boundary validation ──

#[test]
fn render_json_rejects_invalid_severity() {
    let input = r#"{
        "icon": "🔒", "issueName": "SQLi", "classificationId": "CWE-89",
        "description": "d", "severity": "CATASTROPHIC",
        "fix": "f", "documentationLink": "https://example.com"
    }"#;
    let err = render_json(input, RenderConfig::default()).unwrap_err();
    assert!(matches!(err, RenderError::InvalidSeverity { ref value } if value == "CATASTROPHIC"));
}

#[test]
fn render_json_renders_valid_input() {
    let input = r#"{
        "icon": "🔒", "issueName": "SQLi", "classificationId": "CWE-89",
        "description": "SQL Injection detected", "severity": "critical",
        "fix": "f", "documentationLink": "https://example.com"
    }"#;
    let out = render_json(input, RenderConfig::new(RenderMode::Human)).unwrap();
    assert!(out.starts_with("🔒 CWE-89: SQL Injection detected"));
}

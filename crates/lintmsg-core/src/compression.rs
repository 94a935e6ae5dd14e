//! Field-name compression for structured payloads.
//!
//! Compression is a lossless key rename: values pass through untouched.
//! Both directions read the same [`COMPRESSION_MAP`], so adding a field
//! means adding exactly one row here.

use serde_json::{Map, Value};

/// Version of [`COMPRESSION_MAP`]. Bump when a row changes.
pub const COMPRESSION_MAP_VERSION: u32 = 1;

/// Verbose field names of the structured record.
pub mod fields {
    /// Classification identifier (or rule name when unclassified).
    pub const RULE_ID: &str = "ruleId";
    /// Severity name.
    pub const SEVERITY: &str = "severity";
    /// Numeric score (CVSS when known, severity band otherwise).
    pub const SCORE: &str = "score";
    /// Description text.
    pub const DESCRIPTION: &str = "description";
    /// Remediation text.
    pub const FIX: &str = "fix";
    /// AST selector of the offending construct.
    pub const AST_TARGET: &str = "astTarget";
    /// Agent hints.
    pub const HINTS: &str = "hints";
    /// OWASP category.
    pub const OWASP: &str = "owasp";
    /// Compliance references.
    pub const COMPLIANCE: &str = "compliance";
    /// Documentation URL.
    pub const DOCUMENTATION_LINK: &str = "documentationLink";
}

/// Verbose → short field names.
pub const COMPRESSION_MAP: &[(&str, &str)] = &[
    (fields::RULE_ID, "id"),
    (fields::SEVERITY, "s"),
    (fields::SCORE, "sc"),
    (fields::DESCRIPTION, "desc"),
    (fields::FIX, "fx"),
    (fields::AST_TARGET, "ast"),
    (fields::HINTS, "h"),
    (fields::OWASP, "ow"),
    (fields::COMPLIANCE, "c"),
    (fields::DOCUMENTATION_LINK, "doc"),
];

/// Returns the short code for a verbose field name.
#[must_use]
pub fn short_code(verbose: &str) -> Option<&'static str> {
    COMPRESSION_MAP
        .iter()
        .find(|(long, _)| *long == verbose)
        .map(|(_, short)| *short)
}

/// Returns the verbose field name for a short code.
#[must_use]
pub fn verbose_name(short: &str) -> Option<&'static str> {
    COMPRESSION_MAP
        .iter()
        .find(|(_, code)| *code == short)
        .map(|(long, _)| *long)
}

fn rename_keys(
    record: Map<String, Value>,
    lookup: fn(&str) -> Option<&'static str>,
) -> Map<String, Value> {
    record
        .into_iter()
        .map(|(key, value)| match lookup(&key) {
            Some(renamed) => (renamed.to_string(), value),
            None => {
                // Kept verbatim so no value is lost; the map needs a row.
                tracing::warn!("No compression-map entry for field {:?}", key);
                (key, value)
            }
        })
        .collect()
}

/// Renames verbose keys to their short codes. Field order is preserved.
#[must_use]
pub fn compress(record: Map<String, Value>) -> Map<String, Value> {
    rename_keys(record, short_code)
}

/// Restores verbose keys from short codes. Inverse of [`compress`].
#[must_use]
pub fn expand(record: Map<String, Value>) -> Map<String, Value> {
    rename_keys(record, verbose_name)
}

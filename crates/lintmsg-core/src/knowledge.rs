//! Static lookup tables for classification enrichment.
//!
//! Maps weakness-catalog identifiers to a human category name, an OWASP
//! Top 10 category, a CVSS base score and the compliance frameworks that
//! reference the weakness. Also holds the fixed severity → score table.

use crate::types::{Finding, Severity};

/// Knowledge-base entry for one classification identifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Identifier, e.g. `CWE-89`.
    pub id: &'static str,
    /// Human category name.
    pub standard_name: &'static str,
    /// OWASP Top 10 category code, e.g. `A03:2021`.
    pub owasp: &'static str,
    /// Typical CVSS base score.
    pub cvss: f64,
    /// Compliance frameworks referencing this weakness.
    pub compliance_refs: &'static [&'static str],
}

/// An OWASP Top 10 category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwaspCategory {
    /// Category code, e.g. `A03:2021`.
    pub code: &'static str,
    /// Full category name.
    pub name: &'static str,
    /// Short label used in one-line output.
    pub short_name: &'static str,
}

const PCI_SOC2_ISO: &[&str] = &["PCI-DSS", "SOC2", "ISO27001", "NIST-CSF"];
const CRYPTO_REFS: &[&str] = &["PCI-DSS", "HIPAA", "GDPR", "SOC2", "NIST-CSF"];
const PRIVACY_REFS: &[&str] = &["GDPR", "HIPAA", "SOC2", "ISO27001"];
const CONFIG_REFS: &[&str] = &["SOC2", "ISO27001", "NIST-CSF"];

/// Known classifications, in CWE number order.
pub const CLASSIFICATIONS: &[Classification] = &[
    Classification {
        id: "CWE-20",
        standard_name: "Improper Input Validation",
        owasp: "A03:2021",
        cvss: 8.6,
        compliance_refs: PCI_SOC2_ISO,
    },
    Classification {
        id: "CWE-22",
        standard_name: "Path Traversal",
        owasp: "A01:2021",
        cvss: 7.5,
        compliance_refs: PCI_SOC2_ISO,
    },
    Classification {
        id: "CWE-78",
        standard_name: "OS Command Injection",
        owasp: "A03:2021",
        cvss: 9.8,
        compliance_refs: PCI_SOC2_ISO,
    },
    Classification {
        id: "CWE-79",
        standard_name: "Cross-site Scripting",
        owasp: "A03:2021",
        cvss: 6.1,
        compliance_refs: PCI_SOC2_ISO,
    },
    Classification {
        id: "CWE-89",
        standard_name: "SQL Injection",
        owasp: "A03:2021",
        cvss: 9.8,
        compliance_refs: &["PCI-DSS", "SOC2", "HIPAA", "ISO27001", "NIST-CSF"],
    },
    Classification {
        id: "CWE-95",
        standard_name: "Eval Injection",
        owasp: "A03:2021",
        cvss: 9.8,
        compliance_refs: PCI_SOC2_ISO,
    },
    Classification {
        id: "CWE-200",
        standard_name: "Exposure of Sensitive Information",
        owasp: "A01:2021",
        cvss: 7.5,
        compliance_refs: PRIVACY_REFS,
    },
    Classification {
        id: "CWE-295",
        standard_name: "Improper Certificate Validation",
        owasp: "A02:2021",
        cvss: 7.4,
        compliance_refs: CRYPTO_REFS,
    },
    Classification {
        id: "CWE-312",
        standard_name: "Cleartext Storage of Sensitive Information",
        owasp: "A02:2021",
        cvss: 7.5,
        compliance_refs: CRYPTO_REFS,
    },
    Classification {
        id: "CWE-319",
        standard_name: "Cleartext Transmission of Sensitive Information",
        owasp: "A02:2021",
        cvss: 7.5,
        compliance_refs: CRYPTO_REFS,
    },
    Classification {
        id: "CWE-327",
        standard_name: "Use of a Broken or Risky Cryptographic Algorithm",
        owasp: "A02:2021",
        cvss: 7.5,
        compliance_refs: CRYPTO_REFS,
    },
    Classification {
        id: "CWE-328",
        standard_name: "Use of Weak Hash",
        owasp: "A02:2021",
        cvss: 7.5,
        compliance_refs: CRYPTO_REFS,
    },
    Classification {
        id: "CWE-338",
        standard_name: "Use of Cryptographically Weak PRNG",
        owasp: "A02:2021",
        cvss: 7.5,
        compliance_refs: CRYPTO_REFS,
    },
    Classification {
        id: "CWE-346",
        standard_name: "Origin Validation Error",
        owasp: "A05:2021",
        cvss: 8.8,
        compliance_refs: CONFIG_REFS,
    },
    Classification {
        id: "CWE-352",
        standard_name: "Cross-Site Request Forgery",
        owasp: "A01:2021",
        cvss: 8.8,
        compliance_refs: PCI_SOC2_ISO,
    },
    Classification {
        id: "CWE-400",
        standard_name: "Uncontrolled Resource Consumption",
        owasp: "A05:2021",
        cvss: 5.3,
        compliance_refs: CONFIG_REFS,
    },
    Classification {
        id: "CWE-502",
        standard_name: "Deserialization of Untrusted Data",
        owasp: "A08:2021",
        cvss: 9.8,
        compliance_refs: PCI_SOC2_ISO,
    },
    Classification {
        id: "CWE-601",
        standard_name: "Open Redirect",
        owasp: "A01:2021",
        cvss: 6.1,
        compliance_refs: CONFIG_REFS,
    },
    Classification {
        id: "CWE-798",
        standard_name: "Use of Hard-coded Credentials",
        owasp: "A07:2021",
        cvss: 9.8,
        compliance_refs: &["PCI-DSS", "SOC2", "HIPAA", "ISO27001"],
    },
    Classification {
        id: "CWE-918",
        standard_name: "Server-Side Request Forgery",
        owasp: "A10:2021",
        cvss: 9.1,
        compliance_refs: PCI_SOC2_ISO,
    },
    Classification {
        id: "CWE-942",
        standard_name: "Permissive Cross-domain Policy",
        owasp: "A05:2021",
        cvss: 7.5,
        compliance_refs: CONFIG_REFS,
    },
];

/// OWASP Top 10 (2021) categories.
pub const OWASP_CATEGORIES: &[OwaspCategory] = &[
    OwaspCategory {
        code: "A01:2021",
        name: "Broken Access Control",
        short_name: "Broken-Access-Control",
    },
    OwaspCategory {
        code: "A02:2021",
        name: "Cryptographic Failures",
        short_name: "Cryptographic-Failures",
    },
    OwaspCategory {
        code: "A03:2021",
        name: "Injection",
        short_name: "Injection",
    },
    OwaspCategory {
        code: "A04:2021",
        name: "Insecure Design",
        short_name: "Insecure-Design",
    },
    OwaspCategory {
        code: "A05:2021",
        name: "Security Misconfiguration",
        short_name: "Security-Misconfiguration",
    },
    OwaspCategory {
        code: "A06:2021",
        name: "Vulnerable and Outdated Components",
        short_name: "Vulnerable-Components",
    },
    OwaspCategory {
        code: "A07:2021",
        name: "Identification and Authentication Failures",
        short_name: "Authentication-Failures",
    },
    OwaspCategory {
        code: "A08:2021",
        name: "Software and Data Integrity Failures",
        short_name: "Integrity-Failures",
    },
    OwaspCategory {
        code: "A09:2021",
        name: "Security Logging and Monitoring Failures",
        short_name: "Logging-Failures",
    },
    OwaspCategory {
        code: "A10:2021",
        name: "Server-Side Request Forgery",
        short_name: "SSRF",
    },
];

/// Looks up a classification by identifier.
///
/// Returns `None` for unknown identifiers; callers skip enrichment in that case.
#[must_use]
pub fn lookup_classification(id: &str) -> Option<&'static Classification> {
    CLASSIFICATIONS.iter().find(|c| c.id.eq_ignore_ascii_case(id))
}

/// Looks up an OWASP category by code. Accepts `A03:2021` or bare `A03`.
#[must_use]
pub fn lookup_owasp(code: &str) -> Option<&'static OwaspCategory> {
    let prefix = code.split(':').next().unwrap_or(code);
    OWASP_CATEGORIES
        .iter()
        .find(|c| c.code == code || c.code.split(':').next() == Some(prefix))
}

/// Translates a severity into its fixed numeric score band.
#[must_use]
pub fn severity_to_score(severity: Severity) -> f64 {
    match severity {
        Severity::Critical => 9.5,
        Severity::High => 7.5,
        Severity::Medium => 5.0,
        Severity::Low => 2.5,
        Severity::Info => 0.0,
    }
}

/// Fills benchmark fields the finding leaves unset from its classification.
///
/// Explicit values on the finding always win. Unknown or absent
/// classifications return the finding unchanged.
#[must_use]
pub fn enrich(finding: &Finding) -> Finding {
    let mut enriched = finding.clone();
    let Some(entry) = finding
        .classification_id
        .as_deref()
        .and_then(lookup_classification)
    else {
        return enriched;
    };

    enriched.owasp.get_or_insert_with(|| entry.owasp.to_string());
    enriched.cvss.get_or_insert(entry.cvss);
    enriched.compliance.get_or_insert_with(|| {
        entry
            .compliance_refs
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    });
    enriched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::icons;

    fn finding(cwe: Option<&str>) -> Finding {
        let f = Finding::new(
            icons::SECURITY,
            "SQL Injection",
            "SQL Injection detected",
            Severity::Critical,
            "Use parameterized queries",
            "https://owasp.org/sql-injection",
        );
        match cwe {
            Some(id) => f.with_classification(id),
            None => f,
        }
    }

    #[test]
    fn score_bands_are_strictly_ordered() {
        let scores: Vec<f64> = Severity::ALL.into_iter().map(severity_to_score).collect();
        assert!(scores[0] >= scores[1]);
        for pair in scores[1..].windows(2) {
            assert!(pair[0] > pair[1], "{pair:?} not descending");
        }
    }

    #[test]
    fn lookup_known_and_unknown() {
        let sqli = lookup_classification("CWE-89").unwrap();
        assert_eq!(sqli.standard_name, "SQL Injection");
        assert_eq!(sqli.owasp, "A03:2021");
        assert!(lookup_classification("cwe-89").is_some());
        assert!(lookup_classification("CWE-99999").is_none());
    }

    #[test]
    fn every_classification_has_a_known_owasp_category() {
        for entry in CLASSIFICATIONS {
            assert!(
                lookup_owasp(entry.owasp).is_some(),
                "{} references unknown OWASP code {}",
                entry.id,
                entry.owasp
            );
        }
    }

    #[test]
    fn classification_ids_are_unique() {
        let mut ids: Vec<&str> = CLASSIFICATIONS.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), CLASSIFICATIONS.len());
    }

    #[test]
    fn owasp_lookup_accepts_bare_code() {
        assert_eq!(lookup_owasp("A03").unwrap().name, "Injection");
        assert_eq!(lookup_owasp("A02:2021").unwrap().short_name, "Cryptographic-Failures");
        assert!(lookup_owasp("A42").is_none());
    }

    #[test]
    fn enrich_fills_missing_benchmarks() {
        let enriched = enrich(&finding(Some("CWE-89")));
        assert_eq!(enriched.owasp.as_deref(), Some("A03:2021"));
        assert_eq!(enriched.cvss, Some(9.8));
        assert!(enriched
            .compliance
            .as_ref()
            .is_some_and(|c| c.iter().any(|r| r == "PCI-DSS")));
    }

    #[test]
    fn enrich_keeps_explicit_values() {
        let f = finding(Some("CWE-89")).with_cvss(8.0).with_owasp("A04:2021");
        let enriched = enrich(&f);
        assert_eq!(enriched.cvss, Some(8.0));
        assert_eq!(enriched.owasp.as_deref(), Some("A04:2021"));
    }

    #[test]
    fn enrich_skips_unknown_and_missing_ids() {
        let unknown = finding(Some("CWE-99999"));
        assert_eq!(enrich(&unknown), unknown);
        let missing = finding(None);
        assert_eq!(enrich(&missing), missing);
    }
}

//! Classifications command implementation.

use lintmsg_core::knowledge::{lookup_owasp, severity_to_score, CLASSIFICATIONS};
use lintmsg_core::Severity;

/// Runs the classifications command.
pub fn run() {
    println!("Known classifications:\n");
    println!("{:<10} {:<6} {:<28} Name", "ID", "CVSS", "OWASP");
    println!("{}", "-".repeat(96));

    for entry in CLASSIFICATIONS {
        let owasp = lookup_owasp(entry.owasp).map_or_else(
            || entry.owasp.to_string(),
            |c| format!("{} {}", entry.owasp, c.short_name),
        );
        println!(
            "{:<10} {:<6} {:<28} {}",
            entry.id, entry.cvss, owasp, entry.standard_name
        );
    }

    println!("\nSeverity scores (used when no CVSS is known):");
    for severity in Severity::ALL {
        println!("  {:<9} {}", severity, severity_to_score(severity));
    }
}

//! The `explain` use case: look up rule and code documentation.

use std::fmt::Write;
use storeguard_types::explain::{self, Explanation};

#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Explanation),
    /// Unknown identifier; carries what is available instead.
    NotFound {
        identifier: String,
        available_check_ids: &'static [&'static str],
        available_codes: &'static [&'static str],
    },
}

/// Look up an explanation for a rule key or finding code.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_check_ids: explain::all_check_ids(),
            available_codes: explain::all_codes(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", exp.title);
    let _ = writeln!(out, "{}\n", "=".repeat(exp.title.len()));
    let _ = writeln!(out, "{}\n", exp.description);
    out.push_str("Remediation\n-----------\n");
    let _ = writeln!(out, "{}\n", exp.remediation);
    out.push_str("Examples\n--------\n\n");
    push_example(&mut out, "Before (violation):", exp.examples.before);
    out.push('\n');
    push_example(&mut out, "After (fixed):", exp.examples.after);

    out
}

fn push_example(out: &mut String, label: &str, body: &str) {
    // Podfile snippets are Ruby; everything else is a plist.
    let lang = if body.trim_start().starts_with('<') {
        "xml"
    } else {
        "ruby"
    };
    let _ = writeln!(out, "{label}\n```{lang}\n{body}\n```");
}

/// Format the "not found" message for terminal display.
pub fn format_not_found(identifier: &str, check_ids: &[&str], codes: &[&str]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Unknown check_id or code: {identifier}\n");
    out.push_str("Available check_ids:\n");
    for id in check_ids {
        let _ = writeln!(out, "  - {id}");
    }
    out.push_str("\nAvailable codes:\n");
    for code in codes {
        let _ = writeln!(out, "  - {code}");
    }

    out
}

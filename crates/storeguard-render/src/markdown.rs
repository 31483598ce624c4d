use crate::{
    RenderableFinding, RenderableReport, RenderableRuleStatus, RenderableSeverity,
    RenderableVerdictStatus,
};
use std::fmt::Write;

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Storeguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    let _ = writeln!(out, "- Verdict: **{verdict}**");
    if !report.data.profile.is_empty() {
        let _ = writeln!(out, "- Profile: `{}`", report.data.profile);
    }
    let _ = writeln!(
        out,
        "- Findings: {} (emitted) / {} (total)\n",
        report.data.findings_emitted, report.data.findings_total
    );

    if let Some(r) = &report.data.truncated_reason {
        let _ = writeln!(out, "> Note: {r}\n");
    }

    if !report.rules.is_empty() {
        out.push_str("## Rules\n\n| Rule | Name | Status |\n|---|---|---|\n");
        for r in &report.rules {
            let status = match r.status {
                RenderableRuleStatus::Passed => "passed",
                RenderableRuleStatus::Failed => "failed",
                RenderableRuleStatus::Skipped => "skipped",
            };
            let _ = writeln!(
                out,
                "| `{}` | {} | {} |",
                r.key,
                table_cell(&r.friendly_name),
                status
            );
        }
        out.push('\n');
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");
    for f in &report.findings {
        push_finding(&mut out, f);
    }

    out
}

fn push_finding(out: &mut String, f: &RenderableFinding) {
    let sev = match f.severity {
        RenderableSeverity::Info => "INFO",
        RenderableSeverity::Warning => "WARN",
        RenderableSeverity::Error => "ERROR",
    };

    let _ = write!(
        out,
        "- [{}] `{}` / `{}`: {}",
        sev,
        f.check_id.as_deref().unwrap_or(""),
        f.code,
        f.message
    );
    match &f.location {
        Some(loc) => match loc.line {
            Some(line) => {
                let _ = writeln!(out, " (`{}`:{})", loc.path, line);
            }
            None => {
                let _ = writeln!(out, " (`{}`)", loc.path);
            }
        },
        None => out.push('\n'),
    }

    if let Some(help) = &f.help {
        let _ = writeln!(out, "  - help: {help}");
    }
    if let Some(url) = &f.url {
        let _ = writeln!(out, "  - url: {url}");
    }
}

fn table_cell(s: &str) -> String {
    s.replace('|', "\\|")
}

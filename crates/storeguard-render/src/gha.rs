use crate::{RenderableFinding, RenderableReport, RenderableSeverity};

const FALLBACK_CHECK_ID: &str = "storeguard";

/// Render findings as GitHub Actions workflow commands.
///
/// `::{level} file={path},line={line},col={col}::[{check_id}:{code}] {message}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    report.findings.iter().map(annotation).collect()
}

fn annotation(f: &RenderableFinding) -> String {
    let level = match f.severity {
        RenderableSeverity::Error => "error",
        RenderableSeverity::Warning => "warning",
        RenderableSeverity::Info => "notice",
    };

    let mut props = Vec::new();
    if let Some(loc) = &f.location {
        props.push(format!("file={}", escape_property(&loc.path)));
        if let Some(line) = loc.line {
            props.push(format!("line={line}"));
        }
        if let Some(col) = loc.col {
            props.push(format!("col={col}"));
        }
    }

    let check_id = f.check_id.as_deref().unwrap_or(FALLBACK_CHECK_ID);
    let message = escape_data(&format!("[{}:{}] {}", check_id, f.code, f.message));

    if props.is_empty() {
        format!("::{level}::{message}")
    } else {
        format!("::{level} {}::{message}", props.join(","))
    }
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

// Property values additionally reserve `:` and `,`.
fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderableData, RenderableLocation, RenderableVerdictStatus};

    fn finding(severity: RenderableSeverity, location: Option<RenderableLocation>) -> RenderableFinding {
        RenderableFinding {
            severity,
            check_id: Some("verify_firebase_dynamic_links".to_string()),
            code: "missing_dynamic_link_domain".to_string(),
            message: "100% broken\nsecond line".to_string(),
            location,
            help: None,
            url: None,
        }
    }

    fn report(findings: Vec<RenderableFinding>) -> RenderableReport {
        RenderableReport {
            verdict: RenderableVerdictStatus::Fail,
            rules: Vec::new(),
            findings,
            data: RenderableData::default(),
        }
    }

    #[test]
    fn renders_location_and_escapes_message() {
        let lines = render_github_annotations(&report(vec![finding(
            RenderableSeverity::Error,
            Some(RenderableLocation {
                path: "App/App.entitlements".to_string(),
                line: Some(4),
                col: Some(2),
            }),
        )]));

        assert_eq!(
            lines,
            vec![
                "::error file=App/App.entitlements,line=4,col=2::[verify_firebase_dynamic_links:missing_dynamic_link_domain] 100%25 broken%0Asecond line"
                    .to_string()
            ]
        );
    }

    #[test]
    fn maps_severity_levels_and_omits_missing_location() {
        let lines = render_github_annotations(&report(vec![
            finding(RenderableSeverity::Warning, None),
            finding(RenderableSeverity::Info, None),
        ]));
        assert!(lines[0].starts_with("::warning::["));
        assert!(lines[1].starts_with("::notice::["));
    }

    #[test]
    fn falls_back_to_tool_check_id() {
        let mut f = finding(RenderableSeverity::Error, None);
        f.check_id = None;
        let lines = render_github_annotations(&report(vec![f]));
        assert!(lines[0].starts_with("::error::[storeguard:missing_dynamic_link_domain]"));
    }

    #[test]
    fn escapes_reserved_characters_in_file_property() {
        let f = finding(
            RenderableSeverity::Error,
            Some(RenderableLocation {
                path: "My App, Inc/App.entitlements".to_string(),
                line: None,
                col: None,
            }),
        );
        let lines = render_github_annotations(&report(vec![f]));
        assert!(lines[0].starts_with("::error file=My App%2C Inc/App.entitlements::"));
    }
}

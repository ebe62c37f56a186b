//! Report rendering for humans and for tooling.

use crate::application::errors::LintError;
use crate::domain::entities::{Finding, LintReport};

/// Renders lint reports as plain text or JSON
pub struct ReportRenderer;

impl ReportRenderer {
    /// Render a human-readable text report.
    pub fn render_text(report: &LintReport) -> String {
        let mut out = String::new();
        Self::write_header(&mut out, report);
        Self::write_findings(&mut out, report);
        Self::write_result(&mut out, report);
        out
    }

    /// Render the full report as pretty-printed JSON.
    pub fn render_json(report: &LintReport) -> Result<String, LintError> {
        serde_json::to_string_pretty(report).map_err(|e| LintError::Report(e.to_string()))
    }

    fn write_header(out: &mut String, report: &LintReport) {
        out.push_str(&format!(
            "pumpkin-lint: checked {} ({} checks, {} ms)\n",
            report.root, report.summary.checks_run, report.duration_ms
        ));
        out.push_str(&format!(
            "run {} started {}\n\n",
            report.run_id,
            report.started_at.to_rfc3339()
        ));
    }

    fn write_findings(out: &mut String, report: &LintReport) {
        if report.findings.is_empty() {
            out.push_str("no findings\n\n");
            return;
        }
        for finding in &report.findings {
            out.push_str(&Self::format_finding(finding));
            out.push('\n');
        }
        out.push('\n');
    }

    /// One finding per line, compiler style.
    fn format_finding(finding: &Finding) -> String {
        let mut line = format!(
            "{}[{}]: {}",
            finding.severity, finding.check, finding.message
        );
        match (&finding.path, finding.line) {
            (Some(path), Some(number)) => line.push_str(&format!(" ({}:{})", path, number)),
            (Some(path), None) => line.push_str(&format!(" ({})", path)),
            (None, _) => {}
        }
        line
    }

    fn write_result(out: &mut String, report: &LintReport) {
        out.push_str(&format!(
            "result: {} (errors: {}, warnings: {}, info: {})\n",
            report.verdict, report.summary.errors, report.summary.warnings, report.summary.infos
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Finding;
    use chrono::Utc;

    fn sample_report() -> LintReport {
        LintReport::assemble(
            "c0ffee",
            "/tmp/my-plugin",
            Utc::now(),
            12,
            7,
            vec![
                Finding::error("descriptor", "Repository name \"core\" is a reserved word")
                    .with_path("__init__.py"),
                Finding::warning("changelog", "CHANGELOG.md not found").with_path("CHANGELOG.md"),
                Finding::error("tables", "Table class VerifyMember has no guild_id column")
                    .with_path("verify/database.py")
                    .with_line(14),
            ],
            false,
        )
    }

    #[test]
    fn text_report_lists_findings_with_locations() {
        let text = ReportRenderer::render_text(&sample_report());
        assert!(text.contains("pumpkin-lint: checked /tmp/my-plugin (7 checks, 12 ms)"));
        assert!(text.contains(
            "error[descriptor]: Repository name \"core\" is a reserved word (__init__.py)"
        ));
        assert!(text.contains("warning[changelog]: CHANGELOG.md not found (CHANGELOG.md)"));
        assert!(text.contains("(verify/database.py:14)"));
        assert!(text.ends_with("result: fail (errors: 2, warnings: 1, info: 0)\n"));
    }

    #[test]
    fn clean_report_says_so() {
        let report = LintReport::assemble("c0ffee", ".", Utc::now(), 3, 7, vec![], false);
        let text = ReportRenderer::render_text(&report);
        assert!(text.contains("no findings"));
        assert!(text.contains("result: pass"));
    }

    #[test]
    fn json_report_round_trips_through_serde() {
        let json = ReportRenderer::render_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["verdict"], "fail");
        assert_eq!(value["summary"]["errors"], 2);
        assert_eq!(value["findings"][0]["check"], "descriptor");
        assert_eq!(value["findings"][2]["line"], 14);
        assert!(value["findings"][0].get("line").is_none());
    }
}

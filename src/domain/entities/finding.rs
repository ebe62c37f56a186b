//! Findings and the aggregated lint report

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// How severe a single finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One conformance problem reported by a check.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub check: String,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Finding {
    pub fn new(check: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            severity,
            message: message.into(),
            path: None,
            line: None,
        }
    }

    pub fn error(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(check, Severity::Error, message)
    }

    pub fn warning(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(check, Severity::Warning, message)
    }

    pub fn info(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(check, Severity::Info, message)
    }

    /// Attach a repository-relative path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach a 1-based line number.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Overall outcome of a lint run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "pass"),
            Verdict::Fail => write!(f, "fail"),
        }
    }
}

/// Finding counts by severity.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ReportSummary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub checks_run: usize,
}

/// Aggregated result of one lint run over a repository.
#[derive(Debug, Clone, Serialize)]
pub struct LintReport {
    pub run_id: String,
    pub root: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub summary: ReportSummary,
    pub verdict: Verdict,
    pub findings: Vec<Finding>,
}

impl LintReport {
    /// Assemble a report from the findings of one run. The verdict is
    /// fail when any error was found, or any warning under `strict`.
    pub fn assemble(
        run_id: impl Into<String>,
        root: impl Into<String>,
        started_at: DateTime<Utc>,
        duration_ms: u64,
        checks_run: usize,
        findings: Vec<Finding>,
        strict: bool,
    ) -> Self {
        let summary = ReportSummary {
            errors: findings
                .iter()
                .filter(|f| f.severity == Severity::Error)
                .count(),
            warnings: findings
                .iter()
                .filter(|f| f.severity == Severity::Warning)
                .count(),
            infos: findings
                .iter()
                .filter(|f| f.severity == Severity::Info)
                .count(),
            checks_run,
        };
        let verdict = if summary.errors > 0 || (strict && summary.warnings > 0) {
            Verdict::Fail
        } else {
            Verdict::Pass
        };
        Self {
            run_id: run_id.into(),
            root: root.into(),
            started_at,
            duration_ms,
            summary,
            verdict,
            findings,
        }
    }
}

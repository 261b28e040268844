//! Report sink - one entry per executed scenario, flushed at suite end
//!
//! The reporter is a lifecycle-scoped object created at suite start and
//! flushed once at suite end, threaded through the runner rather than held
//! in a process-wide global.

use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;

/// Outcome of one scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    Passed,
    Failed,
}

/// One report entry, finalized when the scenario ends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRecord {
    pub name: String,
    pub status: TestStatus,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<PathBuf>,
}

/// Aggregate counts for a finished suite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
}

/// An open report entry, handed back to the reporter as pass or fail
#[derive(Debug)]
pub struct TestEntry {
    name: String,
    started: Instant,
}

impl TestEntry {
    /// Name of the scenario this entry tracks
    pub fn name(&self) -> &str {
        &self.name
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

/// Collects scenario outcomes and persists them as HTML + JSON
pub struct Reporter {
    suite_name: String,
    report_dir: PathBuf,
    records: Vec<TestRecord>,
    started_at: DateTime<Utc>,
    started: Instant,
}

impl Reporter {
    pub fn new(suite_name: &str, report_dir: impl Into<PathBuf>) -> Self {
        Self {
            suite_name: suite_name.to_string(),
            report_dir: report_dir.into(),
            records: Vec::new(),
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }

    /// Open a report entry for a scenario
    pub fn create_test(&self, name: &str) -> TestEntry {
        TestEntry {
            name: name.to_string(),
            started: Instant::now(),
        }
    }

    /// Finalize an entry as passed
    pub fn pass(&mut self, entry: TestEntry) {
        let duration_ms = entry.elapsed_ms();
        self.records.push(TestRecord {
            name: entry.name,
            status: TestStatus::Passed,
            duration_ms,
            error: None,
            screenshot: None,
        });
    }

    /// Finalize an entry as failed, with an optional screenshot reference
    pub fn fail(&mut self, entry: TestEntry, error: &str, screenshot: Option<PathBuf>) {
        let duration_ms = entry.elapsed_ms();
        self.records.push(TestRecord {
            name: entry.name,
            status: TestStatus::Failed,
            duration_ms,
            error: Some(error.to_string()),
            screenshot,
        });
    }

    /// Entries recorded so far
    pub fn records(&self) -> &[TestRecord] {
        &self.records
    }

    /// Aggregate counts over the recorded entries
    pub fn summary(&self) -> SuiteSummary {
        let passed = self
            .records
            .iter()
            .filter(|r| r.status == TestStatus::Passed)
            .count();
        SuiteSummary {
            total: self.records.len(),
            passed,
            failed: self.records.len() - passed,
            duration_ms: self.started.elapsed().as_millis() as u64,
        }
    }

    /// Persist all recorded entries
    ///
    /// Writes `report.html` and `results.json` under the report directory
    /// and returns the HTML path. Safe to call with zero entries recorded.
    pub fn flush(&self) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.report_dir)?;

        let html_path = self.report_dir.join("report.html");
        std::fs::write(&html_path, self.render_html())?;

        let json_path = self.report_dir.join("results.json");
        let json = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(&json_path, json)?;

        info!("Report written to {}", html_path.display());
        Ok(html_path)
    }

    /// Render the HTML report content
    fn render_html(&self) -> String {
        let summary = self.summary();
        let mut html = String::new();

        html.push_str(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>UI Scenario Report</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 20px; }
        .summary { background: #f5f5f5; padding: 20px; border-radius: 8px; margin-bottom: 20px; }
        .test { padding: 10px; margin: 5px 0; border-radius: 4px; }
        .test.pass { background: #e8f5e9; border-left: 4px solid #4caf50; }
        .test.fail { background: #ffebee; border-left: 4px solid #f44336; }
        .error { color: #d32f2f; font-family: monospace; white-space: pre-wrap; }
        .screenshot img { max-width: 480px; border: 1px solid #ddd; margin-top: 8px; }
    </style>
</head>
<body>
"#,
        );

        html.push_str(&format!(
            r#"<div class="summary">
    <h1>{}</h1>
    <h2>Results: {}/{} passed</h2>
    <p>Started: {} &middot; Duration: {:.2}s</p>
</div>
"#,
            html_escape(&self.suite_name),
            summary.passed,
            summary.total,
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
            summary.duration_ms as f64 / 1000.0,
        ));

        for record in &self.records {
            let class = match record.status {
                TestStatus::Passed => "pass",
                TestStatus::Failed => "fail",
            };
            html.push_str(&format!(
                "<div class=\"test {}\">\n    <strong>{}</strong> ({} ms)\n",
                class,
                html_escape(&record.name),
                record.duration_ms,
            ));
            if let Some(error) = &record.error {
                html.push_str(&format!(
                    "    <div class=\"error\">{}</div>\n",
                    html_escape(error)
                ));
            }
            if let Some(screenshot) = &record.screenshot {
                let src = html_escape(&screenshot.display().to_string());
                html.push_str(&format!(
                    "    <div class=\"screenshot\"><a href=\"{src}\"><img src=\"{src}\" alt=\"failure screenshot\"></a></div>\n",
                ));
            }
            html.push_str("</div>\n");
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_pass_and_fail_entries_in_order() {
        let mut reporter = Reporter::new("suite", "target/ignored");

        let a = reporter.create_test("first");
        reporter.pass(a);
        let b = reporter.create_test("second");
        reporter.fail(b, "count mismatch", None);

        let summary = reporter.summary();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(reporter.records()[0].name, "first");
        assert_eq!(reporter.records()[1].status, TestStatus::Failed);
    }

    #[test]
    fn flush_writes_html_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut reporter = Reporter::new("todo suite", dir.path());

        let entry = reporter.create_test("add_single_item");
        reporter.pass(entry);
        let entry = reporter.create_test("delete_first_item");
        reporter.fail(
            entry,
            "expected 2, got 3",
            Some(PathBuf::from("shots/delete_first_item.png")),
        );

        let html_path = reporter.flush().unwrap();
        let html = std::fs::read_to_string(&html_path).unwrap();
        assert!(html.contains("add_single_item"));
        assert!(html.contains("expected 2, got 3"));
        assert!(html.contains("shots/delete_first_item.png"));

        let json = std::fs::read_to_string(dir.path().join("results.json")).unwrap();
        let records: Vec<TestRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].status, TestStatus::Failed);
    }

    #[test]
    fn flush_with_zero_entries_is_a_no_op_report() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = Reporter::new("empty", dir.path());

        let html_path = reporter.flush().unwrap();
        assert!(html_path.exists());
        assert!(std::fs::read_to_string(html_path)
            .unwrap()
            .contains("0/0 passed"));
    }

    #[test]
    fn error_text_is_escaped_in_html() {
        let dir = tempfile::tempdir().unwrap();
        let mut reporter = Reporter::new("suite", dir.path());

        let entry = reporter.create_test("special");
        reporter.fail(entry, "expected <b> & friends", None);

        let html = std::fs::read_to_string(reporter.flush().unwrap()).unwrap();
        assert!(html.contains("expected &lt;b&gt; &amp; friends"));
    }
}

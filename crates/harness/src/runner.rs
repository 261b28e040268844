//! Scenario runner - ordered execution with per-scenario pass/fail recording
//!
//! Scenarios within a suite run strictly in declared order against one
//! shared context, and state accumulates across them. A failed scenario is
//! recorded (screenshot captured, fail entry written) and the runner keeps
//! going; there is no abort-on-first-failure.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::report::{Reporter, SuiteSummary};

/// Boxed future returned by a scenario function
pub type ScenarioFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + 'a>>;

/// One named, ordered scenario
pub struct Scenario<C> {
    pub name: &'static str,
    pub run: for<'a> fn(&'a mut C) -> ScenarioFuture<'a>,
}

impl<C> Scenario<C> {
    pub fn new(name: &'static str, run: for<'a> fn(&'a mut C) -> ScenarioFuture<'a>) -> Self {
        Self { name, run }
    }
}

/// Failure-time screenshot capture, implemented by the suite context
#[async_trait]
pub trait Screenshots {
    async fn capture_screenshot(&self, path: &Path) -> Result<()>;
}

/// Configuration for the suite runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Directory the report artifacts are written to
    pub report_dir: PathBuf,

    /// Directory failure screenshots are written to
    pub screenshot_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            report_dir: PathBuf::from("target/e2e-reports"),
            screenshot_dir: PathBuf::from("target/e2e-reports/screenshots"),
        }
    }
}

/// Runs scenarios in order and records one report entry per scenario
pub struct SuiteRunner {
    reporter: Reporter,
    screenshot_dir: PathBuf,
}

impl SuiteRunner {
    pub fn new(suite_name: &str, config: RunnerConfig) -> Self {
        Self {
            reporter: Reporter::new(suite_name, config.report_dir),
            screenshot_dir: config.screenshot_dir,
        }
    }

    /// Run every scenario in declared order against the shared context
    pub async fn run_all<C: Screenshots>(
        &mut self,
        ctx: &mut C,
        scenarios: &[Scenario<C>],
    ) -> SuiteSummary {
        info!("Running {} scenario(s)...", scenarios.len());

        for scenario in scenarios {
            let entry = self.reporter.create_test(scenario.name);
            debug!("Running scenario: {}", scenario.name);

            match (scenario.run)(ctx).await {
                Ok(()) => {
                    info!("✓ {}", scenario.name);
                    self.reporter.pass(entry);
                }
                Err(e) => {
                    error!("✗ {} - {}", scenario.name, e);
                    let screenshot = self.capture_failure(ctx, scenario.name).await;
                    self.reporter.fail(entry, &e.to_string(), screenshot);
                }
            }
        }

        let summary = self.reporter.summary();
        info!(
            "Scenario results: {} passed, {} failed ({} ms)",
            summary.passed, summary.failed, summary.duration_ms
        );
        summary
    }

    async fn capture_failure<C: Screenshots>(&self, ctx: &C, name: &str) -> Option<PathBuf> {
        if let Err(e) = std::fs::create_dir_all(&self.screenshot_dir) {
            warn!("Failed to create screenshot dir: {}", e);
            return None;
        }
        let path = self
            .screenshot_dir
            .join(format!("{}.png", sanitize_file_name(name)));
        match ctx.capture_screenshot(&path).await {
            Ok(()) => Some(path),
            Err(e) => {
                warn!("Failed to capture screenshot for {}: {}", name, e);
                None
            }
        }
    }

    /// The underlying reporter
    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    /// Persist the report artifacts and return the HTML path
    pub fn flush_report(&self) -> Result<PathBuf> {
        self.reporter.flush()
    }
}

/// Reduce a scenario name to a safe file stem
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Fail the enclosing scenario unless `cond` holds
#[macro_export]
macro_rules! check {
    ($cond:expr, $what:expr) => {
        if !$cond {
            return Err($crate::error::Error::Assertion(format!(
                "{}: expected {} to hold",
                $what,
                stringify!($cond)
            )));
        }
    };
}

/// Fail the enclosing scenario unless `actual` equals `expected`
#[macro_export]
macro_rules! check_eq {
    ($actual:expr, $expected:expr, $what:expr) => {{
        let actual = $actual;
        let expected = $expected;
        if actual != expected {
            return Err($crate::error::Error::Assertion(format!(
                "{}: expected {:?}, got {:?}",
                $what, expected, actual
            )));
        }
    }};
}

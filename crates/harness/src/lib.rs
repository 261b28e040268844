//! Harness for browser-driven UI scenario suites
//!
//! Provides the plumbing a scenario suite needs around a WebDriver-driven
//! browser: driver-server process management, session lifecycle, a bounded
//! wait primitive, a report sink, and an ordered scenario runner.

pub mod driver;
pub mod error;
pub mod report;
pub mod runner;
pub mod session;
pub mod wait;

// Re-export commonly used types
pub use driver::{DriverServer, DriverServerConfig};
pub use error::{Error, Result};
pub use report::{Reporter, SuiteSummary, TestEntry, TestRecord, TestStatus};
pub use runner::{RunnerConfig, Scenario, ScenarioFuture, Screenshots, SuiteRunner};
pub use session::{Browser, Session, SessionConfig};
pub use wait::Waiter;

/// Harness version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Error types for the UI scenario suite

use std::time::Duration;
use thiserror::Error;

/// Result type alias using the suite Error
pub type Result<T> = std::result::Result<T, Error>;

/// Suite error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported browser: {0}")]
    UnsupportedBrowser(String),

    #[error("Timed out after {timeout:?} waiting for {what}")]
    Timeout { what: String, timeout: Duration },

    #[error("Index {index} out of range: the rendered list has {len} item(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("Driver server failed to start: {0}")]
    DriverStartup(String),

    #[error("Driver server health check failed after {0} attempts")]
    DriverHealthCheck(usize),

    #[error("No active browser session")]
    NoSession,

    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_out_of_range_names_both_sides() {
        let err = Error::IndexOutOfRange { index: 5, len: 2 };
        let msg = err.to_string();
        assert!(msg.contains('5'));
        assert!(msg.contains('2'));
    }

    #[test]
    fn timeout_names_the_awaited_condition() {
        let err = Error::Timeout {
            what: "delete control to become clickable".into(),
            timeout: Duration::from_secs(10),
        };
        assert!(err.to_string().contains("delete control"));
    }
}

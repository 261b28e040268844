//! WebDriver session lifecycle - browser selection, setup, and teardown

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thirtyfour::{DesiredCapabilities, WebDriver};
use tracing::info;

use crate::driver::{DriverServer, DriverServerConfig};
use crate::error::{Error, Result};

/// Supported browser backends
///
/// The set is closed: anything else fails at parse time, before a session
/// is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browser {
    Chrome,
    Firefox,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::Firefox => "firefox",
        }
    }

    /// Name of the driver binary serving this browser
    pub fn driver_binary(&self) -> &'static str {
        match self {
            Browser::Chrome => "chromedriver",
            Browser::Firefox => "geckodriver",
        }
    }
}

impl FromStr for Browser {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "chrome" => Ok(Browser::Chrome),
            "firefox" => Ok(Browser::Firefox),
            _ => Err(Error::UnsupportedBrowser(s.to_string())),
        }
    }
}

impl std::fmt::Display for Browser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a browser session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Which browser backend to launch
    pub browser: Browser,

    /// Launch without a visible window
    pub headless: bool,

    /// Address of an already-running WebDriver server (None = spawn one)
    pub webdriver_url: Option<String>,

    /// Implicit element-wait applied to the whole session
    pub implicit_wait: Duration,

    /// Driver server spawn options, used when no webdriver_url is given
    pub driver: DriverServerConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            browser: Browser::Chrome,
            headless: true,
            webdriver_url: None,
            implicit_wait: Duration::from_secs(10),
            driver: DriverServerConfig::default(),
        }
    }
}

/// One live browser session
///
/// Owns the WebDriver handle and, when it spawned one, the driver server
/// process. Exactly one session is open at a time; page objects hold
/// non-owning clones of the driver handle.
pub struct Session {
    driver: WebDriver,
    server: Option<DriverServer>,
}

impl Session {
    /// Launch a browser session per `config`
    ///
    /// Applies the implicit element wait and maximizes the window. A launch
    /// failure is fatal and propagates to the caller.
    pub async fn start(config: SessionConfig) -> Result<Self> {
        info!(
            "Starting {} session (headless: {})",
            config.browser, config.headless
        );

        let (server, server_url) = match &config.webdriver_url {
            Some(url) => (None, url.clone()),
            None => {
                let server = DriverServer::spawn(config.browser, config.driver.clone()).await?;
                let url = server.base_url().to_string();
                (Some(server), url)
            }
        };

        let driver = match config.browser {
            Browser::Chrome => {
                let mut caps = DesiredCapabilities::chrome();
                if config.headless {
                    caps.set_headless()?;
                }
                WebDriver::new(&server_url, caps).await?
            }
            Browser::Firefox => {
                let mut caps = DesiredCapabilities::firefox();
                if config.headless {
                    caps.set_headless()?;
                }
                WebDriver::new(&server_url, caps).await?
            }
        };

        driver.set_implicit_wait_timeout(config.implicit_wait).await?;
        driver.maximize_window().await?;

        info!("WebDriver session established at {}", server_url);
        Ok(Session { driver, server })
    }

    /// Navigate the session to `url`
    pub async fn goto(&self, url: &str) -> Result<()> {
        info!("Navigating to {}", url);
        self.driver.goto(url).await?;
        Ok(())
    }

    /// The underlying WebDriver handle
    pub fn driver(&self) -> &WebDriver {
        &self.driver
    }

    /// Capture a PNG screenshot of the current viewport
    pub async fn screenshot(&self, path: &Path) -> Result<()> {
        self.driver.screenshot(path).await?;
        Ok(())
    }

    /// End the session and release all browser resources
    pub async fn close(mut self) -> Result<()> {
        info!("Ending WebDriver session");
        self.driver.quit().await?;
        if let Some(mut server) = self.server.take() {
            server.stop()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("chrome", Browser::Chrome)]
    #[test_case("Chrome", Browser::Chrome)]
    #[test_case("CHROME", Browser::Chrome)]
    #[test_case("firefox", Browser::Firefox)]
    #[test_case("FireFox", Browser::Firefox)]
    fn recognized_browsers_parse_case_insensitively(input: &str, expected: Browser) {
        assert_eq!(input.parse::<Browser>().unwrap(), expected);
    }

    #[test_case("safari")]
    #[test_case("edge")]
    #[test_case("")]
    #[test_case("chromium ")]
    fn unrecognized_browsers_fail_closed(input: &str) {
        match input.parse::<Browser>() {
            Err(Error::UnsupportedBrowser(name)) => assert_eq!(name, input),
            other => panic!("expected UnsupportedBrowser, got {other:?}"),
        }
    }

    #[test]
    fn driver_binaries_match_their_browser() {
        assert_eq!(Browser::Chrome.driver_binary(), "chromedriver");
        assert_eq!(Browser::Firefox.driver_binary(), "geckodriver");
    }

    #[test]
    fn default_session_applies_the_ten_second_implicit_wait() {
        let config = SessionConfig::default();
        assert_eq!(config.implicit_wait, Duration::from_secs(10));
        assert!(config.headless);
        assert!(config.webdriver_url.is_none());
    }
}

//! Driver server management - spawning and health checking chromedriver/geckodriver

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::session::Browser;

/// Handle to a running WebDriver server process
pub struct DriverServer {
    child: Child,
    base_url: String,
    port: u16,
}

impl DriverServer {
    /// Spawn the driver binary for `browser`
    pub async fn spawn(browser: Browser, config: DriverServerConfig) -> Result<Self> {
        let port = config.port.unwrap_or_else(find_free_port);
        let base_url = format!("http://127.0.0.1:{}", port);
        let binary = config
            .binary
            .unwrap_or_else(|| PathBuf::from(browser.driver_binary()));

        info!("Spawning {} on port {}", binary.display(), port);

        let mut cmd = Command::new(&binary);
        match browser {
            // chromedriver only understands the --port=N form
            Browser::Chrome => {
                cmd.arg(format!("--port={}", port));
            }
            Browser::Firefox => {
                let port_arg = port.to_string();
                cmd.args(["--port", port_arg.as_str()]);
            }
        }
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        let child = cmd.spawn().map_err(|e| {
            Error::DriverStartup(format!("Failed to spawn {}: {}", binary.display(), e))
        })?;

        let handle = DriverServer {
            child,
            base_url,
            port,
        };

        handle.wait_for_ready(config.startup_timeout).await?;

        info!("Driver server is ready at {}", handle.base_url);
        Ok(handle)
    }

    /// Poll the WebDriver /status endpoint until the server reports ready
    async fn wait_for_ready(&self, timeout_duration: Duration) -> Result<()> {
        let status_url = format!("{}/status", self.base_url);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        let start = std::time::Instant::now();
        let mut attempts = 0;

        while start.elapsed() < timeout_duration {
            attempts += 1;

            match client.get(&status_url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    let body: serde_json::Value = resp.json().await.unwrap_or_default();
                    if body["value"]["ready"].as_bool().unwrap_or(true) {
                        return Ok(());
                    }
                }
                Ok(resp) => {
                    warn!("Driver status check returned {}", resp.status());
                }
                Err(e) => {
                    if attempts == 1 {
                        info!("Waiting for driver server to start...");
                    }
                    // Connection refused is expected while the server is starting
                    if !e.is_connect() {
                        warn!("Driver status check error: {}", e);
                    }
                }
            }

            sleep(Duration::from_millis(100)).await;
        }

        Err(Error::DriverHealthCheck(attempts))
    }

    /// Get the base URL of this driver server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The port the server is listening on
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Stop the driver server process
    pub fn stop(&mut self) -> Result<()> {
        info!("Stopping driver server (pid: {})", self.child.id());

        // Try graceful shutdown first
        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(self.child.id() as i32);
            if kill(pid, Signal::SIGTERM).is_ok() {
                std::thread::sleep(Duration::from_millis(200));
            }
        }

        // Force kill if still running
        let _ = self.child.kill();
        let _ = self.child.wait();

        Ok(())
    }
}

impl Drop for DriverServer {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Configuration for spawning a driver server
#[derive(Debug, Clone)]
pub struct DriverServerConfig {
    /// Path to the driver binary (None = resolve by browser from PATH)
    pub binary: Option<PathBuf>,

    /// Port to listen on (None = find free port)
    pub port: Option<u16>,

    /// Timeout for server startup
    pub startup_timeout: Duration,
}

impl Default for DriverServerConfig {
    fn default() -> Self {
        Self {
            binary: None,
            port: None,
            startup_timeout: Duration::from_secs(30),
        }
    }
}

/// Find a free port to use
fn find_free_port() -> u16 {
    use std::net::TcpListener;

    TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind to find free port")
        .local_addr()
        .expect("Failed to get local addr")
        .port()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_free_port() {
        let port1 = find_free_port();
        let port2 = find_free_port();

        assert!(port1 > 1024);
        assert!(port2 > 1024);
    }

    #[test]
    fn default_config_spawns_on_an_ephemeral_port() {
        let config = DriverServerConfig::default();
        assert!(config.binary.is_none());
        assert!(config.port.is_none());
        assert_eq!(config.startup_timeout, Duration::from_secs(30));
    }
}

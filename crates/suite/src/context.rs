//! Suite context - one browser session plus the page object over it

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use todomvc_harness::error::{Error, Result};
use todomvc_harness::runner::Screenshots;
use todomvc_harness::session::{Session, SessionConfig};

use crate::page::TodoPage;

/// Where and how to open the application under test
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address of the TodoMVC deployment
    pub url: String,

    /// Browser session options
    pub session: SessionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            url: "https://todomvc.com/examples/react/dist/".to_string(),
            session: SessionConfig::default(),
        }
    }
}

/// The shared state one ordered suite runs against
///
/// Owns the browser session for the scope of the suite; the page object
/// holds a non-owning clone of the driver handle. Scenario state
/// accumulates here across the whole run.
pub struct TodoContext {
    session: Option<Session>,
    page: TodoPage,
}

impl TodoContext {
    /// Start a session and navigate to the application
    pub async fn open(config: AppConfig) -> Result<Self> {
        info!("Opening TodoMVC at {}", config.url);
        let session = Session::start(config.session).await?;
        session.goto(&config.url).await?;
        let page = TodoPage::new(session.driver().clone());
        Ok(Self {
            session: Some(session),
            page,
        })
    }

    /// The page object for the open application
    pub fn page(&self) -> &TodoPage {
        &self.page
    }

    /// Close the browser session
    ///
    /// A no-op when the session is already gone.
    pub async fn close(&mut self) -> Result<()> {
        match self.session.take() {
            Some(session) => session.close().await,
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Screenshots for TodoContext {
    async fn capture_screenshot(&self, path: &Path) -> Result<()> {
        match &self.session {
            Some(session) => session.screenshot(path).await,
            None => Err(Error::NoSession),
        }
    }
}

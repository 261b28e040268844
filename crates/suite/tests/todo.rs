//! TodoMVC scenario suite entry point
//!
//! This file is the test binary that drives the ordered scenarios against a
//! live browser. Run with: cargo test --package todomvc-suite --test todo

use std::path::PathBuf;
use std::process::{Command, Stdio};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use todomvc_harness::runner::{RunnerConfig, SuiteRunner};
use todomvc_harness::session::{Browser, SessionConfig};
use todomvc_harness::Result;
use todomvc_suite::{scenarios, AppConfig, TodoContext};

#[derive(Parser, Debug)]
#[command(name = "todomvc-suite")]
#[command(about = "Ordered UI scenario suite for the TodoMVC application")]
struct Args {
    /// Browser to drive (chrome, firefox)
    #[arg(long, env = "TODO_E2E_BROWSER", default_value = "chrome")]
    browser: String,

    /// Run the browser without a visible window
    #[arg(
        long,
        env = "TODO_E2E_HEADLESS",
        default_value = "true",
        action = clap::ArgAction::Set
    )]
    headless: bool,

    /// Address of the TodoMVC deployment under test
    #[arg(
        long,
        env = "TODO_E2E_URL",
        default_value = "https://todomvc.com/examples/react/dist/"
    )]
    url: String,

    /// Address of an already-running WebDriver server (default: spawn one)
    #[arg(long, env = "TODO_E2E_WEBDRIVER_URL")]
    webdriver_url: Option<String>,

    /// Directory for report artifacts
    #[arg(long, default_value = "target/e2e-reports")]
    report_dir: PathBuf,

    /// Directory for failure screenshots
    #[arg(long, default_value = "target/e2e-reports/screenshots")]
    screenshot_dir: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let args = Args::parse();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let result = rt.block_on(async_main(args));

    match result {
        Ok(success) => {
            if success {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

async fn async_main(args: Args) -> Result<bool> {
    let browser: Browser = args.browser.parse()?;

    if args.webdriver_url.is_none() && !driver_available(browser) {
        eprintln!(
            "Skipping: {} not available in PATH",
            browser.driver_binary()
        );
        return Ok(true);
    }

    let config = AppConfig {
        url: args.url,
        session: SessionConfig {
            browser,
            headless: args.headless,
            webdriver_url: args.webdriver_url,
            ..SessionConfig::default()
        },
    };

    let mut ctx = TodoContext::open(config).await?;

    let mut runner = SuiteRunner::new(
        "TodoMVC scenario suite",
        RunnerConfig {
            report_dir: args.report_dir,
            screenshot_dir: args.screenshot_dir,
        },
    );

    let scenarios = scenarios::all();
    let summary = runner.run_all(&mut ctx, &scenarios).await;

    ctx.close().await?;
    runner.flush_report()?;

    Ok(summary.failed == 0)
}

fn driver_available(browser: Browser) -> bool {
    Command::new(browser.driver_binary())
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

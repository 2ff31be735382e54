use anyhow::Result;
use tracing::{error, info};

use wodup_scraper::browser::{Page, WebDriverPage};
use wodup_scraper::config::Config;
use wodup_scraper::scraper;
use wodup_scraper::storage::JsonStorage;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wodup_scraper=info".parse().expect("valid log directive")),
        )
        .init();

    // Credentials are validated before any network interaction.
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting WodUp scraper");

    let page = match WebDriverPage::connect(&config.webdriver_url).await {
        Ok(page) => page,
        Err(e) => {
            error!("Failed to start browser session: {:#}", e);
            std::process::exit(1);
        }
    };

    let result = run(&page, &config).await;

    if let Err(e) = &result {
        error!("An error occurred: {:#}", e);
        capture_failure_screenshot(&page, &config).await;
    }

    // The session is released on every exit path from here on.
    if let Err(e) = page.close().await {
        error!("Failed to close browser session: {:#}", e);
    }

    if result.is_err() {
        std::process::exit(1);
    }
}

async fn run(page: &WebDriverPage, config: &Config) -> Result<()> {
    let storage = JsonStorage::new(&config.output_path);
    scraper::run(page, &storage, config).await
}

async fn capture_failure_screenshot(page: &WebDriverPage, config: &Config) {
    match page.screenshot(&config.screenshot_path).await {
        Ok(()) => info!(
            "Saved error screenshot to {}",
            config.screenshot_path.display()
        ),
        Err(e) => error!("Could not save screenshot: {:#}", e),
    }
}

use anyhow::Result;
use chrono::Local;
use tracing::info;

pub mod extract;
pub mod reveal;
pub mod session;
pub mod walker;

use crate::browser::Page;
use crate::config::Config;
use crate::models::DateWindow;
use crate::storage::Storage;

/// Run the full pipeline: establish a session, walk every day from the
/// configured anchor through today, then persist the dataset in one
/// commit. Persistence happens even when some days were skipped.
pub async fn run(page: &dyn Page, storage: &dyn Storage, config: &Config) -> Result<()> {
    session::establish(page, config).await?;

    let window = DateWindow::new(config.start_date, Local::now().date_naive());
    let dataset = walker::walk(page, window, config).await;

    info!("Scraping complete. Found {} workout(s)", dataset.len());
    storage.persist(&dataset).await?;
    Ok(())
}

use anyhow::Result;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tracing::{error, info, warn};
use url::Url;

use crate::browser::Page;
use crate::config::{self, Config};
use crate::models::{DateWindow, WorkoutRecord};
use crate::scraper::{extract, reveal};

static TIMELINE_URL: Lazy<Url> =
    Lazy::new(|| Url::parse(config::TIMELINE_URL).expect("valid timeline URL"));

/// Date-parameterized URL for one day's listing page.
pub fn day_url(day: NaiveDate) -> String {
    let mut url = TIMELINE_URL.clone();
    url.query_pairs_mut()
        .append_pair("date", &day.to_string());
    url.into()
}

/// Drive the per-day pipeline over every day in the window, ascending.
///
/// Days are strictly sequential: the page is shared mutable state, so
/// day N's reveal and extraction finish (or are abandoned) before day
/// N+1 starts. Any error inside a day is caught here, logged with the
/// offending date, and the walk continues; a bad day only ever shrinks
/// its own contribution to zero records.
pub async fn walk(page: &dyn Page, window: DateWindow, config: &Config) -> Vec<WorkoutRecord> {
    info!("Starting scrape from {} to {}", window.start, window.end);

    let mut dataset = Vec::new();
    for day in window.days() {
        info!("Scraping {}...", day);
        match scrape_day(page, day, config).await {
            Ok(records) => {
                if !records.is_empty() {
                    info!("Found {} workout(s) on {}", records.len(), day);
                }
                dataset.extend(records);
            }
            Err(e) => error!("Failed to scrape {}: {:#}", day, e),
        }
    }
    dataset
}

/// One day: navigate, wait for the card marker or declare the day
/// empty, exhaust expansions, extract.
async fn scrape_day(page: &dyn Page, day: NaiveDate, config: &Config) -> Result<Vec<WorkoutRecord>> {
    page.goto(&day_url(day)).await?;

    if !page
        .wait_for_visible(config::CARD_SELECTOR, config.card_wait)
        .await?
    {
        info!("No workouts found for {} (or timeout)", day);
        return Ok(Vec::new());
    }

    if let Err(e) = reveal::reveal_all(page, config).await {
        warn!("Error processing expand buttons on {}: {:#}", day, e);
    }

    let cards = page.cards(config::CARD_SELECTOR).await?;
    Ok(extract::records_from_cards(day, &cards))
}

use anyhow::{bail, Result};
use tracing::{info, warn};

use crate::browser::Page;
use crate::config::{self, Config};

/// Log into the site and wait for the post-submit redirect away from
/// the login surface.
///
/// A redirect timeout is logged but tolerated: the site keeps
/// unauthenticated sessions on protected pages with empty content,
/// which the per-day pipeline already treats as "no workouts".
pub async fn establish(page: &dyn Page, config: &Config) -> Result<()> {
    info!("Navigating to login page...");
    page.goto(config::LOGIN_URL).await?;

    info!("Waiting for username input...");
    if !page
        .wait_for_visible(config::USERNAME_INPUT, config.login_field_wait)
        .await?
    {
        bail!("login form never appeared at {}", config::LOGIN_URL);
    }

    info!("Entering credentials...");
    page.type_into(config::USERNAME_INPUT, &config.credentials.username)
        .await?;
    page.type_into(config::PASSWORD_INPUT, &config.credentials.password)
        .await?;

    info!("Submitting login form...");
    page.press_enter(config::PASSWORD_INPUT).await?;

    // Poll for the URL to leave /login within the redirect budget.
    let polls = (config.login_redirect_wait.as_millis()
        / config.settle_delay.as_millis().max(1))
    .max(1);
    for _ in 0..polls {
        let url = page.current_url().await?;
        if !url.contains("/login") {
            info!("Successfully redirected to {}", url);
            return Ok(());
        }
        page.settle(config.settle_delay).await;
    }

    warn!(
        "Timed out waiting for post-login redirect. Current URL: {}",
        page.current_url().await?
    );
    Ok(())
}

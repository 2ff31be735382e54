use anyhow::Result;
use tracing::{debug, warn};

use crate::browser::{Page, TriggerState};
use crate::config::{self, Config};

/// Exhaust every "Show full workout" trigger on the current day page.
///
/// The hidden text is not in the document until a trigger is clicked,
/// and each click can re-render the page, so the trigger is re-queried
/// from scratch after every action. A hidden trigger is skipped but
/// still consumes an iteration, so a stuck trigger cannot spin the
/// loop forever; the iteration cap bounds everything else.
pub async fn reveal_all(page: &dyn Page, config: &Config) -> Result<()> {
    page.settle(config.settle_delay).await;

    let mut clicked = 0u32;
    for iteration in 0..config.max_expand_iterations {
        match page.expand_trigger(config::EXPAND_LABEL).await? {
            TriggerState::Absent => {
                if clicked > 0 {
                    debug!("Expanded {} section(s)", clicked);
                }
                return Ok(());
            }
            TriggerState::Visible => {
                debug!("Clicking expand button #{}...", iteration + 1);
                match page.click_expand_trigger(config::EXPAND_LABEL).await {
                    Ok(()) => clicked += 1,
                    Err(e) => warn!("Expand click failed: {:#}", e),
                }
                page.settle(config.settle_delay).await;
            }
            TriggerState::Hidden => {
                debug!("Expand button present but not visible, skipping click");
            }
        }
    }

    warn!(
        "Hit safety limit of {} expand iterations",
        config.max_expand_iterations
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::CardSnapshot;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Page whose expand trigger follows a fixed script: `Hidden` when
    /// `hidden` is set, otherwise `Visible` until `vanish_after` clicks
    /// have landed (u32::MAX = never vanishes).
    struct ScriptedPage {
        hidden: bool,
        vanish_after: u32,
        clicks: AtomicU32,
        queries: AtomicU32,
    }

    impl ScriptedPage {
        fn visible(vanish_after: u32) -> Self {
            Self {
                hidden: false,
                vanish_after,
                clicks: AtomicU32::new(0),
                queries: AtomicU32::new(0),
            }
        }

        fn hidden() -> Self {
            Self {
                hidden: true,
                vanish_after: u32::MAX,
                clicks: AtomicU32::new(0),
                queries: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl Page for ScriptedPage {
        async fn goto(&self, _url: &str) -> Result<()> {
            unreachable!("reveal never navigates")
        }

        async fn wait_for_visible(&self, _css: &str, _timeout: Duration) -> Result<bool> {
            unreachable!("reveal never waits for selectors")
        }

        async fn type_into(&self, _css: &str, _text: &str) -> Result<()> {
            unreachable!()
        }

        async fn press_enter(&self, _css: &str) -> Result<()> {
            unreachable!()
        }

        async fn current_url(&self) -> Result<String> {
            unreachable!()
        }

        async fn expand_trigger(&self, _label: &str) -> Result<TriggerState> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            if self.hidden {
                return Ok(TriggerState::Hidden);
            }
            if self.clicks.load(Ordering::SeqCst) >= self.vanish_after {
                Ok(TriggerState::Absent)
            } else {
                Ok(TriggerState::Visible)
            }
        }

        async fn click_expand_trigger(&self, _label: &str) -> Result<()> {
            self.clicks.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn cards(&self, _css: &str) -> Result<Vec<CardSnapshot>> {
            unreachable!()
        }

        async fn settle(&self, _wait: Duration) {}

        async fn screenshot(&self, _path: &Path) -> Result<()> {
            unreachable!()
        }
    }

    fn test_config() -> Config {
        use crate::config::Credentials;
        use chrono::NaiveDate;
        Config {
            credentials: Credentials::new("user".into(), "pass".into()).unwrap(),
            webdriver_url: "http://localhost:4444".into(),
            output_path: "workouts.json".into(),
            screenshot_path: "error_screenshot.png".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            login_field_wait: Duration::from_millis(1),
            login_redirect_wait: Duration::from_millis(10),
            card_wait: Duration::from_millis(1),
            settle_delay: Duration::from_millis(1),
            max_expand_iterations: 20,
        }
    }

    #[tokio::test]
    async fn stops_when_triggers_are_exhausted() {
        let page = ScriptedPage::visible(2);
        reveal_all(&page, &test_config()).await.unwrap();
        assert_eq!(page.clicks.load(Ordering::SeqCst), 2);
        // Two clicks plus the final query that saw Absent.
        assert_eq!(page.queries.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn perpetual_trigger_terminates_at_the_safety_bound() {
        let page = ScriptedPage::visible(u32::MAX);
        reveal_all(&page, &test_config()).await.unwrap();
        assert_eq!(page.clicks.load(Ordering::SeqCst), 20);
        assert_eq!(page.queries.load(Ordering::SeqCst), 20);
    }

    #[tokio::test]
    async fn hidden_trigger_is_never_clicked_and_does_not_spin() {
        let page = ScriptedPage::hidden();
        reveal_all(&page, &test_config()).await.unwrap();
        assert_eq!(page.clicks.load(Ordering::SeqCst), 0);
        assert_eq!(page.queries.load(Ordering::SeqCst), 20);
    }

    #[tokio::test]
    async fn no_trigger_means_no_clicks() {
        let page = ScriptedPage::visible(0);
        reveal_all(&page, &test_config()).await.unwrap();
        assert_eq!(page.clicks.load(Ordering::SeqCst), 0);
        assert_eq!(page.queries.load(Ordering::SeqCst), 1);
    }
}

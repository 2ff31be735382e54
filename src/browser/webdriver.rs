use anyhow::{Context, Result};
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::key::Key;
use fantoccini::{Client, ClientBuilder, Locator};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::browser::{CardSnapshot, Page, TriggerState};

/// Live page backed by a WebDriver session (geckodriver/chromedriver).
pub struct WebDriverPage {
    client: Client,
}

impl WebDriverPage {
    pub async fn connect(webdriver_url: &str) -> Result<Self> {
        info!("Connecting to WebDriver at {}", webdriver_url);
        let client = ClientBuilder::native()
            .connect(webdriver_url)
            .await
            .with_context(|| format!("failed to connect to WebDriver at {webdriver_url}"))?;
        Ok(Self { client })
    }

    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }

    fn label_xpath(label: &str) -> String {
        format!(r#"//*[normalize-space(text())="{label}"]"#)
    }

    /// First element whose visible text equals `label`, if any.
    /// `find_all` keeps absence from surfacing as a driver error.
    async fn find_trigger(&self, label: &str) -> Result<Option<Element>> {
        let xpath = Self::label_xpath(label);
        let mut found = self.client.find_all(Locator::XPath(&xpath)).await?;
        if found.is_empty() {
            Ok(None)
        } else {
            Ok(Some(found.remove(0)))
        }
    }
}

#[async_trait]
impl Page for WebDriverPage {
    async fn goto(&self, url: &str) -> Result<()> {
        self.client
            .goto(url)
            .await
            .with_context(|| format!("navigation to {url} failed"))?;
        Ok(())
    }

    async fn wait_for_visible(&self, css: &str, timeout: Duration) -> Result<bool> {
        match self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(css))
            .await
        {
            Ok(_) => Ok(true),
            Err(_) => Ok(false),
        }
    }

    async fn type_into(&self, css: &str, text: &str) -> Result<()> {
        let element = self.client.find(Locator::Css(css)).await?;
        element.send_keys(text).await?;
        Ok(())
    }

    async fn press_enter(&self, css: &str) -> Result<()> {
        let element = self.client.find(Locator::Css(css)).await?;
        element.send_keys(&char::from(Key::Enter).to_string()).await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.client.current_url().await?.to_string())
    }

    async fn expand_trigger(&self, label: &str) -> Result<TriggerState> {
        match self.find_trigger(label).await? {
            None => Ok(TriggerState::Absent),
            Some(element) => {
                if element.is_displayed().await? {
                    Ok(TriggerState::Visible)
                } else {
                    Ok(TriggerState::Hidden)
                }
            }
        }
    }

    async fn click_expand_trigger(&self, label: &str) -> Result<()> {
        // The trigger may have disappeared between query and click;
        // treat that as already expanded.
        let Some(element) = self.find_trigger(label).await? else {
            return Ok(());
        };
        self.client
            .execute(
                "arguments[0].scrollIntoView({block: 'center'});",
                vec![serde_json::to_value(&element)?],
            )
            .await?;
        element.click().await?;
        Ok(())
    }

    async fn cards(&self, css: &str) -> Result<Vec<CardSnapshot>> {
        let elements = self.client.find_all(Locator::Css(css)).await?;
        let mut snapshots = Vec::with_capacity(elements.len());
        for element in elements {
            let text = element.text().await?;
            let html = element.html(true).await?;
            snapshots.push(CardSnapshot { text, html });
        }
        Ok(snapshots)
    }

    async fn settle(&self, wait: Duration) {
        tokio::time::sleep(wait).await;
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        let png = self.client.screenshot().await?;
        tokio::fs::write(path, png)
            .await
            .with_context(|| format!("failed to write screenshot to {}", path.display()))?;
        Ok(())
    }
}

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

mod webdriver;
pub use webdriver::WebDriverPage;

/// Result of querying the page for an expansion trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Absent,
    /// Present in the document but not currently displayed; clicking
    /// it would be a no-op, so callers skip it.
    Hidden,
    Visible,
}

/// Point-in-time capture of one card: its rendered text and inner HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSnapshot {
    pub text: String,
    pub html: String,
}

/// The single live page the whole run drives. The scraping pipeline
/// specifies which interactions to issue and in what order; how the
/// browser executes them lives behind this trait.
#[async_trait]
pub trait Page: Send + Sync {
    async fn goto(&self, url: &str) -> Result<()>;

    /// Wait up to `timeout` for an element matching `css` to appear.
    /// Returns false on timeout; absence is a value, not an error.
    async fn wait_for_visible(&self, css: &str, timeout: Duration) -> Result<bool>;

    async fn type_into(&self, css: &str, text: &str) -> Result<()>;

    /// Send the Enter key to the element matching `css`.
    async fn press_enter(&self, css: &str) -> Result<()>;

    async fn current_url(&self) -> Result<String>;

    /// Query for the first expansion trigger carrying `label` as its
    /// visible text.
    async fn expand_trigger(&self, label: &str) -> Result<TriggerState>;

    /// Scroll the first matching trigger into view and click it.
    async fn click_expand_trigger(&self, label: &str) -> Result<()>;

    /// Snapshot every element matching `css`, in document order.
    async fn cards(&self, css: &str) -> Result<Vec<CardSnapshot>>;

    /// Give the page a bounded delay to finish asynchronous rendering.
    async fn settle(&self, wait: Duration);

    async fn screenshot(&self, path: &Path) -> Result<()>;
}

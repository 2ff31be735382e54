use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

use crate::models::WorkoutRecord;
use crate::storage::Storage;

/// Persists the dataset as one pretty-printed JSON array.
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Storage for JsonStorage {
    async fn persist(&self, records: &[WorkoutRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        info!("Saved {} workout(s) to {}", records.len(), self.path.display());
        Ok(())
    }
}

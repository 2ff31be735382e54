use anyhow::Result;
use async_trait::async_trait;

use crate::models::WorkoutRecord;

mod json;
pub use json::JsonStorage;

/// Single commit point for a run's dataset.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write the complete dataset, fully replacing any prior artifact.
    async fn persist(&self, records: &[WorkoutRecord]) -> Result<()>;
}

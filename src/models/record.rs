use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One logged workout, as captured from a fully expanded card.
///
/// `details` carries the card's complete rendered text. The internal
/// markup is too irregular to parse into exercise/set/rep fields, so
/// the text blob is the canonical payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Calendar day the workout was logged on (serialized as YYYY-MM-DD).
    pub date: NaiveDate,
    /// Program title from the card header, or "Unknown Program".
    pub program: String,
    /// Full card text at extraction time, post-expansion.
    pub details: String,
}

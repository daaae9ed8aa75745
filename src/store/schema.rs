use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bank::Direction;
use crate::engine::progress::ProgressTally;

const SCHEMA_VERSION: u32 = 1;

/// Everything a session needs to resume where it left off. Hint level and
/// the answering/revealed phase are deliberately absent; both reset on any
/// movement, so a restored session always starts on a fresh question.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub schema_version: u32,
    pub saved_at: DateTime<Utc>,
    pub order: Vec<usize>,
    pub cursor: usize,
    pub stats: ProgressTally,
    #[serde(default)]
    pub direction: Direction,
}

impl SessionSnapshot {
    pub fn new(
        order: Vec<usize>,
        cursor: usize,
        stats: ProgressTally,
        direction: Direction,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            saved_at: Utc::now(),
            order,
            cursor,
            stats,
            direction,
        }
    }

    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}

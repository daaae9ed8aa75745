//! Session counters and derived progress figures.

use serde::{Deserialize, Serialize};

/// Outcome counters for one session. Counters only ever grow; the sole
/// way down is [`ProgressTally::reset`]. An item passed and later
/// answered counts in both buckets, so the sum can exceed the bank size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressTally {
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub wrong: u32,
    #[serde(default)]
    pub passed: u32,
}

impl ProgressTally {
    pub fn record_correct(&mut self) {
        self.correct += 1;
    }

    pub fn record_wrong(&mut self) {
        self.wrong += 1;
    }

    pub fn record_passed(&mut self) {
        self.passed += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Total outcome events recorded so far.
    pub fn attempted(&self) -> u32 {
        self.correct + self.wrong + self.passed
    }

    /// Items not yet attempted, floored at zero since repeat outcomes can
    /// push the attempt count past the bank size.
    pub fn remaining(&self, total: usize) -> usize {
        total.saturating_sub(self.attempted() as usize)
    }

    /// Share of the bank attempted, rounded to whole percent and clamped
    /// to 100. An empty bank reports zero.
    pub fn percent_complete(&self, total: usize) -> u8 {
        if total == 0 {
            return 0;
        }
        let ratio = f64::from(self.attempted()) / total as f64;
        (ratio * 100.0).round().clamp(0.0, 100.0) as u8
    }

    /// Correct share of answered items (passes excluded), zero before the
    /// first submission.
    pub fn accuracy_percent(&self) -> u8 {
        let answered = self.correct + self.wrong;
        if answered == 0 {
            return 0;
        }
        let ratio = f64::from(self.correct) / f64::from(answered);
        (ratio * 100.0).round() as u8
    }
}

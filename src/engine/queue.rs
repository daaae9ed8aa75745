//! Rotation order over the word bank.
//!
//! The queue holds a permutation of bank indices plus a cursor. Advancing
//! wraps around; deferring moves the current entry to the back without
//! moving the cursor, so the next entry slides into its place.

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

/// Why a saved queue could not be restored.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RestoreError {
    #[error("saved order has {found} entries but the bank has {expected}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("saved order is not a permutation of the bank indices")]
    NotAPermutation,
    #[error("saved cursor {cursor} is out of range for {len} entries")]
    CursorOutOfRange { cursor: usize, len: usize },
}

/// Cyclic review order over `0..len` bank indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewQueue {
    order: Vec<usize>,
    cursor: usize,
}

impl ReviewQueue {
    /// A freshly shuffled queue over `0..len`.
    pub fn shuffled<R: Rng>(len: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(rng);
        Self { order, cursor: 0 }
    }

    /// Rebuilds a queue from saved state, verifying that `order` is a
    /// full permutation of `0..expected_len` and the cursor is in range.
    /// An empty order carries no position, so its cursor resets to zero.
    pub fn from_parts(
        order: Vec<usize>,
        cursor: usize,
        expected_len: usize,
    ) -> Result<Self, RestoreError> {
        if order.len() != expected_len {
            return Err(RestoreError::LengthMismatch {
                expected: expected_len,
                found: order.len(),
            });
        }
        let mut seen = vec![false; expected_len];
        for &index in &order {
            if index >= expected_len || seen[index] {
                return Err(RestoreError::NotAPermutation);
            }
            seen[index] = true;
        }
        if order.is_empty() {
            return Ok(Self { order, cursor: 0 });
        }
        if cursor >= order.len() {
            return Err(RestoreError::CursorOutOfRange {
                cursor,
                len: order.len(),
            });
        }
        Ok(Self { order, cursor })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Bank index under the cursor, if the queue is non-empty.
    pub fn current(&self) -> Option<usize> {
        self.order.get(self.cursor).copied()
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor one step forward, wrapping at the end.
    pub fn advance(&mut self) {
        if !self.order.is_empty() {
            self.cursor = (self.cursor + 1) % self.order.len();
        }
    }

    /// Sends the current entry to the back of the order. The cursor does
    /// not move, so the entry that followed becomes current; when the
    /// cursor is already on the last slot the entry lands back under it.
    pub fn defer_current(&mut self) {
        if self.order.is_empty() {
            return;
        }
        let entry = self.order.remove(self.cursor);
        self.order.push(entry);
    }

    /// Re-randomizes the order and rewinds the cursor to the front.
    pub fn reshuffle<R: Rng>(&mut self, rng: &mut R) {
        self.order.shuffle(rng);
        self.cursor = 0;
    }
}

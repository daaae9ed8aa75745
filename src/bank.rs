//! Word-bank boundary types.
//!
//! The bank itself is loaded by the embedding application; once
//! constructed it is immutable and fixed-size for the lifetime of a
//! session.

use serde::{Deserialize, Serialize};

/// Separates alternative accepted spellings inside a [`WordPair::back`]
/// field, e.g. `"elma|apple"`.
pub const VARIANT_DELIMITER: char = '|';

/// Which side of a word pair is prompted and which is answered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Show `front`, expect any `back` variant.
    #[default]
    FrontToBack,
    /// Show the primary `back` variant, expect the whole `front` string.
    BackToFront,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::FrontToBack => "front_to_back",
            Direction::BackToFront => "back_to_front",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "front_to_back" => Some(Direction::FrontToBack),
            "back_to_front" => Some(Direction::BackToFront),
            _ => None,
        }
    }
}

/// One prompt/answer record from the external word list.
///
/// `back` may carry several accepted spellings joined by
/// [`VARIANT_DELIMITER`]; at least one of them is expected to be
/// non-empty. `front` is always a single string, delimiter or not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordPair {
    pub front: String,
    pub back: String,
}

impl WordPair {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }

    /// All delimited spellings of `back`, untrimmed and possibly empty.
    pub fn back_variants(&self) -> impl Iterator<Item = &str> {
        self.back.split(VARIANT_DELIMITER)
    }

    /// First non-empty `back` variant; used wherever a single canonical
    /// answer is displayed (reverse prompts, reveals, hint masks).
    /// Empty string only for a degenerate all-delimiter `back`.
    pub fn primary_back(&self) -> &str {
        self.back_variants()
            .map(str::trim)
            .find(|variant| !variant.is_empty())
            .unwrap_or("")
    }

    /// The text shown as the question under `direction`.
    pub fn prompt(&self, direction: Direction) -> &str {
        match direction {
            Direction::FrontToBack => &self.front,
            Direction::BackToFront => self.primary_back(),
        }
    }

    /// The text shown as the answer under `direction` (reveals, hints).
    pub fn answer_display(&self, direction: Direction) -> &str {
        match direction {
            Direction::FrontToBack => self.primary_back(),
            Direction::BackToFront => &self.front,
        }
    }
}

/// Immutable, index-addressed collection of word pairs.
#[derive(Clone, Debug, Default)]
pub struct WordBank {
    pairs: Vec<WordPair>,
}

impl WordBank {
    pub fn new(pairs: Vec<WordPair>) -> Self {
        Self { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WordPair> {
        self.pairs.get(index)
    }
}

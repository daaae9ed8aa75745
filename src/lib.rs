//! Vocabulary drill engine for bilingual word lists, embedded by a
//! presentation layer of the caller's choosing.
//!
//! Provides:
//! - Rotation scheduling with pass-to-back reinsertion over a fixed bank
//! - Turkish-aware answer normalization and exact matching with
//!   multi-variant answers
//! - Progressive letter-mask and syllable hints
//! - Progress counters with derived completion figures
//! - A session snapshot persisted through a pluggable store, restored on
//!   the next start
//!
//! [`session::QuizSession`] ties these together; everything underneath is
//! usable on its own.

pub mod bank;
pub mod config;
pub mod engine;
pub mod session;
pub mod store;

pub use bank::{Direction, WordBank, WordPair};
pub use config::Config;
pub use engine::{ProgressTally, RestoreError, ReviewQueue};
pub use session::{Phase, QuizSession, QuizView, SubmitOutcome};
pub use store::{JsonStore, SessionSnapshot, SnapshotStore};

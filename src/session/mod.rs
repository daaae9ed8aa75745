pub mod quiz;
pub mod view;

pub use quiz::{Phase, QuizSession, SubmitOutcome};
pub use view::QuizView;

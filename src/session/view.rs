use crate::bank::Direction;
use crate::engine::hints;
use crate::engine::progress::ProgressTally;
use crate::session::quiz::{Phase, QuizSession};

/// Read-only projection of a session for rendering one frame.
/// Borrowed fields point into the session, so build a fresh view after
/// every operation instead of holding one across mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizView<'a> {
    pub phase: Phase,
    pub direction: Direction,
    /// Question text for the current item; `None` when the bank is empty.
    pub prompt: Option<&'a str>,
    /// The expected answer, populated only once it has been revealed.
    pub answer: Option<&'a str>,
    /// Mask for the current hint level; `None` before the first hint.
    pub hint: Option<String>,
    pub hint_level: usize,
    pub stats: ProgressTally,
    pub total: usize,
    pub remaining: usize,
    pub percent_complete: u8,
}

impl<'a> QuizView<'a> {
    pub fn of(session: &'a QuizSession) -> Self {
        let pair = session.current();
        let direction = session.direction();
        let phase = session.phase();
        let hint_level = session.hint_level();
        let stats = session.stats();
        let total = session.total();

        let answer = match phase {
            Phase::Revealed => pair.map(|p| p.answer_display(direction)),
            Phase::Answering => None,
        };
        let hint = if hint_level > 0 {
            pair.map(|p| hints::mask(p.answer_display(direction), hint_level))
        } else {
            None
        };

        Self {
            phase,
            direction,
            prompt: pair.map(|p| p.prompt(direction)),
            answer,
            hint,
            hint_level,
            stats,
            total,
            remaining: stats.remaining(total),
            percent_complete: stats.percent_complete(total),
        }
    }
}

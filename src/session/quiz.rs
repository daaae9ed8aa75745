use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::bank::{Direction, WordBank, WordPair};
use crate::config::Config;
use crate::engine::hints;
use crate::engine::matcher;
use crate::engine::progress::ProgressTally;
use crate::engine::queue::ReviewQueue;
use crate::session::view::QuizView;
use crate::store::SnapshotStore;
use crate::store::schema::SessionSnapshot;

/// Where the current question stands. `Revealed` blocks further guesses
/// on that question until the user explicitly moves on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Answering,
    Revealed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Correct,
    Wrong,
    /// Blank input, no current item, or the answer is already revealed.
    Ignored,
}

/// One drill run over a word bank: pulls the current item from the
/// rotation queue, judges submissions, tracks counters, and mirrors the
/// durable part of its state through an optional snapshot store.
pub struct QuizSession {
    bank: WordBank,
    queue: ReviewQueue,
    tally: ProgressTally,
    direction: Direction,
    phase: Phase,
    hint_level: usize,
    autosave: bool,
    store: Option<Box<dyn SnapshotStore>>,
    rng: SmallRng,
}

impl QuizSession {
    /// A session without persistence; state lives and dies in memory.
    pub fn new(bank: WordBank, config: &Config) -> Self {
        Self::build(bank, config, None)
    }

    /// A session backed by a snapshot store. A usable saved snapshot wins
    /// over the config defaults; anything unusable (stale schema, wrong
    /// permutation, parse failure upstream) is discarded and the session
    /// starts fresh with a reshuffled order and zeroed counters.
    pub fn with_store(bank: WordBank, config: &Config, store: Box<dyn SnapshotStore>) -> Self {
        Self::build(bank, config, Some(store))
    }

    fn build(bank: WordBank, config: &Config, store: Option<Box<dyn SnapshotStore>>) -> Self {
        let mut rng = SmallRng::from_entropy();

        let restored = store.as_ref().and_then(|s| s.load()).and_then(|snapshot| {
            if snapshot.needs_reset() {
                tracing::warn!(
                    "discarding saved session with stale schema version {}",
                    snapshot.schema_version
                );
                return None;
            }
            match ReviewQueue::from_parts(snapshot.order, snapshot.cursor, bank.len()) {
                Ok(queue) => Some((queue, snapshot.stats, snapshot.direction)),
                Err(err) => {
                    tracing::warn!("discarding unusable saved session: {}", err);
                    None
                }
            }
        });

        let (queue, tally, direction) = restored.unwrap_or_else(|| {
            (
                ReviewQueue::shuffled(bank.len(), &mut rng),
                ProgressTally::default(),
                config.direction(),
            )
        });

        Self {
            bank,
            queue,
            tally,
            direction,
            phase: Phase::Answering,
            hint_level: 0,
            autosave: config.autosave,
            store,
            rng,
        }
    }

    pub fn current(&self) -> Option<&WordPair> {
        self.queue.current().and_then(|index| self.bank.get(index))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn hint_level(&self) -> usize {
        self.hint_level
    }

    pub fn stats(&self) -> ProgressTally {
        self.tally
    }

    pub fn total(&self) -> usize {
        self.bank.len()
    }

    pub fn view(&self) -> QuizView<'_> {
        QuizView::of(self)
    }

    /// Judge `answer` against the current item. A correct answer counts
    /// and moves to the next item; a wrong one counts and reveals the
    /// expected answer, leaving the queue where it is until [`Self::next`].
    /// Blank input never counts as a wrong guess.
    pub fn submit(&mut self, answer: &str) -> SubmitOutcome {
        if self.phase != Phase::Answering || answer.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }
        let correct = {
            let Some(pair) = self.current() else {
                return SubmitOutcome::Ignored;
            };
            match self.direction {
                Direction::FrontToBack => matcher::is_correct(answer, &pair.back),
                Direction::BackToFront => matcher::is_correct_single(answer, &pair.front),
            }
        };
        let outcome = if correct {
            self.tally.record_correct();
            self.queue.advance();
            self.hint_level = 0;
            SubmitOutcome::Correct
        } else {
            self.tally.record_wrong();
            self.phase = Phase::Revealed;
            SubmitOutcome::Wrong
        };
        self.persist();
        outcome
    }

    /// Skip the current item without judging it; it goes to the back of
    /// the queue and comes around again after everything else.
    pub fn pass(&mut self) {
        if self.phase != Phase::Answering || self.queue.is_empty() {
            return;
        }
        self.tally.record_passed();
        self.queue.defer_current();
        self.hint_level = 0;
        self.persist();
    }

    /// Show the answer without guessing. Counts nothing.
    pub fn reveal(&mut self) {
        if self.phase == Phase::Answering && !self.queue.is_empty() {
            self.phase = Phase::Revealed;
        }
    }

    /// One more character of the answer, masked form returned. The level
    /// has no cap; past the answer length the mask is simply the answer.
    pub fn request_hint(&mut self) -> Option<String> {
        if self.phase != Phase::Answering {
            return None;
        }
        let mask = {
            let pair = self.current()?;
            hints::mask(pair.answer_display(self.direction), self.hint_level + 1)
        };
        self.hint_level += 1;
        Some(mask)
    }

    /// Crude syllable rendering of the current answer, for display next
    /// to the mask.
    pub fn syllable_hint(&self) -> Option<String> {
        self.current()
            .map(|pair| hints::syllabify(pair.answer_display(self.direction)))
    }

    /// Dismiss a revealed answer and move to the next item.
    pub fn next(&mut self) {
        if self.phase != Phase::Revealed {
            return;
        }
        self.queue.advance();
        self.hint_level = 0;
        self.phase = Phase::Answering;
        self.persist();
    }

    /// Swap which side is prompted and which is answered. Always lands
    /// back in `Answering` with no hint showing.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.hint_level = 0;
        self.phase = Phase::Answering;
        self.persist();
    }

    /// Re-randomize the rotation order. Counters are untouched.
    pub fn reshuffle(&mut self) {
        self.queue.reshuffle(&mut self.rng);
        self.hint_level = 0;
        self.phase = Phase::Answering;
        self.persist();
    }

    /// Drop all progress: fresh shuffled order, zeroed counters, snapshot
    /// removed from the store. Callers are expected to confirm with the
    /// user first; this method asks no questions.
    pub fn reset_progress(&mut self) {
        self.queue.reshuffle(&mut self.rng);
        self.tally.reset();
        self.hint_level = 0;
        self.phase = Phase::Answering;
        if let Some(ref store) = self.store
            && let Err(err) = store.clear()
        {
            tracing::warn!("failed to clear saved session: {}", err);
        }
    }

    /// The durable subset of the session state as a snapshot blob.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(
            self.queue.order().to_vec(),
            self.queue.cursor(),
            self.tally,
            self.direction,
        )
    }

    /// Write the current snapshot through the store regardless of the
    /// autosave setting. Failures are logged and otherwise ignored; the
    /// in-memory session stays authoritative and a later save wins.
    pub fn save_now(&self) {
        if let Some(ref store) = self.store
            && let Err(err) = store.save(&self.snapshot())
        {
            tracing::warn!("failed to save session snapshot: {}", err);
        }
    }

    fn persist(&self) {
        if self.autosave {
            self.save_now();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::{Result, bail};

    use super::*;

    #[derive(Default)]
    struct MemoryInner {
        snapshot: Option<SessionSnapshot>,
        saves: u32,
        fail_saves: bool,
    }

    /// In-memory store; clones share state so tests can keep a handle
    /// after boxing one copy into the session.
    #[derive(Clone, Default)]
    struct MemoryStore {
        inner: Rc<RefCell<MemoryInner>>,
    }

    impl MemoryStore {
        fn with_snapshot(snapshot: SessionSnapshot) -> Self {
            let store = Self::default();
            store.inner.borrow_mut().snapshot = Some(snapshot);
            store
        }

        fn failing() -> Self {
            let store = Self::default();
            store.inner.borrow_mut().fail_saves = true;
            store
        }

        fn saved(&self) -> Option<SessionSnapshot> {
            self.inner.borrow().snapshot.clone()
        }

        fn save_count(&self) -> u32 {
            self.inner.borrow().saves
        }
    }

    impl SnapshotStore for MemoryStore {
        fn load(&self) -> Option<SessionSnapshot> {
            self.inner.borrow().snapshot.clone()
        }

        fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
            let mut inner = self.inner.borrow_mut();
            if inner.fail_saves {
                bail!("storage offline");
            }
            inner.saves += 1;
            inner.snapshot = Some(snapshot.clone());
            Ok(())
        }

        fn clear(&self) -> Result<()> {
            self.inner.borrow_mut().snapshot = None;
            Ok(())
        }
    }

    fn fixture_bank() -> WordBank {
        WordBank::new(vec![
            WordPair::new("apple", "elma"),
            WordPair::new("book", "kitap"),
            WordPair::new("pencil", "kalem|kurşun kalem"),
        ])
    }

    /// Session over the fixture bank with a pinned order, plus a handle
    /// to the shared store for inspecting what got saved.
    fn session_with_order(order: Vec<usize>) -> (QuizSession, MemoryStore) {
        let snapshot =
            SessionSnapshot::new(order, 0, ProgressTally::default(), Direction::FrontToBack);
        let store = MemoryStore::with_snapshot(snapshot);
        let session =
            QuizSession::with_store(fixture_bank(), &Config::default(), Box::new(store.clone()));
        (session, store)
    }

    #[test]
    fn test_correct_submission_advances_and_counts() {
        let (mut session, _store) = session_with_order(vec![0, 1, 2]);
        assert_eq!(session.view().prompt, Some("apple"));

        assert_eq!(session.submit("Elma"), SubmitOutcome::Correct);
        assert_eq!(session.stats().correct, 1);
        assert_eq!(session.phase(), Phase::Answering);
        assert_eq!(session.view().prompt, Some("book"));
    }

    #[test]
    fn test_wrong_submission_reveals_without_advancing() {
        let (mut session, _store) = session_with_order(vec![0, 1, 2]);

        assert_eq!(session.submit("armut"), SubmitOutcome::Wrong);
        assert_eq!(session.stats().wrong, 1);
        assert_eq!(session.phase(), Phase::Revealed);

        let view = session.view();
        assert_eq!(view.prompt, Some("apple"));
        assert_eq!(view.answer, Some("elma"));
    }

    #[test]
    fn test_blank_submission_is_ignored() {
        let (mut session, store) = session_with_order(vec![0, 1, 2]);

        assert_eq!(session.submit("   "), SubmitOutcome::Ignored);
        assert_eq!(session.stats(), ProgressTally::default());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_submission_while_revealed_is_ignored() {
        let (mut session, _store) = session_with_order(vec![0, 1, 2]);
        session.reveal();

        assert_eq!(session.submit("elma"), SubmitOutcome::Ignored);
        assert_eq!(session.stats().correct, 0);
        assert_eq!(session.phase(), Phase::Revealed);
    }

    #[test]
    fn test_pass_defers_item_to_back_of_queue() {
        let (mut session, _store) = session_with_order(vec![0, 1, 2]);

        session.pass();
        assert_eq!(session.stats().passed, 1);
        assert_eq!(session.view().prompt, Some("book"));

        // The passed item comes around again after the other two.
        assert_eq!(session.submit("kitap"), SubmitOutcome::Correct);
        assert_eq!(session.submit("kalem"), SubmitOutcome::Correct);
        assert_eq!(session.view().prompt, Some("apple"));
    }

    #[test]
    fn test_next_dismisses_revealed_answer() {
        let (mut session, _store) = session_with_order(vec![0, 1, 2]);
        session.submit("wrong");
        assert_eq!(session.phase(), Phase::Revealed);

        session.next();
        assert_eq!(session.phase(), Phase::Answering);
        assert_eq!(session.view().prompt, Some("book"));
        assert_eq!(session.hint_level(), 0);
    }

    #[test]
    fn test_next_while_answering_is_a_noop() {
        let (mut session, store) = session_with_order(vec![0, 1, 2]);
        session.next();
        assert_eq!(session.view().prompt, Some("apple"));
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_reveal_blocks_pass_and_hints() {
        let (mut session, _store) = session_with_order(vec![0, 1, 2]);
        session.reveal();

        session.pass();
        assert_eq!(session.stats().passed, 0);
        assert_eq!(session.request_hint(), None);
        assert_eq!(session.view().answer, Some("elma"));
    }

    #[test]
    fn test_hints_reveal_progressively() {
        let (mut session, _store) = session_with_order(vec![2, 0, 1]);
        assert_eq!(session.view().prompt, Some("pencil"));

        assert_eq!(session.request_hint().as_deref(), Some("k...."));
        assert_eq!(session.request_hint().as_deref(), Some("ka..."));
        assert_eq!(session.hint_level(), 2);
        assert_eq!(session.view().hint.as_deref(), Some("ka..."));
    }

    #[test]
    fn test_hint_past_answer_length_shows_everything() {
        let (mut session, _store) = session_with_order(vec![0, 1, 2]);
        for _ in 0..10 {
            session.request_hint();
        }
        assert_eq!(session.request_hint().as_deref(), Some("elma"));
    }

    #[test]
    fn test_hint_resets_when_question_changes() {
        let (mut session, _store) = session_with_order(vec![0, 1, 2]);
        session.request_hint();
        assert_eq!(session.hint_level(), 1);

        session.submit("elma");
        assert_eq!(session.hint_level(), 0);
        assert_eq!(session.view().hint, None);
    }

    #[test]
    fn test_hint_uses_primary_variant_of_the_answer() {
        let (mut session, _store) = session_with_order(vec![2, 0, 1]);
        // "kalem|kurşun kalem" masks as its first variant only.
        assert_eq!(session.request_hint().as_deref(), Some("k...."));
        assert_eq!(session.syllable_hint().as_deref(), Some("ka-le-m"));
    }

    #[test]
    fn test_direction_swap_flips_prompt_and_judging() {
        let (mut session, store) = session_with_order(vec![0, 1, 2]);
        session.set_direction(Direction::BackToFront);

        assert_eq!(session.view().prompt, Some("elma"));
        assert_eq!(session.submit("apple"), SubmitOutcome::Correct);
        assert_eq!(store.saved().unwrap().direction, Direction::BackToFront);
    }

    #[test]
    fn test_reverse_direction_does_not_split_variants() {
        let (mut session, _store) = session_with_order(vec![2, 0, 1]);
        session.set_direction(Direction::BackToFront);

        // Prompt shows the first variant; the answer is the front text.
        assert_eq!(session.view().prompt, Some("kalem"));
        assert_eq!(session.submit("pencil"), SubmitOutcome::Correct);
    }

    #[test]
    fn test_autosave_follows_every_counted_operation() {
        let (mut session, store) = session_with_order(vec![0, 1, 2]);

        session.submit("elma");
        assert_eq!(store.save_count(), 1);
        session.pass();
        assert_eq!(store.save_count(), 2);
        session.submit("wrong");
        assert_eq!(store.save_count(), 3);
        session.next();
        assert_eq!(store.save_count(), 4);
        session.reshuffle();
        assert_eq!(store.save_count(), 5);
    }

    #[test]
    fn test_reveal_and_hint_do_not_save() {
        let (mut session, store) = session_with_order(vec![0, 1, 2]);

        session.request_hint();
        session.reveal();
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_autosave_off_saves_only_on_request() {
        let store = MemoryStore::default();
        let config = Config {
            autosave: false,
            ..Config::default()
        };
        let mut session = QuizSession::with_store(fixture_bank(), &config, Box::new(store.clone()));

        session.pass();
        session.reshuffle();
        assert_eq!(store.save_count(), 0);

        session.save_now();
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.saved().unwrap().stats.passed, 1);
    }

    #[test]
    fn test_save_failure_leaves_session_usable() {
        let store = MemoryStore::failing();
        let mut session =
            QuizSession::with_store(fixture_bank(), &Config::default(), Box::new(store.clone()));

        session.pass();
        assert_eq!(session.stats().passed, 1);
        assert_eq!(store.save_count(), 0);
        assert!(session.current().is_some());
    }

    #[test]
    fn test_restore_resumes_saved_position() {
        let stats = ProgressTally {
            correct: 2,
            wrong: 1,
            passed: 0,
        };
        let snapshot = SessionSnapshot::new(vec![2, 0, 1], 1, stats, Direction::BackToFront);
        let store = MemoryStore::with_snapshot(snapshot);
        let session = QuizSession::with_store(fixture_bank(), &Config::default(), Box::new(store));

        assert_eq!(session.stats(), stats);
        assert_eq!(session.direction(), Direction::BackToFront);
        // order[1] == 0, so the current prompt is pair 0's back text.
        assert_eq!(session.view().prompt, Some("elma"));
    }

    #[test]
    fn test_restore_with_wrong_length_resets_everything() {
        let stats = ProgressTally {
            correct: 5,
            wrong: 2,
            passed: 1,
        };
        let snapshot = SessionSnapshot::new(vec![0, 1], 0, stats, Direction::BackToFront);
        let store = MemoryStore::with_snapshot(snapshot);
        let session = QuizSession::with_store(fixture_bank(), &Config::default(), Box::new(store));

        assert_eq!(session.stats(), ProgressTally::default());
        assert_eq!(session.direction(), Direction::FrontToBack);
        assert_eq!(session.total(), 3);
        assert!(session.current().is_some());
    }

    #[test]
    fn test_restore_with_stale_schema_resets_everything() {
        let mut snapshot = SessionSnapshot::new(
            vec![0, 1, 2],
            2,
            ProgressTally {
                correct: 3,
                wrong: 0,
                passed: 0,
            },
            Direction::BackToFront,
        );
        snapshot.schema_version = 99;
        let store = MemoryStore::with_snapshot(snapshot);
        let session = QuizSession::with_store(fixture_bank(), &Config::default(), Box::new(store));

        assert_eq!(session.stats(), ProgressTally::default());
        assert_eq!(session.direction(), Direction::FrontToBack);
    }

    #[test]
    fn test_reset_progress_zeroes_and_clears_store() {
        let (mut session, store) = session_with_order(vec![0, 1, 2]);
        session.submit("elma");
        session.pass();
        assert!(store.saved().is_some());

        session.reset_progress();
        assert_eq!(session.stats(), ProgressTally::default());
        assert_eq!(session.phase(), Phase::Answering);
        assert!(store.saved().is_none());

        let snapshot = session.snapshot();
        assert_eq!(snapshot.cursor, 0);
        let mut sorted = snapshot.order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2]);
    }

    #[test]
    fn test_reshuffle_keeps_stats_and_rewinds() {
        let (mut session, _store) = session_with_order(vec![0, 1, 2]);
        session.submit("elma");
        session.reshuffle();

        assert_eq!(session.stats().correct, 1);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.cursor, 0);
        let mut sorted = snapshot.order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2]);
    }

    #[test]
    fn test_pass_then_answer_counts_in_both_buckets() {
        // An item can contribute to passed and correct across its
        // lifetime; the counters are events, not a partition of items.
        let (mut session, _store) = session_with_order(vec![0, 1, 2]);

        session.pass();
        session.submit("kitap");
        session.submit("kalem");
        assert_eq!(session.view().prompt, Some("apple"));
        session.submit("elma");

        let stats = session.stats();
        assert_eq!(stats.passed, 1);
        assert_eq!(stats.correct, 3);
        assert_eq!(stats.attempted(), 4);
        assert_eq!(stats.remaining(session.total()), 0);
        assert_eq!(stats.percent_complete(session.total()), 100);
    }

    #[test]
    fn test_empty_bank_is_inert() {
        let mut session = QuizSession::new(WordBank::new(Vec::new()), &Config::default());

        assert_eq!(session.submit("elma"), SubmitOutcome::Ignored);
        session.pass();
        session.reveal();
        assert_eq!(session.request_hint(), None);
        assert_eq!(session.syllable_hint(), None);
        session.next();
        session.reshuffle();

        let view = session.view();
        assert_eq!(view.prompt, None);
        assert_eq!(view.answer, None);
        assert_eq!(view.total, 0);
        assert_eq!(view.percent_complete, 0);
        assert_eq!(session.phase(), Phase::Answering);
    }

    #[test]
    fn test_view_reports_progress_numbers() {
        let (mut session, _store) = session_with_order(vec![0, 1, 2]);
        session.submit("elma");
        session.pass();

        let view = session.view();
        assert_eq!(view.total, 3);
        assert_eq!(view.remaining, 1);
        assert_eq!(view.percent_complete, 67);
    }

    #[test]
    fn test_snapshot_round_trips_through_serde() {
        let (mut session, _store) = session_with_order(vec![2, 1, 0]);
        session.submit("kalem");

        let snapshot = session.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.order, snapshot.order);
        assert_eq!(back.cursor, snapshot.cursor);
        assert_eq!(back.stats, snapshot.stats);
        assert_eq!(back.direction, snapshot.direction);
    }
}

//! The quiz session store.
//!
//! Owns the live [`Session`], the countdown and the persistence port, and is
//! the only place session state changes. Every applied mutation is followed
//! by a synchronous notification of the registered listeners.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::models::{Difficulty, Question, QuestionState, Session};
use crate::results::QuizResults;

use super::countdown::{Countdown, CountdownId, Tick};
use super::persistence::KeyValueStore;
use super::snapshot::{PROGRESS_KEY, SavedSnapshot};

/// Seconds of countdown between two autosaves.
pub const AUTOSAVE_EVERY_SECS: u32 = 10;

type Listener = Box<dyn FnMut(&Session)>;

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

pub struct SessionStore {
    session: Session,
    storage: Box<dyn KeyValueStore>,
    clock: Clock,
    countdown: Countdown,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl SessionStore {
    /// Create a store with an empty session.
    ///
    /// Countdown ticks are delivered on `ticks`; the owner must feed them
    /// back through [`SessionStore::on_tick`].
    pub fn new<S>(storage: S, clock: Clock, ticks: mpsc::UnboundedSender<Tick>) -> Self
    where
        S: KeyValueStore + 'static,
    {
        Self {
            session: Session::default(),
            storage: Box::new(storage),
            clock,
            countdown: Countdown::new(ticks),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Score breakdown derived from the current session.
    pub fn results(&self) -> QuizResults {
        QuizResults::from_session(&self.session)
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    pub fn is_timer_running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn active_countdown(&self) -> Option<CountdownId> {
        self.countdown.active()
    }

    /// Register a listener called after every applied mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Session) + 'static,
    {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Install a fresh question set. Questions must already be shuffled.
    pub fn load_questions(&mut self, questions: Vec<Question>) {
        if self.session.is_completed {
            debug!("load_questions ignored on a completed session");
            return;
        }

        let mut states = vec![QuestionState::default(); questions.len()];
        if let Some(first) = states.first_mut() {
            first.visited = true;
        }
        info!(count = questions.len(), "questions loaded");

        self.session.questions = questions;
        self.session.question_states = states;
        self.session.current_question_index = 0;
        self.notify();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.session.email = email.into();
        self.notify();
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.session.difficulty = difficulty;
        self.notify();
    }

    /// Move to `index`, marking it visited. Out-of-range targets are ignored.
    pub fn navigate_to(&mut self, index: usize) {
        if self.session.is_completed {
            return;
        }
        let Some(state) = self.session.question_states.get_mut(index) else {
            debug!(index, "navigate_to out of range");
            return;
        };

        state.visited = true;
        self.session.current_question_index = index;
        self.autosave();
        self.notify();
    }

    /// Record `answer` for the current question, replacing any earlier pick.
    pub fn select_answer(&mut self, answer: impl Into<String>) {
        if self.session.is_completed {
            return;
        }
        let index = self.session.current_question_index;
        let Some(state) = self.session.question_states.get_mut(index) else {
            debug!("select_answer with no active question");
            return;
        };

        state.answered = true;
        state.selected_answer = Some(answer.into());
        self.autosave();
        self.notify();
    }

    /// Finish the attempt. Calling it again has no further effect.
    pub fn submit(&mut self) {
        if self.session.is_completed {
            return;
        }
        self.complete();
        info!(
            answered = self.session.answered_count(),
            time_remaining = self.session.time_remaining,
            "quiz submitted"
        );
        self.notify();
    }

    /// Drop the current attempt and its snapshot, back to an empty session.
    pub fn reset(&mut self) {
        self.countdown.stop();
        self.delete_snapshot();
        self.session = Session::default();
        debug!("session reset");
        self.notify();
    }

    /// Start the countdown, replacing any countdown already running.
    pub fn start_timer(&mut self) {
        if self.session.is_completed {
            debug!("start_timer ignored on a completed session");
            return;
        }
        self.session.start_time = Some(self.clock.now());
        self.countdown.start();
        self.notify();
    }

    /// Apply one countdown tick. Returns whether the tick was applied.
    ///
    /// Ticks from a countdown that is no longer running are dropped.
    pub fn on_tick(&mut self, tick: Tick) -> bool {
        if !self.countdown.accepts(tick) || self.session.is_completed {
            return false;
        }

        let before = self.session.time_remaining;
        if before <= 1 {
            self.session.time_remaining = 0;
            self.complete();
            info!("time expired, quiz auto-submitted");
        } else {
            self.session.time_remaining = before - 1;
            if before % AUTOSAVE_EVERY_SECS == 0 {
                self.autosave();
            }
        }

        self.notify();
        true
    }

    /// Whether a resumable snapshot exists.
    pub fn has_saved_progress(&self) -> bool {
        self.load_snapshot().is_some()
    }

    /// Replace the session with the saved snapshot, if one is resumable.
    ///
    /// The countdown is not restarted; call [`SessionStore::start_timer`].
    pub fn resume_from_saved(&mut self) -> bool {
        let Some(snapshot) = self.load_snapshot() else {
            return false;
        };

        self.countdown.stop();
        self.session = snapshot.into_session(self.clock.now());
        info!(
            time_remaining = self.session.time_remaining,
            index = self.session.current_question_index,
            "resumed saved progress"
        );
        self.notify();
        true
    }

    /// Delete the saved snapshot without touching the live session.
    pub fn discard_saved(&mut self) {
        self.delete_snapshot();
    }

    /// Stop the countdown and write a final snapshot so the attempt can be
    /// resumed later.
    pub fn suspend(&mut self) {
        if self.countdown.stop() {
            debug!("session suspended");
        }
        self.autosave();
    }

    /// Shared terminal transition for submit and expiry.
    fn complete(&mut self) {
        self.countdown.stop();
        self.delete_snapshot();
        self.session.is_completed = true;
    }

    fn autosave(&self) {
        if !self.session.is_loaded() || self.session.is_completed {
            return;
        }

        let snapshot = SavedSnapshot::capture(&self.session, self.clock.now());
        let json = match serde_json::to_string(&snapshot) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize progress");
                return;
            }
        };
        match self.storage.write(PROGRESS_KEY, &json) {
            Ok(()) => debug!(time_remaining = snapshot.time_remaining, "progress saved"),
            Err(e) => warn!(error = %e, "failed to save progress"),
        }
    }

    fn load_snapshot(&self) -> Option<SavedSnapshot> {
        let raw = match self.storage.read(PROGRESS_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "failed to read saved progress");
                return None;
            }
        };
        let snapshot = SavedSnapshot::parse(&raw)?;
        if !snapshot.is_consistent() {
            warn!("saved progress is inconsistent, discarding it");
            self.delete_snapshot();
            return None;
        }
        snapshot.is_resumable(self.clock.now()).then_some(snapshot)
    }

    fn delete_snapshot(&self) {
        if let Err(e) = self.storage.delete(PROGRESS_KEY) {
            warn!(error = %e, "failed to delete saved progress");
        }
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.session);
        }
    }
}

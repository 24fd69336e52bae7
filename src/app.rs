use std::cell::Cell;
use std::rc::Rc;

use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::models::{AppState, Difficulty, QUESTION_COUNT, Question, Session};
use crate::provider::{ProviderError, QuestionSource};
use crate::results::QuizResults;
use crate::store::{EMAIL_KEY, SessionStore, Tick};

const MAX_EMAIL_LENGTH: usize = 64;

type PendingQuestions = oneshot::Receiver<Result<Vec<Question>, ProviderError>>;

/// State of the start screen form.
#[derive(Debug, Default)]
pub struct StartForm {
    pub email: String,
    /// `None` until the user picks a level.
    pub difficulty: Option<Difficulty>,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub resume_prompt: bool,
}

/// Terminal application: the three screens on top of one [`SessionStore`].
pub struct App {
    pub state: AppState,
    store: SessionStore,
    source: QuestionSource,
    start: StartForm,
    pending: Option<PendingQuestions>,
    answer_cursor: usize,
    confirm_submit: bool,
    result_scroll: usize,
    dirty: Rc<Cell<bool>>,
    should_quit: bool,
}

impl App {
    pub fn new(mut store: SessionStore, source: QuestionSource) -> Self {
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        store.subscribe(move |_| flag.set(true));

        let mut app = Self {
            state: AppState::Start,
            store,
            source,
            start: StartForm::default(),
            pending: None,
            answer_cursor: 0,
            confirm_submit: false,
            result_scroll: 0,
            dirty,
            should_quit: false,
        };
        app.enter_start();
        app
    }

    pub fn session(&self) -> &Session {
        self.store.session()
    }

    pub fn results(&self) -> QuizResults {
        self.store.results()
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn start_form(&self) -> &StartForm {
        &self.start
    }

    pub fn source(&self) -> &QuestionSource {
        &self.source
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn answer_cursor(&self) -> usize {
        self.answer_cursor
    }

    pub fn confirm_submit(&self) -> bool {
        self.confirm_submit
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns whether anything changed since the last call.
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    pub fn mark_dirty(&self) {
        self.dirty.set(true);
    }

    // ---- start screen ----

    fn enter_start(&mut self) {
        self.state = AppState::Start;
        self.start = StartForm {
            email: self.remembered_email().unwrap_or_default(),
            resume_prompt: self.store.has_saved_progress(),
            ..StartForm::default()
        };
        self.mark_dirty();
    }

    fn remembered_email(&self) -> Option<String> {
        match self.store.storage().read(EMAIL_KEY) {
            Ok(email) => email.filter(|e| !e.is_empty()),
            Err(e) => {
                warn!(error = %e, "failed to read remembered email");
                None
            }
        }
    }

    pub fn email_push(&mut self, c: char) {
        if self.start.email.chars().count() < MAX_EMAIL_LENGTH && !c.is_control() {
            self.start.email.push(c);
            self.start.error = None;
            self.mark_dirty();
        }
    }

    pub fn email_pop(&mut self) {
        self.start.email.pop();
        self.start.error = None;
        self.mark_dirty();
    }

    /// Clear the remembered email and the input field.
    pub fn forget_email(&mut self) {
        if let Err(e) = self.store.storage().delete(EMAIL_KEY) {
            warn!(error = %e, "failed to clear remembered email");
        }
        self.start.email.clear();
        self.start.notice = Some("Your email has been cleared.".to_string());
        self.mark_dirty();
    }

    pub fn select_next_difficulty(&mut self) {
        self.start.difficulty = Some(match self.start.difficulty {
            None => Difficulty::ALL[0],
            Some(d) => cycle(d, 1),
        });
        self.start.error = None;
        self.mark_dirty();
    }

    pub fn select_previous_difficulty(&mut self) {
        self.start.difficulty = Some(match self.start.difficulty {
            None => Difficulty::ALL[Difficulty::ALL.len() - 1],
            Some(d) => cycle(d, Difficulty::ALL.len() - 1),
        });
        self.start.error = None;
        self.mark_dirty();
    }

    /// Validate the form and kick off the question fetch.
    pub fn begin_quiz(&mut self) {
        if self.is_loading() {
            return;
        }
        let email = self.start.email.trim().to_string();
        if !is_valid_email(&email) {
            self.start.error = Some("Please enter a valid email address".to_string());
            self.mark_dirty();
            return;
        }
        let Some(difficulty) = self.start.difficulty else {
            self.start.error = Some("Please select a difficulty level".to_string());
            self.mark_dirty();
            return;
        };

        if let Err(e) = self.store.storage().write(EMAIL_KEY, &email) {
            warn!(error = %e, "failed to remember email");
        }

        let (tx, rx) = oneshot::channel();
        let source = self.source.clone();
        tokio::spawn(async move {
            let _ = tx.send(source.fetch(difficulty, QUESTION_COUNT).await);
        });

        info!(?difficulty, source = %self.source.describe(), "loading questions");
        self.start.email = email;
        self.start.error = None;
        self.start.notice = None;
        self.pending = Some(rx);
        self.mark_dirty();
    }

    /// Pick up a finished fetch, if any.
    pub fn poll_loading(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let outcome = match pending.try_recv() {
            Ok(outcome) => outcome,
            Err(oneshot::error::TryRecvError::Empty) => return,
            Err(oneshot::error::TryRecvError::Closed) => {
                warn!("question fetch task ended without a result");
                self.pending = None;
                self.fail_loading();
                return;
            }
        };
        self.pending = None;

        match outcome {
            Ok(questions) => {
                let difficulty = self.start.difficulty.unwrap_or_default();
                self.store.set_email(self.start.email.clone());
                self.store.set_difficulty(difficulty);
                self.store.load_questions(questions);
                self.store.start_timer();
                self.enter_quiz();
            }
            Err(e) => {
                warn!(error = %e, "failed to load questions");
                self.fail_loading();
            }
        }
    }

    fn fail_loading(&mut self) {
        self.start.error = Some("Failed to load quiz. Please try again.".to_string());
        self.mark_dirty();
    }

    pub fn resume_saved(&mut self) {
        self.start.resume_prompt = false;
        if self.store.resume_from_saved() {
            self.store.start_timer();
            self.enter_quiz();
        } else {
            self.start.error = Some("Saved progress is no longer available.".to_string());
        }
        self.mark_dirty();
    }

    pub fn discard_saved(&mut self) {
        self.store.discard_saved();
        self.start.resume_prompt = false;
        self.mark_dirty();
    }

    // ---- quiz screen ----

    fn enter_quiz(&mut self) {
        self.state = AppState::Quiz;
        self.confirm_submit = false;
        self.sync_answer_cursor();
        self.mark_dirty();
    }

    fn sync_answer_cursor(&mut self) {
        let session = self.store.session();
        self.answer_cursor = match (session.current_question(), session.current_state()) {
            (Some(question), Some(state)) => state
                .selected_answer
                .as_deref()
                .and_then(|sel| question.all_answers.iter().position(|a| a == sel))
                .unwrap_or(0),
            _ => 0,
        };
    }

    fn answer_count(&self) -> usize {
        self.session()
            .current_question()
            .map_or(0, |q| q.all_answers.len())
    }

    pub fn select_next_answer(&mut self) {
        let count = self.answer_count();
        if count > 0 {
            self.answer_cursor = (self.answer_cursor + 1) % count;
            self.mark_dirty();
        }
    }

    pub fn select_previous_answer(&mut self) {
        let count = self.answer_count();
        if count > 0 {
            self.answer_cursor = (self.answer_cursor + count - 1) % count;
            self.mark_dirty();
        }
    }

    /// Record the highlighted answer for the current question.
    pub fn choose_answer(&mut self) {
        let answer = self
            .session()
            .current_question()
            .and_then(|q| q.all_answers.get(self.answer_cursor))
            .cloned();
        if let Some(answer) = answer {
            self.store.select_answer(answer);
        }
    }

    pub fn next_question(&mut self) {
        let index = self.session().current_question_index();
        if index + 1 < self.session().total_questions() {
            self.go_to(index + 1);
        }
    }

    pub fn previous_question(&mut self) {
        let index = self.session().current_question_index();
        if index > 0 {
            self.go_to(index - 1);
        }
    }

    pub fn next_unanswered(&mut self) {
        if let Some(index) = self.session().next_unanswered_index() {
            self.go_to(index);
        }
    }

    pub fn go_to(&mut self, index: usize) {
        self.store.navigate_to(index);
        self.sync_answer_cursor();
    }

    pub fn request_submit(&mut self) {
        self.confirm_submit = true;
        self.mark_dirty();
    }

    pub fn cancel_submit(&mut self) {
        self.confirm_submit = false;
        self.mark_dirty();
    }

    pub fn submit(&mut self) {
        self.confirm_submit = false;
        self.store.submit();
        self.sync_screen();
    }

    /// Apply a countdown tick from the event loop.
    pub fn on_tick(&mut self, tick: Tick) {
        if self.store.on_tick(tick) {
            self.sync_screen();
        }
    }

    /// Follow the session into the results screen once it completes.
    fn sync_screen(&mut self) {
        if self.state == AppState::Quiz && self.session().is_completed() {
            debug!("session completed, showing results");
            self.state = AppState::Results;
            self.confirm_submit = false;
            self.result_scroll = 0;
            self.mark_dirty();
        }
    }

    // ---- results screen ----

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.session().total_questions().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
        self.mark_dirty();
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
        self.mark_dirty();
    }

    /// Throw the finished attempt away and go back to the start screen.
    pub fn restart(&mut self) {
        self.store.reset();
        self.result_scroll = 0;
        self.enter_start();
    }

    /// Leave the app. An unfinished attempt is saved for later.
    pub fn quit(&mut self) {
        if self.state == AppState::Quiz && !self.session().is_completed() {
            self.store.suspend();
            info!("quiz suspended on exit");
        }
        self.should_quit = true;
    }
}

fn cycle(difficulty: Difficulty, step: usize) -> Difficulty {
    let all = Difficulty::ALL;
    let index = all.iter().position(|d| *d == difficulty).unwrap_or(0);
    all[(index + step) % all.len()]
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Some dot must split the domain into two non-empty parts.
    domain
        .match_indices('.')
        .any(|(i, _)| i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b@c.d.e"));
        assert!(is_valid_email("x@y.z"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("ada"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@.com"));
        assert!(!is_valid_email("ada@example."));
        assert!(!is_valid_email("ada@@example.com"));
        assert!(!is_valid_email("ada lovelace@example.com"));
    }

    #[test]
    fn test_difficulty_cycle() {
        assert_eq!(cycle(Difficulty::Easy, 1), Difficulty::Medium);
        assert_eq!(cycle(Difficulty::Mix, 1), Difficulty::Easy);
        assert_eq!(cycle(Difficulty::Easy, 3), Difficulty::Mix);
    }
}

//! Key bindings for each screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::models::AppState;

/// Apply one key press. Returns true if the app should exit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return true;
    }

    match app.state {
        AppState::Start => handle_start_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key.code),
        AppState::Results => handle_results_input(app, key.code),
    }
    app.should_quit()
}

fn handle_start_input(app: &mut App, key: KeyEvent) {
    if app.start_form().resume_prompt {
        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => app.resume_saved(),
            KeyCode::Char('n') | KeyCode::Char('N') => app.discard_saved(),
            KeyCode::Esc => app.quit(),
            _ => {}
        }
        return;
    }

    if app.is_loading() {
        if key.code == KeyCode::Esc {
            app.quit();
        }
        return;
    }

    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => app.forget_email(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.email_push(c),
        KeyCode::Backspace => app.email_pop(),
        KeyCode::Left | KeyCode::Up => app.select_previous_difficulty(),
        KeyCode::Right | KeyCode::Down | KeyCode::Tab => app.select_next_difficulty(),
        KeyCode::Enter => app.begin_quiz(),
        KeyCode::Esc => app.quit(),
        _ => {}
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) {
    if app.confirm_submit() {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.submit(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_submit(),
            _ => {}
        }
        return;
    }

    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_answer(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_answer(),
        KeyCode::Enter | KeyCode::Char(' ') => app.choose_answer(),
        KeyCode::Left | KeyCode::Char('h') => app.previous_question(),
        KeyCode::Right | KeyCode::Char('l') => app.next_question(),
        KeyCode::Tab => app.next_unanswered(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.request_submit(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}

fn handle_results_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.quit(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tokio::sync::mpsc;

    use super::*;
    use crate::clock::Clock;
    use crate::provider::QuestionSource;
    use crate::store::{EMAIL_KEY, KeyValueStore, MemoryStore, PROGRESS_KEY, SessionStore};

    const BANK: &str = r#"[
        {"type": "boolean", "difficulty": "easy", "category": "Misc",
         "question": "Rust has a garbage collector.", "correct_answer": "False",
         "incorrect_answers": ["True"]},
        {"type": "multiple", "difficulty": "easy", "category": "Misc",
         "question": "2 + 2?", "correct_answer": "4",
         "incorrect_answers": ["3", "5", "22"]}
    ]"#;

    fn bank_file() -> PathBuf {
        let path = std::env::temp_dir().join(format!("bank-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, BANK).unwrap();
        path
    }

    fn app_with(storage: MemoryStore, path: PathBuf) -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        let store = SessionStore::new(storage, Clock::System, tx);
        App::new(store, QuestionSource::File(path))
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_input(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    async fn wait_loaded(app: &mut App) {
        while app.is_loading() {
            tokio::task::yield_now().await;
            app.poll_loading();
        }
    }

    #[tokio::test]
    async fn test_start_validation_messages() {
        let mut app = app_with(MemoryStore::new(), bank_file());

        type_text(&mut app, "not-an-email");
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.start_form().error.as_deref(),
            Some("Please enter a valid email address")
        );

        for _ in 0.."not-an-email".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "ada@example.com");
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.start_form().error.as_deref(),
            Some("Please select a difficulty level")
        );
        assert!(!app.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_attempt_via_keys() {
        let storage = MemoryStore::new();
        let path = bank_file();
        let mut app = app_with(storage.clone(), path.clone());

        type_text(&mut app, "ada@example.com");
        press(&mut app, KeyCode::Right);
        assert_eq!(app.start_form().difficulty, Some(crate::models::Difficulty::Easy));
        press(&mut app, KeyCode::Enter);
        assert!(app.is_loading());
        wait_loaded(&mut app).await;

        assert_eq!(app.state, AppState::Quiz);
        assert_eq!(
            storage.read(EMAIL_KEY).unwrap().as_deref(),
            Some("ada@example.com")
        );
        assert_eq!(app.session().total_questions(), 2);
        assert!(app.store().is_timer_running());

        // Pick whatever is highlighted, then move on and answer correctly.
        press(&mut app, KeyCode::Enter);
        assert!(app.session().question_states()[0].answered);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session().current_question_index(), 1);
        assert!(storage.contains(PROGRESS_KEY));

        let correct = app.session().questions()[1].correct_answer.clone();
        while app.session().questions()[1].all_answers[app.answer_cursor()] != correct {
            press(&mut app, KeyCode::Down);
        }
        press(&mut app, KeyCode::Char(' '));

        press(&mut app, KeyCode::Char('s'));
        assert!(app.confirm_submit());
        press(&mut app, KeyCode::Char('n'));
        assert!(!app.confirm_submit());
        assert_eq!(app.state, AppState::Quiz);

        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.state, AppState::Results);
        assert!(!storage.contains(PROGRESS_KEY));
        assert!(app.results().correct >= 1);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.state, AppState::Start);
        assert_eq!(app.start_form().email, "ada@example.com");
        assert!(!app.session().is_loaded());

        assert!(press(&mut app, KeyCode::Esc));
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_mid_quiz_offers_resume() {
        let storage = MemoryStore::new();
        let path = bank_file();
        let mut app = app_with(storage.clone(), path.clone());

        type_text(&mut app, "ada@example.com");
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Enter);
        wait_loaded(&mut app).await;
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.session().current_question_index(), 1);
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(!app.store().is_timer_running());

        let mut next = app_with(storage.clone(), path.clone());
        assert!(next.start_form().resume_prompt);
        press(&mut next, KeyCode::Char('r'));
        assert_eq!(next.state, AppState::Quiz);
        assert_eq!(next.session().current_question_index(), 1);
        assert!(next.store().is_timer_running());

        let mut other = app_with(storage.clone(), path.clone());
        press(&mut other, KeyCode::Char('n'));
        assert!(!other.start_form().resume_prompt);
        assert!(!storage.contains(PROGRESS_KEY));
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_failed_load_reports_error() {
        let missing = std::env::temp_dir().join("no-such-bank.json");
        let mut app = app_with(MemoryStore::new(), missing);
        type_text(&mut app, "ada@example.com");
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        wait_loaded(&mut app).await;

        assert_eq!(app.state, AppState::Start);
        assert_eq!(
            app.start_form().error.as_deref(),
            Some("Failed to load quiz. Please try again.")
        );
        assert!(!app.session().is_loaded());
    }

    #[test]
    fn test_forget_email_clears_storage() {
        let storage = MemoryStore::new();
        storage.write(EMAIL_KEY, "old@example.com").unwrap();
        let mut app = app_with(storage.clone(), PathBuf::from("unused.json"));
        assert_eq!(app.start_form().email, "old@example.com");

        handle_input(
            &mut app,
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
        );
        assert!(app.start_form().email.is_empty());
        assert!(!storage.contains(EMAIL_KEY));
    }
}

//! # trivia-quiz
//!
//! A timed trivia quiz for the terminal. Questions come from Open Trivia DB
//! (or a local JSON file); an attempt lasts 30 minutes, is autosaved to a
//! local data directory and can be resumed after a restart within 24 hours.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use clap::Parser;
//! use trivia_quiz::{Args, Quiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let args = Args::parse();
//!     Quiz::open(&args)?.run().await
//! }
//! ```
//!
//! The session logic is usable on its own through [`SessionStore`], backed by
//! any [`KeyValueStore`].

mod app;
pub mod clock;
pub mod config;
mod data;
mod error;
mod input;
mod models;
pub mod provider;
pub mod results;
pub mod store;
pub mod telemetry;
pub mod terminal;
mod ui;

use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;
use tracing::info;

pub use app::{App, StartForm, is_valid_email};
pub use clock::Clock;
pub use config::Args;
pub use data::{LoadError, load_questions_from_json};
pub use error::QuizError;
pub use models::{
    AppState, Difficulty, QUESTION_COUNT, Question, QuestionDifficulty, QuestionKind,
    QuestionState, SESSION_DURATION_SECS, Session,
};
pub use provider::{OpenTriviaClient, ProviderError, QuestionSource};
pub use results::{QuizResults, Verdict};
pub use store::{FileStore, KeyValueStore, MemoryStore, SessionStore, Tick};

const INPUT_POLL: Duration = Duration::from_millis(50);

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
    ticks: mpsc::UnboundedReceiver<Tick>,
}

impl Quiz {
    /// Wire a quiz around an existing store and its tick receiver.
    pub fn new(
        store: SessionStore,
        source: QuestionSource,
        ticks: mpsc::UnboundedReceiver<Tick>,
    ) -> Self {
        Self {
            app: App::new(store, source),
            ticks,
        }
    }

    /// Build a quiz from command-line arguments: file-backed persistence in
    /// the data directory and the configured question source.
    pub fn open(args: &Args) -> Result<Self, QuizError> {
        let storage = FileStore::open(&args.data_dir)?;
        let source = match &args.questions {
            Some(path) => QuestionSource::File(path.clone()),
            None => QuestionSource::Remote(OpenTriviaClient::new(args.api_url.clone())?),
        };

        let (tx, rx) = mpsc::unbounded_channel();
        let store = SessionStore::new(storage, Clock::System, tx);
        info!(data_dir = %args.data_dir.display(), source = %source.describe(), "quiz ready");
        Ok(Self::new(store, source, rx))
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits. Must be called inside a tokio runtime.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut guard = terminal::TerminalGuard::enter()?;
        run_event_loop(guard.terminal(), &mut self.app, &mut self.ticks)
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
    ticks: &mut mpsc::UnboundedReceiver<Tick>,
) -> Result<(), QuizError> {
    loop {
        while let Ok(tick) = ticks.try_recv() {
            app.on_tick(tick);
        }
        app.poll_loading();

        if app.should_quit() {
            break;
        }

        if app.take_dirty() {
            terminal.draw(|frame| ui::render(frame, app))?;
        }

        if event::poll(INPUT_POLL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_input(app, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => app.mark_dirty(),
                _ => {}
            }
        }
    }

    Ok(())
}

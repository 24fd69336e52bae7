mod question;
mod session;

pub use question::{Question, QuestionDifficulty, QuestionKind};
pub use session::{
    Difficulty, QuestionState, Session, QUESTION_COUNT, SESSION_DURATION_SECS,
};

/// Screen currently shown by the terminal UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Start,
    Quiz,
    Results,
}

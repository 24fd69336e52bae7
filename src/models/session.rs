use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Question;

/// Length of one attempt (30 minutes).
pub const SESSION_DURATION_SECS: u32 = 30 * 60;

/// Number of questions requested per attempt.
pub const QUESTION_COUNT: usize = 15;

/// Difficulty filter used when fetching questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    /// No filter; the API mixes all levels.
    #[default]
    Mix,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Mix];

    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Mix => "Mix",
        }
    }

    /// Value for the API's `difficulty` query parameter, `None` for `Mix`.
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            Self::Easy => Some("easy"),
            Self::Medium => Some("medium"),
            Self::Hard => Some("hard"),
            Self::Mix => None,
        }
    }
}

/// Per-question progress, index-aligned with the question list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionState {
    pub visited: bool,
    pub answered: bool,
    pub selected_answer: Option<String>,
}

/// One quiz attempt.
///
/// Fields are only written by [`crate::SessionStore`]; everything else gets a
/// read-only view through the accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub(crate) email: String,
    pub(crate) questions: Vec<Question>,
    pub(crate) question_states: Vec<QuestionState>,
    pub(crate) current_question_index: usize,
    pub(crate) time_remaining: u32,
    pub(crate) is_completed: bool,
    pub(crate) start_time: Option<DateTime<Utc>>,
    pub(crate) difficulty: Difficulty,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            email: String::new(),
            questions: Vec::new(),
            question_states: Vec::new(),
            current_question_index: 0,
            time_remaining: SESSION_DURATION_SECS,
            is_completed: false,
            start_time: None,
            difficulty: Difficulty::Mix,
        }
    }
}

impl Session {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_states(&self) -> &[QuestionState] {
        &self.question_states
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Whether a question set has been loaded.
    pub fn is_loaded(&self) -> bool {
        !self.questions.is_empty()
    }

    /// The question at the current index, if any are loaded.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index)
    }

    pub fn current_state(&self) -> Option<&QuestionState> {
        self.question_states.get(self.current_question_index)
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn answered_count(&self) -> usize {
        self.question_states.iter().filter(|s| s.answered).count()
    }

    /// Seconds spent so far in this attempt.
    pub fn elapsed_secs(&self) -> u32 {
        SESSION_DURATION_SECS.saturating_sub(self.time_remaining)
    }

    /// First unanswered question after the current one, wrapping around.
    pub fn next_unanswered_index(&self) -> Option<usize> {
        let len = self.question_states.len();
        (1..=len)
            .map(|offset| (self.current_question_index + offset) % len)
            .find(|&i| !self.question_states[i].answered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_is_empty() {
        let session = Session::default();
        assert_eq!(session.email(), "");
        assert!(!session.is_loaded());
        assert_eq!(session.time_remaining(), 1800);
        assert_eq!(session.difficulty(), Difficulty::Mix);
        assert!(session.start_time().is_none());
        assert!(session.current_question().is_none());
    }

    #[test]
    fn test_difficulty_query_value() {
        assert_eq!(Difficulty::Easy.query_value(), Some("easy"));
        assert_eq!(Difficulty::Hard.query_value(), Some("hard"));
        assert_eq!(Difficulty::Mix.query_value(), None);
    }

    #[test]
    fn test_question_state_serializes_camel_case() {
        let state = QuestionState {
            visited: true,
            answered: true,
            selected_answer: Some("Paris".to_string()),
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"selectedAnswer\":\"Paris\""));

        let empty = serde_json::to_string(&QuestionState::default()).unwrap();
        assert!(empty.contains("\"selectedAnswer\":null"));
    }

    #[test]
    fn test_next_unanswered_wraps() {
        let mut session = Session::default();
        session.question_states = vec![
            QuestionState::default(),
            QuestionState {
                answered: true,
                ..Default::default()
            },
            QuestionState {
                answered: true,
                ..Default::default()
            },
        ];
        session.current_question_index = 1;
        assert_eq!(session.next_unanswered_index(), Some(0));

        session.question_states[0].answered = true;
        assert_eq!(session.next_unanswered_index(), None);
    }
}

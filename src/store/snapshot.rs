//! Saved snapshot format and validity rules.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Difficulty, Question, QuestionState, Session};

/// Storage key of the in-progress snapshot.
pub const PROGRESS_KEY: &str = "quiz_progress";

/// Storage key of the last email used on the start screen.
pub const EMAIL_KEY: &str = "quiz_user_email";

/// How long a snapshot stays resumable.
pub const SNAPSHOT_TTL_HOURS: i64 = 24;

/// Serialized copy of a session's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSnapshot {
    pub email: String,
    pub questions: Vec<Question>,
    pub question_states: Vec<QuestionState>,
    pub current_question_index: usize,
    pub time_remaining: u32,
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub start_time: Option<DateTime<Utc>>,
    pub difficulty: Difficulty,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub saved_at: DateTime<Utc>,
}

impl SavedSnapshot {
    pub fn capture(session: &Session, saved_at: DateTime<Utc>) -> Self {
        Self {
            email: session.email.clone(),
            questions: session.questions.clone(),
            question_states: session.question_states.clone(),
            current_question_index: session.current_question_index,
            time_remaining: session.time_remaining,
            start_time: session.start_time,
            difficulty: session.difficulty,
            saved_at,
        }
    }

    /// Parse a stored value. Anything unreadable yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Whether this snapshot may still be resumed at `now`.
    pub fn is_resumable(&self, now: DateTime<Utc>) -> bool {
        let is_recent = now - self.saved_at < Duration::hours(SNAPSHOT_TTL_HOURS);
        is_recent && self.time_remaining > 0 && !self.questions.is_empty()
    }

    /// Structural checks that keep the session invariants after a restore.
    pub fn is_consistent(&self) -> bool {
        self.questions.len() == self.question_states.len()
            && self.current_question_index < self.questions.len()
            && self.time_remaining <= crate::models::SESSION_DURATION_SECS
    }

    /// Rebuild a live session, restarting the clock at `now`.
    pub fn into_session(self, now: DateTime<Utc>) -> Session {
        Session {
            email: self.email,
            questions: self.questions,
            question_states: self.question_states,
            current_question_index: self.current_question_index,
            time_remaining: self.time_remaining,
            is_completed: false,
            start_time: Some(now),
            difficulty: self.difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::fixed_now;
    use crate::models::{QuestionDifficulty, QuestionKind};

    fn snapshot(saved_at: DateTime<Utc>, time_remaining: u32) -> SavedSnapshot {
        SavedSnapshot {
            email: "ada@example.com".to_string(),
            questions: vec![Question {
                id: 0,
                text: "2 + 2?".to_string(),
                correct_answer: "4".to_string(),
                incorrect_answers: vec!["3".to_string()],
                all_answers: vec!["3".to_string(), "4".to_string()],
                category: "Math".to_string(),
                difficulty: QuestionDifficulty::Easy,
                kind: QuestionKind::Multiple,
            }],
            question_states: vec![QuestionState {
                visited: true,
                answered: false,
                selected_answer: None,
            }],
            current_question_index: 0,
            time_remaining,
            start_time: None,
            difficulty: Difficulty::Easy,
            saved_at,
        }
    }

    #[test]
    fn test_snapshot_json_layout() {
        let snap = snapshot(fixed_now(), 600);
        let json = serde_json::to_value(&snap).unwrap();

        assert_eq!(json["savedAt"], 1_700_000_000_000i64);
        assert_eq!(json["timeRemaining"], 600);
        assert_eq!(json["currentQuestionIndex"], 0);
        assert!(json["startTime"].is_null());
        assert_eq!(json["difficulty"], "easy");
        assert_eq!(json["questions"][0]["question"], "2 + 2?");
        assert_eq!(json["questions"][0]["correct_answer"], "4");
        assert_eq!(json["questions"][0]["type"], "multiple");
        assert_eq!(json["questionStates"][0]["visited"], true);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(SavedSnapshot::parse("not json").is_none());
        assert!(SavedSnapshot::parse("{\"email\":\"x\"}").is_none());
    }

    #[test]
    fn test_resumable_window() {
        let now = fixed_now();
        assert!(snapshot(now - Duration::hours(23), 5).is_resumable(now));
        assert!(!snapshot(now - Duration::hours(25), 5).is_resumable(now));
        assert!(!snapshot(now, 0).is_resumable(now));

        let mut empty = snapshot(now, 100);
        empty.questions.clear();
        assert!(!empty.is_resumable(now));
    }

    #[test]
    fn test_consistency_checks_alignment() {
        let mut snap = snapshot(fixed_now(), 100);
        assert!(snap.is_consistent());
        snap.current_question_index = 1;
        assert!(!snap.is_consistent());
        snap.current_question_index = 0;
        snap.question_states.push(QuestionState::default());
        assert!(!snap.is_consistent());
    }
}

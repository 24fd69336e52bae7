//! Score computation for a finished (or in-progress) session.

use crate::models::{Question, Session};

/// Outcome of a single question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionResult<'a> {
    pub question: &'a Question,
    pub selected_answer: Option<&'a str>,
    pub is_correct: bool,
}

impl QuestionResult<'_> {
    pub fn is_attempted(&self) -> bool {
        self.selected_answer.is_some()
    }
}

/// Aggregate score of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResults {
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub unattempted: usize,
    pub percentage: u32,
    pub elapsed_secs: u32,
}

impl QuizResults {
    pub fn from_session(session: &Session) -> Self {
        let breakdown = breakdown(session);
        let total = breakdown.len();
        let correct = breakdown.iter().filter(|r| r.is_correct).count();
        let attempted = breakdown.iter().filter(|r| r.is_attempted()).count();

        Self {
            total,
            correct,
            incorrect: attempted - correct,
            unattempted: total - attempted,
            percentage: calculate_percentage(correct, total),
            elapsed_secs: session.elapsed_secs(),
        }
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::for_percentage(self.percentage)
    }
}

/// Per-question results in question order.
pub fn breakdown(session: &Session) -> Vec<QuestionResult<'_>> {
    session
        .questions()
        .iter()
        .zip(session.question_states())
        .map(|(question, state)| {
            let selected_answer = state.selected_answer.as_deref();
            QuestionResult {
                question,
                selected_answer,
                is_correct: selected_answer.is_some_and(|a| question.is_correct(a)),
            }
        })
        .collect()
}

fn calculate_percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}

/// Headline shown above the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Outstanding,
    GreatJob,
    GoodEffort,
    KeepPracticing,
    DontGiveUp,
}

impl Verdict {
    pub fn for_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Self::Outstanding,
            70..=89 => Self::GreatJob,
            50..=69 => Self::GoodEffort,
            30..=49 => Self::KeepPracticing,
            _ => Self::DontGiveUp,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Outstanding => "Outstanding!",
            Self::GreatJob => "Great job!",
            Self::GoodEffort => "Good effort!",
            Self::KeepPracticing => "Keep practicing!",
            Self::DontGiveUp => "Don't give up!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuestionDifficulty, QuestionKind, QuestionState};

    fn question(id: usize) -> Question {
        Question {
            id,
            text: format!("Q{}", id),
            correct_answer: "yes".to_string(),
            incorrect_answers: vec!["no".to_string()],
            all_answers: vec!["no".to_string(), "yes".to_string()],
            category: "Test".to_string(),
            difficulty: QuestionDifficulty::Easy,
            kind: QuestionKind::Boolean,
        }
    }

    fn answered(answer: &str) -> QuestionState {
        QuestionState {
            visited: true,
            answered: true,
            selected_answer: Some(answer.to_string()),
        }
    }

    #[test]
    fn test_mixed_results() {
        let mut session = Session::default();
        session.questions = (0..3).map(question).collect();
        session.question_states = vec![answered("yes"), answered("no"), QuestionState::default()];
        session.time_remaining = 1800 - 95;

        let results = QuizResults::from_session(&session);
        assert_eq!(results.total, 3);
        assert_eq!(results.correct, 1);
        assert_eq!(results.incorrect, 1);
        assert_eq!(results.unattempted, 1);
        assert_eq!(results.percentage, 33);
        assert_eq!(results.elapsed_secs, 95);
        assert_eq!(results.verdict(), Verdict::KeepPracticing);
    }

    #[test]
    fn test_empty_session_scores_zero() {
        let results = QuizResults::from_session(&Session::default());
        assert_eq!(results.total, 0);
        assert_eq!(results.percentage, 0);
    }

    #[test]
    fn test_percentage_rounds() {
        assert_eq!(calculate_percentage(2, 3), 67);
        assert_eq!(calculate_percentage(1, 8), 13);
        assert_eq!(calculate_percentage(15, 15), 100);
    }

    #[test]
    fn test_verdict_tiers() {
        assert_eq!(Verdict::for_percentage(100), Verdict::Outstanding);
        assert_eq!(Verdict::for_percentage(90), Verdict::Outstanding);
        assert_eq!(Verdict::for_percentage(70), Verdict::GreatJob);
        assert_eq!(Verdict::for_percentage(50), Verdict::GoodEffort);
        assert_eq!(Verdict::for_percentage(30), Verdict::KeepPracticing);
        assert_eq!(Verdict::for_percentage(29).message(), "Don't give up!");
    }

    #[test]
    fn test_breakdown_flags_correctness() {
        let mut session = Session::default();
        session.questions = (0..2).map(question).collect();
        session.question_states = vec![answered("yes"), QuestionState::default()];

        let rows = breakdown(&session);
        assert!(rows[0].is_correct);
        assert!(!rows[1].is_correct);
        assert!(!rows[1].is_attempted());
    }
}

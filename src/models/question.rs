use serde::{Deserialize, Serialize};

/// Difficulty label carried by an individual question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionDifficulty {
    Easy,
    Medium,
    Hard,
}

impl QuestionDifficulty {
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// Question type tag as reported by the trivia API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Four answers, one correct.
    Multiple,
    /// True / False.
    Boolean,
}

/// A loaded quiz question.
///
/// `all_answers` is shuffled once when the question set is built and is never
/// reordered afterwards, so the answer layout stays stable across navigation
/// and resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: usize,
    #[serde(rename = "question")]
    pub text: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    pub all_answers: Vec<String>,
    pub category: String,
    pub difficulty: QuestionDifficulty,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
}

impl Question {
    /// Check whether `answer` is the correct one.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

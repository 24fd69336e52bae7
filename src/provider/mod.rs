//! Where question sets come from.
//!
//! The session store never fetches anything itself; the start screen asks a
//! [`QuestionSource`] for a complete, shuffled set and hands it over.

mod html;
mod opentdb;

use std::path::PathBuf;

use thiserror::Error;

use crate::data::{LoadError, load_questions_from_json};
use crate::models::{Difficulty, Question};

pub use html::decode_html;
pub use opentdb::{ApiResponse, DEFAULT_API_URL, OpenTriviaClient, RawQuestion, build_questions};

/// Failure to produce a question set.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("trivia api request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("trivia api returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("trivia api returned response code {0}")]
    ResponseCode(u32),
    #[error("trivia api returned no questions")]
    Empty,
    #[error(transparent)]
    File(#[from] LoadError),
}

/// Question set provider used by the start screen.
#[derive(Debug, Clone)]
pub enum QuestionSource {
    /// Fetch from the trivia API.
    Remote(OpenTriviaClient),
    /// Read from a local JSON file in the API's result shape.
    File(PathBuf),
}

impl QuestionSource {
    /// Produce up to `amount` questions for `difficulty`. All-or-nothing.
    pub async fn fetch(
        &self,
        difficulty: Difficulty,
        amount: usize,
    ) -> Result<Vec<Question>, ProviderError> {
        match self {
            Self::Remote(client) => client.fetch(difficulty, amount).await,
            Self::File(path) => {
                let raw = load_questions_from_json(path, difficulty)?;
                Ok(build_questions(raw.into_iter().take(amount).collect()))
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Remote(client) => client.base_url().to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

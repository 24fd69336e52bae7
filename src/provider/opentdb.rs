//! Open Trivia DB client and question-set builder.

use std::time::Duration;

use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::models::{Difficulty, Question, QuestionDifficulty, QuestionKind};

use super::ProviderError;
use super::html::decode_html;

/// Public Open Trivia DB endpoint.
pub const DEFAULT_API_URL: &str = "https://opentdb.com/api.php";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// A question as returned by the API, before decoding and shuffling.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestion {
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub difficulty: QuestionDifficulty,
    pub category: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

/// Envelope of an `api.php` response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub response_code: u32,
    #[serde(default)]
    pub results: Vec<RawQuestion>,
}

impl ApiResponse {
    /// Unwrap the results, rejecting error codes and empty batches.
    pub fn into_results(self) -> Result<Vec<RawQuestion>, ProviderError> {
        if self.response_code != 0 {
            return Err(ProviderError::ResponseCode(self.response_code));
        }
        if self.results.is_empty() {
            return Err(ProviderError::Empty);
        }
        Ok(self.results)
    }
}

/// Decode entities and shuffle each question's answers once. Ids start at 1.
pub fn build_questions(raw: Vec<RawQuestion>) -> Vec<Question> {
    let mut rng = rand::rng();
    raw.into_iter()
        .enumerate()
        .map(|(index, q)| {
            let correct_answer = decode_html(&q.correct_answer);
            let incorrect_answers: Vec<String> =
                q.incorrect_answers.iter().map(|a| decode_html(a)).collect();

            let mut all_answers = Vec::with_capacity(incorrect_answers.len() + 1);
            all_answers.push(correct_answer.clone());
            all_answers.extend(incorrect_answers.iter().cloned());
            all_answers.shuffle(&mut rng);

            Question {
                id: index + 1,
                text: decode_html(&q.question),
                correct_answer,
                incorrect_answers,
                all_answers,
                category: decode_html(&q.category),
                difficulty: q.difficulty,
                kind: q.kind,
            }
        })
        .collect()
}

/// HTTP client for the trivia API.
#[derive(Debug, Clone)]
pub struct OpenTriviaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenTriviaClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch `amount` questions, filtered by `difficulty` unless it is `Mix`.
    #[instrument(level = "info", skip(self), fields(url = %self.base_url))]
    pub async fn fetch(
        &self,
        difficulty: Difficulty,
        amount: usize,
    ) -> Result<Vec<Question>, ProviderError> {
        let mut query = vec![("amount", amount.to_string())];
        if let Some(level) = difficulty.query_value() {
            query.push(("difficulty", level.to_string()));
        }

        let res = self.client.get(&self.base_url).query(&query).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(ProviderError::HttpStatus(status));
        }

        let body: ApiResponse = res.json().await?;
        debug!(response_code = body.response_code, "trivia api responded");
        let questions = build_questions(body.into_results()?);
        info!(count = questions.len(), "fetched questions");
        Ok(questions)
    }
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::models::Difficulty;
use crate::provider::RawQuestion;

/// Error reading a local question file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path} has no {difficulty} questions")]
    Empty { path: PathBuf, difficulty: String },
}

/// Either a saved API response or a bare array of results.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionFile {
    Response { results: Vec<RawQuestion> },
    List(Vec<RawQuestion>),
}

/// Load raw questions from a JSON file, keeping those that match `difficulty`.
pub fn load_questions_from_json<P: AsRef<Path>>(
    path: P,
    difficulty: Difficulty,
) -> Result<Vec<RawQuestion>, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let file: QuestionFile =
        serde_json::from_str(&json_content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let questions = match file {
        QuestionFile::Response { results } => results,
        QuestionFile::List(list) => list,
    };

    let filtered: Vec<RawQuestion> = match difficulty.query_value() {
        Some(level) => questions
            .into_iter()
            .filter(|q| q.difficulty.label() == level)
            .collect(),
        None => questions,
    };

    if filtered.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
            difficulty: difficulty.label().to_lowercase(),
        });
    }

    Ok(filtered)
}

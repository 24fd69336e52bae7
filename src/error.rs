use std::io;

use thiserror::Error;

use crate::provider::ProviderError;

/// Error type for running the quiz application.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The question provider could not be set up.
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// IO error during quiz execution.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to initialise logging: {0}")]
    Telemetry(String),
}

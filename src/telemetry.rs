//! Logging setup.
//!
//! The terminal belongs to the UI, so events go to a log file instead of
//! stdout. `LOG_LEVEL` holds the filter directives (default
//! `info,trivia_quiz=debug`); `LOG_FORMAT=json` switches to JSON lines.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::QuizError;

const DEFAULT_FILTER: &str = "info,trivia_quiz=debug";

pub fn init_tracing(log_path: &Path) -> Result<(), QuizError> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let filter =
        EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    let result = match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().try_init(),
        _ => builder.try_init(),
    };
    result.map_err(|e| QuizError::Telemetry(e.to_string()))
}

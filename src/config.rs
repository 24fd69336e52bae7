//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::provider::DEFAULT_API_URL;

/// Timed trivia quiz in the terminal.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// JSON file to load the questions from instead of the trivia API
    #[arg(short, long)]
    pub questions: Option<PathBuf>,

    /// Directory holding saved progress, the remembered email and the log file
    #[arg(short, long, env = "TRIVIA_QUIZ_DATA_DIR", default_value = ".trivia-quiz")]
    pub data_dir: PathBuf,

    /// Trivia API endpoint
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

impl Args {
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("trivia-quiz.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["trivia-quiz"]).unwrap();
        assert!(args.questions.is_none());
        assert_eq!(args.api_url, DEFAULT_API_URL);
        assert!(args.log_path().ends_with("trivia-quiz.log"));
    }

    #[test]
    fn test_questions_file_flag() {
        let args = Args::try_parse_from([
            "trivia-quiz",
            "-q",
            "bank.json",
            "--data-dir",
            "/tmp/tq",
        ])
        .unwrap();
        assert_eq!(args.questions, Some(PathBuf::from("bank.json")));
        assert_eq!(args.data_dir, PathBuf::from("/tmp/tq"));
    }
}

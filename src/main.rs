use clap::Parser;
use trivia_quiz::{Args, Quiz, telemetry};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = telemetry::init_tracing(&args.log_path()) {
        eprintln!("Error setting up logging: {}", e);
        std::process::exit(1);
    }

    let quiz = match Quiz::open(&args) {
        Ok(quiz) => quiz,
        Err(e) => {
            eprintln!("Error starting quiz: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = quiz.run().await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}

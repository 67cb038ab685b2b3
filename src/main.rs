use quizterm::app::App;
use quizterm::config::QuizConfig;
use quizterm::{error, logging, Result};

#[tokio::main]
async fn main() {
    logging::init_tracing();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "quizterm exited with error");
        eprintln!("{}", error::user_friendly_message(&e));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = QuizConfig::load()?;

    // Invalid content is fatal before the terminal is touched
    let mut app = App::new(&config)?;
    app.init()?;

    let result = app.run().await;
    app.restore()?;
    result
}

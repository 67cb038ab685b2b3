//! Tracing setup
//!
//! The terminal belongs to the TUI, so logs only go to a file named by
//! `QUIZTERM_LOG`. Filtering follows `RUST_LOG`, defaulting to `info`.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::LOG_ENV_VAR;

/// Log file requested through the environment, if any
pub fn log_path_from_env() -> Option<PathBuf> {
    std::env::var_os(LOG_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Initialize tracing; a no-op when no log file is configured
pub fn init_tracing() {
    let Some(path) = log_path_from_env() else {
        return;
    };
    if let Err(e) = init_file_tracing(&path) {
        eprintln!("Warning: failed to set up logging to {}: {}", path.display(), e);
    }
}

fn init_file_tracing(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    // A subscriber may already be installed (tests, embedding)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
    Ok(())
}

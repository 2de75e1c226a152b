//! File-backed tracing setup.
//!
//! The TUI owns the terminal, so logs never go to stdout or stderr. Nothing is written
//! unless a log file is requested.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn open_log_file(path: &Path) -> std::io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber when `log_file` is given and can be opened.
pub fn init(log_file: Option<&Path>, level: &str) {
    let Some(path) = log_file else {
        return;
    };
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    match open_log_file(path) {
        Ok(file) => {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(filter)
                .try_init();
            tracing::info!(path = %path.display(), "logging initialized");
        }
        // Prefer no logs over corrupting the TUI.
        Err(e) => eprintln!("godeps: logging disabled, cannot open {}: {e}", path.display()),
    }
}

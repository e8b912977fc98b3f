//! Tracing/logging bootstrap for the TUI.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Initialize the global subscriber.
///
/// The TUI owns the terminal, so log lines go to
/// `<data-local-dir>/roster/roster.log`. When no data directory is
/// available logging stays disabled rather than corrupting the display.
///
/// Severity gating precedence:
/// 1) `RUST_LOG`
/// 2) `ROSTER_LOG`
/// 3) internal default filter
pub fn init() {
    let Some(path) = log_file_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = fs::File::options().create(true).append(true).open(&path) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_from_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("roster").join("roster.log"))
}

fn filter_from_env() -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    if let Some(value) = std::env::var("ROSTER_LOG")
        .ok()
        .filter(|v| !v.trim().is_empty())
    {
        if let Ok(filter) = EnvFilter::try_new(value) {
            return filter;
        }
    }

    EnvFilter::new(DEFAULT_FILTER)
}

//! Logging setup.
//!
//! `RUST_LOG` directives win over the configured level.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

/// Configured level, `info` when unrecognized.
fn level_filter(level: &str) -> LevelFilter {
    match level.trim() {
        "" => LevelFilter::INFO,
        level => level.parse().unwrap_or(LevelFilter::INFO),
    }
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level_filter(level).into())
        .from_env_lossy()
}

/// Install the global subscriber.
///
/// Logs go to stdout, and are also appended to `config.file` when set.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let Some(file) = config.file.as_deref() else {
        init_console_only(&config.level);
        return Ok(());
    };

    let log_file = Arc::new(open_log_file(Path::new(file))?);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.level))
        .with_writer(std::io::stdout.and(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Install a stdout-only subscriber.
pub fn init_console_only(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .init();
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(fs::OpenOptions::new().create(true).append(true).open(path)?)
}

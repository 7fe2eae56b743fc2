//! File logging.
//!
//! Each run writes to its own file, `log_%Y-%m-%d_%H-%M-%S.log`, inside the
//! configured log directory. The console is left to the REPL. The level is
//! controlled by `RUST_LOG` and defaults to `info`.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum LogInitError {
    #[error("failed to create log file in {}: {source}", dir.display())]
    Io {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install log subscriber: {0}")]
    Subscriber(String),
}

/// Name of the log file for a run started at `started`.
pub fn log_file_name(started: NaiveDateTime) -> String {
    started.format("log_%Y-%m-%d_%H-%M-%S.log").to_string()
}

/// Create `dir` if needed and open a fresh log file inside it.
pub fn create_log_file(dir: &Path, started: NaiveDateTime) -> Result<(File, PathBuf), LogInitError> {
    let io_err = |source| LogInitError::Io {
        dir: dir.to_path_buf(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(io_err)?;
    let path = dir.join(log_file_name(started));
    let file = File::create(&path).map_err(io_err)?;
    Ok((file, path))
}

/// Install the global subscriber, logging to a new file in `dir`.
///
/// Returns the path of the log file.
pub fn init(dir: &Path) -> Result<PathBuf, LogInitError> {
    let (file, path) = create_log_file(dir, chrono::Local::now().naive_local())?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .try_init()
        .map_err(|e| LogInitError::Subscriber(e.to_string()))?;

    Ok(path)
}

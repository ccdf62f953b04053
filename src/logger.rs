//! File-based tracing setup.
//!
//! The countdown owns the terminal, so logs are only ever written to a file.
//! Logging is off unless `COUNTDOWN_LOG` holds a filter such as `debug` or
//! `countdown=trace`.

use anyhow::{Context, Result, anyhow};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;

const LOG_FILTER_ENV: &str = "COUNTDOWN_LOG";
const LOG_FILE_ENV: &str = "COUNTDOWN_LOG_FILE";
const DEFAULT_LOG_FILE: &str = "countdown.log";

/// Install the global subscriber. The returned guard flushes buffered lines
/// when dropped and must outlive all logging.
pub fn init() -> Result<Option<WorkerGuard>> {
    let Ok(directives) = std::env::var(LOG_FILTER_ENV) else {
        return Ok(None);
    };
    let filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid {LOG_FILTER_ENV} filter: {directives}"))?;

    let path = log_file_path(std::env::var_os(LOG_FILE_ENV));
    let (dir, file_name) = split_log_path(&path)?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        &dir, file_name,
    ));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_timer(UtcTime::rfc_3339())
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {e}"))?;

    Ok(Some(guard))
}

fn log_file_path(explicit: Option<OsString>) -> PathBuf {
    explicit
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE))
}

fn split_log_path(path: &Path) -> Result<(PathBuf, OsString)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", path.display()))?
        .to_os_string();
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok((dir, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path_default() {
        assert_eq!(
            log_file_path(None),
            std::env::temp_dir().join("countdown.log")
        );
        assert_eq!(
            log_file_path(Some(OsString::new())),
            std::env::temp_dir().join("countdown.log")
        );
    }

    #[test]
    fn test_log_file_path_explicit() {
        assert_eq!(
            log_file_path(Some(OsString::from("/var/log/cd.log"))),
            PathBuf::from("/var/log/cd.log")
        );
    }

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("/tmp/logs/countdown.log")).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/logs"));
        assert_eq!(name, OsString::from("countdown.log"));

        let (dir, name) = split_log_path(Path::new("countdown.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, OsString::from("countdown.log"));
    }

    #[test]
    fn test_split_log_path_without_file_name() {
        assert!(split_log_path(Path::new("/")).is_err());
    }
}

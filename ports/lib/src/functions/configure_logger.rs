use crate::models::LogFormat;

use anyhow::{anyhow, Result};
use std::{path::PathBuf, str::FromStr};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber
///
/// Logs go to stderr unless a log file is given. The returned guard flushes
/// the non-blocking writer when dropped and must be kept alive until the end
/// of `main`.
pub fn configure_logger(
    log_level: Option<String>,
    log_file: Option<String>,
    log_format: LogFormat,
) -> Result<WorkerGuard> {
    let log_level = log_level.unwrap_or("info".to_string());

    let (non_blocking, guard) = match log_file {
        //
        // If no log file is provided, log to stderr
        //
        None => tracing_appender::non_blocking(std::io::stderr()),
        //
        // If a log file is provided, log to the file
        //
        Some(file) => {
            let log_file = PathBuf::from(file);

            let file_name = log_file
                .file_name()
                .ok_or_else(|| anyhow!("Invalid log file path: {log_file:?}"))?;

            let directory = match log_file.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
                _ => PathBuf::from("."),
            };

            let file_appender =
                tracing_appender::rolling::minutely(directory, file_name);

            tracing_appender::non_blocking(file_appender)
        }
    };

    let tracing_config = tracing_subscriber::fmt()
        .event_format(fmt::format().with_level(true).compact())
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(non_blocking)
        .with_env_filter(EnvFilter::from_str(log_level.as_str())?);

    match log_format {
        LogFormat::Ansi => tracing_config.pretty().init(),
        LogFormat::Jsonl => tracing_config.json().init(),
    };

    Ok(guard)
}

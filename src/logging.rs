use std::path::Path;

pub const ENV_LOG_SPEC: &str = "TODO_LOG";
/// Subdirectory of the data directory that holds the log files.
pub const LOG_DIR_NAME: &str = "logs";

#[cfg(feature = "logging")]
const LOG_FILE_BASENAME: &str = "todo";
#[cfg(feature = "logging")]
const LOG_ROTATE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
#[cfg(feature = "logging")]
const LOG_ROTATE_KEEP_FILES: usize = 3;

/// Picks the first non-blank of `TODO_LOG`, then `RUST_LOG`, else the build default.
pub fn log_spec(todo_log: Option<String>, rust_log: Option<String>) -> String {
    let default_spec = if cfg!(debug_assertions) {
        "warn,todo_list=debug"
    } else {
        "warn,todo_list=info"
    };
    todo_log
        .filter(|value| !value.trim().is_empty())
        .or_else(|| rust_log.filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| default_spec.to_string())
}

/// Starts the process-wide file logger writing `todo_*.log` into `log_dir`.
///
/// Logging stops when the returned handle is dropped.
#[cfg(feature = "logging")]
pub fn init_logging(
    log_dir: &Path,
) -> Result<flexi_logger::LoggerHandle, flexi_logger::FlexiLoggerError> {
    use flexi_logger::{detailed_format, Cleanup, Criterion, FileSpec, Logger, Naming};

    std::fs::create_dir_all(log_dir)?;
    let spec = log_spec(
        std::env::var(ENV_LOG_SPEC).ok(),
        std::env::var("RUST_LOG").ok(),
    );

    let handle = Logger::try_with_str(&spec)?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME)
                .suppress_timestamp(),
        )
        .append()
        .format_for_files(detailed_format)
        .rotate(
            Criterion::Size(LOG_ROTATE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(LOG_ROTATE_KEEP_FILES),
        )
        .start()?;

    log::info!("logger started dir={} spec={spec}", log_dir.display());
    Ok(handle)
}

/// Log directory for a data directory.
pub(crate) fn log_dir_in(data_dir: &Path) -> std::path::PathBuf {
    data_dir.join(LOG_DIR_NAME)
}

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Install the global logger for `app_name`
///
/// Binaries log to a file because the gateway's stdout is the MCP channel; unit tests log to stdout.
pub fn init_logging(app_name: &str) {
    if cfg!(test) {
        init_test_logging();
    } else {
        init_file_logging(app_name);
    }
}

/// Debug-level stdout logger for tests; later calls are no-ops
pub fn init_test_logging() {
    let mut builder = Builder::from_default_env();
    let _ = builder
        .target(Target::Stdout)
        .filter_level(LevelFilter::Debug)
        .is_test(true)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .try_init();
}

/// Info-level logger appending to `<log dir>/<app_name>.log`
fn init_file_logging(app_name: &str) {
    let log_dir = get_log_directory();

    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Failed to create log directory: {}", e);
        return;
    }

    let log_file = log_dir.join(format!("{}.log", app_name));

    let file = match fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file.display(), e);
            return;
        }
    };

    let mut builder = Builder::from_default_env();
    let installed = builder
        .target(Target::Pipe(Box::new(file)))
        .filter_level(LevelFilter::Info)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] [{}:{}] {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .try_init();

    if installed.is_ok() {
        log::info!("Logging initialized to file: {}", log_file.display());
    }
}

/// Per-user local data directory, or `./logs` when the platform has none
fn get_log_directory() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        data_dir.join("UnityEditorMcp")
    } else {
        PathBuf::from("./logs")
    }
}

/// `log::debug!` alias
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

/// `log::info!` alias
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

/// `log::warn!` alias
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

/// `log::error!` alias
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_is_app_specific() {
        let log_dir = get_log_directory();
        let log_dir = log_dir.to_string_lossy();
        assert!(log_dir.contains("UnityEditorMcp") || log_dir.contains("logs"));
    }

    #[test]
    fn test_repeated_init_and_macros() {
        init_logging("unity_editor_mcp");
        // A second call must not panic
        init_logging("unity_editor_mcp");

        debug_log!("This is a debug message");
        info_log!("This is an info message");
        warn_log!("This is a warning message");
        error_log!("This is an error message");
    }
}

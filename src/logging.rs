//! Tracing setup for the wizard and the one-shot commands.
//!
//! The wizard owns the terminal, so its events go to a session file under
//! `<paths.state>/logs/`. `preview`, `send` and `catalog` write to stderr,
//! keeping stdout clean for the request XML and the node's answer.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Where a session's events are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Session file inside this directory
    File(PathBuf),
    Stderr,
}

impl LogTarget {
    /// File only for the interactive wizard with `logging.to_file` set
    pub fn for_session(config: &Config, is_tui_mode: bool) -> Self {
        if is_tui_mode && config.logging.to_file {
            LogTarget::File(config.logs_path())
        } else {
            LogTarget::Stderr
        }
    }
}

/// Keeps the file writer alive; dropping it flushes buffered events.
pub struct LoggingHandle {
    pub _guard: Option<WorkerGuard>,

    /// Session file, printed on exit when something was written
    pub log_file_path: Option<PathBuf>,
}

/// `omi-wizard-<UTC timestamp>.log`
pub fn log_file_name() -> String {
    let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
    format!("omi-wizard-{timestamp}.log")
}

/// Filter directive: `RUST_LOG` wins, then `--debug`, then `logging.level`.
pub fn filter_directive(config: &Config, debug: bool, rust_log: Option<String>) -> String {
    rust_log.unwrap_or_else(|| {
        if debug {
            "debug".to_string()
        } else {
            config.logging.level.clone()
        }
    })
}

pub fn init_logging(config: &Config, is_tui_mode: bool, debug: bool) -> Result<LoggingHandle> {
    let filter = EnvFilter::new(filter_directive(
        config,
        debug,
        std::env::var("RUST_LOG").ok(),
    ));

    match LogTarget::for_session(config, is_tui_mode) {
        LogTarget::File(logs_dir) => {
            std::fs::create_dir_all(&logs_dir).with_context(|| {
                format!("Failed to create log directory {}", logs_dir.display())
            })?;

            let file_name = log_file_name();
            let log_file_path = logs_dir.join(&file_name);
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(&logs_dir, &file_name));

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();

            Ok(LoggingHandle {
                _guard: Some(guard),
                log_file_path: Some(log_file_path),
            })
        }
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();

            Ok(LoggingHandle {
                _guard: None,
                log_file_path: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn state_config(temp_dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.paths.state = temp_dir.path().to_string_lossy().to_string();
        config
    }

    #[test]
    fn test_wizard_logs_to_session_dir_under_state() {
        let temp_dir = TempDir::new().unwrap();
        let config = state_config(&temp_dir);

        match LogTarget::for_session(&config, true) {
            LogTarget::File(dir) => {
                assert!(dir.starts_with(temp_dir.path()));
                assert!(dir.ends_with("logs"));
            }
            LogTarget::Stderr => panic!("wizard should log to a file"),
        }
    }

    #[test]
    fn test_commands_log_to_stderr() {
        let temp_dir = TempDir::new().unwrap();
        let config = state_config(&temp_dir);
        assert_eq!(LogTarget::for_session(&config, false), LogTarget::Stderr);
    }

    #[test]
    fn test_wizard_with_file_logging_off_uses_stderr() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = state_config(&temp_dir);
        config.logging.to_file = false;
        assert_eq!(LogTarget::for_session(&config, true), LogTarget::Stderr);
    }

    #[test]
    fn test_log_file_name_carries_utc_timestamp() {
        let name = log_file_name();
        let stamp = name
            .strip_prefix("omi-wizard-")
            .and_then(|rest| rest.strip_suffix(".log"))
            .unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y%m%dT%H%M%SZ").is_ok());
    }

    #[test]
    fn test_filter_directive_precedence() {
        let mut config = Config::default();
        config.logging.level = "warn".to_string();

        assert_eq!(filter_directive(&config, false, None), "warn");
        assert_eq!(filter_directive(&config, true, None), "debug");
        assert_eq!(
            filter_directive(&config, true, Some("omi_wizard=trace".to_string())),
            "omi_wizard=trace"
        );
    }
}

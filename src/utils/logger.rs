// Logger initialization

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

/// Initialize tracing for the whole process.
///
/// `RUST_LOG` wins when set; otherwise the filter is derived from the
/// settings. When file logging is enabled the returned [`WorkerGuard`] must
/// be held for the lifetime of the process, dropping it early loses buffered
/// log lines.
pub fn init_logging(settings: &Settings) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(settings)));

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());

    match &settings.log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(directory).with_context(|| {
                format!("Failed to create log directory {}", directory.display())
            })?;
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow!("LOG_FILE must name a file, got {}", path.display()))?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();
            Ok(Some(guard))
        }
        None => {
            registry.init();
            Ok(None)
        }
    }
}

/// Filter used when `RUST_LOG` is not set. Debug mode turns on verbose
/// logging for the service and its HTTP layers.
fn default_filter(settings: &Settings) -> String {
    if settings.debug {
        "docket_intake=debug,tower_http=debug,axum=debug".to_string()
    } else {
        settings.log_level.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(debug: bool, log_level: &str) -> Settings {
        Settings {
            app_name: "Docket Intake".to_string(),
            app_env: "test".to_string(),
            debug,
            host: "127.0.0.1".to_string(),
            port: 8000,
            openai_api_key: "sk-test".to_string(),
            max_upload_size: 1024,
            upload_dir: "uploads".into(),
            allowed_extensions: "pdf".to_string(),
            encryption_key: String::new(),
            data_retention_hours: 24,
            log_level: log_level.to_string(),
            log_file: None,
        }
    }

    #[test]
    fn test_debug_default_filter() {
        let filter = default_filter(&settings(true, "warning"));
        assert_eq!(filter, "docket_intake=debug,tower_http=debug,axum=debug");
    }

    #[test]
    fn test_log_level_default_filter() {
        assert_eq!(default_filter(&settings(false, "INFO")), "info");
        assert_eq!(default_filter(&settings(false, "warn")), "warn");
    }
}

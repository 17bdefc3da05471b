//! Tracing subscriber setup: console output plus an optional daily rolling
//! log file.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Full logging for long-running modes (server, shell).
///
/// Console layer always; file layer only when a log directory is configured
/// and writable.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},punt=debug", config.level)));

    // Important: `tracing_appender::rolling::daily` will panic (and in our
    // release build, abort) if it can't create the initial log file, so
    // writability must be preflighted.
    let file_layer = match config.dir.as_deref() {
        Some(log_dir) if std::fs::create_dir_all(log_dir).is_ok() => {
            let test_path = std::path::Path::new(log_dir).join(".punt_write_test");
            match std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&test_path)
            {
                Ok(_) => {
                    let _ = std::fs::remove_file(&test_path);

                    // Daily rotating file appender
                    let file_appender = tracing_appender::rolling::daily(log_dir, "punt.log");
                    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                    // Keep the guard alive by leaking it (acceptable for long-running process)
                    Box::leak(Box::new(guard));

                    Some(
                        tracing_subscriber::fmt::layer()
                            .with_writer(non_blocking)
                            .with_ansi(false) // No color codes in file
                            .with_target(true),
                    )
                }
                Err(e) => {
                    eprintln!(
                        "Warning: Could not write to log directory {} ({}), file logging disabled",
                        log_dir, e
                    );
                    None
                }
            }
        }
        Some(log_dir) => {
            eprintln!(
                "Warning: Could not create log directory {}, file logging disabled",
                log_dir
            );
            None
        }
        None => None,
    };

    // Console layer
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let file_logging_enabled = file_layer.is_some();
    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if file_logging_enabled {
        if let Some(dir) = &config.dir {
            eprintln!("Logging to: {}/punt.log", dir);
        }
    }
}

/// Minimal logging for one-shot CLI commands.
pub fn init_logging_simple() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .try_init();
}

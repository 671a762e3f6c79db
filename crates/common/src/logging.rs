//! Logging and tracing initialization.
//!
//! Logs go to stderr by default: the terminal render sink owns stdout
//! while the eye is being drawn. A `file` path in the config redirects
//! them to a log file instead.

use std::sync::Arc;

use crate::config::LoggingConfig;

enum LogWriter {
    Stderr,
    File(Arc<std::fs::File>),
}

impl LogWriter {
    fn open(config: &LoggingConfig) -> Self {
        let Some(path) = &config.file else {
            return Self::Stderr;
        };
        match std::fs::File::create(path) {
            Ok(file) => Self::File(Arc::new(file)),
            Err(e) => {
                eprintln!("could not open log file {path:?}: {e}; logging to stderr");
                Self::Stderr
            }
        }
    }

    fn make(&self) -> Box<dyn std::io::Write> {
        match self {
            Self::Stderr => Box::new(std::io::stderr()),
            Self::File(file) => Box::new(file.clone()),
        }
    }
}

/// Initialize the tracing subscriber with the given configuration.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let writer = LogWriter::open(config);

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(move || writer.make())
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(move || writer.make())
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}

/// Initialize logging with defaults (useful for tests and quick scripts).
pub fn init_default_logging() {
    init_logging(&LoggingConfig::default());
}

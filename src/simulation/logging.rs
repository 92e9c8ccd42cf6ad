//! Logging and tracing configuration
//!
//! Console output always goes to stderr: stdout may be carrying published
//! messages as JSON lines.

use std::fmt;
use std::io;

use tracing::{debug, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{layer, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Error returned when the global subscriber cannot be installed
pub type LoggingError = Box<dyn std::error::Error + Send + Sync>;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for the crate when no filter is given
    pub level: Level,
    /// Whether to emit JSON instead of pretty console output
    pub json_format: bool,
    /// Whether to also write JSON logs to a daily rolling file
    pub log_to_file: bool,
    /// Log file directory (if logging to file)
    pub log_directory: Option<String>,
    /// Log file prefix (if logging to file)
    pub log_file_prefix: String,
    /// Whether to log span open and close
    pub enable_span_events: bool,
    /// Whether to enable ansi colors in console output
    pub enable_ansi: bool,
    /// Custom environment filter, overrides `RUST_LOG` and `level`
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json_format: false,
            log_to_file: false,
            log_directory: None,
            log_file_prefix: "rtls-simulator".to_string(),
            enable_span_events: false,
            enable_ansi: true,
            env_filter: None,
        }
    }
}

/// Keeps background log writers alive
///
/// Dropping the guard flushes and stops file logging.
pub struct LoggingGuard {
    _guards: Vec<WorkerGuard>,
}

impl fmt::Debug for LoggingGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingGuard").field("writers", &self._guards.len()).finish()
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for the command line flags
    ///
    /// `--debug` wins over `--verbose`; with neither only warnings are shown.
    pub fn from_flags(verbose: bool, debug: bool, json: bool) -> Self {
        let config = if debug {
            Self::new().with_level(Level::DEBUG).with_span_events()
        } else if verbose {
            Self::new().with_level(Level::INFO).with_span_events()
        } else {
            Self::new().with_level(Level::WARN)
        };

        if json {
            config.with_json_format().without_ansi()
        } else {
            config
        }
    }

    /// Set the log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable JSON formatting
    pub fn with_json_format(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Enable file logging
    pub fn with_file_logging(mut self, directory: impl Into<String>) -> Self {
        self.log_to_file = true;
        self.log_directory = Some(directory.into());
        self
    }

    /// Set log file prefix
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_file_prefix = prefix.into();
        self
    }

    /// Enable span events
    pub fn with_span_events(mut self) -> Self {
        self.enable_span_events = true;
        self
    }

    /// Disable ANSI colors
    pub fn without_ansi(mut self) -> Self {
        self.enable_ansi = false;
        self
    }

    /// Set custom environment filter
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Filter directive used when neither a custom filter nor `RUST_LOG` is set
    pub fn default_directive(&self) -> String {
        format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), self.level)
    }

    fn build_filter(&self) -> Result<EnvFilter, LoggingError> {
        match &self.env_filter {
            Some(filter) => Ok(EnvFilter::try_new(filter)?),
            None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))),
        }
    }

    fn span_events(&self) -> FmtSpan {
        if self.enable_span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Install the global tracing subscriber
    ///
    /// Fails if a subscriber is already installed. Hold on to the returned
    /// guard for as long as logs should be written.
    pub fn init(self) -> Result<LoggingGuard, LoggingError> {
        let env_filter = self.build_filter()?;
        let mut guards = Vec::new();

        let console = if self.json_format {
            layer()
                .json()
                .with_writer(io::stderr)
                .with_span_events(self.span_events())
                .boxed()
        } else {
            layer()
                .pretty()
                .with_writer(io::stderr)
                .with_ansi(self.enable_ansi)
                .with_span_events(self.span_events())
                .boxed()
        };

        let file = if self.log_to_file {
            let directory = self.log_directory.as_deref().unwrap_or("logs");
            let (writer, guard) = non_blocking(rolling::daily(directory, &self.log_file_prefix));
            guards.push(guard);
            Some(layer().json().with_writer(writer).with_span_events(self.span_events()))
        } else {
            None
        };

        Registry::default().with(env_filter).with(console).with(file).try_init()?;

        debug!(config = ?self, "Logging initialized");
        Ok(LoggingGuard { _guards: guards })
    }
}

/// Emit an event tagged with the simulation component
#[macro_export]
macro_rules! sim_event {
    ($level:ident, $message:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::$level!(
            message = $message,
            component = "simulation",
            $($key = $value,)*
        );
    };
    ($level:ident, $message:expr) => {
        tracing::$level!(
            message = $message,
            component = "simulation",
        );
    };
}

/// Open a span for timing a unit of work
#[macro_export]
macro_rules! perf_span {
    ($name:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::debug_span!(
            $name,
            component = "performance",
            $($key = $value,)*
        )
    };
    ($name:expr) => {
        tracing::debug_span!(
            $name,
            component = "performance",
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::new();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.json_format);
        assert!(!config.log_to_file);
        assert_eq!(config.log_file_prefix, "rtls-simulator");
        assert!(config.enable_ansi);
        assert_eq!(config.default_directive(), "rtls_simulator=INFO");
    }

    #[test]
    fn test_from_flags() {
        let quiet = LoggingConfig::from_flags(false, false, false);
        assert_eq!(quiet.level, Level::WARN);
        assert!(!quiet.enable_span_events);

        let verbose = LoggingConfig::from_flags(true, false, false);
        assert_eq!(verbose.level, Level::INFO);
        assert!(verbose.enable_span_events);

        let debug = LoggingConfig::from_flags(true, true, true);
        assert_eq!(debug.level, Level::DEBUG);
        assert!(debug.json_format);
        assert!(!debug.enable_ansi);
    }

    #[test]
    fn test_builder_pattern() {
        let config = LoggingConfig::new()
            .with_file_logging("test_logs")
            .with_file_prefix("tick")
            .with_env_filter("rtls_simulator=trace");

        assert!(config.log_to_file);
        assert_eq!(config.log_directory.as_deref(), Some("test_logs"));
        assert_eq!(config.log_file_prefix, "tick");
        assert_eq!(config.env_filter.as_deref(), Some("rtls_simulator=trace"));
    }

    #[test]
    fn test_invalid_env_filter_is_rejected() {
        let config = LoggingConfig::new().with_env_filter("rtls_simulator=notalevel");
        assert!(config.build_filter().is_err());
    }
}

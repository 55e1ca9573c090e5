//! Process-wide leveled logger: one lazily built instance, one lock around
//! every write, text or JSONL records.

pub mod record;

use std::sync::OnceLock;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::console::Console;
pub use record::LogRecord;

/// Severity of a log record. Ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    #[default]
    Warning,
    Error,
}

impl Level {
    /// Upper-case tag used in rendered records.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Record rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// `[LEVEL] message`
    #[default]
    Text,
    /// One JSON object per line.
    Jsonl,
}

/// Where records go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSink {
    #[default]
    Stderr,
    Stdout,
    Discard,
}

impl LogSink {
    fn console(self) -> Console {
        match self {
            Self::Stderr => Console::stderr(),
            Self::Stdout => Console::stdout(),
            Self::Discard => Console::discard(),
        }
    }
}

/// Runtime-adjustable logger settings. Also the `[logging]` config section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    /// Records below this level are dropped.
    pub level: Level,
    pub format: LogFormat,
    pub sink: LogSink,
}

struct LoggerState {
    min_level: Level,
    format: LogFormat,
    console: Console,
}

/// Thread-safe logger. Obtain the shared instance with [`Logger::instance`].
pub struct Logger {
    state: Mutex<LoggerState>,
}

static INSTANCE: OnceLock<Logger> = OnceLock::new();

impl Logger {
    fn new(min_level: Level, format: LogFormat, console: Console) -> Self {
        Self {
            state: Mutex::new(LoggerState {
                min_level,
                format,
                console,
            }),
        }
    }

    /// The process-wide logger, built on first use with default settings.
    pub fn instance() -> &'static Self {
        INSTANCE.get_or_init(|| {
            let settings = LoggerSettings::default();
            Self::new(settings.level, settings.format, settings.sink.console())
        })
    }

    /// Replace level, format and sink in one step.
    pub fn configure(&self, settings: LoggerSettings) {
        let mut state = self.state.lock();
        state.min_level = settings.level;
        state.format = settings.format;
        state.console = settings.sink.console();
    }

    /// Route records to an arbitrary console, keeping level and format.
    pub fn redirect(&self, console: Console) {
        self.state.lock().console = console;
    }

    pub fn set_level(&self, level: Level) {
        self.state.lock().min_level = level;
    }

    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.state.lock().min_level
    }

    /// Log an application-level message.
    pub fn log(&self, level: Level, message: &str) {
        self.record(level, "app", message);
    }

    /// Log a message attributed to a component. Write failures are dropped;
    /// logging never fails the caller.
    pub fn record(&self, level: Level, target: &'static str, message: &str) {
        let state = self.state.lock();
        if level < state.min_level {
            return;
        }
        let line = match state.format {
            LogFormat::Text => format!("[{level}] {message}\n"),
            LogFormat::Jsonl => match LogRecord::now(level, target, message).to_json_line() {
                Ok(line) => line,
                Err(_) => return,
            },
        };
        let _ = state.console.emit(&line);
    }
}

/// Shorthand for `Logger::instance().record(..)`.
pub fn emit(level: Level, target: &'static str, message: &str) {
    Logger::instance().record(level, target, message);
}

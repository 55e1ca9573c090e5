//! NE-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::PathBuf;

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, NotifyError>;

/// Top-level error type for the notification engine and its companion demos.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("[NE-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[NE-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[NE-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[NE-1101] unknown database backend: {name}")]
    UnknownBackend { name: String },

    #[error("[NE-2001] no current notification has been set")]
    NoCurrentNotification,

    #[error("[NE-2002] notification observable is no longer alive")]
    ObservableDropped,

    #[error("[NE-3001] delivery via {channel} to {recipient} failed: {details}")]
    Delivery {
        channel: &'static str,
        recipient: String,
        details: String,
    },

    #[error(
        "[NE-3002] dispatch to {} receivers reported {} failures: {}",
        .attempted,
        .failures.len(),
        summarize(.failures)
    )]
    Dispatch {
        attempted: usize,
        failures: Vec<NotifyError>,
    },

    #[error("[NE-3101] IO failure on {target}: {source}")]
    Io {
        target: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("[NE-3102] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },
}

impl NotifyError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "NE-1001",
            Self::MissingConfig { .. } => "NE-1002",
            Self::ConfigParse { .. } => "NE-1003",
            Self::UnknownBackend { .. } => "NE-1101",
            Self::NoCurrentNotification => "NE-2001",
            Self::ObservableDropped => "NE-2002",
            Self::Delivery { .. } => "NE-3001",
            Self::Dispatch { .. } => "NE-3002",
            Self::Io { .. } => "NE-3101",
            Self::Serialization { .. } => "NE-3102",
        }
    }

    /// Whether retrying might resolve the failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Delivery { .. } | Self::Dispatch { .. } | Self::Io { .. }
        )
    }

    /// Convenience constructor for configuration failures.
    #[must_use]
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Convenience constructor for IO errors on a named stream.
    #[must_use]
    pub fn io(target: &'static str, source: std::io::Error) -> Self {
        Self::Io { target, source }
    }

    /// Fold failures collected during one fan-out into a single result.
    ///
    /// Nested `Dispatch` errors are flattened so callers always see the leaf
    /// failures of the whole cycle. Each nested aggregate stands in for one of
    /// the `attempted` receivers, and its own receiver count replaces that slot.
    pub fn from_failures(attempted: usize, failures: Vec<Self>) -> Result<()> {
        if failures.is_empty() {
            return Ok(());
        }
        let mut attempted = attempted;
        let mut flat = Vec::with_capacity(failures.len());
        for failure in failures {
            match failure {
                Self::Dispatch {
                    attempted: nested,
                    failures,
                } => {
                    attempted = attempted.saturating_sub(1) + nested;
                    flat.extend(failures);
                }
                other => flat.push(other),
            }
        }
        let attempted = attempted.max(flat.len());
        Err(Self::Dispatch {
            attempted,
            failures: flat,
        })
    }

    /// Leaf failures carried by this error (itself, unless it aggregates).
    #[must_use]
    pub fn failures(&self) -> &[Self] {
        match self {
            Self::Dispatch { failures, .. } => failures,
            other => std::slice::from_ref(other),
        }
    }
}

fn summarize(failures: &[NotifyError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<serde_json::Error> for NotifyError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for NotifyError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}

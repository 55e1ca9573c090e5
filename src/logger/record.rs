//! JSONL record shape for structured log output.

#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Level;
use crate::core::errors::Result;

/// One structured log line.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord<'a> {
    pub ts: DateTime<Utc>,
    #[serde(serialize_with = "serialize_level")]
    pub level: Level,
    pub target: &'a str,
    pub message: &'a str,
}

impl<'a> LogRecord<'a> {
    #[must_use]
    pub fn now(level: Level, target: &'a str, message: &'a str) -> Self {
        Self {
            ts: Utc::now(),
            level,
            target,
            message,
        }
    }

    /// Serialize as a single newline-terminated JSON object.
    pub fn to_json_line(&self) -> Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

fn serialize_level<S: serde::Serializer>(
    level: &Level,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(level.tag())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_line_is_newline_terminated_with_upper_case_level() {
        let line = LogRecord::now(Level::Warning, "service", "history pruned")
            .to_json_line()
            .expect("serializable");
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);
        let value: serde_json::Value = serde_json::from_str(line.trim_end()).expect("json");
        assert_eq!(value["level"], "WARNING");
        assert_eq!(value["target"], "service");
        assert!(value["ts"].as_str().is_some_and(|ts| ts.contains('T')));
    }

    #[test]
    fn messages_with_newlines_stay_on_one_line() {
        let line = LogRecord::now(Level::Info, "app", "a\nb")
            .to_json_line()
            .expect("serializable");
        assert_eq!(line.matches('\n').count(), 1);
    }
}

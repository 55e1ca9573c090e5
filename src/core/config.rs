//! TOML configuration for the notification pipeline and its logger.
//!
//! Every section is optional; missing keys fall back to the reference demo
//! values so an empty file behaves exactly like no file at all.

#![allow(missing_docs)]

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{NotifyError, Result};
use crate::logger::LoggerSettings;

/// Timestamp applied by the timestamp decorator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum TimestampMode {
    /// Use `fixed_timestamp` verbatim.
    #[default]
    Fixed,
    /// Capture the local clock when the notification is built.
    Now,
    /// Skip the timestamp decorator entirely.
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSection {
    pub message: String,
    /// Empty string disables the signature decorator.
    pub signature: String,
    pub timestamp: TimestampMode,
    pub fixed_timestamp: String,
}

impl Default for NotificationSection {
    fn default() -> Self {
        Self {
            message: "Congratulations!! You are selected for this opportunity".to_string(),
            signature: "Google :)".to_string(),
            timestamp: TimestampMode::Fixed,
            fixed_timestamp: "2025-01-10 10:00:00".to_string(),
        }
    }
}

/// Delivery recipients, registered on the engine in listed order
/// (all email recipients first, then SMS).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelsSection {
    pub email: Vec<String>,
    pub sms: Vec<String>,
}

impl Default for ChannelsSection {
    fn default() -> Self {
        Self {
            email: vec!["vivek.singh1@gmail.com".to_string()],
            sms: vec!["+91-9200202000".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub notification: NotificationSection,
    pub channels: ChannelsSection,
    pub logging: LoggerSettings,
}

impl EngineConfig {
    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NotifyError::MissingConfig {
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path).map_err(|source| NotifyError::Io {
            target: "config file",
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Structural checks that do not depend on recipient syntax; recipients
    /// are validated when their strategies are constructed.
    pub fn validate(&self) -> Result<()> {
        if self.notification.message.trim().is_empty() {
            return Err(NotifyError::invalid_config(
                "notification.message must not be empty",
            ));
        }
        if self.notification.timestamp == TimestampMode::Fixed
            && self.notification.fixed_timestamp.trim().is_empty()
        {
            return Err(NotifyError::invalid_config(
                "notification.fixed_timestamp is required when timestamp = \"fixed\"",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{Level, LogFormat, LogSink};
    use std::io::Write as _;

    #[test]
    fn empty_document_matches_defaults() {
        let config = EngineConfig::from_toml("").expect("empty config parses");
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.channels.email, vec!["vivek.singh1@gmail.com"]);
        assert_eq!(config.logging.level, Level::Warning);
    }

    #[test]
    fn sections_override_individual_keys() {
        let config = EngineConfig::from_toml(
            r#"
            [notification]
            signature = "Ops"
            timestamp = "none"

            [channels]
            email = ["a@example.com", "b@example.com"]
            sms = []

            [logging]
            level = "info"
            format = "jsonl"
            sink = "discard"
            "#,
        )
        .expect("valid config");
        assert_eq!(config.notification.signature, "Ops");
        assert_eq!(config.notification.timestamp, TimestampMode::None);
        assert_eq!(
            config.notification.message,
            NotificationSection::default().message
        );
        assert_eq!(config.channels.email.len(), 2);
        assert!(config.channels.sms.is_empty());
        assert_eq!(config.logging.format, LogFormat::Jsonl);
        assert_eq!(config.logging.sink, LogSink::Discard);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = EngineConfig::from_toml("[notification\nmessage = 1").expect_err("bad toml");
        assert_eq!(err.code(), "NE-1003");
    }

    #[test]
    fn blank_message_is_rejected() {
        let err = EngineConfig::from_toml("[notification]\nmessage = \"  \"")
            .expect_err("blank message");
        assert_eq!(err.code(), "NE-1001");
    }

    #[test]
    fn fixed_mode_requires_a_label() {
        let err = EngineConfig::from_toml("[notification]\nfixed_timestamp = \"\"")
            .expect_err("missing label");
        assert!(err.to_string().contains("fixed_timestamp"));
        assert!(
            EngineConfig::from_toml("[notification]\nfixed_timestamp = \"\"\ntimestamp = \"now\"")
                .is_ok()
        );
    }

    #[test]
    fn load_reports_missing_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = EngineConfig::load(&dir.path().join("absent.toml")).expect_err("missing");
        assert_eq!(err.code(), "NE-1002");
    }

    #[test]
    fn load_reads_files_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[channels]\nsms = [\"+1-555-0100\"]").expect("write config");
        let config = EngineConfig::load(file.path()).expect("load");
        assert_eq!(config.channels.sms, vec!["+1-555-0100"]);
    }
}

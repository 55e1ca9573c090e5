use std::sync::LazyLock;

use regex::Regex;

use super::{NotificationStrategy, delivery_error, require_recipient};
use crate::core::console::Console;
use crate::core::errors::{NotifyError, Result};

// Optional leading '+', then digits with '-' or ' ' separators, at least six digits overall.
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9](?:[\- ]?[0-9]){5,}$").expect("phone pattern compiles"));

/// Simulated SMS delivery: prints the number header, then the content.
#[derive(Debug, Clone)]
pub struct SmsStrategy {
    number: String,
    console: Console,
}

impl SmsStrategy {
    pub fn new(number: impl Into<String>, console: Console) -> Result<Self> {
        let number = number.into();
        require_recipient("sms", &number)?;
        if !PHONE.is_match(&number) {
            return Err(NotifyError::invalid_config(format!(
                "malformed phone number: {number}"
            )));
        }
        Ok(Self { number, console })
    }
}

impl NotificationStrategy for SmsStrategy {
    fn channel(&self) -> &'static str {
        "sms"
    }

    fn recipient(&self) -> &str {
        &self.number
    }

    fn send_notification(&self, content: &str) -> Result<()> {
        self.console
            .emit(&format!("Notification send via SMS: {}\n{content}\n", self.number))
            .map_err(|err| delivery_error(self, &err))
    }
}

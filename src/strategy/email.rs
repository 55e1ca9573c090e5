use std::sync::LazyLock;

use regex::Regex;

use super::{NotificationStrategy, delivery_error, require_recipient};
use crate::core::console::Console;
use crate::core::errors::{NotifyError, Result};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

/// Simulated email delivery: prints the address header, then the content.
#[derive(Debug, Clone)]
pub struct EmailStrategy {
    address: String,
    console: Console,
}

impl EmailStrategy {
    pub fn new(address: impl Into<String>, console: Console) -> Result<Self> {
        let address = address.into();
        require_recipient("email", &address)?;
        if !EMAIL.is_match(&address) {
            return Err(NotifyError::invalid_config(format!(
                "malformed email address: {address}"
            )));
        }
        Ok(Self { address, console })
    }
}

impl NotificationStrategy for EmailStrategy {
    fn channel(&self) -> &'static str {
        "email"
    }

    fn recipient(&self) -> &str {
        &self.address
    }

    fn send_notification(&self, content: &str) -> Result<()> {
        self.console
            .emit(&format!(
                "Notification send via email: {}\n{content}\n",
                self.address
            ))
            .map_err(|err| delivery_error(self, &err))
    }
}

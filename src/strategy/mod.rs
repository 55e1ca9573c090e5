//! Pluggable delivery channels.
//!
//! The engine only ever sees [`NotificationStrategy`]; swapping the simulated
//! console channels for a real transport means adding another implementation,
//! with no change to the observable or the engine.

mod email;
mod sms;

use std::fmt;

use crate::core::errors::{NotifyError, Result};
pub use email::EmailStrategy;
pub use sms::SmsStrategy;

/// A delivery channel bound to one recipient at construction.
pub trait NotificationStrategy: fmt::Debug + Send + Sync {
    /// Short channel name used in logs and delivery errors.
    fn channel(&self) -> &'static str;

    fn recipient(&self) -> &str;

    /// Deliver `content`. Implementations must not retain or alter it.
    fn send_notification(&self, content: &str) -> Result<()>;
}

/// Wrap a channel-level failure as a delivery error for `strategy`.
pub(crate) fn delivery_error(
    strategy: &dyn NotificationStrategy,
    cause: &NotifyError,
) -> NotifyError {
    NotifyError::Delivery {
        channel: strategy.channel(),
        recipient: strategy.recipient().to_string(),
        details: cause.to_string(),
    }
}

fn require_recipient(channel: &str, recipient: &str) -> Result<()> {
    if recipient.trim().is_empty() {
        return Err(NotifyError::invalid_config(format!(
            "{channel} recipient must not be empty"
        )));
    }
    Ok(())
}

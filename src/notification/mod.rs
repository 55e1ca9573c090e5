//! Notification payloads and the decorators that augment their rendered text.
//!
//! A notification is an immutable value exposing [`Notification::content`].
//! Decorators exclusively own the notification they wrap, so a chain is a
//! strict single-owner list: dropping the outermost value drops the whole
//! chain, and a decorator can only ever wrap a value that already exists,
//! which rules out cycles.

pub mod decorators;

use std::fmt;

use chrono::NaiveDateTime;

use crate::core::errors::Result;
pub use decorators::{SignatureDecorator, TIMESTAMP_FORMAT, TimestampDecorator};

/// Rendered text payload. Implementations must be pure: repeated calls return
/// the same string and have no side effects.
pub trait Notification: fmt::Debug + Send + Sync {
    fn content(&self) -> String;
}

impl<N: Notification + ?Sized> Notification for Box<N> {
    fn content(&self) -> String {
        (**self).content()
    }
}

/// Plain text notification; the innermost link of every chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleNotification {
    text: String,
}

impl SimpleNotification {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Notification for SimpleNotification {
    fn content(&self) -> String {
        self.text.clone()
    }
}

/// Chaining helpers so decorated notifications read inside-out:
/// `SimpleNotification::new(..).timestamped(..)?.signed(..)?`.
pub trait NotificationExt: Notification + Sized + 'static {
    /// Prefix with a fixed timestamp label.
    fn timestamped(self, label: impl Into<String>) -> Result<TimestampDecorator> {
        TimestampDecorator::new(self, label)
    }

    /// Prefix with an explicit moment rendered as [`TIMESTAMP_FORMAT`].
    fn timestamped_at(self, moment: NaiveDateTime) -> TimestampDecorator {
        TimestampDecorator::at(self, moment)
    }

    /// Prefix with the local wall clock captured right now.
    fn timestamped_now(self) -> TimestampDecorator {
        TimestampDecorator::now(self)
    }

    /// Append a signature block.
    fn signed(self, signature: impl Into<String>) -> Result<SignatureDecorator> {
        SignatureDecorator::new(self, signature)
    }

    fn boxed(self) -> Box<dyn Notification> {
        Box::new(self)
    }
}

impl<N: Notification + 'static> NotificationExt for N {}

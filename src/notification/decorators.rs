//! Timestamp and signature decorators.

use chrono::{Local, NaiveDateTime};

use super::Notification;
use crate::core::errors::{NotifyError, Result};

/// Rendering used for clock-derived timestamp labels.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Prefixes the wrapped content with `[<timestamp>] `.
///
/// The label is fixed when the decorator is built, so rendering stays
/// deterministic no matter when or how often `content()` is called.
#[derive(Debug)]
pub struct TimestampDecorator {
    inner: Box<dyn Notification>,
    stamp: String,
}

impl TimestampDecorator {
    /// Wrap `inner` with a caller-supplied label. Blank labels are rejected.
    pub fn new<N: Notification + 'static>(inner: N, label: impl Into<String>) -> Result<Self> {
        let stamp = label.into();
        if stamp.trim().is_empty() {
            return Err(NotifyError::invalid_config(
                "timestamp label must not be empty",
            ));
        }
        Ok(Self {
            inner: Box::new(inner),
            stamp,
        })
    }

    pub fn at<N: Notification + 'static>(inner: N, moment: NaiveDateTime) -> Self {
        Self {
            inner: Box::new(inner),
            stamp: moment.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn now<N: Notification + 'static>(inner: N) -> Self {
        Self::at(inner, Local::now().naive_local())
    }

    #[must_use]
    pub fn stamp(&self) -> &str {
        &self.stamp
    }
}

impl Notification for TimestampDecorator {
    fn content(&self) -> String {
        format!("[{}] {}", self.stamp, self.inner.content())
    }
}

/// Appends `\n-- <signature>\n\n` to the wrapped content.
#[derive(Debug)]
pub struct SignatureDecorator {
    inner: Box<dyn Notification>,
    signature: String,
}

impl SignatureDecorator {
    /// Wrap `inner` with a signature block. Blank signatures are rejected.
    pub fn new<N: Notification + 'static>(inner: N, signature: impl Into<String>) -> Result<Self> {
        let signature = signature.into();
        if signature.trim().is_empty() {
            return Err(NotifyError::invalid_config("signature must not be empty"));
        }
        Ok(Self {
            inner: Box::new(inner),
            signature,
        })
    }

    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

impl Notification for SignatureDecorator {
    fn content(&self) -> String {
        format!("{}\n-- {}\n\n", self.inner.content(), self.signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{NotificationExt, SimpleNotification};
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const OFFER: &str = "Congratulations!! You are selected for this opportunity";

    #[derive(Debug)]
    struct DropCounter {
        drops: Arc<AtomicUsize>,
    }

    impl Notification for DropCounter {
        fn content(&self) -> String {
            "counted".to_string()
        }
    }

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn timestamp_then_signature_matches_reference_rendering() {
        let notification = SimpleNotification::new(OFFER)
            .timestamped("2025-01-10 10:00:00")
            .and_then(|n| n.signed("Google :)"))
            .expect("valid decorators");
        assert_eq!(
            notification.content(),
            "[2025-01-10 10:00:00] Congratulations!! You are selected for this opportunity\n-- Google :)\n\n"
        );
    }

    #[test]
    fn explicit_moment_uses_timestamp_format() {
        let moment = NaiveDate::from_ymd_opt(2025, 1, 10)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .expect("valid date");
        let notification = SimpleNotification::new("x").timestamped_at(moment);
        assert_eq!(notification.stamp(), "2025-01-10 10:00:00");
        assert_eq!(notification.content(), "[2025-01-10 10:00:00] x");
    }

    #[test]
    fn clock_stamp_is_captured_once() {
        let notification = SimpleNotification::new("x").timestamped_now();
        let first = notification.content();
        assert_eq!(notification.stamp().len(), "2025-01-10 10:00:00".len());
        assert_eq!(first, notification.content());
    }

    #[test]
    fn blank_affixes_fail_at_construction() {
        let err = SimpleNotification::new("x")
            .signed("   ")
            .expect_err("blank signature");
        assert_eq!(err.code(), "NE-1001");
        assert!(SimpleNotification::new("x").timestamped("").is_err());
    }

    #[test]
    fn decorators_stack_any_number_of_times() {
        let notification = SimpleNotification::new("body")
            .signed("first")
            .and_then(|n| n.signed("second"))
            .and_then(|n| n.timestamped("t1"))
            .and_then(|n| n.timestamped("t0"))
            .expect("valid decorators");
        assert_eq!(
            notification.content(),
            "[t0] [t1] body\n-- first\n\n\n-- second\n\n"
        );
    }

    #[test]
    fn dropping_the_outermost_decorator_drops_the_chain() {
        let drops = Arc::new(AtomicUsize::new(0));
        let chain = DropCounter {
            drops: Arc::clone(&drops),
        }
        .timestamped("t")
        .and_then(|n| n.signed("s"))
        .expect("valid decorators");
        assert_eq!(drops.load(Ordering::SeqCst), 0);
        drop(chain);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    proptest! {
        #[test]
        fn prefix_and_suffix_compose_independently_of_order(
            body in ".{0,64}",
            stamp in "[0-9][0-9:\\- ]{0,18}",
            signature in "[A-Za-z :)]{0,16}[A-Za-z]",
        ) {
            let expected = format!("[{stamp}] {body}\n-- {signature}\n\n");
            let signed_outer = SimpleNotification::new(body.clone())
                .timestamped(stamp.clone())
                .and_then(|n| n.signed(signature.clone()))
                .expect("valid decorators");
            let stamped_outer = SimpleNotification::new(body)
                .signed(signature)
                .and_then(|n| n.timestamped(stamp))
                .expect("valid decorators");
            prop_assert_eq!(signed_outer.content(), expected.clone());
            prop_assert_eq!(stamped_outer.content(), expected);
        }
    }
}

//! Process-wide notification service: the single entry point clients submit
//! notifications through.
//!
//! The service is built lazily on the first [`NotificationService::instance`]
//! call, exactly once even under concurrent first access, and lives for the
//! rest of the process. It owns the observable and an append-only history of
//! everything submitted.

use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::core::errors::Result;
use crate::logger::{self, Level};
use crate::notification::Notification;
use crate::observer::NotificationObservable;

/// One entry of the submission history.
#[derive(Debug, Clone)]
pub struct SubmittedNotification {
    /// 1-based submission order.
    pub sequence: u64,
    pub submitted_at: DateTime<Utc>,
    pub notification: Arc<dyn Notification>,
}

/// Singleton owner of the observable and the submission history.
#[derive(Debug)]
pub struct NotificationService {
    observable: Arc<NotificationObservable>,
    history: Mutex<Vec<SubmittedNotification>>,
}

static SERVICE: OnceLock<NotificationService> = OnceLock::new();

impl NotificationService {
    fn new() -> Self {
        Self {
            observable: NotificationObservable::shared(),
            history: Mutex::new(Vec::new()),
        }
    }

    /// The shared service, constructed on first use.
    pub fn instance() -> &'static Self {
        SERVICE.get_or_init(|| {
            logger::emit(Level::Info, "service", "notification service initialized");
            Self::new()
        })
    }

    /// The observable subscribers attach to.
    #[must_use]
    pub fn observable(&self) -> Arc<NotificationObservable> {
        Arc::clone(&self.observable)
    }

    /// Record `notification` in the history and publish it. Returns once every
    /// subscriber has run; delivery failures come back aggregated.
    pub fn send_notification<N: Notification + 'static>(&self, notification: N) -> Result<()> {
        self.submit(Arc::new(notification))
    }

    /// Like [`Self::send_notification`] for an already shared notification.
    pub fn submit(&self, notification: Arc<dyn Notification>) -> Result<()> {
        // History order must match delivery order across concurrent callers.
        let _publishing = self.observable.publishing();
        let sequence = {
            let mut history = self.history.lock();
            let sequence = history.len() as u64 + 1;
            history.push(SubmittedNotification {
                sequence,
                submitted_at: Utc::now(),
                notification: Arc::clone(&notification),
            });
            sequence
        };
        logger::emit(
            Level::Info,
            "service",
            &format!("notification #{sequence} submitted"),
        );
        self.observable.set_notification(notification)
    }

    /// Snapshot of every submission, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<SubmittedNotification> {
        self.history.lock().clone()
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.lock().len()
    }
}

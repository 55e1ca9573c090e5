//! Observable registry holding the current notification and its subscribers.
//!
//! [`NotificationObservable::set_notification`] is the only delivery trigger:
//! it swaps the current notification and synchronously runs every subscriber
//! in registration order before returning. The whole replace-and-notify
//! sequence runs under one re-entrant lock, so concurrent publishers are
//! serialized and every subscriber sees a fully-formed current notification.
//! A subscriber may publish again from inside `update()` without deadlocking.

pub mod subscribers;

use std::sync::Arc;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard, RwLock};

use crate::core::errors::{NotifyError, Result};
use crate::logger::{self, Level};
use crate::notification::Notification;
pub use subscribers::{LoggerObserver, NotificationEngine};

/// Something that reacts when the observable's notification changes.
pub trait Observer: Send + Sync {
    /// Short label used in diagnostics.
    fn name(&self) -> &'static str;

    /// Called once per notification cycle, after the new notification is in place.
    fn update(&self) -> Result<()>;
}

/// Registry of subscribers plus the single current notification.
pub struct NotificationObservable {
    publish: ReentrantMutex<()>,
    current: RwLock<Option<Arc<dyn Notification>>>,
    observers: RwLock<Vec<Arc<dyn Observer>>>,
}

impl std::fmt::Debug for NotificationObservable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationObservable")
            .field("has_current", &self.current.read().is_some())
            .field("observers", &self.observer_count())
            .finish()
    }
}

impl Default for NotificationObservable {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationObservable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            publish: ReentrantMutex::new(()),
            current: RwLock::new(None),
            observers: RwLock::new(Vec::new()),
        }
    }

    /// New observable behind an `Arc`, ready for subscribers to reference.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Append a subscriber. The same subscriber may be registered more than
    /// once and is then notified once per registration.
    pub fn add_observer(&self, observer: Arc<dyn Observer>) {
        self.observers.write().push(observer);
    }

    /// Remove every registration of `observer` (compared by identity).
    /// Returns how many entries were removed; zero when it was not registered.
    pub fn remove_observer<O: Observer + ?Sized>(&self, observer: &Arc<O>) -> usize {
        let target = Arc::as_ptr(observer);
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|registered| !std::ptr::addr_eq(Arc::as_ptr(registered), target));
        before - observers.len()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.read().len()
    }

    /// Hold the publish lock across a larger critical section. Re-entrant, so
    /// the holder may still call [`Self::set_notification`].
    pub(crate) fn publishing(&self) -> ReentrantMutexGuard<'_, ()> {
        self.publish.lock()
    }

    /// Replace the current notification, release the previous one, then
    /// notify every subscriber. Subscriber failures are collected and
    /// returned together after all subscribers have run.
    pub fn set_notification(&self, notification: Arc<dyn Notification>) -> Result<()> {
        let _publishing = self.publish.lock();
        let previous = self.current.write().replace(notification);
        drop(previous);
        self.notify_observers()
    }

    /// Run `update()` on a snapshot of the registered subscribers, in order.
    ///
    /// Subscribers added or removed during the cycle take effect on the next one.
    pub fn notify_observers(&self) -> Result<()> {
        let _publishing = self.publish.lock();
        let observers: Vec<Arc<dyn Observer>> = self.observers.read().clone();
        logger::emit(
            Level::Info,
            "observable",
            &format!("notifying {} subscribers", observers.len()),
        );
        let mut failures = Vec::new();
        for observer in &observers {
            if let Err(err) = observer.update() {
                logger::emit(
                    Level::Error,
                    "observable",
                    &format!("subscriber {} failed: {err}", observer.name()),
                );
                failures.push(err);
            }
        }
        NotifyError::from_failures(observers.len(), failures)
    }

    /// The notification most recently set, if any.
    #[must_use]
    pub fn current_notification(&self) -> Option<Arc<dyn Notification>> {
        self.current.read().clone()
    }

    /// Rendered content of the current notification.
    pub fn notification_content(&self) -> Result<String> {
        self.current
            .read()
            .as_ref()
            .map(|notification| notification.content())
            .ok_or(NotifyError::NoCurrentNotification)
    }
}

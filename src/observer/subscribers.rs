//! Concrete subscribers: a console logger and the strategy fan-out engine.
//!
//! Both keep only a `Weak` back-reference to their observable. If the
//! observable is gone by the time `update()` runs, they fail with
//! [`NotifyError::ObservableDropped`] instead of touching freed state.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use super::{NotificationObservable, Observer};
use crate::core::console::Console;
use crate::core::errors::{NotifyError, Result};
use crate::logger::{self, Level};
use crate::strategy::NotificationStrategy;

fn resolve(observable: &Weak<NotificationObservable>) -> Result<Arc<NotificationObservable>> {
    observable.upgrade().ok_or(NotifyError::ObservableDropped)
}

/// Prints every new notification to its console.
#[derive(Debug)]
pub struct LoggerObserver {
    observable: Weak<NotificationObservable>,
    console: Console,
}

impl LoggerObserver {
    #[must_use]
    pub fn new(observable: &Arc<NotificationObservable>, console: Console) -> Self {
        Self {
            observable: Arc::downgrade(observable),
            console,
        }
    }
}

impl Observer for LoggerObserver {
    fn name(&self) -> &'static str {
        "logger"
    }

    fn update(&self) -> Result<()> {
        let content = resolve(&self.observable)?.notification_content()?;
        self.console
            .emit(&format!("Logging new Notification: \n{content}\n"))
    }
}

/// Fans each new notification out to its delivery strategies.
///
/// Strategies run in the order they were added, all receiving the same
/// rendered content. A failing strategy never stops the remaining ones;
/// failures are returned together once every strategy has been tried.
#[derive(Debug)]
pub struct NotificationEngine {
    observable: Weak<NotificationObservable>,
    strategies: RwLock<Vec<Arc<dyn NotificationStrategy>>>,
}

impl NotificationEngine {
    #[must_use]
    pub fn new(observable: &Arc<NotificationObservable>) -> Self {
        Self {
            observable: Arc::downgrade(observable),
            strategies: RwLock::new(Vec::new()),
        }
    }

    /// Append a delivery strategy. No de-duplication.
    pub fn add_notification_strategy(&self, strategy: Arc<dyn NotificationStrategy>) {
        self.strategies.write().push(strategy);
    }

    #[must_use]
    pub fn strategy_count(&self) -> usize {
        self.strategies.read().len()
    }
}

impl Observer for NotificationEngine {
    fn name(&self) -> &'static str {
        "engine"
    }

    fn update(&self) -> Result<()> {
        let content = resolve(&self.observable)?.notification_content()?;
        let strategies = self.strategies.read().clone();
        let mut failures = Vec::new();
        for strategy in &strategies {
            match strategy.send_notification(&content) {
                Ok(()) => logger::emit(
                    Level::Info,
                    "engine",
                    &format!("delivered via {} to {}", strategy.channel(), strategy.recipient()),
                ),
                Err(err) => {
                    logger::emit(Level::Error, "engine", &err.to_string());
                    failures.push(err);
                }
            }
        }
        NotifyError::from_failures(strategies.len(), failures)
    }
}

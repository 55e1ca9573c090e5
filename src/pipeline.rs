//! Assembly of a notification run from configuration: the decorated
//! notification, the delivery strategies, and the `[logger, engine]`
//! subscriber pair.

use std::sync::Arc;

use crate::core::config::{ChannelsSection, NotificationSection, TimestampMode};
use crate::core::console::Console;
use crate::core::errors::Result;
use crate::notification::{Notification, NotificationExt, SimpleNotification};
use crate::observer::{LoggerObserver, NotificationEngine, NotificationObservable};
use crate::strategy::{EmailStrategy, NotificationStrategy, SmsStrategy};

/// Build `message`, then apply the timestamp (innermost) and signature.
pub fn build_notification(section: &NotificationSection) -> Result<Box<dyn Notification>> {
    let base = SimpleNotification::new(section.message.clone());
    let stamped = match section.timestamp {
        TimestampMode::Fixed => base.timestamped(section.fixed_timestamp.clone())?.boxed(),
        TimestampMode::Now => base.timestamped_now().boxed(),
        TimestampMode::None => base.boxed(),
    };
    if section.signature.is_empty() {
        return Ok(stamped);
    }
    Ok(stamped.signed(section.signature.clone())?.boxed())
}

/// Email strategies first, then SMS, each in listed order. Any invalid
/// recipient fails the whole build before anything is sent.
pub fn build_strategies(
    channels: &ChannelsSection,
    console: &Console,
) -> Result<Vec<Arc<dyn NotificationStrategy>>> {
    let mut strategies: Vec<Arc<dyn NotificationStrategy>> = Vec::new();
    for address in &channels.email {
        strategies.push(Arc::new(EmailStrategy::new(address.clone(), console.clone())?));
    }
    for number in &channels.sms {
        strategies.push(Arc::new(SmsStrategy::new(number.clone(), console.clone())?));
    }
    Ok(strategies)
}

/// The logger and engine registered on an observable by [`attach`].
#[derive(Debug, Clone)]
pub struct Subscription {
    pub logger: Arc<LoggerObserver>,
    pub engine: Arc<NotificationEngine>,
}

impl Subscription {
    /// Unregister both subscribers.
    pub fn detach(&self, observable: &NotificationObservable) {
        observable.remove_observer(&self.logger);
        observable.remove_observer(&self.engine);
    }
}

/// Register a logger, then an engine carrying `strategies`, on `observable`.
pub fn attach(
    observable: &Arc<NotificationObservable>,
    strategies: Vec<Arc<dyn NotificationStrategy>>,
    console: &Console,
) -> Subscription {
    let logger = Arc::new(LoggerObserver::new(observable, console.clone()));
    let engine = Arc::new(NotificationEngine::new(observable));
    for strategy in strategies {
        engine.add_notification_strategy(strategy);
    }
    observable.add_observer(logger.clone());
    observable.add_observer(engine.clone());
    Subscription { logger, engine }
}

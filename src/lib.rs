//! Notification engine assembled from four classic building blocks:
//! decorated notifications, an observable subscriber registry, pluggable
//! delivery strategies, and a process-wide submission service.
//!
//! ```
//! use std::sync::Arc;
//! use notification_patterns::core::console::Console;
//! use notification_patterns::notification::{NotificationExt, SimpleNotification};
//! use notification_patterns::observer::{LoggerObserver, NotificationObservable};
//!
//! let observable = NotificationObservable::shared();
//! let (console, buffer) = Console::capture();
//! observable.add_observer(Arc::new(LoggerObserver::new(&observable, console)));
//!
//! let notification = SimpleNotification::new("hello").signed("ops").unwrap();
//! observable.set_notification(Arc::new(notification)).unwrap();
//! assert_eq!(buffer.contents(), "Logging new Notification: \nhello\n-- ops\n\n\n");
//! ```

pub mod core;
pub mod logger;
pub mod notification;
pub mod observer;
pub mod patterns;
pub mod pipeline;
pub mod service;
pub mod strategy;

#[cfg(feature = "cli")]
pub mod cli_app;

pub use crate::core::errors::{NotifyError, Result};
pub use service::NotificationService;

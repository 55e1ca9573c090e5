//! Companion demonstrations: singleton logger, database factory, payment strategy.
//!
//! Each demo writes its transcript to a [`Console`]. The singleton demo also
//! logs through [`Logger::instance`], whose sink the caller controls.

pub mod database;
pub mod payment;

use crate::core::console::Console;
use crate::core::errors::Result;
use crate::logger::{Level, Logger};
use database::{DatabaseFactory, DatabaseKind};
use payment::{CreditCardPayment, CryptoPayment, PaymentContext};

/// Show that repeated `Logger::instance()` calls share one logger.
pub fn singleton_demo(console: &Console) -> Result<()> {
    console.emit("Testing Singleton Design Pattern\n")?;

    let first = Logger::instance();
    let second = Logger::instance();
    let same = if std::ptr::eq(first, second) { "Yes" } else { "No" };
    console.emit(&format!("Same instance ?? {same}\n \n"))?;

    first.log(Level::Info, "Application started!");
    second.log(Level::Error, "Something went wrong!");

    console.emit("\n\n")
}

/// Backends and queries used by the reference factory run.
pub const DEFAULT_FACTORY_RUN: [(DatabaseKind, &str); 2] = [
    (DatabaseKind::MySql, "Select * from users"),
    (DatabaseKind::PostgreSql, "Select * from pUsers"),
];

/// Connect to each backend in turn and run its query.
pub fn factory_demo(console: &Console, runs: &[(DatabaseKind, &str)]) -> Result<()> {
    console.emit("Testing Factory Pattern\n")?;
    for (kind, query) in runs {
        let mut db = DatabaseFactory::create(*kind, console.clone());
        db.connect()?;
        db.execute(query)?;
    }
    console.emit("\n\n")
}

/// Pay twice, switching from a credit card to a crypto wallet in between.
pub fn payment_demo(console: &Console) -> Result<()> {
    console.emit("Testing Strategy Pattern\n")?;

    let mut context = PaymentContext::new(console.clone());
    context.set_strategy(CreditCardPayment::new("2322-1232-2231-0292")?);
    context.execute_payment(100.2)?;

    context.set_strategy(CryptoPayment::new("0x29297562202672020220010")?);
    context.execute_payment(2921.63)?;

    console.emit("\n\n")
}

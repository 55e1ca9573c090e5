//! Payment methods swappable at runtime behind one context.

use std::fmt;

use crate::core::console::Console;
use crate::core::errors::{NotifyError, Result};

/// A way to pay. Returns the receipt line for `amount`.
pub trait PaymentStrategy: fmt::Debug + Send + Sync {
    fn pay(&self, amount: f64) -> String;
}

/// Card payment; receipts only show the last four digits.
#[derive(Debug, Clone)]
pub struct CreditCardPayment {
    card_number: String,
}

impl CreditCardPayment {
    pub fn new(card_number: impl Into<String>) -> Result<Self> {
        let card_number = card_number.into();
        if card_number.chars().filter(char::is_ascii_digit).count() < 4 {
            return Err(NotifyError::invalid_config(
                "card number needs at least four digits",
            ));
        }
        Ok(Self { card_number })
    }

    fn last_four(&self) -> String {
        let mut digits: Vec<char> = self
            .card_number
            .chars()
            .rev()
            .filter(char::is_ascii_digit)
            .take(4)
            .collect();
        digits.reverse();
        digits.into_iter().collect()
    }
}

impl PaymentStrategy for CreditCardPayment {
    fn pay(&self, amount: f64) -> String {
        format!("Paid ${amount} using Credit Card: {}", self.last_four())
    }
}

#[derive(Debug, Clone)]
pub struct PayPalPayment {
    email: String,
}

impl PayPalPayment {
    pub fn new(email: impl Into<String>) -> Result<Self> {
        let email = email.into();
        if !email.contains('@') {
            return Err(NotifyError::invalid_config(format!(
                "PayPal account must be an email address: {email}"
            )));
        }
        Ok(Self { email })
    }
}

impl PaymentStrategy for PayPalPayment {
    fn pay(&self, amount: f64) -> String {
        format!("Paid ${amount} using PayPal: {}", self.email)
    }
}

/// Crypto payment; receipts show the first eight wallet characters.
#[derive(Debug, Clone)]
pub struct CryptoPayment {
    wallet: String,
}

impl CryptoPayment {
    pub fn new(wallet: impl Into<String>) -> Result<Self> {
        let wallet = wallet.into();
        if wallet.chars().count() < 8 {
            return Err(NotifyError::invalid_config(
                "wallet address needs at least eight characters",
            ));
        }
        Ok(Self { wallet })
    }
}

impl PaymentStrategy for CryptoPayment {
    fn pay(&self, amount: f64) -> String {
        let prefix: String = self.wallet.chars().take(8).collect();
        format!("Paid ${amount} using Crypto wallet: {prefix}...")
    }
}

/// Holds the active payment method, if any.
#[derive(Debug)]
pub struct PaymentContext {
    strategy: Option<Box<dyn PaymentStrategy>>,
    console: Console,
}

impl PaymentContext {
    #[must_use]
    pub fn new(console: Console) -> Self {
        Self {
            strategy: None,
            console,
        }
    }

    /// Swap the payment method; the previous one is dropped.
    pub fn set_strategy(&mut self, strategy: impl PaymentStrategy + 'static) {
        self.strategy = Some(Box::new(strategy));
    }

    /// Without a strategy this only prints a notice, whatever the amount.
    pub fn execute_payment(&self, amount: f64) -> Result<()> {
        let Some(strategy) = &self.strategy else {
            return self.console.emit("No Payment strategy set !\n");
        };
        if !amount.is_finite() || amount <= 0.0 {
            return Err(NotifyError::invalid_config(format!(
                "payment amount must be positive, got {amount}"
            )));
        }
        self.console.emit(&format!("{}\n", strategy.pay(amount)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipts_mask_payment_details() {
        let card = CreditCardPayment::new("2322-1232-2231-0292").expect("valid card");
        assert_eq!(card.pay(100.2), "Paid $100.2 using Credit Card: 0292");
        let wallet = CryptoPayment::new("0x29297562202672020220010").expect("valid wallet");
        assert_eq!(wallet.pay(2921.63), "Paid $2921.63 using Crypto wallet: 0x292975...");
        let paypal = PayPalPayment::new("buyer@example.com").expect("valid account");
        assert_eq!(paypal.pay(5.0), "Paid $5 using PayPal: buyer@example.com");
    }

    #[test]
    fn context_switches_strategies_at_runtime() {
        let (console, buffer) = Console::capture();
        let mut context = PaymentContext::new(console);
        context.execute_payment(1.0).expect("prints notice");
        context.set_strategy(CreditCardPayment::new("4111111111111111").expect("valid"));
        context.execute_payment(10.5).expect("paid");
        context.set_strategy(PayPalPayment::new("a@b.c").expect("valid"));
        context.execute_payment(3.25).expect("paid");
        assert_eq!(
            buffer.contents(),
            "No Payment strategy set !\n\
             Paid $10.5 using Credit Card: 1111\n\
             Paid $3.25 using PayPal: a@b.c\n"
        );
    }

    #[test]
    fn card_receipts_skip_trailing_separators() {
        let card = CreditCardPayment::new("1234-").expect("four digits");
        assert_eq!(card.pay(1.0), "Paid $1 using Credit Card: 1234");
        let card = CreditCardPayment::new("4111 1111 1111 12-34").expect("valid");
        assert_eq!(card.pay(2.0), "Paid $2 using Credit Card: 1234");
    }

    #[test]
    fn missing_strategy_notice_ignores_the_amount() {
        let (console, buffer) = Console::capture();
        let context = PaymentContext::new(console);
        for amount in [0.0, -1.0, f64::NAN] {
            context.execute_payment(amount).expect("notice only");
        }
        assert_eq!(buffer.contents(), "No Payment strategy set !\n".repeat(3));
    }

    #[test]
    fn invalid_details_fail_at_construction() {
        assert!(CreditCardPayment::new("12-3").is_err());
        assert!(PayPalPayment::new("not-an-email").is_err());
        assert!(CryptoPayment::new("0x12").is_err());
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let mut context = PaymentContext::new(Console::discard());
        context.set_strategy(CryptoPayment::new("0xabcdef0123").expect("valid"));
        for amount in [0.0, -4.0, f64::NAN, f64::INFINITY] {
            assert!(context.execute_payment(amount).is_err(), "{amount}");
        }
    }
}

use ledger_core_api::{LedgerError, LedgerResult};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::payment::processor::PaymentProcessor;

/// Outcome of a charge dispatched through the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargeOutcome {
    pub method: &'static str,
    pub payment_id: Uuid,
}

/// Routes charges to the first available payment method.
///
/// Processors are tried in registration order; presentation of results is
/// left to the caller, the gateway only emits tracing events.
#[derive(Default)]
pub struct PaymentGateway {
    processors: Vec<Box<dyn PaymentProcessor>>,
}

impl PaymentGateway {
    pub fn new() -> Self {
        Self {
            processors: Vec::new(),
        }
    }

    pub fn register(&mut self, processor: Box<dyn PaymentProcessor>) {
        tracing::debug!(method = processor.method_name(), "payment method registered");
        self.processors.push(processor);
    }

    /// Charge `amount` against the first available method.
    ///
    /// Fails with `InvalidOperation` when no method is available; processor
    /// errors propagate unchanged so the caller can retry.
    pub fn charge(&mut self, amount: Decimal, description: &str) -> LedgerResult<ChargeOutcome> {
        let processor = self
            .processors
            .iter_mut()
            .find(|processor| processor.is_available())
            .ok_or_else(|| {
                LedgerError::InvalidOperation("no payment method is available".to_string())
            })?;

        let method = processor.method_name();
        match processor.process(amount, description) {
            Ok(payment_id) => {
                tracing::info!(method, %amount, %payment_id, "payment processed");
                Ok(ChargeOutcome { method, payment_id })
            }
            Err(err) => {
                tracing::warn!(method, %amount, error = %err, "payment rejected");
                Err(err)
            }
        }
    }

    /// Refund a payment on the method that processed it.
    pub fn refund(&mut self, method: &str, payment_id: Uuid, amount: Decimal) -> LedgerResult<()> {
        let processor = self
            .processors
            .iter_mut()
            .find(|processor| processor.method_name() == method)
            .ok_or_else(|| LedgerError::NotFound(format!("payment method {method}")))?;

        processor.refund(payment_id, amount)?;
        tracing::info!(method, %amount, %payment_id, "payment refunded");
        Ok(())
    }
}

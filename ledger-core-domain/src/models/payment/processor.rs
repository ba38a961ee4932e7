use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use ledger_core_api::{LedgerError, LedgerResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::models::validated::{try_non_blank, PositiveAmount};

/// Immutable record of one processed payment, owned by the processor that
/// accepted it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    id: Uuid,
    amount: Decimal,
    description: HeaplessString<100>,
    processed_at: DateTime<Utc>,
}

impl PaymentReceipt {
    fn new(amount: PositiveAmount, description: HeaplessString<100>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount: amount.value(),
            description,
            processed_at: Utc::now(),
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn processed_at(&self) -> DateTime<Utc> {
        self.processed_at
    }
}

impl Identifiable for PaymentReceipt {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

/// Capability contract for a payment method.
///
/// Every implementation validates the amount, keeps an append-only receipt
/// list, and supports partial refunds up to the original payment amount.
pub trait PaymentProcessor {
    fn method_name(&self) -> &'static str;

    fn is_available(&self) -> bool;

    /// Process a payment, returning the id of the new receipt.
    fn process(&mut self, amount: Decimal, description: &str) -> LedgerResult<Uuid>;

    /// Refund part or all of a previously processed payment.
    fn refund(&mut self, payment_id: Uuid, amount: Decimal) -> LedgerResult<()>;

    fn receipts(&self) -> &[PaymentReceipt];
}

fn find_receipt(receipts: &[PaymentReceipt], payment_id: Uuid) -> LedgerResult<&PaymentReceipt> {
    receipts
        .iter()
        .find(|receipt| receipt.get_id() == payment_id)
        .ok_or_else(|| LedgerError::NotFound(format!("payment {payment_id}")))
}

/// Checks that a cumulative refund stays within the original payment amount.
fn check_refund(
    receipt: &PaymentReceipt,
    already_refunded: Decimal,
    amount: PositiveAmount,
) -> LedgerResult<()> {
    if already_refunded + amount.value() > receipt.amount() {
        return Err(LedgerError::InvalidOperation(format!(
            "refund of {} exceeds remaining refundable amount {}",
            amount,
            receipt.amount() - already_refunded
        )));
    }
    Ok(())
}

/// Card payments with a fixed per-payment limit.
#[derive(Debug)]
pub struct CardProcessor {
    per_payment_limit: Decimal,
    receipts: Vec<PaymentReceipt>,
    refunded: HashMap<Uuid, Decimal>,
}

impl CardProcessor {
    /// Fails with `InvalidArgument` unless the limit is strictly positive.
    pub fn new(per_payment_limit: Decimal) -> LedgerResult<Self> {
        let per_payment_limit = PositiveAmount::new(per_payment_limit)?;
        Ok(Self {
            per_payment_limit: per_payment_limit.value(),
            receipts: Vec::new(),
            refunded: HashMap::new(),
        })
    }
}

impl PaymentProcessor for CardProcessor {
    fn method_name(&self) -> &'static str {
        "Card"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn process(&mut self, amount: Decimal, description: &str) -> LedgerResult<Uuid> {
        let amount = PositiveAmount::new(amount)?;
        let description = try_non_blank::<100>("description", description)?;
        if amount.value() > self.per_payment_limit {
            return Err(LedgerError::InvalidOperation(format!(
                "payment of {} exceeds the per-payment limit {}",
                amount, self.per_payment_limit
            )));
        }
        let receipt = PaymentReceipt::new(amount, description);
        let payment_id = receipt.get_id();
        self.receipts.push(receipt);
        Ok(payment_id)
    }

    fn refund(&mut self, payment_id: Uuid, amount: Decimal) -> LedgerResult<()> {
        let amount = PositiveAmount::new(amount)?;
        let receipt = find_receipt(&self.receipts, payment_id)?;
        let already_refunded = self.refunded.get(&payment_id).copied().unwrap_or_default();
        check_refund(receipt, already_refunded, amount)?;
        self.refunded
            .insert(payment_id, already_refunded + amount.value());
        Ok(())
    }

    fn receipts(&self) -> &[PaymentReceipt] {
        &self.receipts
    }
}

/// Prepaid wallet: payments spend a non-negative balance, refunds restore it.
#[derive(Debug)]
pub struct WalletProcessor {
    balance: Decimal,
    receipts: Vec<PaymentReceipt>,
    refunded: HashMap<Uuid, Decimal>,
}

impl WalletProcessor {
    /// Fails with `InvalidArgument` when the opening balance is negative.
    pub fn new(opening_balance: Decimal) -> LedgerResult<Self> {
        if opening_balance < Decimal::ZERO {
            return Err(LedgerError::InvalidArgument(format!(
                "opening balance must be non-negative, got {opening_balance}"
            )));
        }
        Ok(Self {
            balance: opening_balance,
            receipts: Vec::new(),
            refunded: HashMap::new(),
        })
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }
}

impl PaymentProcessor for WalletProcessor {
    fn method_name(&self) -> &'static str {
        "Wallet"
    }

    fn is_available(&self) -> bool {
        self.balance > Decimal::ZERO
    }

    fn process(&mut self, amount: Decimal, description: &str) -> LedgerResult<Uuid> {
        let amount = PositiveAmount::new(amount)?;
        let description = try_non_blank::<100>("description", description)?;
        if amount.value() > self.balance {
            return Err(LedgerError::InsufficientFunds {
                requested: amount.value(),
                available: self.balance,
            });
        }
        self.balance -= amount.value();
        let receipt = PaymentReceipt::new(amount, description);
        let payment_id = receipt.get_id();
        self.receipts.push(receipt);
        Ok(payment_id)
    }

    fn refund(&mut self, payment_id: Uuid, amount: Decimal) -> LedgerResult<()> {
        let amount = PositiveAmount::new(amount)?;
        let receipt = find_receipt(&self.receipts, payment_id)?;
        let already_refunded = self.refunded.get(&payment_id).copied().unwrap_or_default();
        check_refund(receipt, already_refunded, amount)?;
        self.refunded
            .insert(payment_id, already_refunded + amount.value());
        self.balance += amount.value();
        Ok(())
    }

    fn receipts(&self) -> &[PaymentReceipt] {
        &self.receipts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_processor_respects_limit() {
        let mut card = CardProcessor::new(Decimal::new(500, 0)).unwrap();

        assert!(card.process(Decimal::new(500, 0), "Books").is_ok());
        let result = card.process(Decimal::new(501, 0), "Laptop");

        assert!(matches!(result, Err(LedgerError::InvalidOperation(_))));
        assert_eq!(card.receipts().len(), 1);
    }

    #[test]
    fn test_card_refund_requires_known_receipt() {
        let mut card = CardProcessor::new(Decimal::new(500, 0)).unwrap();

        let result = card.refund(Uuid::new_v4(), Decimal::new(10, 0));

        assert!(matches!(result, Err(LedgerError::NotFound(_))));
    }

    #[test]
    fn test_card_cumulative_refund_capped_at_payment_amount() {
        let mut card = CardProcessor::new(Decimal::new(500, 0)).unwrap();
        let payment_id = card.process(Decimal::new(100, 0), "Books").unwrap();

        card.refund(payment_id, Decimal::new(60, 0)).unwrap();
        card.refund(payment_id, Decimal::new(40, 0)).unwrap();
        let result = card.refund(payment_id, Decimal::new(1, 0));

        assert!(matches!(result, Err(LedgerError::InvalidOperation(_))));
    }

    #[test]
    fn test_wallet_spends_and_restores_balance() {
        let mut wallet = WalletProcessor::new(Decimal::new(100, 0)).unwrap();

        let payment_id = wallet.process(Decimal::new(70, 0), "Groceries").unwrap();
        assert_eq!(wallet.balance(), Decimal::new(30, 0));

        wallet.refund(payment_id, Decimal::new(20, 0)).unwrap();
        assert_eq!(wallet.balance(), Decimal::new(50, 0));
    }

    #[test]
    fn test_wallet_rejects_overdraft() {
        let mut wallet = WalletProcessor::new(Decimal::new(50, 0)).unwrap();

        let result = wallet.process(Decimal::new(80, 0), "Groceries");

        assert!(matches!(
            result,
            Err(LedgerError::InsufficientFunds { requested, available })
                if requested == Decimal::new(80, 0) && available == Decimal::new(50, 0)
        ));
        assert_eq!(wallet.balance(), Decimal::new(50, 0));
        assert!(wallet.receipts().is_empty());
    }

    #[test]
    fn test_empty_wallet_is_unavailable() {
        let wallet = WalletProcessor::new(Decimal::ZERO).unwrap();
        assert!(!wallet.is_available());

        let funded = WalletProcessor::new(Decimal::new(1, 0)).unwrap();
        assert!(funded.is_available());
    }
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::models::validated::PositiveAmount;

/// The kind of ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    Deposit,
    Withdrawal,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Deposit => write!(f, "Deposit"),
            TransactionType::Withdrawal => write!(f, "Withdrawal"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Deposit" => Ok(TransactionType::Deposit),
            "Withdrawal" => Ok(TransactionType::Withdrawal),
            _ => Err(()),
        }
    }
}

/// A single entry in an account's ledger.
///
/// Created once by the owning account, never mutated afterwards. The amount
/// is always strictly positive; the sign is carried by the transaction type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionModel {
    id: Uuid,
    amount: Decimal,
    transaction_type: TransactionType,
    posted_at: DateTime<Utc>,
}

impl TransactionModel {
    /// Only accounts create transactions; the amount has already been
    /// validated as strictly positive at the operation entry point.
    pub(crate) fn new(amount: PositiveAmount, transaction_type: TransactionType) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount: amount.value(),
            transaction_type,
            posted_at: Utc::now(),
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn posted_at(&self) -> DateTime<Utc> {
        self.posted_at
    }

    /// The amount as it contributes to the balance: deposits positive,
    /// withdrawals negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Deposit => self.amount,
            TransactionType::Withdrawal => -self.amount,
        }
    }
}

impl Identifiable for TransactionModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

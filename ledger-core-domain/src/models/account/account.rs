use heapless::String as HeaplessString;
use ledger_core_api::{LedgerError, LedgerResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::account::transaction::{TransactionModel, TransactionType};
use crate::models::identifiable::Identifiable;
use crate::models::validated::{try_non_blank, PositiveAmount};

/// A bank account with an append-only transaction ledger.
///
/// Invariant: the balance equals the signed sum of all transaction amounts
/// (deposits positive, withdrawals negative) and is never negative. Every
/// mutation re-validates its argument and either applies in full or leaves
/// the account unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountModel {
    id: Uuid,
    account_number: HeaplessString<32>,
    balance: Decimal,
    transactions: Vec<TransactionModel>,
}

impl AccountModel {
    /// Open an account with a mandatory positive initial deposit.
    ///
    /// Fails with `InvalidArgument` when the account number is blank or the
    /// initial deposit is not strictly positive; no account is created in
    /// that case. On success the ledger holds exactly one Deposit entry.
    pub fn open(account_number: &str, initial_deposit: Decimal) -> LedgerResult<Self> {
        let account_number = try_non_blank::<32>("account number", account_number)?;
        let mut account = Self {
            id: Uuid::new_v4(),
            account_number,
            balance: Decimal::ZERO,
            transactions: Vec::new(),
        };
        account.deposit(initial_deposit)?;
        Ok(account)
    }

    /// Increase the balance by `amount` and append one Deposit transaction.
    ///
    /// Fails with `InvalidArgument` unless `amount > 0`.
    pub fn deposit(&mut self, amount: Decimal) -> LedgerResult<()> {
        let amount = PositiveAmount::new(amount)?;
        self.balance += amount.value();
        self.transactions
            .push(TransactionModel::new(amount, TransactionType::Deposit));
        Ok(())
    }

    /// Decrease the balance by `amount` and append one Withdrawal transaction.
    ///
    /// Fails with `InvalidArgument` unless `amount > 0`, and with
    /// `InsufficientFunds` when `amount > balance`; on failure the balance
    /// and the ledger are unchanged.
    pub fn withdraw(&mut self, amount: Decimal) -> LedgerResult<()> {
        let amount = PositiveAmount::new(amount)?;
        if amount.value() > self.balance {
            return Err(LedgerError::InsufficientFunds {
                requested: amount.value(),
                available: self.balance,
            });
        }
        self.balance -= amount.value();
        self.transactions
            .push(TransactionModel::new(amount, TransactionType::Withdrawal));
        Ok(())
    }

    pub fn account_number(&self) -> &str {
        self.account_number.as_str()
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// The full ordered transaction history, oldest first.
    pub fn transactions(&self) -> &[TransactionModel] {
        &self.transactions
    }
}

impl Identifiable for AccountModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

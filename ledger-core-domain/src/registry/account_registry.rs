use ledger_core_api::{LedgerError, LedgerResult};
use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::account::account::AccountModel;
use crate::models::identifiable::Identifiable;
use crate::utils::hash_as_i64;

/// In-memory store of accounts with a stable-hash index on the account number.
///
/// Owns every account exclusively; lookups hand out shared references and all
/// mutations go through `&mut self`, so there is no shared mutable state.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    accounts: HashMap<Uuid, AccountModel>,
    account_number_idx: HashMap<i64, Uuid>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new account and index it by account number.
    ///
    /// Fails with `InvalidOperation` when the account number is already
    /// taken; validation failures from `AccountModel::open` propagate. No
    /// state changes on failure.
    pub fn open_account(
        &mut self,
        account_number: &str,
        initial_deposit: Decimal,
    ) -> LedgerResult<Uuid> {
        let account = AccountModel::open(account_number, initial_deposit)?;
        let number_hash = hash_as_i64(&account.account_number())?;
        if self.account_number_idx.contains_key(&number_hash) {
            return Err(LedgerError::InvalidOperation(format!(
                "account number {account_number} is already taken"
            )));
        }

        let id = account.get_id();
        self.account_number_idx.insert(number_hash, id);
        self.accounts.insert(id, account);
        tracing::info!(account_number, %initial_deposit, %id, "account opened");
        Ok(id)
    }

    /// Deposit into the account with the given id, returning the new balance.
    pub fn deposit(&mut self, id: Uuid, amount: Decimal) -> LedgerResult<Decimal> {
        let account = self.account_mut(id)?;
        account.deposit(amount)?;
        let balance = account.balance();
        tracing::debug!(%id, %amount, %balance, "deposit posted");
        Ok(balance)
    }

    /// Withdraw from the account with the given id, returning the new balance.
    pub fn withdraw(&mut self, id: Uuid, amount: Decimal) -> LedgerResult<Decimal> {
        let account = self.account_mut(id)?;
        account.withdraw(amount)?;
        let balance = account.balance();
        tracing::debug!(%id, %amount, %balance, "withdrawal posted");
        Ok(balance)
    }

    pub fn account(&self, id: Uuid) -> LedgerResult<&AccountModel> {
        self.accounts
            .get(&id)
            .ok_or_else(|| LedgerError::NotFound(format!("account {id}")))
    }

    /// Lookup by account number via the stable-hash index.
    pub fn find_by_account_number(
        &self,
        account_number: &str,
    ) -> LedgerResult<Option<&AccountModel>> {
        let number_hash = hash_as_i64(&account_number)?;
        Ok(self
            .account_number_idx
            .get(&number_hash)
            .and_then(|id| self.accounts.get(id)))
    }

    /// Sum of all account balances.
    pub fn total_balance(&self) -> Decimal {
        self.accounts
            .values()
            .map(|account| account.balance())
            .sum()
    }

    pub fn count(&self) -> usize {
        self.accounts.len()
    }

    fn account_mut(&mut self, id: Uuid) -> LedgerResult<&mut AccountModel> {
        self.accounts
            .get_mut(&id)
            .ok_or_else(|| LedgerError::NotFound(format!("account {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_registry() -> AccountRegistry {
        AccountRegistry::new()
    }

    #[test]
    fn test_open_account_and_lookup() {
        let mut registry = create_test_registry();

        let id = registry
            .open_account("ACC-0001", Decimal::new(100, 0))
            .unwrap();

        let account = registry.account(id).unwrap();
        assert_eq!(account.account_number(), "ACC-0001");
        assert_eq!(account.balance(), Decimal::new(100, 0));

        let by_number = registry.find_by_account_number("ACC-0001").unwrap();
        assert_eq!(by_number.unwrap().get_id(), id);
        assert!(registry
            .find_by_account_number("ACC-9999")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_duplicate_account_number_is_rejected() {
        let mut registry = create_test_registry();
        registry
            .open_account("ACC-0001", Decimal::new(100, 0))
            .unwrap();

        let result = registry.open_account("ACC-0001", Decimal::new(50, 0));

        assert!(matches!(result, Err(LedgerError::InvalidOperation(_))));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_failed_open_leaves_registry_unchanged() {
        let mut registry = create_test_registry();

        assert!(registry.open_account("", Decimal::new(100, 0)).is_err());
        assert!(registry.open_account("ACC-0001", Decimal::ZERO).is_err());
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_deposit_and_withdraw_by_id() {
        let mut registry = create_test_registry();
        let id = registry
            .open_account("A1", Decimal::new(100, 0))
            .unwrap();

        assert_eq!(
            registry.deposit(id, Decimal::new(50, 0)).unwrap(),
            Decimal::new(150, 0)
        );
        assert_eq!(
            registry.withdraw(id, Decimal::new(30, 0)).unwrap(),
            Decimal::new(120, 0)
        );
        assert_eq!(registry.account(id).unwrap().transactions().len(), 3);
    }

    #[test]
    fn test_operations_on_unknown_account_fail() {
        let mut registry = create_test_registry();
        let unknown = Uuid::new_v4();

        assert!(matches!(
            registry.deposit(unknown, Decimal::new(10, 0)),
            Err(LedgerError::NotFound(_))
        ));
        assert!(matches!(
            registry.withdraw(unknown, Decimal::new(10, 0)),
            Err(LedgerError::NotFound(_))
        ));
        assert!(matches!(
            registry.account(unknown),
            Err(LedgerError::NotFound(_))
        ));
    }

    #[test]
    fn test_total_balance_aggregate() {
        let mut registry = create_test_registry();
        registry
            .open_account("ACC-0001", Decimal::new(100, 0))
            .unwrap();
        registry
            .open_account("ACC-0002", Decimal::new(250, 0))
            .unwrap();

        assert_eq!(registry.total_balance(), Decimal::new(350, 0));
        assert_eq!(registry.count(), 2);
    }
}

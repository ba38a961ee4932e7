use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by ledger operations.
///
/// Every variant is raised synchronously at the point of violation and is
/// recoverable by the caller (retry with corrected input). Operations are
/// atomic: on error the entity is left unchanged.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A supplied value violates a stated precondition
    /// (blank name, non-positive amount, out-of-range percentage).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A value is individually valid but the current state forbids the
    /// operation (duplicate account number, grade for an unenrolled course).
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// A withdrawal or charge exceeds the spendable balance. Carries both
    /// amounts so the caller can retry with a smaller amount or top up first.
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },

    /// Lookup by an identifier that is not present in the registry.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error (e.g. serialization failure while computing an index hash).
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::InvalidArgument("amount must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid argument: amount must be positive");

        let err = LedgerError::InsufficientFunds {
            requested: Decimal::new(20000, 2),
            available: Decimal::new(10000, 2),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: requested 200.00, available 100.00"
        );
    }
}

use heapless::String as HeaplessString;
use ledger_core_api::{LedgerError, LedgerResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A money amount that is strictly greater than zero.
///
/// Transactional entry points (deposit, withdrawal, payment) require a
/// strictly positive amount; construction is the only way to obtain one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositiveAmount(Decimal);

impl PositiveAmount {
    pub fn new(value: Decimal) -> LedgerResult<Self> {
        if value <= Decimal::ZERO {
            return Err(LedgerError::InvalidArgument(format!(
                "amount must be positive, got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for PositiveAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A percentage in `[0, 100]`, used for discounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(Decimal);

impl Percentage {
    pub fn new(value: Decimal) -> LedgerResult<Self> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(LedgerError::InvalidArgument(format!(
                "percentage must be between 0 and 100, got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The percentage expressed as a fraction in `[0, 1]`.
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl std::fmt::Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Validated construction of a bounded string field.
///
/// Fails with `InvalidArgument` when `value` is empty or whitespace-only, or
/// longer than `N` characters. No side effects on failure.
pub fn try_non_blank<const N: usize>(field: &str, value: &str) -> LedgerResult<HeaplessString<N>> {
    if value.trim().is_empty() {
        return Err(LedgerError::InvalidArgument(format!(
            "{field} cannot be blank"
        )));
    }
    HeaplessString::try_from(value)
        .map_err(|_| LedgerError::InvalidArgument(format!("{field} exceeds {} characters", N)))
}

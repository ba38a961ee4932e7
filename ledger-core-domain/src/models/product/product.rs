use heapless::String as HeaplessString;
use ledger_core_api::{LedgerError, LedgerResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::models::validated::{try_non_blank, Percentage, PositiveAmount};

/// A catalog product with an immutable name and a validated price.
///
/// Invariant: `price >= 0` at all times. Discounts are expressed as a
/// `Percentage`, so a discounted price can never go negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductModel {
    id: Uuid,
    name: HeaplessString<100>,
    price: Decimal,
}

impl ProductModel {
    /// Fails with `InvalidArgument` when `name` is blank or `price < 0`.
    pub fn new(name: &str, price: Decimal) -> LedgerResult<Self> {
        let name = try_non_blank::<100>("product name", name)?;
        let mut product = Self {
            id: Uuid::new_v4(),
            name,
            price: Decimal::ZERO,
        };
        product.set_price(price)?;
        Ok(product)
    }

    /// Replace the price. Fails with `InvalidArgument` when `price < 0`;
    /// zero is a valid price.
    pub fn set_price(&mut self, price: Decimal) -> LedgerResult<()> {
        if price < Decimal::ZERO {
            return Err(LedgerError::InvalidArgument(format!(
                "price must be non-negative, got {price}"
            )));
        }
        self.price = price;
        Ok(())
    }

    /// Apply a discount: `price := price * (1 - percent / 100)`.
    ///
    /// Fails with `InvalidArgument` when `percent` is outside `[0, 100]`.
    pub fn apply_discount(&mut self, percent: Decimal) -> LedgerResult<()> {
        let percent = Percentage::new(percent)?;
        self.price -= self.price * percent.fraction();
        Ok(())
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Unit price times a quantity, for catalog aggregates.
    pub fn line_total(&self, quantity: PositiveAmount) -> Decimal {
        self.price * quantity.value()
    }
}

impl Identifiable for ProductModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

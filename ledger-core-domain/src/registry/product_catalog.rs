use ledger_core_api::{LedgerError, LedgerResult};
use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::models::product::product::ProductModel;
use crate::utils::hash_as_i64;

/// In-memory product catalog with a stable-hash index on the product name.
#[derive(Debug, Default)]
pub struct ProductCatalog {
    products: HashMap<Uuid, ProductModel>,
    name_idx: HashMap<i64, Uuid>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product. Fails with `InvalidOperation` on a duplicate name;
    /// validation failures from `ProductModel::new` propagate.
    pub fn add_product(&mut self, name: &str, price: Decimal) -> LedgerResult<Uuid> {
        let product = ProductModel::new(name, price)?;
        let name_hash = hash_as_i64(&product.name())?;
        if self.name_idx.contains_key(&name_hash) {
            return Err(LedgerError::InvalidOperation(format!(
                "product {name} is already in the catalog"
            )));
        }

        let id = product.get_id();
        self.name_idx.insert(name_hash, id);
        self.products.insert(id, product);
        tracing::info!(name, %price, %id, "product added");
        Ok(id)
    }

    /// Apply a discount to one product, returning the new price.
    pub fn apply_discount(&mut self, id: Uuid, percent: Decimal) -> LedgerResult<Decimal> {
        let product = self.product_mut(id)?;
        product.apply_discount(percent)?;
        let price = product.price();
        tracing::debug!(%id, %percent, %price, "discount applied");
        Ok(price)
    }

    /// Replace one product's price, returning the previous price.
    pub fn set_price(&mut self, id: Uuid, price: Decimal) -> LedgerResult<Decimal> {
        let product = self.product_mut(id)?;
        let previous = product.price();
        product.set_price(price)?;
        Ok(previous)
    }

    pub fn product(&self, id: Uuid) -> LedgerResult<&ProductModel> {
        self.products
            .get(&id)
            .ok_or_else(|| LedgerError::NotFound(format!("product {id}")))
    }

    pub fn find_by_name(&self, name: &str) -> LedgerResult<Option<&ProductModel>> {
        let name_hash = hash_as_i64(&name)?;
        Ok(self
            .name_idx
            .get(&name_hash)
            .and_then(|id| self.products.get(id)))
    }

    /// Sum of all product prices.
    pub fn total_value(&self) -> Decimal {
        self.products.values().map(|product| product.price()).sum()
    }

    pub fn count(&self) -> usize {
        self.products.len()
    }

    fn product_mut(&mut self, id: Uuid) -> LedgerResult<&mut ProductModel> {
        self.products
            .get_mut(&id)
            .ok_or_else(|| LedgerError::NotFound(format!("product {id}")))
    }
}

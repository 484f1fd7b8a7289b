//! # Product Factory and Add-on Applicator
//!
//! Stock-gated construction of products. Both resolve a kind through the
//! catalog first, so an unknown kind never touches inventory, then take one
//! unit of the resolved item.

use crate::catalog::{AddOnKind, BaseKind, Catalog};
use crate::error::{OrderError, OrderResult};
use crate::inventory::InventoryStore;
use crate::product::Product;
use std::sync::Arc;
use tracing::debug;

/// Creates base products when stock allows
#[derive(Debug, Clone)]
pub struct ProductFactory {
    catalog: Arc<Catalog>,
    inventory: Arc<InventoryStore>,
}

impl ProductFactory {
    pub fn new(catalog: Arc<Catalog>, inventory: Arc<InventoryStore>) -> Self {
        Self { catalog, inventory }
    }

    /// Create a base product, consuming one unit of its stock
    pub fn create_base(&self, kind: BaseKind) -> OrderResult<Product> {
        let entry = self
            .catalog
            .base(kind)
            .ok_or_else(|| OrderError::UnknownProductKind {
                kind: kind.to_string(),
            })?;

        if !self.inventory.check_and_decrement(&entry.name) {
            return Err(OrderError::OutOfStock {
                item: entry.name.clone(),
            });
        }

        debug!(base = %entry.name, cost = %entry.price, "created base product");
        Ok(Product::base(entry.name.clone(), entry.price))
    }
}

/// Layers add-ons onto products when stock allows
#[derive(Debug, Clone)]
pub struct AddOnApplicator {
    catalog: Arc<Catalog>,
    inventory: Arc<InventoryStore>,
}

impl AddOnApplicator {
    pub fn new(catalog: Arc<Catalog>, inventory: Arc<InventoryStore>) -> Self {
        Self { catalog, inventory }
    }

    /// Return `current` with the add-on layered on, consuming one unit of its
    /// stock. `current` is left untouched either way.
    pub fn apply(&self, current: &Product, kind: AddOnKind) -> OrderResult<Product> {
        let entry = self
            .catalog
            .add_on(kind)
            .ok_or_else(|| OrderError::UnknownAddOnKind {
                kind: kind.to_string(),
            })?;

        if !self.inventory.check_and_decrement(&entry.name) {
            return Err(OrderError::OutOfStock {
                item: entry.name.clone(),
            });
        }

        debug!(add_on = %entry.name, delta = %entry.price, "applied add-on");
        Ok(current.with_add_on(entry.name.clone(), entry.price))
    }
}

//! # Shop
//!
//! The counter as a whole: one catalog, one shared inventory, and the
//! registered payment channels. Cloning a `Shop` shares the same stock, so
//! every session opened from any clone competes for the same units.

use crate::catalog::{AddOnKind, BaseKind, Catalog};
use crate::error::{OrderError, OrderResult};
use crate::factory::{AddOnApplicator, ProductFactory};
use crate::inventory::InventoryStore;
use crate::product::{Price, Product};
use crate::session::OrderSession;
use crate::strategy::{PaymentStrategySelector, Receipt};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Shop {
    catalog: Arc<Catalog>,
    inventory: Arc<InventoryStore>,
    payments: PaymentStrategySelector,
}

impl Shop {
    /// Open a shop with stock seeded from the catalog and the standard channels
    pub fn new(catalog: Catalog) -> OrderResult<Self> {
        let inventory = InventoryStore::from_catalog(&catalog);
        Self::from_parts(catalog, inventory, PaymentStrategySelector::standard())
    }

    /// Open a shop from prebuilt parts.
    ///
    /// The catalog must validate and every catalog item must be tracked by
    /// `inventory`.
    pub fn from_parts(
        catalog: Catalog,
        inventory: InventoryStore,
        payments: PaymentStrategySelector,
    ) -> OrderResult<Self> {
        catalog.validate()?;
        if let Some((name, _)) = catalog
            .initial_stock()
            .find(|(name, _)| !inventory.contains(name))
        {
            return Err(OrderError::Configuration(format!(
                "inventory does not track {}",
                name
            )));
        }
        Ok(Self::assemble(catalog, inventory, payments))
    }

    fn assemble(
        catalog: Catalog,
        inventory: InventoryStore,
        payments: PaymentStrategySelector,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            inventory: Arc::new(inventory),
            payments,
        }
    }

    /// Builder: replace the payment channels
    pub fn with_payments(mut self, payments: PaymentStrategySelector) -> Self {
        self.payments = payments;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn inventory(&self) -> &InventoryStore {
        &self.inventory
    }

    pub fn payments(&self) -> &PaymentStrategySelector {
        &self.payments
    }

    pub fn factory(&self) -> ProductFactory {
        ProductFactory::new(self.catalog.clone(), self.inventory.clone())
    }

    pub fn applicator(&self) -> AddOnApplicator {
        AddOnApplicator::new(self.catalog.clone(), self.inventory.clone())
    }

    /// Start a new order against this shop's stock
    pub fn new_session(&self) -> OrderSession {
        OrderSession::new(self.factory(), self.applicator(), self.payments.clone())
    }

    pub fn create_base(&self, kind: BaseKind) -> OrderResult<Product> {
        self.factory().create_base(kind)
    }

    pub fn apply_add_on(&self, product: &Product, kind: AddOnKind) -> OrderResult<Product> {
        self.applicator().apply(product, kind)
    }

    pub fn describe(&self, product: &Product) -> String {
        product.description()
    }

    pub fn cost(&self, product: &Product) -> Price {
        product.cost()
    }

    pub fn pay(&self, channel: &str, amount: Price) -> OrderResult<Receipt> {
        self.payments.pay(channel, amount)
    }

    pub fn inventory_snapshot(&self) -> BTreeMap<String, u32> {
        self.inventory.snapshot()
    }
}

impl Default for Shop {
    fn default() -> Self {
        let catalog = Catalog::default();
        let inventory = InventoryStore::from_catalog(&catalog);
        Self::assemble(catalog, inventory, PaymentStrategySelector::standard())
    }
}

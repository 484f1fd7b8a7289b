//! # Order Session
//!
//! Sequential workflow for a single customer's order.
//!
//! ```text
//! SelectingBase ──► AddingAddOns ──► SelectingPayment ──► Completed
//!       │                │
//!       └──────┬─────────┘
//!              ▼
//!          Cancelled
//! ```
//!
//! A failed step surfaces its error and leaves the session where it was.
//! Stock taken by a cancelled order is not returned.

use crate::catalog::{AddOnKind, BaseKind};
use crate::error::{OrderError, OrderResult};
use crate::factory::{AddOnApplicator, ProductFactory};
use crate::product::{Price, Product};
use crate::strategy::{PaymentStrategySelector, Receipt};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};
use uuid::Uuid;

/// Workflow state of an order session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    SelectingBase,
    AddingAddOns,
    SelectingPayment,
    Completed,
    Cancelled,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::SelectingBase => "selecting_base",
            SessionState::AddingAddOns => "adding_add_ons",
            SessionState::SelectingPayment => "selecting_payment",
            SessionState::Completed => "completed",
            SessionState::Cancelled => "cancelled",
        }
    }

    /// Completed and cancelled sessions accept no further actions
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Cancelled)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a paid order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedOrder {
    pub description: String,
    pub total: Price,
    pub add_ons: Vec<String>,
    pub receipt: Receipt,
}

/// Serializable view of a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Price>,
    pub add_ons: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<Receipt>,
    pub created_at: DateTime<Utc>,
}

/// One customer's order, from base selection to payment
#[derive(Debug)]
pub struct OrderSession {
    id: Uuid,
    state: SessionState,
    product: Option<Product>,
    add_ons: Vec<String>,
    completed: Option<CompletedOrder>,
    factory: ProductFactory,
    applicator: AddOnApplicator,
    payments: PaymentStrategySelector,
    created_at: DateTime<Utc>,
}

impl OrderSession {
    pub fn new(
        factory: ProductFactory,
        applicator: AddOnApplicator,
        payments: PaymentStrategySelector,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::SelectingBase,
            product: None,
            add_ons: Vec::new(),
            completed: None,
            factory,
            applicator,
            payments,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Product being built (none before a base is chosen or after the order ends)
    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    /// Add-on names applied so far, in order
    pub fn applied_add_ons(&self) -> &[String] {
        &self.add_ons
    }

    /// Final order, once paid
    pub fn completed(&self) -> Option<&CompletedOrder> {
        self.completed.as_ref()
    }

    /// Current total of the product being built
    pub fn total(&self) -> Option<Price> {
        self.product.as_ref().map(Product::cost)
    }

    fn require(&self, expected: SessionState, action: &'static str) -> OrderResult<()> {
        if self.state != expected {
            return Err(OrderError::InvalidTransition {
                state: self.state,
                action,
            });
        }
        Ok(())
    }

    fn current_product(&self, action: &'static str) -> OrderResult<&Product> {
        self.product.as_ref().ok_or(OrderError::InvalidTransition {
            state: self.state,
            action,
        })
    }

    /// Choose the base product
    pub fn select_base(&mut self, kind: BaseKind) -> OrderResult<&Product> {
        self.require(SessionState::SelectingBase, "select a base")?;

        let product = self.factory.create_base(kind).map_err(|e| {
            warn!(session = %self.id, error = %e, "base selection rejected");
            e
        })?;

        info!(session = %self.id, base = %product.description(), "base selected");
        self.state = SessionState::AddingAddOns;
        Ok(&*self.product.insert(product))
    }

    /// Layer an add-on onto the current product
    pub fn add_add_on(&mut self, kind: AddOnKind) -> OrderResult<&Product> {
        self.require(SessionState::AddingAddOns, "add an add-on")?;
        let current = self.current_product("add an add-on")?;

        let next = self.applicator.apply(current, kind).map_err(|e| {
            warn!(session = %self.id, error = %e, "add-on rejected");
            e
        })?;

        if let Some(layer) = next.add_ons().last() {
            self.add_ons.push(layer.name.clone());
        }
        info!(session = %self.id, total = %next.cost(), "add-on applied");
        Ok(&*self.product.insert(next))
    }

    /// Stop adding add-ons and move on to payment; returns the total due
    pub fn finish(&mut self) -> OrderResult<Price> {
        self.require(SessionState::AddingAddOns, "finish the order")?;
        let total = self.current_product("finish the order")?.cost();

        self.state = SessionState::SelectingPayment;
        info!(session = %self.id, %total, "awaiting payment");
        Ok(total)
    }

    /// Pay through the named channel and complete the order
    pub fn select_payment(&mut self, channel: &str) -> OrderResult<&CompletedOrder> {
        self.require(SessionState::SelectingPayment, "select a payment method")?;
        let product = self.current_product("select a payment method")?;
        let total = product.cost();
        let description = product.description();

        let receipt = self.payments.pay(channel, total).map_err(|e| {
            warn!(session = %self.id, error = %e, "payment rejected");
            e
        })?;

        info!(
            session = %self.id,
            receipt = %receipt.id,
            channel = %receipt.channel,
            "order completed"
        );
        self.product = None;
        self.state = SessionState::Completed;
        Ok(&*self.completed.insert(CompletedOrder {
            description,
            total,
            add_ons: std::mem::take(&mut self.add_ons),
            receipt,
        }))
    }

    /// Abandon the order. Allowed before payment is being selected.
    pub fn cancel(&mut self) -> OrderResult<()> {
        if !matches!(
            self.state,
            SessionState::SelectingBase | SessionState::AddingAddOns
        ) {
            return Err(OrderError::InvalidTransition {
                state: self.state,
                action: "cancel",
            });
        }

        info!(session = %self.id, consumed_add_ons = self.add_ons.len(), "order cancelled");
        self.product = None;
        self.add_ons.clear();
        self.state = SessionState::Cancelled;
        Ok(())
    }

    pub fn summary(&self) -> SessionSummary {
        match &self.completed {
            Some(order) => SessionSummary {
                id: self.id,
                state: self.state,
                description: Some(order.description.clone()),
                total: Some(order.total),
                add_ons: order.add_ons.clone(),
                receipt: Some(order.receipt.clone()),
                created_at: self.created_at,
            },
            None => SessionSummary {
                id: self.id,
                state: self.state,
                description: self.product.as_ref().map(Product::description),
                total: self.total(),
                add_ons: self.add_ons.clone(),
                receipt: None,
                created_at: self.created_at,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::inventory::InventoryStore;
    use std::sync::Arc;

    fn session_with(catalog: Catalog) -> (OrderSession, Arc<InventoryStore>) {
        let inventory = Arc::new(InventoryStore::from_catalog(&catalog));
        let catalog = Arc::new(catalog);
        let session = OrderSession::new(
            ProductFactory::new(catalog.clone(), inventory.clone()),
            AddOnApplicator::new(catalog, inventory.clone()),
            PaymentStrategySelector::standard(),
        );
        (session, inventory)
    }

    #[test]
    fn test_full_order() {
        let (mut session, inventory) = session_with(Catalog::default());
        assert_eq!(session.state(), SessionState::SelectingBase);

        session.select_base(BaseKind::Margherita).unwrap();
        assert_eq!(session.state(), SessionState::AddingAddOns);

        session.add_add_on(AddOnKind::Cheese).unwrap();
        let product = session.add_add_on(AddOnKind::Olives).unwrap();
        assert_eq!(product.description(), "Margherita, Cheese, Olives");
        assert_eq!(session.applied_add_ons(), ["Cheese", "Olives"]);

        let total = session.finish().unwrap();
        assert_eq!(total, Price::new(6.5));
        assert_eq!(session.state(), SessionState::SelectingPayment);

        let order = session.select_payment("paypal").unwrap();
        assert_eq!(order.description, "Margherita, Cheese, Olives");
        assert_eq!(order.total, Price::new(6.5));
        assert_eq!(order.receipt.channel, "PayPal");
        assert_eq!(order.receipt.amount, Price::new(6.5));

        assert_eq!(session.state(), SessionState::Completed);
        assert!(session.product().is_none());
        assert_eq!(inventory.remaining("Margherita"), 9);
        assert_eq!(inventory.remaining("Cheese"), 14);
        assert_eq!(inventory.remaining("Olives"), 9);
    }

    #[test]
    fn test_out_of_stock_base_stays_selecting() {
        let catalog = Catalog::new()
            .with_base(BaseKind::Margherita, "Margherita", Price::new(5.0), 1)
            .with_base(BaseKind::Pepperoni, "Pepperoni", Price::new(6.0), 0);
        let (mut session, _) = session_with(catalog);

        let err = session.select_base(BaseKind::Pepperoni).unwrap_err();
        assert!(matches!(err, OrderError::OutOfStock { .. }));
        assert_eq!(session.state(), SessionState::SelectingBase);

        session.select_base(BaseKind::Margherita).unwrap();
        assert_eq!(session.state(), SessionState::AddingAddOns);
    }

    #[test]
    fn test_failed_add_on_keeps_product() {
        let catalog = Catalog::new()
            .with_base(BaseKind::Margherita, "Margherita", Price::new(5.0), 1)
            .with_add_on(AddOnKind::Olives, "Olives", Price::new(0.5), 1);
        let (mut session, _) = session_with(catalog);

        session.select_base(BaseKind::Margherita).unwrap();
        session.add_add_on(AddOnKind::Olives).unwrap();

        assert!(matches!(
            session.add_add_on(AddOnKind::Olives),
            Err(OrderError::OutOfStock { .. })
        ));
        assert!(matches!(
            session.add_add_on(AddOnKind::Cheese),
            Err(OrderError::UnknownAddOnKind { .. })
        ));

        assert_eq!(session.state(), SessionState::AddingAddOns);
        assert_eq!(session.total(), Some(Price::new(5.5)));
        assert_eq!(session.applied_add_ons(), ["Olives"]);
    }

    #[test]
    fn test_invalid_payment_method_stays_selecting() {
        let (mut session, _) = session_with(Catalog::default());
        session.select_base(BaseKind::Pepperoni).unwrap();
        session.finish().unwrap();

        let err = session.select_payment("cash").unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidPaymentMethod {
                channel: "cash".into()
            }
        );
        assert_eq!(session.state(), SessionState::SelectingPayment);

        let order = session.select_payment("2").unwrap();
        assert_eq!(order.receipt.channel, "Credit Card");
        assert_eq!(order.total, Price::new(6.0));
    }

    #[test]
    fn test_out_of_order_actions_rejected() {
        let (mut session, inventory) = session_with(Catalog::default());

        assert!(matches!(
            session.add_add_on(AddOnKind::Cheese),
            Err(OrderError::InvalidTransition {
                state: SessionState::SelectingBase,
                ..
            })
        ));
        assert!(session.finish().is_err());
        assert!(session.select_payment("paypal").is_err());
        assert_eq!(inventory.remaining("Cheese"), 15);

        session.select_base(BaseKind::Margherita).unwrap();
        assert!(session.select_base(BaseKind::Pepperoni).is_err());
        assert_eq!(inventory.remaining("Pepperoni"), 10);
    }

    #[test]
    fn test_cancel_does_not_restock() {
        let (mut session, inventory) = session_with(Catalog::default());
        session.select_base(BaseKind::Margherita).unwrap();
        session.add_add_on(AddOnKind::Mushrooms).unwrap();

        session.cancel().unwrap();

        assert_eq!(session.state(), SessionState::Cancelled);
        assert!(session.product().is_none());
        assert_eq!(inventory.remaining("Margherita"), 9);
        assert_eq!(inventory.remaining("Mushrooms"), 11);
        assert!(session.select_base(BaseKind::Margherita).is_err());
        assert!(session.cancel().is_err());
    }

    #[test]
    fn test_cannot_cancel_during_payment() {
        let (mut session, _) = session_with(Catalog::default());
        session.select_base(BaseKind::Margherita).unwrap();
        session.finish().unwrap();

        assert!(session.cancel().is_err());
        assert_eq!(session.state(), SessionState::SelectingPayment);
    }

    #[test]
    fn test_completed_is_terminal() {
        let (mut session, _) = session_with(Catalog::default());
        session.select_base(BaseKind::Margherita).unwrap();
        session.finish().unwrap();
        session.select_payment("paypal").unwrap();

        assert!(session.state().is_terminal());
        assert!(session.select_payment("paypal").is_err());
        assert!(session.cancel().is_err());
        assert!(session.completed().is_some());
    }

    #[test]
    fn test_summary() {
        let (mut session, _) = session_with(Catalog::default());
        let summary = session.summary();
        assert_eq!(summary.state, SessionState::SelectingBase);
        assert!(summary.description.is_none());

        session.select_base(BaseKind::Pepperoni).unwrap();
        session.add_add_on(AddOnKind::Cheese).unwrap();
        let summary = session.summary();
        assert_eq!(summary.description.as_deref(), Some("Pepperoni, Cheese"));
        assert_eq!(summary.total, Some(Price::new(7.0)));

        session.finish().unwrap();
        session.select_payment("paypal").unwrap();
        let json = serde_json::to_value(session.summary()).unwrap();
        assert_eq!(json["state"], "completed");
        assert_eq!(json["total"], 7.0);
        assert_eq!(json["add_ons"][0], "Cheese");
        assert_eq!(json["receipt"]["channel"], "PayPal");
    }
}

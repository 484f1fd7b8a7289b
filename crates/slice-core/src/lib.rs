//! # slice-core
//!
//! Order-composition and inventory-fulfillment engine for slice-shop.
//!
//! This crate provides:
//! - `InventoryStore` with atomic per-item check-and-decrement
//! - `Product` chains priced and described by folding over add-on layers
//! - `ProductFactory` and `AddOnApplicator` for stock-gated construction
//! - `PaymentStrategy` trait with PayPal and credit card channels
//! - `OrderSession` state machine driving one customer's order
//! - `Shop` tying catalog, stock and payment channels together
//! - `OrderError` for typed error handling
//!
//! ## Example
//!
//! ```rust
//! use slice_core::{AddOnKind, BaseKind, Shop};
//!
//! let shop = Shop::default();
//! let mut session = shop.new_session();
//!
//! session.select_base(BaseKind::Margherita)?;
//! session.add_add_on(AddOnKind::Cheese)?;
//! session.add_add_on(AddOnKind::Olives)?;
//! session.finish()?;
//!
//! let order = session.select_payment("paypal")?;
//! assert_eq!(order.description, "Margherita, Cheese, Olives");
//! assert_eq!(order.total.display(), "$6.50");
//! # Ok::<(), slice_core::OrderError>(())
//! ```

pub mod catalog;
pub mod error;
pub mod factory;
pub mod inventory;
pub mod product;
pub mod session;
pub mod shop;
pub mod strategy;

// Re-exports for convenience
pub use catalog::{load_catalog, AddOnEntry, AddOnKind, BaseEntry, BaseKind, Catalog};
pub use error::{OrderError, OrderResult};
pub use factory::{AddOnApplicator, ProductFactory};
pub use inventory::InventoryStore;
pub use product::{AddOnLayer, BaseItem, Price, Product};
pub use session::{CompletedOrder, OrderSession, SessionState, SessionSummary};
pub use shop::Shop;
pub use strategy::{
    ensure_payable, BoxedPaymentStrategy, CreditCardPayment, PayPalPayment, PaymentStrategy,
    PaymentStrategySelector, Receipt,
};

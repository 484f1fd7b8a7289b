//! # Product Types
//!
//! Priced, described products for slice-shop.
//!
//! A product is a base item plus an ordered list of add-on layers. Each layer
//! contributes a description suffix and a cost delta, so the whole chain is
//! described and priced by folding over it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Monetary amount in cents (single implicit currency unit).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    /// Amount in cents
    pub amount: i64,
}

impl Price {
    /// Zero amount
    pub const ZERO: Price = Price { amount: 0 };

    /// Largest price a catalog entry may carry ($1,000,000.00)
    pub const MAX: Price = Price {
        amount: 100_000_000,
    };

    /// Create a price from a decimal amount, rounded to the nearest cent.
    ///
    /// Out-of-range inputs saturate; use [`Price::try_new`] for untrusted input.
    pub fn new(amount: f64) -> Self {
        Self {
            amount: (amount * 100.0).round() as i64,
        }
    }

    /// Create a price from a decimal amount, or `None` if it is not finite or
    /// lies outside `-MAX..=MAX`
    pub fn try_new(amount: f64) -> Option<Self> {
        if !amount.is_finite() || (amount * 100.0).abs() > Price::MAX.amount as f64 {
            return None;
        }
        Some(Self::new(amount))
    }

    /// Create a price from cents
    pub fn from_cents(amount: i64) -> Self {
        Self { amount }
    }

    /// Get the decimal amount
    pub fn as_decimal(&self) -> f64 {
        self.amount as f64 / 100.0
    }

    pub fn is_negative(&self) -> bool {
        self.amount < 0
    }

    /// Add two prices, `None` on overflow
    pub fn checked_add(self, rhs: Price) -> Option<Price> {
        self.amount.checked_add(rhs.amount).map(Price::from_cents)
    }

    /// Format for display (e.g., "$6.50")
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let cents = self.amount.unsigned_abs();
        format!("{}${}.{:02}", sign, cents / 100, cents % 100)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

// Saturates instead of wrapping; catalog prices are bounded by `Price::MAX`.
impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price::from_cents(self.amount.saturating_add(rhs.amount))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

// Prices travel as plain decimals in config files and JSON payloads.
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Price::try_new(amount)
            .ok_or_else(|| serde::de::Error::custom(format!("price out of range: {}", amount)))
    }
}

/// The foundational item of a product chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseItem {
    /// Catalog name (also the inventory key)
    pub name: String,
    /// Fixed cost
    pub cost: Price,
}

/// One add-on layer applied on top of the chain below it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddOnLayer {
    /// Catalog name, appended to the description
    pub name: String,
    /// Cost added to the chain
    pub delta: Price,
}

/// A built product: a base item followed by add-on layers in application order.
///
/// Immutable once built. Layering an add-on produces a new `Product` and
/// leaves the receiver untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    base: BaseItem,
    add_ons: Vec<AddOnLayer>,
}

impl Product {
    /// Create a bare base product
    pub fn base(name: impl Into<String>, cost: Price) -> Self {
        Self {
            base: BaseItem {
                name: name.into(),
                cost,
            },
            add_ons: Vec::new(),
        }
    }

    /// Return a new product with one more add-on layer on top of this one.
    ///
    /// This does not consult inventory; use [`crate::AddOnApplicator`] for
    /// stock-gated layering.
    pub fn with_add_on(&self, name: impl Into<String>, delta: Price) -> Product {
        let mut next = self.clone();
        next.add_ons.push(AddOnLayer {
            name: name.into(),
            delta,
        });
        next
    }

    /// Base name followed by each add-on name in application order
    pub fn description(&self) -> String {
        self.add_ons
            .iter()
            .fold(self.base.name.clone(), |mut desc, layer| {
                desc.push_str(", ");
                desc.push_str(&layer.name);
                desc
            })
    }

    /// Base cost plus the sum of every add-on delta
    pub fn cost(&self) -> Price {
        self.base.cost + self.add_ons.iter().map(|layer| layer.delta).sum::<Price>()
    }

    pub fn base_item(&self) -> &BaseItem {
        &self.base
    }

    pub fn add_ons(&self) -> &[AddOnLayer] {
        &self.add_ons
    }

    /// Number of add-on layers
    pub fn layer_count(&self) -> usize {
        self.add_ons.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_from_decimal() {
        assert_eq!(Price::new(6.5).amount, 650);
        assert_eq!(Price::new(0.7).amount, 70);
        assert_eq!(Price::from_cents(1099).as_decimal(), 10.99);
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::new(6.5).display(), "$6.50");
        assert_eq!(Price::from_cents(5).display(), "$0.05");
        assert_eq!(Price::new(-1.0).display(), "-$1.00");
    }

    #[test]
    fn test_price_serializes_as_decimal() {
        let json = serde_json::to_string(&Price::new(6.5)).unwrap();
        assert_eq!(json, "6.5");

        let parsed: Price = serde_json::from_str("0.7").unwrap();
        assert_eq!(parsed, Price::from_cents(70));
    }

    #[test]
    fn test_price_try_new_bounds() {
        assert_eq!(Price::try_new(1_000_000.0), Some(Price::MAX));
        assert_eq!(Price::try_new(-2.5), Some(Price::from_cents(-250)));
        assert_eq!(Price::try_new(1e17), None);
        assert_eq!(Price::try_new(f64::NAN), None);
        assert_eq!(Price::try_new(f64::INFINITY), None);
    }

    #[test]
    fn test_price_rejects_out_of_range_decimal() {
        assert!(serde_json::from_str::<Price>("1e17").is_err());
        assert!(serde_json::from_str::<Price>("-1e17").is_err());
    }

    #[test]
    fn test_price_addition_does_not_overflow() {
        let huge = Price::from_cents(i64::MAX);

        assert_eq!(huge + Price::new(1.0), huge);
        assert_eq!(huge.checked_add(Price::new(1.0)), None);
        assert_eq!(Price::new(5.0).checked_add(Price::new(1.5)), Some(Price::new(6.5)));
    }

    #[test]
    fn test_cost_of_saturated_chain() {
        let pizza = Product::base("Margherita", Price::new(1e17))
            .with_add_on("Cheese", Price::new(1.0));

        assert_eq!(pizza.cost(), Price::from_cents(i64::MAX));
    }

    #[test]
    fn test_product_chain() {
        let pizza = Product::base("Margherita", Price::new(5.0))
            .with_add_on("Cheese", Price::new(1.0))
            .with_add_on("Olives", Price::new(0.5));

        assert_eq!(pizza.cost(), Price::new(6.5));
        assert_eq!(pizza.description(), "Margherita, Cheese, Olives");
        assert_eq!(pizza.layer_count(), 2);
    }

    #[test]
    fn test_cost_independent_of_order() {
        let base = Product::base("Pepperoni", Price::new(6.0));
        let a = base
            .with_add_on("Mushrooms", Price::new(0.7))
            .with_add_on("Cheese", Price::new(1.0));
        let b = base
            .with_add_on("Cheese", Price::new(1.0))
            .with_add_on("Mushrooms", Price::new(0.7));

        assert_eq!(a.cost(), b.cost());
        assert_eq!(a.description(), "Pepperoni, Mushrooms, Cheese");
        assert_eq!(b.description(), "Pepperoni, Cheese, Mushrooms");
    }

    #[test]
    fn test_layering_leaves_base_intact() {
        let base = Product::base("Margherita", Price::new(5.0));
        let topped = base.with_add_on("Cheese", Price::new(1.0));

        assert_eq!(base.description(), "Margherita");
        assert_eq!(base.cost(), Price::new(5.0));
        assert_ne!(base, topped);
    }

    #[test]
    fn test_describe_and_cost_are_repeatable() {
        let pizza =
            Product::base("Margherita", Price::new(5.0)).with_add_on("Olives", Price::new(0.5));

        assert_eq!(pizza.description(), pizza.description());
        assert_eq!(pizza.cost(), pizza.cost());
    }
}

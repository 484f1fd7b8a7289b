//! # Payment Strategy Trait
//!
//! Strategy pattern trait for payment channels.
//! Implementations: PayPal, credit card.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PaymentStrategy (trait)                  │
//! │  ├── pay()                                                  │
//! │  ├── channel_key()                                          │
//! │  └── channel_name()                                         │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                   ┌────────┴────────┐
//!                   │                 │
//!           ┌───────┴───────┐ ┌───────┴───────┐
//!           │ PayPalPayment │ │CreditCardPaymt│
//!           └───────────────┘ └───────────────┘
//! ```
//!
//! Settlement is an acknowledgment only; no external gateway is called.

use crate::error::{OrderError, OrderResult};
use crate::product::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Acknowledgment of a settled payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Receipt id (generated)
    pub id: Uuid,

    /// Channel label (e.g., "PayPal")
    pub channel: String,

    /// Amount paid
    pub amount: Price,

    /// Settlement timestamp
    pub paid_at: DateTime<Utc>,
}

impl Receipt {
    pub fn new(channel: impl Into<String>, amount: Price) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel: channel.into(),
            amount,
            paid_at: Utc::now(),
        }
    }
}

/// Core trait for payment channel implementations.
///
/// Register new channels with [`PaymentStrategySelector`]; call sites select
/// by key and never name a concrete strategy.
pub trait PaymentStrategy: Send + Sync {
    /// Settle `amount`. Negative amounts are rejected with `InvalidAmount`.
    fn pay(&self, amount: Price) -> OrderResult<Receipt>;

    /// Lookup key (lowercase, e.g. "paypal")
    fn channel_key(&self) -> &'static str;

    /// Label recorded on receipts (e.g. "PayPal")
    fn channel_name(&self) -> &'static str;
}

/// Reject amounts no channel may settle
pub fn ensure_payable(amount: Price) -> OrderResult<()> {
    if amount.is_negative() {
        return Err(OrderError::InvalidAmount { amount });
    }
    Ok(())
}

/// PayPal-style wallet payment
#[derive(Debug, Clone, Copy, Default)]
pub struct PayPalPayment;

impl PaymentStrategy for PayPalPayment {
    fn pay(&self, amount: Price) -> OrderResult<Receipt> {
        ensure_payable(amount)?;
        info!(channel = self.channel_name(), %amount, "payment settled");
        Ok(Receipt::new(self.channel_name(), amount))
    }

    fn channel_key(&self) -> &'static str {
        "paypal"
    }

    fn channel_name(&self) -> &'static str {
        "PayPal"
    }
}

/// Card-style payment
#[derive(Debug, Clone, Copy, Default)]
pub struct CreditCardPayment;

impl PaymentStrategy for CreditCardPayment {
    fn pay(&self, amount: Price) -> OrderResult<Receipt> {
        ensure_payable(amount)?;
        info!(channel = self.channel_name(), %amount, "payment settled");
        Ok(Receipt::new(self.channel_name(), amount))
    }

    fn channel_key(&self) -> &'static str {
        "credit_card"
    }

    fn channel_name(&self) -> &'static str {
        "Credit Card"
    }
}

/// Type alias for a boxed payment strategy (dynamic dispatch)
pub type BoxedPaymentStrategy = Arc<dyn PaymentStrategy>;

/// Strategy selector over the registered channels, in menu order
#[derive(Clone, Default)]
pub struct PaymentStrategySelector {
    strategies: Vec<BoxedPaymentStrategy>,
}

impl PaymentStrategySelector {
    /// Create an empty selector
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Selector with the counter's standard channels
    pub fn standard() -> Self {
        Self::new()
            .with_strategy(Arc::new(PayPalPayment))
            .with_strategy(Arc::new(CreditCardPayment))
    }

    /// Register a payment strategy, replacing any with the same key
    pub fn register(&mut self, strategy: BoxedPaymentStrategy) {
        let key = strategy.channel_key();
        match self.strategies.iter().position(|s| s.channel_key() == key) {
            Some(idx) => self.strategies[idx] = strategy,
            None => self.strategies.push(strategy),
        }
    }

    /// Register with builder pattern
    pub fn with_strategy(mut self, strategy: BoxedPaymentStrategy) -> Self {
        self.register(strategy);
        self
    }

    /// Get a strategy by key, label, or 1-based menu number
    pub fn get(&self, channel: &str) -> Option<&BoxedPaymentStrategy> {
        let channel = channel.trim();
        if let Ok(n) = channel.parse::<usize>() {
            return n.checked_sub(1).and_then(|idx| self.strategies.get(idx));
        }
        self.strategies.iter().find(|s| {
            s.channel_key().eq_ignore_ascii_case(channel)
                || s.channel_name().eq_ignore_ascii_case(channel)
        })
    }

    /// Settle `amount` through the named channel
    pub fn pay(&self, channel: &str, amount: Price) -> OrderResult<Receipt> {
        let strategy = self
            .get(channel)
            .ok_or_else(|| OrderError::InvalidPaymentMethod {
                channel: channel.trim().to_string(),
            })?;
        strategy.pay(amount)
    }

    /// List all registered channels as (key, label)
    pub fn channels(&self) -> Vec<(&'static str, &'static str)> {
        self.strategies
            .iter()
            .map(|s| (s.channel_key(), s.channel_name()))
            .collect()
    }

    /// Check if a channel is registered
    pub fn has_channel(&self, channel: &str) -> bool {
        self.get(channel).is_some()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl std::fmt::Debug for PaymentStrategySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.channels()).finish()
    }
}

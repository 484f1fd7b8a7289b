//! # Inventory Store
//!
//! Finite stock per catalog item, shared by every session at the counter.
//!
//! The set of item keys is fixed at construction. Each count is its own
//! atomic, so a check-and-decrement on one item never contends with another
//! and two callers racing for the last unit cannot both win.

use crate::catalog::Catalog;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, warn};

/// Remaining stock per item name. There is no restock operation.
#[derive(Debug, Default)]
pub struct InventoryStore {
    counts: HashMap<String, AtomicU32>,
}

impl InventoryStore {
    /// Create a store with fixed starting counts
    pub fn new<I, K>(initial: I) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
        K: Into<String>,
    {
        Self {
            counts: initial
                .into_iter()
                .map(|(item, count)| (item.into(), AtomicU32::new(count)))
                .collect(),
        }
    }

    /// Seed counts from the catalog's starting stock
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::new(catalog.initial_stock())
    }

    /// Take one unit of `item` if any remain.
    ///
    /// Returns `false` without side effects when the count is zero or the
    /// item is unknown.
    pub fn check_and_decrement(&self, item: &str) -> bool {
        let Some(count) = self.counts.get(item) else {
            warn!(item, "stock check for unknown item");
            return false;
        };

        match count.fetch_update(Ordering::AcqRel, Ordering::Acquire, |c| c.checked_sub(1)) {
            Ok(previous) => {
                debug!(item, remaining = previous - 1, "stock decremented");
                true
            }
            Err(_) => {
                warn!(item, "out of stock");
                false
            }
        }
    }

    /// Current count for `item` (zero if unknown)
    pub fn remaining(&self, item: &str) -> u32 {
        self.counts
            .get(item)
            .map(|c| c.load(Ordering::Acquire))
            .unwrap_or(0)
    }

    /// Owned copy of every count, ordered by item name
    pub fn snapshot(&self) -> BTreeMap<String, u32> {
        self.counts
            .iter()
            .map(|(item, count)| (item.clone(), count.load(Ordering::Acquire)))
            .collect()
    }

    /// Check if an item is tracked
    pub fn contains(&self, item: &str) -> bool {
        self.counts.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

//! # Catalog
//!
//! Menu of base products and add-ons with their prices and starting stock.
//! The catalog is loaded from `config/catalog.toml` or falls back to
//! [`Catalog::default`].
//!
//! ```toml
//! [[bases]]
//! kind = "margherita"
//! name = "Margherita"
//! price = 5.0
//! stock = 10
//!
//! [[add_ons]]
//! kind = "cheese"
//! name = "Cheese"
//! price = 1.0
//! stock = 15
//! ```

use crate::error::{OrderError, OrderResult};
use crate::product::Price;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// Base product kinds offered at the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseKind {
    Margherita,
    Pepperoni,
}

impl BaseKind {
    /// All kinds in menu order
    pub const ALL: [BaseKind; 2] = [BaseKind::Margherita, BaseKind::Pepperoni];

    pub fn as_str(&self) -> &'static str {
        match self {
            BaseKind::Margherita => "margherita",
            BaseKind::Pepperoni => "pepperoni",
        }
    }
}

impl fmt::Display for BaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a kind name or a 1-based menu number
impl FromStr for BaseKind {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_menu_choice(s, &Self::ALL, Self::as_str).ok_or_else(|| {
            OrderError::UnknownProductKind {
                kind: s.trim().to_string(),
            }
        })
    }
}

/// Add-on kinds offered at the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOnKind {
    Cheese,
    Olives,
    Mushrooms,
}

impl AddOnKind {
    /// All kinds in menu order
    pub const ALL: [AddOnKind; 3] = [AddOnKind::Cheese, AddOnKind::Olives, AddOnKind::Mushrooms];

    pub fn as_str(&self) -> &'static str {
        match self {
            AddOnKind::Cheese => "cheese",
            AddOnKind::Olives => "olives",
            AddOnKind::Mushrooms => "mushrooms",
        }
    }
}

impl fmt::Display for AddOnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a kind name or a 1-based menu number
impl FromStr for AddOnKind {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_menu_choice(s, &Self::ALL, Self::as_str).ok_or_else(|| {
            OrderError::UnknownAddOnKind {
                kind: s.trim().to_string(),
            }
        })
    }
}

fn parse_menu_choice<K: Copy>(input: &str, all: &[K], name: fn(&K) -> &'static str) -> Option<K> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|idx| all.get(idx)).copied();
    }
    all.iter()
        .find(|kind| name(*kind).eq_ignore_ascii_case(input))
        .copied()
}

/// A base product on the menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseEntry {
    pub kind: BaseKind,

    /// Display name, also the inventory key
    pub name: String,

    pub price: Price,

    /// Starting stock
    #[serde(default)]
    pub stock: u32,
}

/// An add-on on the menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOnEntry {
    pub kind: AddOnKind,

    /// Display name and description suffix, also the inventory key
    pub name: String,

    /// Cost added to the product
    pub price: Price,

    /// Starting stock
    #[serde(default)]
    pub stock: u32,
}

/// Menu of bases and add-ons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub bases: Vec<BaseEntry>,

    #[serde(default)]
    pub add_ons: Vec<AddOnEntry>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            bases: Vec::new(),
            add_ons: Vec::new(),
        }
    }

    /// Builder: add a base product
    pub fn with_base(
        mut self,
        kind: BaseKind,
        name: impl Into<String>,
        price: Price,
        stock: u32,
    ) -> Self {
        self.bases.push(BaseEntry {
            kind,
            name: name.into(),
            price,
            stock,
        });
        self
    }

    /// Builder: add an add-on
    pub fn with_add_on(
        mut self,
        kind: AddOnKind,
        name: impl Into<String>,
        price: Price,
        stock: u32,
    ) -> Self {
        self.add_ons.push(AddOnEntry {
            kind,
            name: name.into(),
            price,
            stock,
        });
        self
    }

    /// Find a base entry by kind
    pub fn base(&self, kind: BaseKind) -> Option<&BaseEntry> {
        self.bases.iter().find(|b| b.kind == kind)
    }

    /// Find an add-on entry by kind
    pub fn add_on(&self, kind: AddOnKind) -> Option<&AddOnEntry> {
        self.add_ons.iter().find(|a| a.kind == kind)
    }

    /// Starting stock per inventory key
    pub fn initial_stock(&self) -> impl Iterator<Item = (&str, u32)> {
        self.bases
            .iter()
            .map(|b| (b.name.as_str(), b.stock))
            .chain(self.add_ons.iter().map(|a| (a.name.as_str(), a.stock)))
    }

    /// Reject duplicate kinds, duplicate names, and prices outside `0..=Price::MAX`
    pub fn validate(&self) -> OrderResult<()> {
        let mut base_kinds = HashSet::new();
        for base in &self.bases {
            if !base_kinds.insert(base.kind) {
                return Err(OrderError::Configuration(format!(
                    "duplicate base kind: {}",
                    base.kind
                )));
            }
        }

        let mut add_on_kinds = HashSet::new();
        for add_on in &self.add_ons {
            if !add_on_kinds.insert(add_on.kind) {
                return Err(OrderError::Configuration(format!(
                    "duplicate add-on kind: {}",
                    add_on.kind
                )));
            }
        }

        let mut names = HashSet::new();
        for (name, _) in self.initial_stock() {
            if !names.insert(name) {
                return Err(OrderError::Configuration(format!(
                    "duplicate item name: {}",
                    name
                )));
            }
        }

        let prices = self
            .bases
            .iter()
            .map(|b| (&b.name, b.price))
            .chain(self.add_ons.iter().map(|a| (&a.name, a.price)));
        for (name, price) in prices {
            if price.is_negative() {
                return Err(OrderError::Configuration(format!(
                    "negative price for {}: {}",
                    name, price
                )));
            }
            if price > Price::MAX {
                return Err(OrderError::Configuration(format!(
                    "price for {} exceeds {}: {}",
                    name,
                    Price::MAX,
                    price
                )));
            }
        }

        Ok(())
    }

    /// Load and validate a catalog from a TOML string
    pub fn from_toml(toml_str: &str) -> OrderResult<Self> {
        let catalog: Catalog = toml::from_str(toml_str)
            .map_err(|e| OrderError::Configuration(format!("invalid catalog: {}", e)))?;
        catalog.validate()?;
        Ok(catalog)
    }
}

/// Paths searched for a catalog when none is given explicitly
pub const CATALOG_SEARCH_PATHS: [&str; 3] = [
    "config/catalog.toml",
    "../config/catalog.toml",
    "../../config/catalog.toml",
];

/// Load the catalog from `explicit_path`, or from the first readable search
/// path, or fall back to the standard menu.
///
/// An explicit path that cannot be read is an error rather than a fallback.
pub fn load_catalog(explicit_path: Option<&str>) -> OrderResult<Catalog> {
    load_catalog_from(explicit_path, &CATALOG_SEARCH_PATHS)
}

fn load_catalog_from(explicit_path: Option<&str>, search_paths: &[&str]) -> OrderResult<Catalog> {
    if let Some(path) = explicit_path {
        let content = std::fs::read_to_string(path)
            .map_err(|e| OrderError::Configuration(format!("failed to read {}: {}", path, e)))?;
        let catalog = Catalog::from_toml(&content)?;
        info!("Loaded catalog from {}", path);
        return Ok(catalog);
    }

    for &path in search_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = Catalog::from_toml(&content)?;
            info!(
                "Loaded {} bases and {} add-ons from {}",
                catalog.bases.len(),
                catalog.add_ons.len(),
                path
            );
            return Ok(catalog);
        }
    }

    warn!("No catalog file found, using the standard menu");
    Ok(Catalog::default())
}

/// The counter's standard menu
impl Default for Catalog {
    fn default() -> Self {
        Catalog::new()
            .with_base(BaseKind::Margherita, "Margherita", Price::new(5.0), 10)
            .with_base(BaseKind::Pepperoni, "Pepperoni", Price::new(6.0), 10)
            .with_add_on(AddOnKind::Cheese, "Cheese", Price::new(1.0), 15)
            .with_add_on(AddOnKind::Olives, "Olives", Price::new(0.5), 10)
            .with_add_on(AddOnKind::Mushrooms, "Mushrooms", Price::new(0.7), 12)
    }
}

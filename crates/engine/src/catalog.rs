//! Static item → price table.

use std::collections::HashMap;

use crate::{EngineError, ResultEngine};

/// Immutable catalog of purchasable items.
///
/// Built once at startup and injected into the engine. Purchase records
/// snapshot the price at purchase time, so restarting with a different
/// table never rewrites history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    items: HashMap<String, i64>,
}

impl Catalog {
    /// Builds a catalog from an item → price table.
    ///
    /// Every price must be > 0.
    pub fn new(items: HashMap<String, i64>) -> ResultEngine<Self> {
        for (item, price) in &items {
            if *price <= 0 {
                return Err(EngineError::InvalidAmount(format!(
                    "price for \"{item}\" must be > 0"
                )));
            }
        }
        Ok(Self { items })
    }

    /// Returns the price of an item, if it is in the catalog.
    pub fn price(&self, item: &str) -> Option<i64> {
        self.items.get(item).copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let items = [
            ("t-shirt", 80),
            ("cup", 20),
            ("book", 50),
            ("pen", 10),
            ("powerbank", 200),
            ("hoody", 300),
            ("umbrella", 200),
            ("socks", 10),
            ("wallet", 50),
            ("pink-hoody", 500),
        ];
        Self {
            items: items
                .into_iter()
                .map(|(item, price)| (item.to_string(), price))
                .collect(),
        }
    }
}

//! # Basket Module
//!
//! The basket accumulates what has been scanned: one quantity per SKU.
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Basket Locking Discipline                            │
//! │                                                                         │
//! │  Operation        Lock          Notes                                   │
//! │  ─────────        ────          ─────                                   │
//! │  get()            read          concurrent with other reads             │
//! │  for_each()       read          visits a snapshot, lock released first  │
//! │  len()            read                                                  │
//! │  upsert()         write         replaces, never adds                    │
//! │  merge()          write         get + upsert in ONE critical section    │
//! │                                                                         │
//! │  Two concurrent scans of the same SKU both go through merge(), so      │
//! │  neither update can be lost.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::error::BasketError;
use crate::quantity::Quantity;
use crate::sku::Sku;

/// Storage for scanned items.
///
/// Implementations must be safe to share between threads.
pub trait Basket: Send + Sync {
    /// Inserts or overwrites the quantity for `sku`.
    fn upsert(&self, sku: Sku, quantity: Quantity);

    /// Gets the stored quantity for `sku`.
    ///
    /// Returns [`BasketError::ItemNotFound`] when there is no entry.
    fn get(&self, sku: Sku) -> Result<Quantity, BasketError>;

    /// Adds `quantity` to whatever is stored for `sku`, inserting it if
    /// absent, and returns the merged quantity.
    ///
    /// The read and the write happen under one lock acquisition.
    fn merge(&self, sku: Sku, quantity: Quantity) -> Quantity;

    /// Calls `visitor` once per entry. Order is unspecified.
    fn for_each(&self, visitor: &mut dyn FnMut(Sku, Quantity));

    /// Number of distinct SKUs in the basket.
    fn len(&self) -> usize;

    /// Checks if the basket has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory basket guarded by a reader/writer lock.
#[derive(Debug, Default)]
pub struct InMemoryBasket {
    items: RwLock<HashMap<Sku, Quantity>>,
}

impl InMemoryBasket {
    /// Creates an empty basket.
    pub fn new() -> Self {
        Self::default()
    }
}

impl FromIterator<(Sku, Quantity)> for InMemoryBasket {
    fn from_iter<I: IntoIterator<Item = (Sku, Quantity)>>(iter: I) -> Self {
        InMemoryBasket {
            items: RwLock::new(iter.into_iter().collect()),
        }
    }
}

impl Basket for InMemoryBasket {
    fn upsert(&self, sku: Sku, quantity: Quantity) {
        self.items.write().insert(sku, quantity);
    }

    fn get(&self, sku: Sku) -> Result<Quantity, BasketError> {
        self.items
            .read()
            .get(&sku)
            .copied()
            .ok_or(BasketError::ItemNotFound(sku))
    }

    fn merge(&self, sku: Sku, quantity: Quantity) -> Quantity {
        let mut items = self.items.write();
        let entry = items.entry(sku).or_default();
        entry.add_delta(quantity.value());
        *entry
    }

    fn for_each(&self, visitor: &mut dyn FnMut(Sku, Quantity)) {
        // Visitors may call back into the basket
        let snapshot: Vec<(Sku, Quantity)> =
            self.items.read().iter().map(|(s, q)| (*s, *q)).collect();

        for (sku, quantity) in snapshot {
            visitor(sku, quantity);
        }
    }

    fn len(&self) -> usize {
        self.items.read().len()
    }
}

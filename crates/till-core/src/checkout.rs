//! # Checkout Module
//!
//! Coordinates scanning against the pricing rules and the basket.
//!
//! ## Scan Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Checkout::scan()                                │
//! │                                                                         │
//! │  scan(sku, qty)                                                        │
//! │       │                                                                 │
//! │       ├── qty == 0? ─────────────► Ok(()), basket untouched            │
//! │       │                                                                 │
//! │       ├── !price_exists(sku)? ───► Err(UnknownItem), basket untouched  │
//! │       │                                                                 │
//! │       └── basket.merge(sku, qty) ► first scan inserts, repeat scans    │
//! │                                    accumulate (one write lock)          │
//! │                                                                         │
//! │  total_price() = Σ pricing.get_price(sku, qty) over the basket         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use till_core::{Checkout, InMemoryBasket, PricingData, Quantity, Sku, SpecialPricing};
//!
//! let pricing: SpecialPricing = [
//!     (Sku::new('A').unwrap(), PricingData::unit(10)),
//!     (Sku::new('B').unwrap(), PricingData::with_special(20, 10, 2)),
//! ]
//! .into_iter()
//! .collect();
//!
//! let checkout = Checkout::builder()
//!     .pricing_rules(Arc::new(pricing))
//!     .basket(Arc::new(InMemoryBasket::new()))
//!     .build()
//!     .unwrap();
//!
//! for c in ['A', 'B', 'B'] {
//!     checkout.scan(Sku::new(c).unwrap(), Quantity::new(1)).unwrap();
//! }
//!
//! assert_eq!(checkout.total_price().pence(), 20);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::basket::Basket;
use crate::error::{CheckoutError, CheckoutResult, ScanError};
use crate::money::Pence;
use crate::pricing::PricingRules;
use crate::quantity::Quantity;
use crate::sku::Sku;

// =============================================================================
// Builder
// =============================================================================

/// Builds a [`Checkout`], failing if a collaborator is missing.
#[derive(Default)]
pub struct CheckoutBuilder {
    pricing_rules: Option<Arc<dyn PricingRules>>,
    basket: Option<Arc<dyn Basket>>,
}

impl CheckoutBuilder {
    pub fn pricing_rules(mut self, pricing_rules: Arc<dyn PricingRules>) -> Self {
        self.pricing_rules = Some(pricing_rules);
        self
    }

    pub fn basket(mut self, basket: Arc<dyn Basket>) -> Self {
        self.basket = Some(basket);
        self
    }

    /// Returns [`CheckoutError::MissingDependency`] naming the first
    /// collaborator that was not provided.
    pub fn build(self) -> CheckoutResult<Checkout> {
        let pricing_rules = self
            .pricing_rules
            .ok_or(CheckoutError::MissingDependency("pricing rules"))?;
        let basket = self
            .basket
            .ok_or(CheckoutError::MissingDependency("basket"))?;

        Ok(Checkout {
            pricing_rules,
            basket,
        })
    }
}

// =============================================================================
// Checkout
// =============================================================================

/// A checkout session over one basket.
///
/// `Checkout` holds no state of its own beyond its collaborators, so it can
/// be shared between threads that scan in parallel.
#[derive(Clone)]
pub struct Checkout {
    pricing_rules: Arc<dyn PricingRules>,
    basket: Arc<dyn Basket>,
}

impl fmt::Debug for Checkout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checkout")
            .field("basket_items", &self.basket.len())
            .finish()
    }
}

impl Checkout {
    pub fn builder() -> CheckoutBuilder {
        CheckoutBuilder::default()
    }

    /// Shortcut for the builder when both collaborators are at hand.
    pub fn new(pricing_rules: Arc<dyn PricingRules>, basket: Arc<dyn Basket>) -> Self {
        Checkout {
            pricing_rules,
            basket,
        }
    }

    /// The basket this checkout writes to.
    pub fn basket(&self) -> &Arc<dyn Basket> {
        &self.basket
    }

    /// Scans `quantity` units of `sku` into the basket.
    ///
    /// Repeated scans of the same SKU accumulate. Scanning zero units is a
    /// no-op, even for an unknown SKU.
    pub fn scan(&self, sku: Sku, quantity: Quantity) -> CheckoutResult<()> {
        if quantity.is_zero() {
            return Ok(());
        }

        if !self.pricing_rules.price_exists(sku) {
            return Err(CheckoutError::UnknownItem(sku));
        }

        let merged = self.basket.merge(sku, quantity);
        debug!(%sku, scanned = %quantity, in_basket = %merged, "Item scanned");

        Ok(())
    }

    /// Scans every SKU from `source`, one unit each.
    ///
    /// ## Failure Policy
    /// - invalid characters: skipped
    /// - unknown items: logged and skipped
    /// - read errors: abort with [`CheckoutError::Source`]. Items scanned
    ///   before the failure stay in the basket.
    pub fn scan_items<I>(&self, source: I) -> CheckoutResult<ScanSummary>
    where
        I: IntoIterator<Item = Result<Sku, ScanError>>,
    {
        let mut summary = ScanSummary::default();

        for item in source {
            let sku = match item {
                Ok(sku) => sku,
                Err(ScanError::InvalidCharacter(err)) => {
                    debug!(error = %err, "Skipping invalid character");
                    summary.invalid_characters += 1;
                    continue;
                }
                Err(err) => {
                    warn!(error = %err, "Scan source failed");
                    return Err(err.into());
                }
            };

            match self.scan(sku, Quantity::new(1)) {
                Ok(()) => summary.scanned += 1,
                Err(CheckoutError::UnknownItem(sku)) => {
                    warn!(%sku, "Failed to scan item into basket: no pricing rule");
                    summary.unknown_items += 1;
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            scanned = summary.scanned,
            invalid_characters = summary.invalid_characters,
            unknown_items = summary.unknown_items,
            "Scan complete"
        );

        Ok(summary)
    }

    /// Total price of everything in the basket.
    ///
    /// Never fails. Entries without a pricing rule contribute 0.
    pub fn total_price(&self) -> Pence {
        let mut total = Pence::zero();
        self.basket.for_each(&mut |sku, quantity| {
            total += self.pricing_rules.get_price(sku, quantity);
        });
        total
    }

    /// One priced line per basket entry, ordered by SKU.
    pub fn receipt(&self) -> Vec<ReceiptLine> {
        let mut lines = Vec::with_capacity(self.basket.len());
        self.basket.for_each(&mut |sku, quantity| {
            lines.push(ReceiptLine {
                sku,
                quantity,
                price: self.pricing_rules.get_price(sku, quantity),
            });
        });
        lines.sort_by_key(|line| line.sku);
        lines
    }
}

// =============================================================================
// Scan Results
// =============================================================================

/// Counts from a batch scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Units added to the basket.
    pub scanned: usize,
    /// Characters skipped because they are not letters.
    pub invalid_characters: usize,
    /// Letters skipped because they have no pricing rule.
    pub unknown_items: usize,
}

/// A priced basket entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    pub sku: Sku,
    pub quantity: Quantity,
    pub price: Pence,
}

// =============================================================================
// Unit Tests
// =============================================================================

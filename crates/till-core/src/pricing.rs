//! # Pricing Module
//!
//! Pricing rules turn a SKU and a quantity into a price.
//!
//! ## Rule Types
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Pricing Rules                                   │
//! │                                                                         │
//! │  SimplePricing                                                         │
//! │  ─────────────                                                         │
//! │  price = unit_price × qty                                              │
//! │                                                                         │
//! │  SpecialPricing ("3 for £1.30")                                        │
//! │  ──────────────────────────────                                        │
//! │  bundles   = qty ÷ special_quantity                                    │
//! │  leftover  = qty mod special_quantity                                  │
//! │  price     = bundles × special_price + leftover × unit_price           │
//! │                                                                         │
//! │  Unknown SKU → 0p for both. Call price_exists() first if "unpriced"    │
//! │  must be told apart from "free".                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::money::Pence;
use crate::quantity::Quantity;
use crate::sku::Sku;

/// Capability the checkout needs from a pricing table.
pub trait PricingRules: Send + Sync {
    /// Price for `quantity` units of `sku`. Unknown SKUs cost nothing.
    fn get_price(&self, sku: Sku, quantity: Quantity) -> Pence;

    /// Whether `sku` has a pricing rule at all.
    fn price_exists(&self, sku: Sku) -> bool;
}

// =============================================================================
// Simple Pricing
// =============================================================================

/// Flat per-unit pricing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplePricing {
    pub unit_prices: HashMap<Sku, Pence>,
}

impl SimplePricing {
    pub fn new(unit_prices: HashMap<Sku, Pence>) -> Self {
        SimplePricing { unit_prices }
    }
}

impl FromIterator<(Sku, Pence)> for SimplePricing {
    fn from_iter<I: IntoIterator<Item = (Sku, Pence)>>(iter: I) -> Self {
        SimplePricing::new(iter.into_iter().collect())
    }
}

impl PricingRules for SimplePricing {
    fn get_price(&self, sku: Sku, quantity: Quantity) -> Pence {
        self.unit_prices
            .get(&sku)
            .map(|price| price.multiply_quantity(quantity))
            .unwrap_or_default()
    }

    fn price_exists(&self, sku: Sku) -> bool {
        self.unit_prices.contains_key(&sku)
    }
}

// =============================================================================
// Special Pricing
// =============================================================================

/// Pricing rule for a single SKU.
///
/// A zero `special_price` together with a zero `special_quantity` means
/// "no offer". Any other combination is an offer:
///
/// | unit | special price | special qty | meaning                         |
/// |------|---------------|-------------|---------------------------------|
/// | 50   | 0             | 0           | 50p each                        |
/// | 50   | 130           | 3           | 3 for £1.30, extras 50p         |
/// | 50   | 35            | 0           | every unit 35p (qty 0 acts as 1)|
/// | 50   | 0             | 1           | free                            |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingData {
    pub unit_price: Pence,
    pub special_price: Pence,
    pub special_quantity: Quantity,
}

impl PricingData {
    /// A plain per-unit rule with no offer.
    pub const fn unit(unit_price: u64) -> Self {
        PricingData {
            unit_price: Pence::from_pence(unit_price),
            special_price: Pence::zero(),
            special_quantity: Quantity::new(0),
        }
    }

    /// A "`quantity` for `price`" offer on top of a unit price.
    pub const fn with_special(unit_price: u64, special_price: u64, special_quantity: i64) -> Self {
        PricingData {
            unit_price: Pence::from_pence(unit_price),
            special_price: Pence::from_pence(special_price),
            special_quantity: Quantity::new(special_quantity),
        }
    }

    pub fn has_special_offer(&self) -> bool {
        !self.special_price.is_zero() || !self.special_quantity.is_zero()
    }

    /// Prices `quantity` units under this rule.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::pricing::PricingData;
    /// use till_core::quantity::Quantity;
    ///
    /// let rule = PricingData::with_special(50, 130, 3);
    /// assert_eq!(rule.price_for(Quantity::new(3)).pence(), 130);
    /// assert_eq!(rule.price_for(Quantity::new(4)).pence(), 180);
    /// ```
    pub fn price_for(&self, quantity: Quantity) -> Pence {
        if !self.has_special_offer() {
            return self.unit_price.multiply_quantity(quantity);
        }

        let bundle_size = self.special_quantity.value().max(1);
        let qty = quantity.value();

        // Discounts stop at the exact multiple, leftovers pay full price
        let bundles = Quantity::new(qty / bundle_size);
        let leftover = Quantity::new(qty % bundle_size);

        self.special_price.multiply_quantity(bundles) + self.unit_price.multiply_quantity(leftover)
    }
}

/// Per-SKU pricing with optional bundle offers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialPricing {
    pub config: HashMap<Sku, PricingData>,
}

impl SpecialPricing {
    pub fn new(config: HashMap<Sku, PricingData>) -> Self {
        SpecialPricing { config }
    }
}

impl FromIterator<(Sku, PricingData)> for SpecialPricing {
    fn from_iter<I: IntoIterator<Item = (Sku, PricingData)>>(iter: I) -> Self {
        SpecialPricing::new(iter.into_iter().collect())
    }
}

impl PricingRules for SpecialPricing {
    fn get_price(&self, sku: Sku, quantity: Quantity) -> Pence {
        self.config
            .get(&sku)
            .map(|rule| rule.price_for(quantity))
            .unwrap_or_default()
    }

    fn price_exists(&self, sku: Sku) -> bool {
        self.config.contains_key(&sku)
    }
}

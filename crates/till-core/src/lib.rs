//! # till-core: Pure Pricing Engine
//!
//! This crate prices a stream of scanned items. It contains the checkout
//! logic with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    till-cli (binary: till)                      │   │
//! │  │    stdin/--input ──► SkuScanner     pricing.toml ──► TillConfig │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Iterator<Result<Sku, ScanError>>       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │   sku    │  │ quantity │  │  basket  │  │   pricing    │   │   │
//! │  │   │   Sku    │  │ Quantity │  │  Basket  │  │ PricingRules │   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │                        ┌──────────────┐                         │   │
//! │  │                        │   checkout   │  scan → basket          │   │
//! │  │                        │   Checkout   │  basket → total         │   │
//! │  │                        └──────────────┘                         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CONFIG FILES • NO SUBSCRIBER SETUP               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`sku`] - Single letter product codes
//! - [`quantity`] - Counts that never go negative
//! - [`money`] - Integer pence
//! - [`basket`] - Thread-safe SKU → quantity storage
//! - [`pricing`] - Unit and bundle pricing rules
//! - [`checkout`] - Scan orchestration and totals
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Integer Money**: All prices are whole pence
//! 2. **No Negative Counts**: Quantities clamp at zero
//! 3. **Explicit Errors**: All errors are typed enums, never strings or panics
//! 4. **Atomic Merges**: Concurrent scans of one SKU never lose an update

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket;
pub mod checkout;
pub mod error;
pub mod money;
pub mod pricing;
pub mod quantity;
pub mod sku;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use basket::{Basket, InMemoryBasket};
pub use checkout::{Checkout, CheckoutBuilder, ReceiptLine, ScanSummary};
pub use error::{BasketError, CheckoutError, CheckoutResult, ScanError, SkuError};
pub use money::Pence;
pub use pricing::{PricingData, PricingRules, SimplePricing, SpecialPricing};
pub use quantity::Quantity;
pub use sku::Sku;

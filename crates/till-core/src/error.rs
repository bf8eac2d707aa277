//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  SkuError       - scanned character is not a letter                    │
//! │  BasketError    - basket lookup miss                                   │
//! │  ScanError      - scan source failure (bad character or read error)    │
//! │  CheckoutError  - unknown item, missing collaborator, source failure   │
//! │                                                                         │
//! │  Flow: SkuError → ScanError → CheckoutError::Source → caller           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recovery
//! - `SkuError` / `ScanError::InvalidCharacter`: skip the character, keep scanning
//! - `BasketError::ItemNotFound`: "absent", never a crash condition
//! - `CheckoutError::UnknownItem`: caller decides, batch scans skip it
//! - `CheckoutError::MissingDependency`: fatal, no checkout is built

use thiserror::Error;

use crate::sku::Sku;

// =============================================================================
// SKU Error
// =============================================================================

/// SKU construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkuError {
    /// The input is not an alphabetic character (digit, punctuation, space...).
    #[error("a SKU must be a single letter, got {0:?}")]
    InvalidCharacter(char),
}

// =============================================================================
// Basket Error
// =============================================================================

/// Basket lookup errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BasketError {
    /// No entry exists for the SKU.
    #[error("item {0} not found in the basket")]
    ItemNotFound(Sku),
}

// =============================================================================
// Scan Error
// =============================================================================

/// Errors produced by a scan source.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The source yielded a character that is not a valid SKU.
    #[error(transparent)]
    InvalidCharacter(#[from] SkuError),

    /// The underlying reader failed.
    #[error("failed to read scan input: {0}")]
    Read(#[from] std::io::Error),
}

// =============================================================================
// Checkout Error
// =============================================================================

/// Checkout orchestration errors.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A SKU was scanned that has no pricing rule.
    ///
    /// ## User Workflow
    /// ```text
    /// scan('X', 1)
    ///      │
    ///      ▼
    /// price_exists('X')? → false
    ///      │
    ///      ▼
    /// UnknownItem('X')  (basket untouched)
    /// ```
    #[error("an unknown item was scanned: {0}")]
    UnknownItem(Sku),

    /// The checkout was built without a required collaborator.
    #[error("no {0} was provided")]
    MissingDependency(&'static str),

    /// The scan source failed while batch scanning.
    #[error("scan source failed: {0}")]
    Source(#[from] ScanError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================

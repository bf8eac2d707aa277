//! # CLI Error Type
//!
//! Everything that can stop the `till` binary.
//!
//! ```text
//! ConfigError ───┐
//! CheckoutError ─┼──► CliError ──► stderr, exit code 1
//! io::Error ─────┘
//! ```

use thiserror::Error;
use till_core::CheckoutError;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}\n\nRun `till --help` for usage.")]
    Usage(String),
}

pub type CliResult<T> = Result<T, CliError>;

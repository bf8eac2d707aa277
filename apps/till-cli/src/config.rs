//! # Till Configuration
//!
//! Loads the pricing table the checkout runs with.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TILL_PRICING_MODE=simple                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, else TILL_CONFIG, else                            │
//! │     ~/.config/till/pricing.toml (Linux)                                │
//! │     ~/Library/Application Support/com.till.till/pricing.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     A 10p, B 20p (2 for 10p), C 50p (5 for 30p), special mode          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! mode = "special"  # special | simple
//!
//! [pricing.A]
//! unit_price = 50
//! special_price = 130
//! special_quantity = 3
//!
//! [pricing.B]
//! unit_price = 30
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use till_core::{PricingData, PricingRules, SimplePricing, Sku, SpecialPricing};

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidValue(String),

    #[error("pricing table is empty")]
    EmptyPricingTable,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Pricing Mode
// =============================================================================

/// Which pricing rules the checkout uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// Unit prices only, offers are ignored.
    Simple,

    /// Unit prices plus bundle offers.
    #[default]
    Special,
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingMode::Simple => write!(f, "simple"),
            PricingMode::Special => write!(f, "special"),
        }
    }
}

impl FromStr for PricingMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" | "flat" => Ok(PricingMode::Simple),
            "special" | "offers" => Ok(PricingMode::Special),
            other => Err(ConfigError::InvalidValue(format!(
                "Unknown pricing mode: '{}'. Valid options: simple, special",
                other
            ))),
        }
    }
}

// =============================================================================
// Till Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TillConfig {
    #[serde(default)]
    pub mode: PricingMode,

    #[serde(default = "default_pricing")]
    pub pricing: HashMap<Sku, PricingData>,
}

fn default_pricing() -> HashMap<Sku, PricingData> {
    [
        ('A', PricingData::unit(10)),
        ('B', PricingData::with_special(20, 10, 2)),
        ('C', PricingData::with_special(50, 30, 5)),
    ]
    .into_iter()
    .filter_map(|(c, rule)| Sku::new(c).ok().map(|sku| (sku, rule)))
    .collect()
}

impl Default for TillConfig {
    fn default() -> Self {
        TillConfig {
            mode: PricingMode::default(),
            pricing: default_pricing(),
        }
    }
}

impl TillConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// A path passed explicitly (or through `TILL_CONFIG`) must exist. The
    /// platform default path is optional.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.or_else(|| std::env::var_os("TILL_CONFIG").map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                path => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        info!(mode = %config.mode, items = config.pricing.len(), "Pricing configuration loaded");
        Ok(config)
    }

    /// Reads a TOML config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        info!(?path, "Loading pricing config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies overrides from a variable lookup (the process environment
    /// in [`TillConfig::load`]).
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup("TILL_PRICING_MODE") {
            match mode.parse() {
                Ok(parsed) => {
                    debug!(mode = %mode, "Overriding pricing mode from environment");
                    self.mode = parsed;
                }
                Err(err) => warn!(error = %err, "Ignoring TILL_PRICING_MODE"),
            }
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.pricing.is_empty() {
            return Err(ConfigError::EmptyPricingTable);
        }
        Ok(())
    }

    /// Builds the pricing rules for the configured mode.
    pub fn pricing_rules(&self) -> Arc<dyn PricingRules> {
        match self.mode {
            PricingMode::Special => Arc::new(SpecialPricing::new(self.pricing.clone())),
            PricingMode::Simple => Arc::new(
                self.pricing
                    .iter()
                    .map(|(sku, rule)| (*sku, rule.unit_price))
                    .collect::<SimplePricing>(),
            ),
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "till", "till")
            .map(|dirs| dirs.config_dir().join("pricing.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use till_core::Quantity;

    fn sku(c: char) -> Sku {
        Sku::new(c).unwrap()
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = TillConfig::default();
        assert_eq!(config.mode, PricingMode::Special);
        assert_eq!(config.pricing.len(), 3);
        assert_eq!(config.pricing[&sku('B')], PricingData::with_special(20, 10, 2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
            mode = "special"

            [pricing.a]
            unit_price = 50
            special_price = 130
            special_quantity = 3

            [pricing.B]
            unit_price = 30
            "#,
        );

        let config = TillConfig::load(Some(file.path().to_path_buf())).unwrap();

        assert_eq!(config.pricing.len(), 2);
        assert_eq!(config.pricing[&sku('A')], PricingData::with_special(50, 130, 3));
        assert_eq!(config.pricing[&sku('B')], PricingData::unit(30));
    }

    #[test]
    fn test_missing_pricing_section_uses_defaults() {
        let file = write_config(r#"mode = "simple""#);

        let config = TillConfig::from_file(file.path()).unwrap();

        assert_eq!(config.mode, PricingMode::Simple);
        assert_eq!(config.pricing.len(), 3);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let err = TillConfig::load(Some(PathBuf::from("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_invalid_sku_in_file() {
        let file = write_config(
            r#"
            [pricing.7]
            unit_price = 10
            "#,
        );

        assert!(matches!(
            TillConfig::from_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_pricing_table_is_rejected() {
        let file = write_config("[pricing]\n");

        let config = TillConfig::from_file(file.path()).unwrap();

        assert!(matches!(config.validate(), Err(ConfigError::EmptyPricingTable)));
    }

    #[test]
    fn test_mode_override() {
        let mut config = TillConfig::default();

        config.apply_overrides(|key| (key == "TILL_PRICING_MODE").then(|| "simple".to_string()));
        assert_eq!(config.mode, PricingMode::Simple);

        // Unknown values are ignored
        config.apply_overrides(|_| Some("bogus".to_string()));
        assert_eq!(config.mode, PricingMode::Simple);
    }

    #[test]
    fn test_pricing_mode_from_str() {
        assert_eq!("Simple".parse::<PricingMode>().unwrap(), PricingMode::Simple);
        assert_eq!("special".parse::<PricingMode>().unwrap(), PricingMode::Special);
        assert!("bulk".parse::<PricingMode>().is_err());
    }

    #[test]
    fn test_pricing_rules_follow_mode() {
        let mut config = TillConfig::default();
        let two_b = Quantity::new(2);

        let special = config.pricing_rules();
        assert_eq!(special.get_price(sku('B'), two_b).pence(), 10);

        config.mode = PricingMode::Simple;
        let simple = config.pricing_rules();
        assert_eq!(simple.get_price(sku('B'), two_b).pence(), 40);
        assert!(simple.price_exists(sku('C')));
    }
}

//! Storefront Config
//!
//! Session-wide settings loaded from YAML. Every field is optional and falls
//! back to the storefront defaults.

use std::{fs, num::NonZeroUsize, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::{
    Findable,
    iso::{self, Currency},
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    fixtures::{FixtureError, parse_percentage},
    pagination::{DEFAULT_PAGE_SIZE, Paginator},
    promotions::{PromotionCatalog, PromotionError},
};

/// Number of related products shown on a product detail view.
pub const DEFAULT_RELATED_LIMIT: usize = 4;

/// Errors loading or interpreting a storefront config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Currency code not recognised
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A promotion discount could not be parsed
    #[error("Invalid promotion discount for {code}: {source}")]
    InvalidDiscount {
        /// Promotion code
        code: String,

        /// Parse failure
        source: FixtureError,
    },

    /// A promotion code was rejected
    #[error(transparent)]
    Promotion(#[from] PromotionError),

    /// Page size must be positive
    #[error("page_size must be at least 1")]
    ZeroPageSize,
}

/// Storefront Config
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// ISO currency code for every price in the session
    pub currency: String,

    /// Products per catalog page
    pub page_size: usize,

    /// Products shown under "related"
    pub related_limit: usize,

    /// Promotion code -> discount ("15%" or "0.15")
    pub promotions: FxHashMap<String, String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: iso::EUR.iso_alpha_code.to_string(),
            page_size: DEFAULT_PAGE_SIZE.get(),
            related_limit: DEFAULT_RELATED_LIMIT,
            promotions: FxHashMap::from_iter([("SUMMER15".to_string(), "15%".to_string())]),
        }
    }
}

impl StorefrontConfig {
    /// Parse a config from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] for malformed input.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        debug!(path = %path.display(), "loading storefront config");

        Self::from_yaml(&contents)
    }

    /// The session currency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] for unsupported codes.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        Currency::find(self.currency.trim())
            .ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))
    }

    /// A paginator using the configured page size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroPageSize`] if the page size is zero.
    pub fn paginator(&self) -> Result<Paginator, ConfigError> {
        NonZeroUsize::new(self.page_size)
            .map(Paginator::new)
            .ok_or(ConfigError::ZeroPageSize)
    }

    /// The configured promotion codes.
    ///
    /// # Errors
    ///
    /// Returns an error if a code is blank or a discount cannot be parsed.
    pub fn promotion_catalog(&self) -> Result<PromotionCatalog, ConfigError> {
        let mut catalog = PromotionCatalog::new();

        for (code, discount) in &self.promotions {
            let discount =
                parse_percentage(discount).map_err(|source| ConfigError::InvalidDiscount {
                    code: code.clone(),
                    source,
                })?;

            catalog.insert(code, discount)?;
        }

        Ok(catalog)
    }
}

//! Promotions
//!
//! Promotion codes map to a fractional discount on the cart subtotal. Codes
//! are matched exactly after trimming and upper-casing.

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors raised when looking up a promotion code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromotionError {
    /// Code was empty after trimming.
    #[error("promotion code is empty")]
    EmptyCode,

    /// No promotion is registered under this code.
    #[error("unknown promotion code: {0}")]
    UnknownCode(String),

    /// Discount fraction lies outside 0..=1.
    #[error("discount for {code} must be between 0% and 100%, got {fraction}")]
    InvalidDiscount {
        /// The normalised code
        code: String,

        /// The rejected fraction
        fraction: Decimal,
    },
}

/// A normalised promotion code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PromotionCode(String);

impl PromotionCode {
    /// Normalise `raw` into a code.
    ///
    /// # Errors
    ///
    /// Returns [`PromotionError::EmptyCode`] for blank input.
    pub fn parse(raw: &str) -> Result<Self, PromotionError> {
        let code = raw.trim().to_uppercase();

        if code.is_empty() {
            return Err(PromotionError::EmptyCode);
        }

        Ok(Self(code))
    }

    /// The normalised code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PromotionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An active promotion: a code and the fraction it takes off.
#[derive(Debug, Clone, PartialEq)]
pub struct Promotion {
    code: PromotionCode,
    discount: Percentage,
}

impl Promotion {
    /// The promotion code.
    pub fn code(&self) -> &PromotionCode {
        &self.code
    }

    /// The fraction taken off the subtotal.
    pub fn discount(&self) -> Percentage {
        self.discount
    }
}

/// Registered promotion codes.
#[derive(Debug, Clone, Default)]
pub struct PromotionCatalog {
    codes: FxHashMap<PromotionCode, Percentage>,
}

impl PromotionCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The storefront's standing promotions.
    pub fn storefront_defaults() -> Self {
        let mut catalog = Self::new();

        catalog
            .codes
            .insert(PromotionCode("SUMMER15".to_string()), Percentage::from(0.15));

        catalog
    }

    /// Register `code`, replacing any earlier discount under the same code.
    ///
    /// # Errors
    ///
    /// - [`PromotionError::EmptyCode`]: blank code.
    /// - [`PromotionError::InvalidDiscount`]: discount outside 0%..=100%.
    pub fn insert(&mut self, code: &str, discount: Percentage) -> Result<(), PromotionError> {
        let code = PromotionCode::parse(code)?;
        let fraction = discount * Decimal::ONE;

        if fraction < Decimal::ZERO || fraction > Decimal::ONE {
            return Err(PromotionError::InvalidDiscount {
                code: code.0,
                fraction,
            });
        }

        self.codes.insert(code, discount);

        Ok(())
    }

    /// Look up a promotion by code.
    ///
    /// # Errors
    ///
    /// - [`PromotionError::EmptyCode`]: blank input.
    /// - [`PromotionError::UnknownCode`]: nothing registered under the normalised code.
    pub fn lookup(&self, code: &str) -> Result<Promotion, PromotionError> {
        let code = PromotionCode::parse(code)?;

        match self.codes.get(&code) {
            Some(discount) => Ok(Promotion {
                discount: *discount,
                code,
            }),
            None => Err(PromotionError::UnknownCode(code.0)),
        }
    }

    /// Number of registered codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether no codes are registered.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn codes_are_trimmed_and_upper_cased() -> TestResult {
        assert_eq!(PromotionCode::parse("  summer15 ")?.as_str(), "SUMMER15");

        Ok(())
    }

    #[test]
    fn blank_code_is_rejected() {
        assert_eq!(PromotionCode::parse("   "), Err(PromotionError::EmptyCode));
    }

    #[test]
    fn defaults_include_summer_sale() -> TestResult {
        let catalog = PromotionCatalog::storefront_defaults();
        let promotion = catalog.lookup("Summer15")?;

        assert_eq!(promotion.code().as_str(), "SUMMER15");
        assert_eq!(promotion.discount(), Percentage::from(0.15));

        Ok(())
    }

    #[test]
    fn unknown_code_is_rejected() {
        let catalog = PromotionCatalog::storefront_defaults();

        assert_eq!(
            catalog.lookup("winter99"),
            Err(PromotionError::UnknownCode("WINTER99".to_string()))
        );
    }

    #[test]
    fn insert_replaces_existing_code() -> TestResult {
        let mut catalog = PromotionCatalog::new();

        catalog.insert("flash", Percentage::from(0.2))?;
        catalog.insert("FLASH", Percentage::from(0.3))?;

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup("flash")?.discount(), Percentage::from(0.3));

        Ok(())
    }

    #[test]
    fn insert_rejects_discounts_outside_unit_range() -> TestResult {
        let mut catalog = PromotionCatalog::new();

        assert!(matches!(
            catalog.insert("double", Percentage::from(1.5)),
            Err(PromotionError::InvalidDiscount { code, .. }) if code == "DOUBLE"
        ));
        assert!(matches!(
            catalog.insert("refund", Percentage::from(-0.1)),
            Err(PromotionError::InvalidDiscount { .. })
        ));
        assert!(catalog.is_empty());

        catalog.insert("free", Percentage::from(1.0))?;
        catalog.insert("none", Percentage::from(0.0))?;

        assert_eq!(catalog.len(), 2);

        Ok(())
    }
}

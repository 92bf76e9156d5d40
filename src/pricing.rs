//! Pricing

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::cart::CartLine;

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// A line total does not fit in minor units.
    #[error("line total overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates `price × quantity`.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: the product does not fit in minor units.
pub fn line_total<'a>(
    price: &Money<'a, Currency>,
    quantity: u32,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    let minor = price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(TotalPriceError::Overflow)?;

    Ok(Money::from_minor(minor, price.currency()))
}

/// Calculates the total price of a list of cart lines
///
/// An empty list totals zero in `currency`.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: a line total does not fit in minor units.
/// - [`TotalPriceError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn total_price<'a>(
    lines: &[CartLine<'a>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    lines
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, line| {
            Ok(acc.add(line_total(line.price(), line.quantity())?)?)
        })
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{EUR, USD};
    use testresult::TestResult;

    use crate::products::ProductId;

    use super::*;

    #[test]
    fn line_total_multiplies_by_quantity() -> TestResult {
        let total = line_total(&Money::from_minor(1_25, EUR), 3)?;

        assert_eq!(total, Money::from_minor(3_75, EUR));

        Ok(())
    }

    #[test]
    fn line_total_overflow_is_an_error() {
        let result = line_total(&Money::from_minor(i64::MAX, EUR), 2);

        assert_eq!(result, Err(TotalPriceError::Overflow));
    }

    #[test]
    fn total_price_sums_lines() -> TestResult {
        let lines = [
            CartLine::new(ProductId(1), "Tote", Money::from_minor(10_00, EUR), 2),
            CartLine::new(ProductId(2), "Apron", Money::from_minor(5_50, EUR), 1),
        ];

        assert_eq!(total_price(&lines, EUR)?, Money::from_minor(25_50, EUR));

        Ok(())
    }

    #[test]
    fn total_price_empty_is_zero() -> TestResult {
        assert_eq!(total_price(&[], EUR)?, Money::from_minor(0, EUR));

        Ok(())
    }

    #[test]
    fn total_price_currency_mismatch() {
        let lines = [CartLine::new(
            ProductId(1),
            "Tote",
            Money::from_minor(10_00, USD),
            1,
        )];

        assert!(matches!(
            total_price(&lines, EUR),
            Err(TotalPriceError::Money(_))
        ));
    }
}

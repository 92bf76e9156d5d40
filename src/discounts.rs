//! Discounts

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculate the discount amount in minor units based on a percentage and a minor unit amount.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the calculation overflows.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    // `Percentage` only exposes its value through multiplication.
    ((*percent) * Decimal::ONE)
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Amount taken off `subtotal` by a percentage discount.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the calculation overflows.
pub fn discount_on<'a>(
    subtotal: &Money<'a, Currency>,
    percent: &Percentage,
) -> Result<Money<'a, Currency>, DiscountError> {
    let discount_minor = percent_of_minor(percent, subtotal.to_minor_units())?;

    Ok(Money::from_minor(discount_minor, subtotal.currency()))
}

/// `subtotal × (1 − percent)`, rounded to minor units.
///
/// # Errors
///
/// Returns a [`DiscountError`] if the discount cannot be calculated or subtracted.
pub fn apply_percentage<'a>(
    subtotal: &Money<'a, Currency>,
    percent: &Percentage,
) -> Result<Money<'a, Currency>, DiscountError> {
    let discount = discount_on(subtotal, percent)?;

    Ok(subtotal.sub(discount)?)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::EUR;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn percent_of_minor_calculates_correctly() -> TestResult {
        let percent = Percentage::from(0.25);

        assert_eq!(percent_of_minor(&percent, 200)?, 50);

        Ok(())
    }

    #[test]
    fn percent_of_minor_rounds_half_away_from_zero() -> TestResult {
        let percent = Percentage::from(0.5);

        assert_eq!(percent_of_minor(&percent, 5)?, 3);
        assert_eq!(percent_of_minor(&percent, -5)?, -3);

        Ok(())
    }

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let percent = Percentage::from(2.0);
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));
    }

    #[test]
    fn fifteen_percent_off_one_hundred() -> TestResult {
        let subtotal = Money::from_minor(100_00, EUR);
        let percent = Percentage::from(0.15);

        assert_eq!(discount_on(&subtotal, &percent)?, Money::from_minor(15_00, EUR));
        assert_eq!(
            apply_percentage(&subtotal, &percent)?,
            Money::from_minor(85_00, EUR)
        );

        Ok(())
    }

    #[test]
    fn zero_subtotal_stays_zero() -> TestResult {
        let subtotal = Money::from_minor(0, EUR);

        assert_eq!(
            apply_percentage(&subtotal, &Percentage::from(0.5))?,
            Money::from_minor(0, EUR)
        );

        Ok(())
    }
}

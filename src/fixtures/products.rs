//! Product Fixtures

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    products::{Category, Product, Rating},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products in catalog order
    pub products: Vec<ProductFixture>,
}

/// Category Fixture
#[derive(Debug, Deserialize)]
pub struct CategoryFixture {
    /// Category id
    pub id: u64,

    /// Category name
    pub name: String,
}

/// Rating Fixture
#[derive(Debug, Deserialize)]
pub struct RatingFixture {
    /// Average score (e.g., "4.5")
    pub rate: String,

    /// Number of ratings
    pub count: u32,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: u64,

    /// Product title
    pub title: String,

    /// Product price (e.g., "24.00 EUR")
    pub price: String,

    /// Product category
    pub category: CategoryFixture,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Image URLs
    #[serde(default)]
    pub images: Vec<String>,

    /// Customer rating
    #[serde(default)]
    pub rating: Option<RatingFixture>,
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;
        let price = Money::from_minor(minor_units, currency);

        let rating = fixture
            .rating
            .map(|rating| {
                rating
                    .rate
                    .trim()
                    .parse::<Decimal>()
                    .map(|average| Rating {
                        average,
                        count: rating.count,
                    })
                    .map_err(|_err| FixtureError::InvalidRating(rating.rate.clone()))
            })
            .transpose()?;

        let product = fixture.images.into_iter().fold(
            Product::new(
                fixture.id,
                fixture.title,
                price,
                Category::new(fixture.category.id, fixture.category.name),
            )
            .with_description(fixture.description),
            Product::with_image,
        );

        Ok(match rating {
            Some(rating) => product.with_rating(rating),
            None => product,
        })
    }
}

/// Parse price string (e.g., "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

/// Parse percentage string (e.g., "15%" or "0.15") into a `Percentage`
///
/// # Errors
///
/// Returns an error if the string cannot be parsed or lies outside 0%..=100%.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    let value = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<f64>()
            .map(|value| value / 100.0)
    } else {
        trimmed.parse::<f64>()
    }
    .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

    if !(0.0..=1.0).contains(&value) {
        return Err(FixtureError::InvalidPercentage(s.to_string()));
    }

    Ok(Percentage::from(value))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_reads_amount_and_currency() -> TestResult {
        assert_eq!(parse_price("24.50 EUR")?, (24_50, EUR));
        assert_eq!(parse_price("3 GBP")?, (3_00, GBP));

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("2.99GBP");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_negative_amounts() {
        assert!(matches!(
            parse_price("-1.00 EUR"),
            Err(FixtureError::InvalidPrice(_))
        ));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_percentage_accepts_both_formats() -> TestResult {
        assert_eq!(parse_percentage("15%")?, Percentage::from(0.15));
        assert_eq!(parse_percentage(" 0.25 ")?, Percentage::from(0.25));

        Ok(())
    }

    #[test]
    fn parse_percentage_rejects_out_of_range() {
        assert!(matches!(
            parse_percentage("150%"),
            Err(FixtureError::InvalidPercentage(_))
        ));
        assert!(matches!(
            parse_percentage("-0.1"),
            Err(FixtureError::InvalidPercentage(_))
        ));
    }

    #[test]
    fn product_fixture_converts_to_product() -> TestResult {
        let fixture: ProductFixture = serde_norway::from_str(
            "id: 3\ntitle: Canvas Tote\nprice: 24.00 EUR\ncategory: { id: 2, name: Bags }\nimages: [a.jpg, b.jpg]\nrating: { rate: \"4.5\", count: 10 }\n",
        )?;

        let product = Product::try_from(fixture)?;

        assert_eq!(product.title, "Canvas Tote");
        assert_eq!(product.price, Money::from_minor(24_00, EUR));
        assert_eq!(product.category, Category::new(2, "Bags"));
        assert_eq!(product.image(), Some("a.jpg"));
        assert_eq!(product.rating.map(|rating| rating.count), Some(10));

        Ok(())
    }
}

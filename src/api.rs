//! Remote catalog payloads
//!
//! Decodes the product and category JSON served by the storefront's catalog
//! API. Fetching is left to the caller.

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogError},
    products::{Category, Product, ProductId, Rating},
};

/// Errors decoding API payloads.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed JSON
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Price is NaN, infinite, negative or out of range
    #[error("Invalid price for product {product}: {price}")]
    InvalidPrice {
        /// Product id
        product: u64,

        /// Raw price
        price: f64,
    },

    /// Rating is NaN or infinite
    #[error("Invalid rating for product {0}")]
    InvalidRating(u64),

    /// Two payload products share an id
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Category as served by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPayload {
    /// Category id
    pub id: u64,

    /// Display name
    pub name: String,
}

/// Rating as served by the API.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RatingPayload {
    /// Average score
    pub rate: f64,

    /// Number of ratings
    pub count: u32,
}

/// Product as served by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPayload {
    /// Product id
    pub id: u64,

    /// Title
    pub title: String,

    /// Price in major units
    pub price: f64,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Image URLs
    #[serde(default)]
    pub images: Vec<String>,

    /// Category
    pub category: CategoryPayload,

    /// Optional rating
    #[serde(default)]
    pub rating: Option<RatingPayload>,
}

impl From<CategoryPayload> for Category {
    fn from(payload: CategoryPayload) -> Self {
        Category::new(payload.id, payload.name)
    }
}

impl ProductPayload {
    /// Convert into a [`Product`] priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidPrice`] for non-finite or negative prices, and
    /// [`ApiError::InvalidRating`] for a non-finite rating.
    pub fn into_product<'a>(self, currency: &'a Currency) -> Result<Product<'a>, ApiError> {
        let price = price_from_major(self.id, self.price, currency)?;

        let rating = self
            .rating
            .map(|rating| {
                Decimal::from_f64(rating.rate)
                    .map(|average| Rating {
                        average: average.round_dp(2),
                        count: rating.count,
                    })
                    .ok_or(ApiError::InvalidRating(self.id))
            })
            .transpose()?;

        Ok(Product {
            id: ProductId(self.id),
            title: self.title,
            description: self.description,
            price,
            category: self.category.into(),
            images: SmallVec::from_vec(self.images),
            rating,
        })
    }
}

fn price_from_major(
    product: u64,
    price: f64,
    currency: &Currency,
) -> Result<Money<'_, Currency>, ApiError> {
    let invalid = || ApiError::InvalidPrice { product, price };

    if !price.is_finite() || price < 0.0 {
        return Err(invalid());
    }

    let major = Decimal::from_f64(price).ok_or_else(invalid)?;

    let minor = 10_i64
        .checked_pow(currency.exponent)
        .and_then(|scale| major.checked_mul(Decimal::from(scale)))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(invalid)?;

    Ok(Money::from_minor(minor, currency))
}

/// Decode a single product payload.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or the price is invalid.
pub fn decode_product<'a>(json: &str, currency: &'a Currency) -> Result<Product<'a>, ApiError> {
    serde_json::from_str::<ProductPayload>(json)?.into_product(currency)
}

/// Decode a product list into a catalog, keeping the payload order.
///
/// # Errors
///
/// Returns an error if the JSON is malformed, a price is invalid or ids repeat.
pub fn decode_catalog<'a>(json: &str, currency: &'a Currency) -> Result<Catalog<'a>, ApiError> {
    let payloads: Vec<ProductPayload> = serde_json::from_str(json)?;

    debug!(products = payloads.len(), "decoding catalog payload");

    let products = payloads
        .into_iter()
        .map(|payload| payload.into_product(currency))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Catalog::with_products(products)?)
}

/// Decode the category list.
///
/// # Errors
///
/// Returns an error if the JSON is malformed.
pub fn decode_categories(json: &str) -> Result<Vec<Category>, ApiError> {
    let payloads: Vec<CategoryPayload> = serde_json::from_str(json)?;

    Ok(payloads.into_iter().map(Category::from).collect())
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{EUR, JPY};
    use testresult::TestResult;

    use super::*;

    const PRODUCT: &str = r#"{
        "id": 7,
        "title": "Linen Shirt",
        "price": 49.9,
        "description": "Breathable summer shirt",
        "images": ["https://img.example/7-a.jpg", "https://img.example/7-b.jpg"],
        "category": { "id": 1, "name": "Clothes" },
        "rating": { "rate": 4.25, "count": 120 }
    }"#;

    #[test]
    fn decodes_full_product() -> TestResult {
        let product = decode_product(PRODUCT, EUR)?;

        assert_eq!(product.id, ProductId(7));
        assert_eq!(product.title, "Linen Shirt");
        assert_eq!(product.price, Money::from_minor(49_90, EUR));
        assert_eq!(product.category, Category::new(1, "Clothes"));
        assert_eq!(product.image(), Some("https://img.example/7-a.jpg"));
        assert_eq!(product.images.len(), 2);
        assert_eq!(
            product.rating,
            Some(Rating {
                average: Decimal::new(425, 2),
                count: 120
            })
        );

        Ok(())
    }

    #[test]
    fn optional_fields_default() -> TestResult {
        let product = decode_product(
            r#"{"id": 1, "title": "Mug", "price": 8, "category": {"id": 3, "name": "Home"}}"#,
            EUR,
        )?;

        assert!(product.description.is_empty());
        assert!(product.images.is_empty());
        assert!(product.rating.is_none());
        assert_eq!(product.price, Money::from_minor(8_00, EUR));

        Ok(())
    }

    #[test]
    fn zero_exponent_currency_has_no_minor_scaling() -> TestResult {
        let product = decode_product(
            r#"{"id": 1, "title": "Tea", "price": 1200, "category": {"id": 3, "name": "Home"}}"#,
            JPY,
        )?;

        assert_eq!(product.price, Money::from_minor(1200, JPY));

        Ok(())
    }

    #[test]
    fn negative_price_is_rejected() {
        let result = decode_product(
            r#"{"id": 5, "title": "Refund", "price": -1.5, "category": {"id": 3, "name": "Home"}}"#,
            EUR,
        );

        assert!(matches!(result, Err(ApiError::InvalidPrice { product: 5, .. })));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(decode_product("{", EUR), Err(ApiError::Json(_))));
    }

    #[test]
    fn catalog_keeps_payload_order() -> TestResult {
        let json = r#"[
            {"id": 2, "title": "B", "price": 30, "category": {"id": 1, "name": "Clothes"}},
            {"id": 1, "title": "A", "price": 10, "category": {"id": 1, "name": "Clothes"}}
        ]"#;

        let catalog = decode_catalog(json, EUR)?;
        let ids: Vec<u64> = catalog.iter().map(|product| product.id.0).collect();

        assert_eq!(ids, vec![2, 1]);

        Ok(())
    }

    #[test]
    fn catalog_rejects_duplicate_ids() {
        let json = r#"[
            {"id": 1, "title": "A", "price": 10, "category": {"id": 1, "name": "Clothes"}},
            {"id": 1, "title": "A again", "price": 10, "category": {"id": 1, "name": "Clothes"}}
        ]"#;

        assert!(matches!(
            decode_catalog(json, EUR),
            Err(ApiError::Catalog(CatalogError::DuplicateProduct(ProductId(1))))
        ));
    }

    #[test]
    fn decodes_categories() -> TestResult {
        let categories =
            decode_categories(r#"[{"id": 1, "name": "Clothes"}, {"id": 2, "name": "Shoes"}]"#)?;

        assert_eq!(
            categories,
            vec![Category::new(1, "Clothes"), Category::new(2, "Shoes")]
        );

        Ok(())
    }
}

//! Fixtures

use std::{fs, path::PathBuf};

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{Cart, CartError},
    catalog::{Catalog, CatalogError},
    fixtures::{carts::CartFixture, products::ProductsFixture, promotions::PromotionsFixture},
    products::{Product, ProductId},
    promotions::{PromotionCatalog, PromotionError},
    store::Store,
};

pub mod carts;
pub mod products;
pub mod promotions;

pub use products::{parse_percentage, parse_price};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Invalid rating format
    #[error("Invalid rating format: {0}")]
    InvalidRating(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Duplicate product ids
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Invalid promotion code
    #[error(transparent)]
    Promotion(#[from] PromotionError),

    /// Cart rejected a fixture line
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Products in file order
    catalog: Catalog<'a>,

    /// Promotion codes
    promotions: PromotionCatalog,

    /// Product ids added to the cart, in order
    cart_items: Vec<ProductId>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: Catalog::new(),
            promotions: PromotionCatalog::new(),
            cart_items: Vec::new(),
            currency: None,
        }
    }

    fn read(&self, kind: &str, name: &str) -> Result<String, FixtureError> {
        let file_path = self.base_path.join(kind).join(format!("{name}.yml"));

        debug!(path = %file_path.display(), "loading fixture");

        Ok(fs::read_to_string(&file_path)?)
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if ids repeat, or
    /// if products use different currencies.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ProductsFixture = serde_norway::from_str(&self.read("products", name)?)?;

        for product_fixture in fixture.products {
            let (_minor_units, currency) = parse_price(&product_fixture.price)?;

            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            self.catalog.insert(product_fixture.try_into()?)?;
        }

        Ok(self)
    }

    /// Load promotion codes from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a discount is invalid.
    pub fn load_promotions(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: PromotionsFixture = serde_norway::from_str(&self.read("promotions", name)?)?;

        for (code, discount) in fixture.promotions {
            self.promotions.insert(&code, parse_percentage(&discount)?)?;
        }

        Ok(self)
    }

    /// Load the cart contents from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or references an
    /// unknown product.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CartFixture = serde_norway::from_str(&self.read("carts", name)?)?;

        for id in fixture.items {
            if self.catalog.get(id).is_none() {
                return Err(FixtureError::ProductNotFound(id));
            }

            self.cart_items.push(id);
        }

        Ok(self)
    }

    /// Load a complete fixture set (products, promotions and cart with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_products(name)?
            .load_promotions(name)?
            .load_cart(name)?;

        Ok(fixture)
    }

    /// Get a product by id
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, id: u64) -> Result<&Product<'a>, FixtureError> {
        self.catalog
            .get(ProductId(id))
            .ok_or(FixtureError::ProductNotFound(ProductId(id)))
    }

    /// The loaded catalog
    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// The loaded promotion codes
    pub fn promotions(&self) -> &PromotionCatalog {
        &self.promotions
    }

    /// Product ids listed in the cart fixture
    pub fn cart_items(&self) -> &[ProductId] {
        &self.cart_items
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    /// Build a cart holding the cart fixture's items
    ///
    /// # Errors
    ///
    /// Returns an error if no products are loaded or an item cannot be added.
    pub fn cart(&self) -> Result<Cart<'a>, FixtureError> {
        let mut cart = Cart::new(self.currency()?);

        for &id in &self.cart_items {
            cart.add(self.product(id.0)?)?;
        }

        Ok(cart)
    }

    /// Build a store whose cart holds the cart fixture's items
    ///
    /// # Errors
    ///
    /// Returns an error if no products are loaded or an item cannot be added.
    pub fn store(&self) -> Result<Store<'a>, FixtureError> {
        let mut store = Store::new(self.currency()?, self.promotions.clone());

        for &id in &self.cart_items {
            store.add_to_cart(self.product(id.0)?)?;
        }

        Ok(store)
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

//! Cart
//!
//! Line items keyed by product id, with at most one line per product. A line's
//! quantity never drops below one: setting it to zero removes the line.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    discounts::{DiscountError, apply_percentage, discount_on},
    pricing::{TotalPriceError, total_price},
    products::{Product, ProductId},
    promotions::{Promotion, PromotionCatalog, PromotionError},
};

/// Errors related to cart mutation or totals.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product's currency differs from the cart currency.
    #[error("Product {product} has currency {found}, but cart has currency {expected}")]
    CurrencyMismatch {
        /// Offending product
        product: ProductId,
        /// Product currency
        found: &'static str,
        /// Cart currency
        expected: &'static str,
    },

    /// Incrementing the line would overflow its quantity.
    #[error("quantity overflow for product {0}")]
    QuantityOverflow(ProductId),

    /// Promotion lookup failed.
    #[error(transparent)]
    Promotion(#[from] PromotionError),

    /// Subtotal calculation failed.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Discount calculation failed.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// A product in the cart with its captured price.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    product: ProductId,
    title: String,
    image: Option<String>,
    price: Money<'a, Currency>,
    quantity: u32,
}

impl<'a> CartLine<'a> {
    #[cfg(test)]
    pub(crate) fn new(
        product: ProductId,
        title: impl Into<String>,
        price: Money<'a, Currency>,
        quantity: u32,
    ) -> Self {
        Self {
            product,
            title: title.into(),
            image: None,
            price,
            quantity: quantity.max(1),
        }
    }

    fn from_product(product: &Product<'a>) -> Self {
        Self {
            product: product.id,
            title: product.title.clone(),
            image: product.image().map(ToString::to_string),
            price: product.price,
            quantity: 1,
        }
    }

    /// Product this line refers to.
    pub fn product(&self) -> ProductId {
        self.product
    }

    /// Product title at the time it was added.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Primary product image at the time it was added.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Unit price captured when the line was created.
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Quantity, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
    promotion: Option<Promotion>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            lines: Vec::new(),
            promotion: None,
            currency,
        }
    }

    /// Add one unit of `product`, returning the line's new quantity.
    ///
    /// Increments the existing line, or creates one at the product's current price.
    ///
    /// # Errors
    ///
    /// - [`CartError::CurrencyMismatch`]: the product is priced in another currency.
    /// - [`CartError::QuantityOverflow`]: the line is already at the maximum quantity.
    pub fn add(&mut self, product: &Product<'a>) -> Result<u32, CartError> {
        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch {
                product: product.id,
                found: product_currency.iso_alpha_code,
                expected: self.currency.iso_alpha_code,
            });
        }

        let quantity = match self.line_mut(product.id) {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .checked_add(1)
                    .ok_or(CartError::QuantityOverflow(product.id))?;

                line.quantity
            }
            None => {
                self.lines.push(CartLine::from_product(product));

                1
            }
        };

        debug!(product = %product.id, quantity, "added to cart");

        Ok(quantity)
    }

    /// Set the quantity of a line; zero removes it.
    ///
    /// Returns whether the cart changed. Unknown products are ignored.
    pub fn set_quantity(&mut self, product: ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(product).is_some();
        }

        match self.line_mut(product) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                debug!(%product, quantity, "updated cart quantity");
                true
            }
            _ => false,
        }
    }

    /// Remove a line, returning it if it was present.
    pub fn remove(&mut self, product: ProductId) -> Option<CartLine<'a>> {
        let index = self.position(product)?;
        let line = self.lines.remove(index);

        debug!(%product, "removed from cart");

        Some(line)
    }

    /// Remove every line. The active promotion is kept.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Activate the promotion registered under `code`, replacing any active one.
    ///
    /// # Errors
    ///
    /// Returns [`PromotionError`] for an unknown or blank code; the cart is left unchanged.
    pub fn apply_promotion(
        &mut self,
        code: &str,
        promotions: &PromotionCatalog,
    ) -> Result<&Promotion, PromotionError> {
        let promotion = promotions.lookup(code)?;

        info!(code = %promotion.code(), "promotion applied");

        Ok(self.promotion.insert(promotion))
    }

    /// Deactivate the current promotion, returning it.
    pub fn remove_promotion(&mut self) -> Option<Promotion> {
        self.promotion.take()
    }

    /// The active promotion.
    pub fn promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    /// Sum of `price × quantity` over every line.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if a line total overflows.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        total_price(&self.lines, self.currency)
    }

    /// Amount taken off the subtotal by the active promotion; zero without one.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the subtotal or discount cannot be calculated.
    pub fn discount(&self) -> Result<Money<'a, Currency>, CartError> {
        let subtotal = self.subtotal()?;

        match &self.promotion {
            Some(promotion) => Ok(discount_on(&subtotal, &promotion.discount())?),
            None => Ok(Money::from_minor(0, self.currency)),
        }
    }

    /// Subtotal less the active promotion.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the subtotal or discount cannot be calculated.
    pub fn total(&self) -> Result<Money<'a, Currency>, CartError> {
        let subtotal = self.subtotal()?;

        match &self.promotion {
            Some(promotion) => Ok(apply_percentage(&subtotal, &promotion.discount())?),
            None => Ok(subtotal),
        }
    }

    /// Number of units across every line.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// The line for `product`, if present.
    pub fn line(&self, product: ProductId) -> Option<&CartLine<'a>> {
        self.lines.iter().find(|line| line.product == product)
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn position(&self, product: ProductId) -> Option<usize> {
        self.lines.iter().position(|line| line.product == product)
    }

    fn line_mut(&mut self, product: ProductId) -> Option<&mut CartLine<'a>> {
        self.lines.iter_mut().find(|line| line.product == product)
    }
}

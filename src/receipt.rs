//! Receipt
//!
//! A priced summary of a cart, as shown on the cart page.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    pricing::{TotalPriceError, line_total},
    products::ProductId,
    promotions::Promotion,
};

/// Errors that can occur when building or printing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error calculating a line or cart total.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Error calculating the discount.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// One priced cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine<'a> {
    /// Product id
    pub product: ProductId,

    /// Title captured when the line was created
    pub title: String,

    /// Units
    pub quantity: u32,

    /// Unit price captured when the line was created
    pub unit_price: Money<'a, Currency>,

    /// `unit_price × quantity`
    pub line_total: Money<'a, Currency>,
}

/// Priced summary of a cart.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    lines: SmallVec<[ReceiptLine<'a>; 8]>,

    /// Total before the promotion
    subtotal: Money<'a, Currency>,

    /// Amount taken off by the promotion
    discount: Money<'a, Currency>,

    /// Amount payable
    total: Money<'a, Currency>,

    /// Active promotion, if any
    promotion: Option<Promotion>,

    /// Currency used for all monetary values
    currency: &'static Currency,
}

impl<'a> Receipt<'a> {
    /// Build a receipt from the cart's lines and active promotion.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if a line total, the subtotal or the discount
    /// cannot be calculated.
    pub fn from_cart(cart: &Cart<'a>) -> Result<Self, ReceiptError> {
        let lines = cart
            .lines()
            .iter()
            .map(|line| {
                Ok(ReceiptLine {
                    product: line.product(),
                    title: line.title().to_string(),
                    quantity: line.quantity(),
                    unit_price: *line.price(),
                    line_total: line_total(line.price(), line.quantity())?,
                })
            })
            .collect::<Result<SmallVec<_>, TotalPriceError>>()?;

        Ok(Self {
            lines,
            subtotal: cart.subtotal()?,
            discount: cart.discount()?,
            total: cart.total()?,
            promotion: cart.promotion().cloned(),
            currency: cart.currency(),
        })
    }

    /// Priced lines in cart order.
    #[must_use]
    pub fn lines(&self) -> &[ReceiptLine<'a>] {
        &self.lines
    }

    /// Total before the promotion
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Amount taken off by the promotion
    #[must_use]
    pub fn discount(&self) -> Money<'a, Currency> {
        self.discount
    }

    /// Amount payable
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// The promotion applied to this receipt.
    #[must_use]
    pub fn promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    /// Currency used for all monetary values.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Prints the receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Unit Price", "Line Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.title.clone(),
                line.quantity.to_string(),
                format!("{}", line.unit_price),
                format!("{}", line.line_total),
            ]);
        }

        let mut table = builder.build();

        table.with(Theme::from(Style::modern_rounded()));
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "\n{table}")?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let discount_label = match &self.promotion {
            Some(promotion) => format!(
                " Discount ({} -{}%):",
                promotion.code(),
                percent_points(promotion.discount())
            ),
            None => " Discount:".to_string(),
        };

        let rows = [
            (" Subtotal:".to_string(), format!("{}", self.subtotal)),
            (discount_label, format!("-{}", self.discount)),
            (" Total:".to_string(), format!("{}", self.total)),
        ];

        let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in &rows {
            writeln!(out, "{label:<label_width$} {value:>value_width$}")?;
        }

        writeln!(out)?;

        Ok(())
    }
}

/// Converts a fractional percentage to percent points for display.
fn percent_points(percentage: Percentage) -> Decimal {
    ((percentage * Decimal::ONE) * Decimal::ONE_HUNDRED)
        .round_dp(2)
        .normalize()
}

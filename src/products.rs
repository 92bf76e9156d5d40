//! Products

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Product identifier, as assigned by the catalog source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product category
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    /// Category id
    pub id: CategoryId,

    /// Display name
    pub name: String,
}

impl Category {
    /// Create a new category.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: CategoryId(id),
            name: name.into(),
        }
    }
}

/// Aggregated customer rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating {
    /// Average score
    pub average: Decimal,

    /// Number of ratings the average was computed over
    pub count: u32,
}

/// Product
///
/// Immutable once fetched; the catalog owns products for the lifetime of a visit.
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product id
    pub id: ProductId,

    /// Product title
    pub title: String,

    /// Product description
    pub description: String,

    /// Product price
    pub price: Money<'a, Currency>,

    /// Product category
    pub category: Category,

    /// Image URLs, primary image first
    pub images: SmallVec<[String; 3]>,

    /// Customer rating, when the source provides one
    pub rating: Option<Rating>,
}

impl<'a> Product<'a> {
    /// Create a product with no description, images or rating.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        price: Money<'a, Currency>,
        category: Category,
    ) -> Self {
        Self {
            id: ProductId(id),
            title: title.into(),
            description: String::new(),
            price,
            category,
            images: SmallVec::new(),
            rating: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append an image URL.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// Set the rating.
    #[must_use]
    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// The primary image, if any.
    pub fn image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

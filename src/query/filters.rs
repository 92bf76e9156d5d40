//! Filter predicates

use crate::{
    products::{CategoryId, Product},
    query::params::PriceRange,
};

/// A single predicate over a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Case-insensitive substring match on title, description or category name.
    ///
    /// The needle is expected to be lowercase already.
    TextContains(String),

    /// Exact category id match.
    CategoryEquals(CategoryId),

    /// Inclusive price range match.
    PriceInRange(PriceRange),
}

impl Filter {
    /// Whether `product` satisfies this predicate.
    pub fn matches(&self, product: &Product<'_>) -> bool {
        match self {
            Filter::TextContains(needle) => [
                product.title.as_str(),
                product.description.as_str(),
                product.category.name.as_str(),
            ]
            .iter()
            .any(|haystack| haystack.to_lowercase().contains(needle.as_str())),
            Filter::CategoryEquals(id) => product.category.id == *id,
            Filter::PriceInRange(range) => range.contains(*product.price.amount()),
        }
    }
}

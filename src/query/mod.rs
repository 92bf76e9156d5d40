//! Catalog Query Engine
//!
//! Derives the visible, ordered subset of a catalog from a set of
//! [`QueryParams`]. Queries never fail: parameters that cannot match
//! anything (for example a price range with `min > max`) produce an empty
//! result.

use std::cmp::Ordering;

use thiserror::Error;
use tracing::debug;

use crate::products::Product;

pub mod filters;
pub mod params;

pub use filters::Filter;
pub use params::{CategorySelector, PriceRange, QueryParams, Sort, SortDirection, SortKey};

/// Errors parsing user-supplied query parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Category selector was neither `all` nor a numeric id.
    #[error("invalid category selector: {0}")]
    InvalidCategory(String),

    /// Unrecognised sort key.
    #[error("invalid sort key: {0}")]
    InvalidSortKey(String),
}

/// Filter and sort `products` according to `params`.
///
/// The input is left untouched. Sorting is stable, so products with equal
/// keys keep their catalog order in both directions.
pub fn run_query<'p, 'a>(products: &'p [Product<'a>], params: &QueryParams) -> Vec<&'p Product<'a>> {
    let filters = params.filters();

    let mut results: Vec<&'p Product<'a>> = products
        .iter()
        .filter(|product| filters.iter().all(|filter| filter.matches(product)))
        .collect();

    if let Some(sort) = params.sort {
        results.sort_by(|left, right| {
            let ordering = compare(sort.key, left, right);

            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    debug!(
        input = products.len(),
        output = results.len(),
        filters = filters.len(),
        "catalog query"
    );

    results
}

fn compare(key: SortKey, left: &Product<'_>, right: &Product<'_>) -> Ordering {
    match key {
        SortKey::Price => left.price.amount().cmp(right.price.amount()),
        SortKey::Title => left
            .title
            .to_lowercase()
            .cmp(&right.title.to_lowercase())
            .then_with(|| left.title.cmp(&right.title)),
    }
}

//! Utils

use clap::Parser;
use rust_decimal::Decimal;

use crate::{
    pagination::Paginator,
    products::ProductId,
    query::{CategorySelector, PriceRange, QueryError, QueryParams, Sort, SortDirection, SortKey},
};

/// Arguments for the catalog example
#[derive(Debug, Parser)]
pub struct ExampleCatalogArgs {
    /// Fixture set to use for the catalog & cart
    #[clap(short, long, default_value = "storefront")]
    pub fixture: String,

    /// Case-insensitive text to search for
    #[clap(short, long, default_value = "")]
    pub search: String,

    /// Category id, or "all"
    #[clap(short, long, default_value = "all")]
    pub category: String,

    /// Minimum price, in major units
    #[clap(long)]
    pub min: Option<Decimal>,

    /// Maximum price, in major units
    #[clap(long)]
    pub max: Option<Decimal>,

    /// Sort key: "price", "title" or "default"
    #[clap(long, default_value = "default")]
    pub sort: String,

    /// Sort descending
    #[clap(long)]
    pub desc: bool,

    /// Page to show (1-based)
    #[clap(short, long, default_value_t = 1)]
    pub page: usize,

    /// Product ids to add to the cart, in order; defaults to the fixture cart
    #[clap(short, long, value_delimiter = ',')]
    pub add: Vec<u64>,

    /// Promotion code to apply, looked up in the config's promotions
    #[clap(long)]
    pub promo: Option<String>,

    /// Storefront config file
    #[clap(long)]
    pub config: Option<String>,
}

impl ExampleCatalogArgs {
    /// Build query params from the command line.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] if the category or sort key cannot be parsed.
    pub fn query_params(&self) -> Result<QueryParams, QueryError> {
        let mut params = QueryParams::default()
            .with_search(self.search.clone())
            .with_category(self.category.parse::<CategorySelector>()?);

        if self.min.is_some() || self.max.is_some() {
            params = params.with_price_range(PriceRange {
                min: self.min,
                max: self.max,
            });
        }

        if let Some(key) = SortKey::parse_optional(&self.sort)? {
            let direction = if self.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };

            params = params.with_sort(Sort { key, direction });
        }

        Ok(params)
    }

    /// Page to show, clamped to the first page.
    pub fn page(&self, paginator: &Paginator, total_items: usize) -> usize {
        self.page.clamp(1, paginator.total_pages(total_items).max(1))
    }

    /// Product ids to put in the cart: `--add` if given, else the fixture cart.
    pub fn cart_items(&self, fixture_items: &[ProductId]) -> Vec<ProductId> {
        if self.add.is_empty() {
            fixture_items.to_vec()
        } else {
            self.add.iter().copied().map(ProductId).collect()
        }
    }
}

//! Query Parameters

use std::str::FromStr;

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::{
    products::CategoryId,
    query::{QueryError, filters::Filter},
};

/// Category selector, where `All` disables category filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategorySelector {
    /// Every category
    #[default]
    All,

    /// A single category
    Only(CategoryId),
}

impl FromStr for CategorySelector {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        trimmed
            .parse::<u64>()
            .map(|id| Self::Only(CategoryId(id)))
            .map_err(|_err| QueryError::InvalidCategory(s.to_string()))
    }
}

/// Inclusive price range in major currency units.
///
/// A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceRange {
    /// Lowest accepted price
    pub min: Option<Decimal>,

    /// Highest accepted price
    pub max: Option<Decimal>,
}

impl PriceRange {
    /// Range bounded on both sides.
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Whether `price` lies within the range.
    pub fn contains(&self, price: Decimal) -> bool {
        self.min.is_none_or(|min| min <= price) && self.max.is_none_or(|max| price <= max)
    }

    /// Whether neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Sortable product attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Sort by price
    Price,

    /// Sort by title
    Title,
}

impl SortKey {
    /// Parse a sort key, where `"default"` and the empty string select no sort.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidSortKey`] for any other unrecognised key.
    pub fn parse_optional(s: &str) -> Result<Option<Self>, QueryError> {
        match s.trim() {
            "" | "default" => Ok(None),
            other => other.parse().map(Some),
        }
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" => Ok(Self::Price),
            "title" => Ok(Self::Title),
            _ => Err(QueryError::InvalidSortKey(s.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Ascending,

    /// Largest first
    Descending,
}

/// Sort key and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    /// Attribute to sort by
    pub key: SortKey,

    /// Direction to sort in
    pub direction: SortDirection,
}

impl Sort {
    /// Ascending sort on `key`.
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on `key`.
    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }
}

/// Parameters for a catalog query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// Free text matched against title, description and category name
    pub search: String,

    /// Category filter
    pub category: CategorySelector,

    /// Price filter
    pub price_range: Option<PriceRange>,

    /// Ordering; `None` keeps catalog order
    pub sort: Option<Sort>,
}

impl QueryParams {
    /// Set the search text.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the category selector.
    #[must_use]
    pub fn with_category(mut self, category: CategorySelector) -> Self {
        self.category = category;
        self
    }

    /// Set the price range.
    #[must_use]
    pub fn with_price_range(mut self, price_range: PriceRange) -> Self {
        self.price_range = Some(price_range);
        self
    }

    /// Set the sort order.
    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Select `key` as the sort key.
    ///
    /// Re-selecting the active ascending key flips it to descending; every
    /// other selection sorts ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = Some(match self.sort {
            Some(Sort {
                key: active,
                direction: SortDirection::Ascending,
            }) if active == key => Sort::descending(key),
            _ => Sort::ascending(key),
        });
    }

    /// Clear every filter and the sort order.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The active filter predicates, in evaluation order.
    pub fn filters(&self) -> SmallVec<[Filter; 3]> {
        let mut filters = SmallVec::new();

        let needle = self.search.trim();
        if !needle.is_empty() {
            filters.push(Filter::TextContains(needle.to_lowercase()));
        }

        if let CategorySelector::Only(id) = self.category {
            filters.push(Filter::CategoryEquals(id));
        }

        if let Some(range) = self.price_range
            && !range.is_unbounded()
        {
            filters.push(Filter::PriceInRange(range));
        }

        filters
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn category_selector_parses_all_and_ids() -> TestResult {
        assert_eq!("all".parse::<CategorySelector>()?, CategorySelector::All);
        assert_eq!("ALL".parse::<CategorySelector>()?, CategorySelector::All);
        assert_eq!("".parse::<CategorySelector>()?, CategorySelector::All);
        assert_eq!(
            " 4 ".parse::<CategorySelector>()?,
            CategorySelector::Only(CategoryId(4))
        );

        Ok(())
    }

    #[test]
    fn category_selector_rejects_names() {
        let result = "shoes".parse::<CategorySelector>();

        assert!(matches!(result, Err(QueryError::InvalidCategory(value)) if value == "shoes"));
    }

    #[test]
    fn sort_key_parses_known_keys() -> TestResult {
        assert_eq!("price".parse::<SortKey>()?, SortKey::Price);
        assert_eq!("Title".parse::<SortKey>()?, SortKey::Title);
        assert_eq!(SortKey::parse_optional("default")?, None);
        assert_eq!(SortKey::parse_optional("")?, None);
        assert!(matches!(
            SortKey::parse_optional("rating"),
            Err(QueryError::InvalidSortKey(_))
        ));

        Ok(())
    }

    #[test]
    fn price_range_is_inclusive() {
        let range = PriceRange::new(Decimal::new(10, 0), Decimal::new(20, 0));

        assert!(range.contains(Decimal::new(10, 0)));
        assert!(range.contains(Decimal::new(20, 0)));
        assert!(!range.contains(Decimal::new(2001, 2)));
        assert!(!range.contains(Decimal::new(999, 2)));
    }

    #[test]
    fn half_open_price_range() {
        let range = PriceRange {
            min: None,
            max: Some(Decimal::new(5, 0)),
        };

        assert!(range.contains(Decimal::ZERO));
        assert!(!range.contains(Decimal::new(6, 0)));
    }

    #[test]
    fn toggle_sort_flips_direction_on_same_key() {
        let mut params = QueryParams::default();

        params.toggle_sort(SortKey::Price);
        assert_eq!(params.sort, Some(Sort::ascending(SortKey::Price)));

        params.toggle_sort(SortKey::Price);
        assert_eq!(params.sort, Some(Sort::descending(SortKey::Price)));

        params.toggle_sort(SortKey::Price);
        assert_eq!(params.sort, Some(Sort::ascending(SortKey::Price)));

        params.toggle_sort(SortKey::Title);
        assert_eq!(params.sort, Some(Sort::ascending(SortKey::Title)));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut params = QueryParams::default()
            .with_search("shirt")
            .with_category(CategorySelector::Only(CategoryId(1)))
            .with_price_range(PriceRange::new(Decimal::ONE, Decimal::TEN))
            .with_sort(Sort::descending(SortKey::Title));

        params.reset();

        assert_eq!(params, QueryParams::default());
    }

    #[test]
    fn filters_skip_inactive_predicates() {
        let params = QueryParams::default()
            .with_search("   ")
            .with_price_range(PriceRange::default());

        assert!(params.filters().is_empty());
    }

    #[test]
    fn filters_normalise_search_text() {
        let params = QueryParams::default()
            .with_search("  Leather ")
            .with_category(CategorySelector::Only(CategoryId(3)));

        let filters = params.filters();

        assert_eq!(filters.len(), 2);
        assert_eq!(
            filters.first(),
            Some(&Filter::TextContains("leather".to_string()))
        );
        assert_eq!(filters.get(1), Some(&Filter::CategoryEquals(CategoryId(3))));
    }
}

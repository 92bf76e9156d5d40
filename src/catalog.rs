//! Catalog
//!
//! The in-memory product list for a session, in source order, indexed by id.

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::{
    products::{Category, Product, ProductId},
    query::{QueryParams, run_query},
};

/// Errors building a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two products share an id.
    #[error("duplicate product id: {0}")]
    DuplicateProduct(ProductId),
}

/// Catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog<'a> {
    products: Vec<Product<'a>>,
    index: FxHashMap<ProductId, usize>,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from products in source order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] if two products share an id.
    pub fn with_products(
        products: impl IntoIterator<Item = Product<'a>>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        products
            .into_iter()
            .try_for_each(|product| catalog.insert(product))?;

        Ok(catalog)
    }

    /// Append a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] if the id is already present.
    pub fn insert(&mut self, product: Product<'a>) -> Result<(), CatalogError> {
        if self.index.contains_key(&product.id) {
            return Err(CatalogError::DuplicateProduct(product.id));
        }

        self.index.insert(product.id, self.products.len());
        self.products.push(product);

        Ok(())
    }

    /// Look up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product<'a>> {
        self.index.get(&id).and_then(|&index| self.products.get(index))
    }

    /// Products in source order.
    pub fn products(&self) -> &[Product<'a>] {
        &self.products
    }

    /// Iterate products in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Product<'a>> {
        self.products.iter()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&Category> {
        let mut seen = FxHashSet::default();

        self.products
            .iter()
            .map(|product| &product.category)
            .filter(|category| seen.insert(category.id))
            .collect()
    }

    /// Up to `limit` other products from the same category, in catalog order.
    pub fn related(&self, id: ProductId, limit: usize) -> Vec<&Product<'a>> {
        let Some(product) = self.get(id) else {
            return Vec::new();
        };

        self.products
            .iter()
            .filter(|candidate| candidate.category.id == product.category.id && candidate.id != id)
            .take(limit)
            .collect()
    }

    /// Run a catalog query.
    pub fn query(&self, params: &QueryParams) -> Vec<&Product<'a>> {
        run_query(&self.products, params)
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::EUR};
    use testresult::TestResult;

    use crate::{
        products::CategoryId,
        query::{CategorySelector, Sort, SortKey},
    };

    use super::*;

    fn product<'a>(id: u64, category: u64) -> Product<'a> {
        let name = if category == 1 { "Clothes" } else { "Shoes" };

        Product::new(
            id,
            format!("Product {id}"),
            Money::from_minor(i64::try_from(id).unwrap_or_default() * 10_00, EUR),
            Category::new(category, name),
        )
    }

    fn catalog<'a>() -> Result<Catalog<'a>, CatalogError> {
        Catalog::with_products([
            product(1, 1),
            product(2, 2),
            product(3, 1),
            product(4, 1),
            product(5, 1),
            product(6, 1),
            product(7, 1),
        ])
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = Catalog::with_products([product(1, 1), product(1, 2)]);

        assert_eq!(
            result.map(|catalog| catalog.len()),
            Err(CatalogError::DuplicateProduct(ProductId(1)))
        );
    }

    #[test]
    fn get_finds_by_id() -> TestResult {
        let catalog = catalog()?;

        assert_eq!(
            catalog.get(ProductId(3)).map(|product| product.title.as_str()),
            Some("Product 3")
        );
        assert!(catalog.get(ProductId(42)).is_none());

        Ok(())
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() -> TestResult {
        let catalog = catalog()?;

        let ids: Vec<CategoryId> = catalog.categories().iter().map(|c| c.id).collect();

        assert_eq!(ids, vec![CategoryId(1), CategoryId(2)]);

        Ok(())
    }

    #[test]
    fn related_excludes_self_and_respects_limit() -> TestResult {
        let catalog = catalog()?;

        let related: Vec<u64> = catalog
            .related(ProductId(3), 4)
            .iter()
            .map(|product| product.id.0)
            .collect();

        assert_eq!(related, vec![1, 4, 5, 6]);

        Ok(())
    }

    #[test]
    fn related_for_unknown_product_is_empty() -> TestResult {
        let catalog = catalog()?;

        assert!(catalog.related(ProductId(99), 4).is_empty());
        assert!(catalog.related(ProductId(2), 4).is_empty());

        Ok(())
    }

    #[test]
    fn query_delegates_to_engine() -> TestResult {
        let catalog = catalog()?;
        let params = QueryParams::default()
            .with_category(CategorySelector::Only(CategoryId(1)))
            .with_sort(Sort::descending(SortKey::Price));

        let ids: Vec<u64> = catalog.query(&params).iter().map(|p| p.id.0).collect();

        assert_eq!(ids, vec![7, 6, 5, 4, 3, 1]);

        Ok(())
    }
}

//! Favorites

use tracing::debug;

use crate::products::{Product, ProductId};

/// Favorited products, unique by id, in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct Favorites<'a> {
    entries: Vec<Product<'a>>,
}

impl<'a> Favorites<'a> {
    /// Create an empty favorites list.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add `product`; returns `false` if it was already a favorite.
    pub fn add(&mut self, product: &Product<'a>) -> bool {
        if self.contains(product.id) {
            return false;
        }

        self.entries.push(product.clone());
        debug!(product = %product.id, "added to favorites");

        true
    }

    /// Remove a favorite, returning it if it was present.
    pub fn remove(&mut self, product: ProductId) -> Option<Product<'a>> {
        let index = self.entries.iter().position(|entry| entry.id == product)?;

        debug!(%product, "removed from favorites");

        Some(self.entries.remove(index))
    }

    /// Flip the favorite state of `product`, returning whether it is now a favorite.
    pub fn toggle(&mut self, product: &Product<'a>) -> bool {
        if self.remove(product.id).is_some() {
            false
        } else {
            self.add(product)
        }
    }

    /// Whether `product` is a favorite.
    pub fn contains(&self, product: ProductId) -> bool {
        self.entries.iter().any(|entry| entry.id == product)
    }

    /// The favorite with this id.
    pub fn get(&self, product: ProductId) -> Option<&Product<'a>> {
        self.entries.iter().find(|entry| entry.id == product)
    }

    /// Iterate favorites in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Product<'a>> {
        self.entries.iter()
    }

    /// Number of favorites.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no favorites.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

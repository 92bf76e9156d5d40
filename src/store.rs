//! Store
//!
//! The single source of truth for cart and favorites state. Views hold a
//! [`SharedStore`] handle rather than their own copies, and subscribe a
//! [`StoreObserver`] to hear about every successful mutation.

use std::{cell::RefCell, fmt, rc::Rc};

use rusty_money::iso::Currency;
use slotmap::{SlotMap, new_key_type};
use tracing::{instrument, warn};

use crate::{
    cart::{Cart, CartError},
    favorites::Favorites,
    products::{Product, ProductId},
    promotions::{Promotion, PromotionCatalog},
};

new_key_type! {
    /// Observer Key
    pub struct ObserverKey;
}

/// Shared handle to a store, for single-threaded views.
pub type SharedStore<'a> = Rc<RefCell<Store<'a>>>;

/// Which part of the store changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    /// Cart lines changed
    Cart,

    /// Favorites changed
    Favorites,

    /// Active promotion changed
    Promotion,
}

/// Derived view of the store after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    /// Units in the cart (the cart badge)
    pub cart_count: u64,

    /// Distinct lines in the cart
    pub cart_lines: usize,

    /// Favorites (the favorites badge)
    pub favorites_count: usize,

    /// Cart subtotal in minor units, `None` if it overflows
    pub subtotal_minor: Option<i64>,

    /// Cart total after promotion in minor units, `None` if it overflows
    pub total_minor: Option<i64>,

    /// Active promotion code
    pub promotion: Option<String>,
}

/// Receives store changes.
///
/// Called synchronously after each successful mutation. Rejected operations
/// notify nobody.
pub trait StoreObserver {
    /// Called once per mutation with the post-mutation snapshot.
    fn on_change(&mut self, change: StoreChange, snapshot: &StoreSnapshot);
}

/// Observer that ignores every change.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StoreObserver for NoopObserver {
    fn on_change(&mut self, _change: StoreChange, _snapshot: &StoreSnapshot) {}
}

/// Cart, favorites and promotion state.
pub struct Store<'a> {
    cart: Cart<'a>,
    favorites: Favorites<'a>,
    promotions: PromotionCatalog,
    observers: SlotMap<ObserverKey, Box<dyn StoreObserver>>,
}

impl fmt::Debug for Store<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("cart", &self.cart)
            .field("favorites", &self.favorites)
            .field("promotions", &self.promotions)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<'a> Store<'a> {
    /// Create an empty store pricing its cart in `currency`.
    pub fn new(currency: &'static Currency, promotions: PromotionCatalog) -> Self {
        Self {
            cart: Cart::new(currency),
            favorites: Favorites::new(),
            promotions,
            observers: SlotMap::with_key(),
        }
    }

    /// Wrap the store in a shared handle.
    pub fn into_shared(self) -> SharedStore<'a> {
        Rc::new(RefCell::new(self))
    }

    /// Register an observer.
    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) -> ObserverKey {
        self.observers.insert(observer)
    }

    /// Deregister an observer, returning whether it was registered.
    pub fn unsubscribe(&mut self, key: ObserverKey) -> bool {
        self.observers.remove(key).is_some()
    }

    /// Add one unit of `product` to the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the product cannot be added; nothing is notified.
    #[instrument(level = "debug", skip_all, fields(product = %product.id))]
    pub fn add_to_cart(&mut self, product: &Product<'a>) -> Result<u32, CartError> {
        let quantity = self.cart.add(product)?;

        self.notify(StoreChange::Cart);

        Ok(quantity)
    }

    /// Set a cart line's quantity; zero removes it.
    #[instrument(level = "debug", skip(self))]
    pub fn set_quantity(&mut self, product: ProductId, quantity: u32) -> bool {
        let changed = self.cart.set_quantity(product, quantity);

        if changed {
            self.notify(StoreChange::Cart);
        }

        changed
    }

    /// Remove a cart line; a no-op if absent.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_from_cart(&mut self, product: ProductId) -> bool {
        let removed = self.cart.remove(product).is_some();

        if removed {
            self.notify(StoreChange::Cart);
        }

        removed
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        if self.cart.is_empty() {
            return;
        }

        self.cart.clear();
        self.notify(StoreChange::Cart);
    }

    /// Activate a promotion code, replacing any active one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Promotion`] for an unknown code; state is unchanged
    /// and nothing is notified.
    #[instrument(level = "debug", skip(self))]
    pub fn apply_promotion(&mut self, code: &str) -> Result<Promotion, CartError> {
        let promotion = match self.cart.apply_promotion(code, &self.promotions) {
            Ok(promotion) => promotion.clone(),
            Err(error) => {
                warn!(%error, "promotion rejected");
                return Err(error.into());
            }
        };

        self.notify(StoreChange::Promotion);

        Ok(promotion)
    }

    /// Deactivate the current promotion.
    pub fn remove_promotion(&mut self) -> Option<Promotion> {
        let removed = self.cart.remove_promotion();

        if removed.is_some() {
            self.notify(StoreChange::Promotion);
        }

        removed
    }

    /// Add `product` to favorites; returns `false` if it already was one.
    pub fn add_favorite(&mut self, product: &Product<'a>) -> bool {
        let added = self.favorites.add(product);

        if added {
            self.notify(StoreChange::Favorites);
        }

        added
    }

    /// Remove a favorite; a no-op if absent.
    pub fn remove_favorite(&mut self, product: ProductId) -> bool {
        let removed = self.favorites.remove(product).is_some();

        if removed {
            self.notify(StoreChange::Favorites);
        }

        removed
    }

    /// Flip the favorite state of `product`, returning whether it is now a favorite.
    pub fn toggle_favorite(&mut self, product: &Product<'a>) -> bool {
        let favorite = self.favorites.toggle(product);

        self.notify(StoreChange::Favorites);

        favorite
    }

    /// Whether `product` is a favorite.
    pub fn is_favorite(&self, product: ProductId) -> bool {
        self.favorites.contains(product)
    }

    /// Add a favorited product to the cart. The favorite is kept.
    ///
    /// Returns the new line quantity, or `None` when `product` is not a favorite.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the product cannot be added.
    pub fn add_favorite_to_cart(&mut self, product: ProductId) -> Result<Option<u32>, CartError> {
        let Some(favorite) = self.favorites.get(product).cloned() else {
            return Ok(None);
        };

        self.add_to_cart(&favorite).map(Some)
    }

    /// Current derived view of the store.
    ///
    /// Totals that overflow are reported as `None`; the badge counts are always set.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            cart_count: self.cart.item_count(),
            cart_lines: self.cart.len(),
            favorites_count: self.favorites.len(),
            subtotal_minor: self.cart.subtotal().ok().map(|money| money.to_minor_units()),
            total_minor: self.cart.total().ok().map(|money| money.to_minor_units()),
            promotion: self
                .cart
                .promotion()
                .map(|promotion| promotion.code().to_string()),
        }
    }

    /// The cart.
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// The favorites.
    pub fn favorites(&self) -> &Favorites<'a> {
        &self.favorites
    }

    /// The registered promotion codes.
    pub fn promotions(&self) -> &PromotionCatalog {
        &self.promotions
    }

    fn notify(&mut self, change: StoreChange) {
        if self.observers.is_empty() {
            return;
        }

        let snapshot = self.snapshot();

        for observer in self.observers.values_mut() {
            observer.on_change(change, &snapshot);
        }
    }
}

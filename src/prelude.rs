//! Boutique prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    api::{ApiError, decode_catalog, decode_categories, decode_product},
    cart::{Cart, CartError, CartLine},
    catalog::{Catalog, CatalogError},
    config::{ConfigError, StorefrontConfig},
    discounts::DiscountError,
    favorites::Favorites,
    fixtures::{Fixture, FixtureError},
    pagination::{Page, PageLink, Paginator, page_window},
    pricing::TotalPriceError,
    products::{Category, CategoryId, Product, ProductId, Rating},
    promotions::{Promotion, PromotionCatalog, PromotionCode, PromotionError},
    query::{
        CategorySelector, PriceRange, QueryError, QueryParams, Sort, SortDirection, SortKey,
        run_query,
    },
    receipt::{Receipt, ReceiptError, ReceiptLine},
    store::{
        NoopObserver, ObserverKey, SharedStore, Store, StoreChange, StoreObserver, StoreSnapshot,
    },
};

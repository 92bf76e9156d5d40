//! Boutique
//!
//! Boutique is the client-side state engine of a small storefront: catalog
//! querying and pagination, a cart with promotion codes, favorites, and an
//! observable store that keeps every view in sync.

pub mod api;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod discounts;
pub mod favorites;
pub mod fixtures;
pub mod pagination;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod promotions;
pub mod query;
pub mod receipt;
pub mod store;
pub mod utils;

//! Cart Fixtures

use serde::Deserialize;

use crate::products::ProductId;

/// Wrapper for a cart in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Product ids, one entry per unit added, in order
    #[serde(default)]
    pub items: Vec<ProductId>,
}

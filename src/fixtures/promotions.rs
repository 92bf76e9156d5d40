//! Promotion Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Wrapper for promotion codes in YAML
#[derive(Debug, Deserialize)]
pub struct PromotionsFixture {
    /// Map of promotion code -> discount ("15%" or "0.15")
    pub promotions: FxHashMap<String, String>,
}

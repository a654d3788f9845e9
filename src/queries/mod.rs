//! Read-side projections over [`AppData`]. Nothing here mutates state and
//! nothing is cached: every call recomputes from the current data.

use crate::models::AppData;

pub mod inventory_queries;
pub mod product_queries;

pub use inventory_queries::{ConsolidatedStockQuery, StaleStockQuery, StockViewRow};
pub use product_queries::{ProductCatalogQuery, ProductOption};

pub trait Query {
    type Result;

    fn execute(&self, data: &AppData) -> Self::Result;
}

/// Case-insensitive substring match; a blank needle matches everything.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

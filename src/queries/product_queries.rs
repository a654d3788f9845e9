use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Query;
use crate::{models::AppData, numeric::NumberLocale};

/// Catalog entry prepared for a selection widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOption {
    pub id: Uuid,
    pub name: String,
    pub unit: String,
    pub price: Decimal,
    pub label: String,
}

/// The whole catalog ordered by name, ignoring case.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalogQuery {
    pub locale: NumberLocale,
    pub currency_symbol: String,
}

impl Query for ProductCatalogQuery {
    type Result = Vec<ProductOption>;

    fn execute(&self, data: &AppData) -> Self::Result {
        let mut options: Vec<ProductOption> = data
            .products
            .iter()
            .map(|p| ProductOption {
                id: p.id,
                name: p.name.clone(),
                unit: p.unit.clone(),
                price: p.price,
                label: format!(
                    "{} ({}) - {}{}",
                    p.name,
                    p.unit,
                    self.currency_symbol,
                    self.locale.format_price(p.price)
                ),
            })
            .collect();
        options.sort_by_cached_key(|o| o.name.to_lowercase());
        options
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{contains_ignore_case, Query};
use crate::{
    models::{AppData, StockRow},
    numeric::NumberLocale,
};

/// One line of the consolidated stock table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockViewRow {
    pub product_id: Uuid,
    pub product_name: String,
    pub depot: String,
    pub quantity: Decimal,
    pub quantity_display: String,
    pub unit: String,
    pub price: Decimal,
    pub price_display: String,
}

/// Every product crossed with every current depot, zero-quantity pairs
/// included, optionally narrowed by a product-name search.
#[derive(Debug, Clone, Default)]
pub struct ConsolidatedStockQuery {
    pub search: Option<String>,
    pub locale: NumberLocale,
}

impl ConsolidatedStockQuery {
    pub fn new(locale: NumberLocale) -> Self {
        Self {
            search: None,
            locale,
        }
    }

    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = search.map(str::to_string);
        self
    }
}

impl Query for ConsolidatedStockQuery {
    type Result = Vec<StockViewRow>;

    fn execute(&self, data: &AppData) -> Self::Result {
        let search = self.search.as_deref().unwrap_or_default();
        data.products
            .iter()
            .filter(|product| contains_ignore_case(&product.name, search))
            .flat_map(|product| {
                data.depots.iter().map(move |depot| {
                    let quantity = data.quantity(depot, product.id);
                    StockViewRow {
                        product_id: product.id,
                        product_name: product.name.clone(),
                        depot: depot.clone(),
                        quantity,
                        quantity_display: self.locale.format_quantity(quantity, &product.unit),
                        unit: product.unit.clone(),
                        price: product.price,
                        price_display: self.locale.format_price(product.price),
                    }
                })
            })
            .collect()
    }
}

/// Stock rows recorded under a depot name that is no longer one of the
/// current depots, typically left behind by a rename.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaleStockQuery;

impl Query for StaleStockQuery {
    type Result = Vec<StockRow>;

    fn execute(&self, data: &AppData) -> Self::Result {
        data.stock
            .iter()
            .filter(|row| !data.has_depot(&row.depot))
            .cloned()
            .collect()
    }
}

//! In-memory application state and the records it is made of.

pub mod depot;
pub mod normalize;
pub mod product;
pub mod serde_helpers;
pub mod stock;
pub mod unit;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use depot::{default_depot_name, DEPOT_COUNT};
pub use normalize::normalize;
pub use product::Product;
pub use stock::{MovementDirection, StockRow};
pub use unit::{KnownUnit, DEFAULT_UNIT};

use serde_helpers::{null_as_default, nullable_strings};

/// Everything the tracker knows: the depot names, the catalog and the
/// quantity ledger. Persisted as a single document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppData {
    #[serde(default, deserialize_with = "nullable_strings")]
    pub depots: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<Product>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock: Vec<StockRow>,
}

impl AppData {
    /// State used on first start and whenever the data file cannot be read.
    pub fn seed() -> Self {
        Self {
            depots: depot::seed_depots(),
            products: Vec::new(),
            stock: Vec::new(),
        }
    }

    pub fn normalized(self) -> Self {
        normalize(self)
    }

    pub fn product(&self, id: Uuid) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn has_depot(&self, name: &str) -> bool {
        self.depots.iter().any(|d| d == name)
    }

    pub fn stock_row(&self, depot: &str, product_id: Uuid) -> Option<&StockRow> {
        self.stock.iter().find(|row| row.is_for(depot, product_id))
    }

    /// Current quantity for the pair; zero when no row exists yet.
    pub fn quantity(&self, depot: &str, product_id: Uuid) -> Decimal {
        self.stock_row(depot, product_id)
            .map(|row| row.qty)
            .unwrap_or(Decimal::ZERO)
    }
}

impl Default for AppData {
    fn default() -> Self {
        Self::seed()
    }
}

/// Case-insensitive comparison used for duplicate detection and search.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

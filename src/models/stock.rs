use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use super::serde_helpers::{decimal_number, null_as_default};

/// Quantity of one product held at one depot. At most one row exists per
/// (depot, product) pair; the depot is referenced by its display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StockRow {
    #[serde(default, deserialize_with = "null_as_default")]
    pub depot: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_id: Uuid,
    #[serde(default, with = "decimal_number")]
    pub qty: Decimal,
}

impl StockRow {
    pub fn empty(depot: impl Into<String>, product_id: Uuid) -> Self {
        Self {
            depot: depot.into(),
            product_id,
            qty: Decimal::ZERO,
        }
    }

    pub fn is_for(&self, depot: &str, product_id: Uuid) -> bool {
        self.product_id == product_id && self.depot == depot
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum MovementDirection {
    #[strum(to_string = "inbound", serialize = "in")]
    Inbound,
    #[strum(to_string = "outbound", serialize = "out")]
    Outbound,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn direction_parses_short_forms() {
        assert_eq!(MovementDirection::from_str("in").unwrap(), MovementDirection::Inbound);
        assert_eq!(MovementDirection::from_str("OUT").unwrap(), MovementDirection::Outbound);
        assert_eq!(MovementDirection::Inbound.to_string(), "inbound");
    }

    #[test]
    fn row_matches_exact_depot_name() {
        let id = Uuid::new_v4();
        let row = StockRow::empty("North", id);
        assert!(row.is_for("North", id));
        assert!(!row.is_for("north", id));
        assert!(!row.is_for("North", Uuid::new_v4()));
    }
}

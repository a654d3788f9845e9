use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::serde_helpers::{decimal_number, id_or_new, null_as_default};
use super::{eq_ignore_case, unit::DEFAULT_UNIT};

/// Catalog entry. The id is generated once and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    #[serde(default = "Uuid::new_v4", deserialize_with = "id_or_new")]
    pub id: Uuid,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default = "default_unit", deserialize_with = "null_as_default")]
    pub unit: String,
    #[serde(default, with = "decimal_number")]
    pub price: Decimal,
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

impl Product {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            unit: unit.into(),
            price,
        }
    }

    /// Two products describe the same item when name and unit match, ignoring case.
    pub fn is_same_item(&self, name: &str, unit: &str) -> bool {
        eq_ignore_case(&self.name, name) && eq_ignore_case(&self.unit, unit)
    }
}

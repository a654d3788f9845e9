//! Field-presence defaults for the persisted document.
//!
//! A hand-edited or older data file may carry `null` where a value is
//! expected. These helpers turn such values into the field's default so that
//! normalization always receives a complete structure.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serializer};
use uuid::Uuid;

pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// List of strings where individual `null` entries become empty strings.
pub fn nullable_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<Option<String>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries.into_iter().map(Option::unwrap_or_default).collect())
}

pub fn id_or_new<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Uuid>::deserialize(deserializer)?.unwrap_or_else(Uuid::new_v4))
}

/// Decimals are stored as JSON numbers carrying every digit; `null` reads as zero.
pub mod decimal_number {
    use super::*;

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::arbitrary_precision::serialize(value, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = rust_decimal::serde::arbitrary_precision_option::deserialize(deserializer)?;
        Ok(value.unwrap_or_default())
    }
}

//! JSON encoding of [`AppData`].
//!
//! Field names are matched case-insensitively on read: keys are rewritten to
//! their canonical spelling before deserialization, unknown keys are left
//! alone and ignored.

use serde_json::{Map, Value};

use crate::models::AppData;

const FIELD_NAMES: [&str; 10] = [
    "Depots", "Products", "Stock", "Id", "Name", "Unit", "Price", "Depot", "ProductId", "Qty",
];

pub fn decode(text: &str) -> Result<AppData, serde_json::Error> {
    let value: Value = serde_json::from_str(text)?;
    serde_json::from_value(canonicalize_keys(value))
}

pub fn encode(data: &AppData) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}

fn canonicalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (canonical_name(key), canonicalize_keys(value)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize_keys).collect()),
        other => other,
    }
}

fn canonical_name(key: String) -> String {
    FIELD_NAMES
        .iter()
        .find(|name| name.eq_ignore_ascii_case(&key))
        .map(|name| name.to_string())
        .unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_UNIT;
    use rust_decimal_macros::dec;

    #[test]
    fn keys_match_regardless_of_case() {
        let text = r#"{
            "depots": ["A", "B", "C"],
            "PRODUCTS": [{"id": "6f1c2a4e-8d7b-4a53-9a43-2f5a0d9c1b11", "name": "Bolt", "UNIT": "unit-count", "price": 2.5}],
            "stock": [{"DEPOT": "A", "productid": "6f1c2a4e-8d7b-4a53-9a43-2f5a0d9c1b11", "qty": 10}]
        }"#;
        let data = decode(text).unwrap();
        assert_eq!(data.depots, vec!["A", "B", "C"]);
        assert_eq!(data.products[0].name, "Bolt");
        assert_eq!(data.products[0].price, dec!(2.5));
        assert_eq!(data.stock[0].qty, dec!(10));
        assert_eq!(data.stock[0].product_id, data.products[0].id);
    }

    #[test]
    fn missing_and_null_fields_take_defaults() {
        let text = r#"{"Depots": null, "Products": [{"Name": null, "Price": null}], "Extra": 1}"#;
        let data = decode(text).unwrap();
        assert!(data.depots.is_empty());
        assert!(data.stock.is_empty());
        assert_eq!(data.products[0].name, "");
        assert_eq!(data.products[0].price, dec!(0));
        assert!(!data.products[0].id.is_nil());

        let data = data.normalized();
        assert_eq!(data.depots.len(), 3);
        assert_eq!(data.products[0].unit, DEFAULT_UNIT);
    }

    #[test]
    fn null_depot_entries_become_blank() {
        let data = decode(r#"{"Depots": ["A", null, "C"]}"#).unwrap();
        assert_eq!(data.depots, vec!["A", "", "C"]);
        assert_eq!(data.normalized().depots, vec!["A", "Depot 2", "C"]);
    }

    #[test]
    fn encoded_document_uses_canonical_names() {
        let text = encode(&AppData::seed()).unwrap();
        assert!(text.contains("\"Depots\""));
        assert!(text.contains("\"Products\""));
        assert!(text.contains("\"Stock\""));
        assert!(text.contains('\n'));
    }

    #[test]
    fn malformed_documents_fail_to_decode() {
        assert!(decode("{ not json").is_err());
        assert!(decode("null").is_err());
        assert!(decode(r#"{"Stock": [{"ProductId": "not-a-uuid"}]}"#).is_err());
    }
}

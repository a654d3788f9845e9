mod common;

use std::fs;

use assert_matches::assert_matches;
use common::{file_service, temp_data_file, TestApp};
use depot_stock::{
    models::DEFAULT_UNIT, AppData, JsonFileRepository, MovementDirection, ServiceError,
    StateRepository,
};
use rust_decimal_macros::dec;
use serde_json::Value;

#[test]
fn missing_file_loads_seed_state() {
    let (_dir, path) = temp_data_file();
    let data = JsonFileRepository::new(&path).load();
    assert_eq!(data, AppData::seed());
    assert_eq!(data.depots, vec!["Depot 1", "Depot 2", "Depot 3"]);
    assert!(data.products.is_empty());
    assert!(data.stock.is_empty());
    assert!(!path.exists());
}

#[test]
fn corrupt_file_loads_seed_state() {
    let (_dir, path) = temp_data_file();
    fs::write(&path, "{ this is not json").unwrap();
    assert_eq!(JsonFileRepository::new(&path).load(), AppData::seed());

    fs::write(&path, "").unwrap();
    assert_eq!(JsonFileRepository::new(&path).load(), AppData::seed());
}

#[test]
fn state_round_trips_through_the_data_file() {
    let (_dir, path) = temp_data_file();
    let (bolt, cable) = {
        let mut service = file_service(&path);
        service.rename_depots(["Ankara", "Izmir", "Bursa"]).unwrap();
        let bolt = service.add_product("Bolt", "", "2,25").unwrap().product;
        let cable = service.add_product("Cable", "metre", "12").unwrap().product;
        service
            .move_stock("Izmir", cable.id, MovementDirection::Inbound, "7,125")
            .unwrap();
        (bolt, cable)
    };

    let reopened = file_service(&path);
    assert_eq!(reopened.depot_list(), ["Ankara", "Izmir", "Bursa"]);
    assert_eq!(reopened.data().products.len(), 2);
    assert_eq!(reopened.data().product(bolt.id).unwrap().price, dec!(2.25));
    assert_eq!(reopened.quantity("Izmir", cable.id), dec!(7.125));

    let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(json["Depots"].is_array());
    assert!(json["Products"][0]["Price"].is_number());
    assert!(json["Stock"][0]["Qty"].is_number());
    assert_eq!(json["Stock"][0]["ProductId"], cable.id.to_string());
}

#[test]
fn long_decimals_keep_every_digit_across_a_reload() {
    let (_dir, path) = temp_data_file();
    let id = {
        let mut service = file_service(&path);
        let id = service
            .add_product("Cable", "metre", "98765432109,87654321")
            .unwrap()
            .product
            .id;
        service
            .move_stock("Depot 1", id, MovementDirection::Inbound, "1234567890123,4567")
            .unwrap();
        id
    };

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("1234567890123.4567"));
    assert!(text.contains("98765432109.87654321"));

    let reopened = file_service(&path);
    assert_eq!(reopened.quantity("Depot 1", id), dec!(1234567890123.4567));
    assert_eq!(
        reopened.data().product(id).unwrap().price,
        dec!(98765432109.87654321)
    );
}

#[test]
fn failed_save_surfaces_a_persistence_error_and_keeps_the_service_usable() {
    let dir = tempfile::tempdir().unwrap();
    // The data file path is a directory, so every write fails.
    let path = dir.path().to_path_buf();
    let mut service = file_service(&path);

    let err = service.add_product("Bolt", "", "1").unwrap_err();
    assert_matches!(err, ServiceError::PersistenceError(_));
    assert!(!err.is_user_error());

    // The in-memory state still holds the change and accepts further work.
    let catalog = service.product_catalog();
    assert_eq!(catalog.len(), 1);
    let id = catalog[0].id;
    assert_matches!(
        service.move_stock("Depot 1", id, MovementDirection::Inbound, "3"),
        Err(ServiceError::PersistenceError(_))
    );
    assert_eq!(service.quantity("Depot 1", id), dec!(3));
    assert_eq!(service.consolidated_view(None).len(), 3);
}

#[test]
fn parent_directory_is_created_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("store").join("data.json");
    let mut service = file_service(&path);
    service.add_product("Bolt", "", "1").unwrap();
    assert!(path.exists());
}

#[test]
fn field_names_are_matched_case_insensitively() {
    let document = r#"{
        "depots": ["North", "  ", null, "Extra"],
        "PRODUCTS": [
            {"id": "0b6f3c4e-4c55-4c6b-9a57-2f1f7d5c9d10", "NAME": "  Bolt ", "unit": null, "price": 2.5},
            {"Name": "Cable", "Unit": "metre"}
        ],
        "stock": [
            {"depot": "North", "productid": "0b6f3c4e-4c55-4c6b-9a57-2f1f7d5c9d10", "qty": 4},
            {"Depot": "North", "ProductId": "5d7e8a4b-1111-4222-8333-944455556666", "Qty": 9},
            {"Depot": " ", "ProductId": "0b6f3c4e-4c55-4c6b-9a57-2f1f7d5c9d10", "Qty": 1}
        ],
        "Unknown": true
    }"#;
    let app = TestApp::from_document(document);
    let data = app.service.data();

    assert_eq!(data.depots, vec!["North", "Depot 2", "Depot 3"]);
    assert_eq!(data.products.len(), 2);
    assert_eq!(data.products[0].name, "Bolt");
    assert_eq!(data.products[0].unit, DEFAULT_UNIT);
    assert_eq!(data.products[1].price, dec!(0));
    assert!(!data.products[1].id.is_nil());

    assert_eq!(data.stock.len(), 1);
    assert_eq!(data.stock[0].qty, dec!(4));
}

#[test]
fn null_collections_default_to_empty() {
    let app = TestApp::from_document(r#"{"Depots": null, "Products": null, "Stock": null}"#);
    assert_eq!(app.service.data(), &AppData::seed());
}

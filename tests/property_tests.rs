//! Property-based tests for the inventory data layer.
//!
//! These tests use proptest to verify invariants across a wide range of inputs,
//! helping to catch edge cases that unit tests might miss.

mod common;

use common::TestApp;
use depot_stock::{
    models::{normalize, Product, StockRow, DEFAULT_UNIT},
    AppData, MovementDirection, NumberLocale,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

// Strategies for generating test data
fn depot_names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof!["[A-Za-z]{1,8}", "\\s{0,3}", " [A-Z][a-z]{2,6} "],
        0..6,
    )
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000, 0u32..3).prop_map(|(units, scale)| Decimal::new(units, scale))
}

fn movement_strategy() -> impl Strategy<Value = (usize, usize, bool, Decimal)> {
    (0usize..3, 0usize..2, any::<bool>(), amount_strategy())
}

fn state_strategy() -> impl Strategy<Value = AppData> {
    (
        depot_names_strategy(),
        prop::collection::vec(("\\s?[a-z]{0,6}\\s?", prop_oneof!["", "metre", " unit-count "]), 0..4),
        prop::collection::vec((0usize..6, "[A-Za-z ]{0,4}", 0i64..1000), 0..8),
    )
        .prop_map(|(depots, products, rows)| {
            let products: Vec<Product> = products
                .into_iter()
                .map(|(name, unit)| Product::new(name, unit, Decimal::ONE))
                .collect();
            let stock = rows
                .into_iter()
                .map(|(index, depot, qty)| StockRow {
                    depot,
                    // Indexes past the catalog produce rows for unknown products.
                    product_id: products
                        .get(index)
                        .map(|p| p.id)
                        .unwrap_or_else(uuid::Uuid::new_v4),
                    qty: Decimal::from(qty),
                })
                .collect();
            AppData {
                depots,
                products,
                stock,
            }
        })
}

// Property: normalization repairs any state and is idempotent
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn normalize_is_idempotent(state in state_strategy()) {
        let once = normalize(state);
        let twice = normalize(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalize_yields_three_non_blank_depots(depots in depot_names_strategy()) {
        let data = normalize(AppData { depots, ..AppData::seed() });
        prop_assert_eq!(data.depots.len(), 3);
        for depot in &data.depots {
            prop_assert!(!depot.trim().is_empty());
            prop_assert_eq!(depot.trim(), depot.as_str());
        }
    }

    #[test]
    fn normalize_keeps_only_rows_of_known_products(state in state_strategy()) {
        let data = normalize(state);
        for row in &data.stock {
            prop_assert!(data.product(row.product_id).is_some());
            prop_assert!(!row.depot.trim().is_empty());
        }
        for product in &data.products {
            prop_assert!(!product.unit.is_empty());
            prop_assert_eq!(product.name.trim(), product.name.as_str());
        }
    }
}

// Property: movements never drive a quantity below zero
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn quantities_stay_non_negative(movements in prop::collection::vec(movement_strategy(), 1..40)) {
        let mut app = TestApp::with_locale(NumberLocale::INVARIANT);
        let ids = [
            app.service.add_product("Bolt", DEFAULT_UNIT, "1").unwrap().product.id,
            app.service.add_product("Cable", "metre", "1").unwrap().product.id,
        ];
        let depots: Vec<String> = app.service.depot_list().to_vec();

        for (depot, product, inbound, amount) in movements {
            let depot = &depots[depot];
            let id = ids[product];
            let before = app.service.quantity(depot, id);
            let direction = if inbound {
                MovementDirection::Inbound
            } else {
                MovementDirection::Outbound
            };

            let result = app.service.move_stock(depot, id, direction, &amount.to_string());
            let after = app.service.quantity(depot, id);

            match direction {
                MovementDirection::Inbound => prop_assert_eq!(after, before + amount),
                MovementDirection::Outbound if amount > before => {
                    prop_assert!(result.is_err());
                    prop_assert_eq!(after, before);
                }
                MovementDirection::Outbound => prop_assert_eq!(after, before - amount),
            }
            prop_assert!(app.service.data().stock.iter().all(|row| row.qty >= Decimal::ZERO));
        }
    }

    #[test]
    fn delete_removes_every_row_of_the_product(
        movements in prop::collection::vec(movement_strategy(), 0..20),
        victim in 0usize..2,
    ) {
        let mut app = TestApp::with_locale(NumberLocale::INVARIANT);
        let ids = [
            app.service.add_product("Bolt", DEFAULT_UNIT, "1").unwrap().product.id,
            app.service.add_product("Cable", "metre", "1").unwrap().product.id,
        ];
        let depots: Vec<String> = app.service.depot_list().to_vec();
        for (depot, product, _, amount) in movements {
            app.service
                .move_stock(&depots[depot], ids[product], MovementDirection::Inbound, &amount.to_string())
                .unwrap();
        }

        app.service.delete_product(ids[victim]).unwrap();
        prop_assert!(app.service.data().stock.iter().all(|row| row.product_id != ids[victim]));
        prop_assert!(app.reopen().data().stock.iter().all(|row| row.product_id != ids[victim]));
        prop_assert_eq!(app.service.consolidated_view(None).len(), 3);
    }
}

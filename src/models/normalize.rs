//! State-repair pass run after every load and before every save.
//!
//! The pass never fails: whatever shape the loaded document had, the result
//! has exactly [`DEPOT_COUNT`] non-blank depot names, trimmed product names,
//! non-blank units and no stock row pointing at a missing product or a blank
//! depot. Applying it twice yields the same state as applying it once.
//!
//! Stock rows are not checked against the current depot names, so rows left
//! behind by a depot rename survive.

use std::collections::HashSet;

use super::depot::{default_depot_name, DEPOT_COUNT};
use super::unit::normalize_unit;
use super::AppData;

pub fn normalize(mut data: AppData) -> AppData {
    data.depots.truncate(DEPOT_COUNT);
    while data.depots.len() < DEPOT_COUNT {
        data.depots.push(default_depot_name(data.depots.len()));
    }
    for (index, depot) in data.depots.iter_mut().enumerate() {
        let trimmed = depot.trim();
        *depot = if trimmed.is_empty() {
            default_depot_name(index)
        } else {
            trimmed.to_string()
        };
    }

    for product in &mut data.products {
        product.name = product.name.trim().to_string();
        product.unit = normalize_unit(&product.unit);
    }

    let known: HashSet<_> = data.products.iter().map(|p| p.id).collect();
    data.stock
        .retain(|row| known.contains(&row.product_id) && !row.depot.trim().is_empty());

    data
}

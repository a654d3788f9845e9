use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{commands::Command, errors::ServiceError, models::AppData};

/// Removes a product together with every stock row that references it,
/// whatever the quantities. Unknown ids are a no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteProductCommand {
    pub product_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteProductResult {
    pub product_id: Uuid,
    pub removed: bool,
    pub purged_rows: usize,
}

impl DeleteProductCommand {
    pub fn new(product_id: Uuid) -> Self {
        Self { product_id }
    }
}

impl Command for DeleteProductCommand {
    const NAME: &'static str = "delete_product";
    type Result = DeleteProductResult;

    #[instrument(skip(self, data), fields(product_id = %self.product_id))]
    fn execute(&self, data: &mut AppData) -> Result<Self::Result, ServiceError> {
        let products_before = data.products.len();
        data.products.retain(|p| p.id != self.product_id);
        let removed = data.products.len() != products_before;

        let rows_before = data.stock.len();
        data.stock.retain(|row| row.product_id != self.product_id);
        let purged_rows = rows_before - data.stock.len();

        if removed {
            info!(purged_rows, "Product deleted");
        } else {
            debug!("Product not present; nothing to delete");
        }

        Ok(DeleteProductResult {
            product_id: self.product_id,
            removed,
            purged_rows,
        })
    }

    fn is_noop(result: &Self::Result) -> bool {
        !result.removed
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::{
    commands::{
        validation::{non_negative, not_blank},
        Command,
    },
    errors::ServiceError,
    models::{unit::normalize_unit, AppData, Product},
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddProductCommand {
    #[validate(custom = "not_blank")]
    pub name: String,
    /// Blank means the default unit.
    pub unit: String,
    #[validate(custom = "non_negative")]
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddProductResult {
    pub product: Product,
}

impl AddProductCommand {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            price,
        }
    }
}

impl Command for AddProductCommand {
    const NAME: &'static str = "add_product";
    type Result = AddProductResult;

    #[instrument(skip(self, data), fields(name = %self.name))]
    fn execute(&self, data: &mut AppData) -> Result<Self::Result, ServiceError> {
        self.validate().map_err(|e| {
            let msg = format!("Invalid product: {}", e);
            warn!("{}", msg);
            ServiceError::ValidationError(msg)
        })?;

        let name = self.name.trim();
        let unit = normalize_unit(&self.unit);

        if data.products.iter().any(|p| p.is_same_item(name, &unit)) {
            let msg = format!(
                "Product '{}' with unit '{}' already exists",
                name, unit
            );
            warn!("{}", msg);
            return Err(ServiceError::ValidationError(msg));
        }

        let product = Product::new(name, unit, self.price);
        info!(
            product_id = %product.id,
            unit = %product.unit,
            price = %product.price,
            "Product added"
        );
        data.products.push(product.clone());

        Ok(AddProductResult { product })
    }
}

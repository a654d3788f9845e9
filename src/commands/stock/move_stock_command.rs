use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    commands::{
        validation::{not_blank, positive},
        Command,
    },
    errors::ServiceError,
    models::{AppData, MovementDirection, StockRow},
};

/// Books an inbound or outbound movement against the (depot, product) row,
/// creating the row on first use. Outbound movements never take a quantity
/// below zero.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MoveStockCommand {
    #[validate(custom = "not_blank")]
    pub depot: String,
    pub product_id: Uuid,
    pub direction: MovementDirection,
    #[validate(custom = "positive")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveStockResult {
    pub depot: String,
    pub product_id: Uuid,
    /// Unit of the moved product, for display.
    pub unit: String,
    pub direction: MovementDirection,
    pub amount: Decimal,
    pub previous_quantity: Decimal,
    pub new_quantity: Decimal,
    pub created_row: bool,
}

impl MoveStockCommand {
    pub fn new(
        depot: impl Into<String>,
        product_id: Uuid,
        direction: MovementDirection,
        amount: Decimal,
    ) -> Self {
        Self {
            depot: depot.into(),
            product_id,
            direction,
            amount,
        }
    }

    pub fn inbound(depot: impl Into<String>, product_id: Uuid, amount: Decimal) -> Self {
        Self::new(depot, product_id, MovementDirection::Inbound, amount)
    }

    pub fn outbound(depot: impl Into<String>, product_id: Uuid, amount: Decimal) -> Self {
        Self::new(depot, product_id, MovementDirection::Outbound, amount)
    }

    fn next_quantity(&self, depot: &str, previous: Decimal) -> Result<Decimal, ServiceError> {
        match self.direction {
            MovementDirection::Inbound => previous.checked_add(self.amount).ok_or_else(|| {
                ServiceError::ValidationError(format!(
                    "Quantity at '{}' would exceed the supported range",
                    depot
                ))
            }),
            MovementDirection::Outbound if previous < self.amount => {
                Err(ServiceError::InsufficientStock {
                    depot: depot.to_string(),
                    product_id: self.product_id,
                    requested: self.amount,
                    available: previous,
                })
            }
            MovementDirection::Outbound => Ok(previous - self.amount),
        }
    }
}

impl Command for MoveStockCommand {
    const NAME: &'static str = "move_stock";
    type Result = MoveStockResult;

    #[instrument(skip(self, data), fields(depot = %self.depot, product_id = %self.product_id, direction = %self.direction))]
    fn execute(&self, data: &mut AppData) -> Result<Self::Result, ServiceError> {
        self.validate().map_err(|e| {
            let msg = format!("Invalid stock movement: {}", e);
            warn!("{}", msg);
            ServiceError::ValidationError(msg)
        })?;

        let depot = self.depot.trim();
        if !data.has_depot(depot) {
            let msg = format!(
                "Unknown depot '{}'; expected one of: {}",
                depot,
                data.depots.join(", ")
            );
            warn!("{}", msg);
            return Err(ServiceError::ValidationError(msg));
        }
        let unit = match data.product(self.product_id) {
            Some(product) => product.unit.clone(),
            None => {
                return Err(ServiceError::NotFound(format!(
                    "Product {} not found",
                    self.product_id
                )))
            }
        };

        let position = data
            .stock
            .iter()
            .position(|row| row.is_for(depot, self.product_id));
        let previous_quantity = position
            .map(|i| data.stock[i].qty)
            .unwrap_or(Decimal::ZERO);

        let new_quantity = self.next_quantity(depot, previous_quantity).map_err(|e| {
            warn!(error = %e, "Stock movement rejected");
            e
        })?;

        match position {
            Some(i) => data.stock[i].qty = new_quantity,
            None => data.stock.push(StockRow {
                qty: new_quantity,
                ..StockRow::empty(depot, self.product_id)
            }),
        }

        info!(
            amount = %self.amount,
            previous = %previous_quantity,
            current = %new_quantity,
            "Stock moved"
        );

        Ok(MoveStockResult {
            depot: depot.to_string(),
            product_id: self.product_id,
            unit,
            direction: self.direction,
            amount: self.amount,
            previous_quantity,
            new_quantity,
            created_row: position.is_none(),
        })
    }
}

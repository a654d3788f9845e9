use crate::{errors::ServiceError, models::AppData};

/// Command trait for implementing the Command Pattern
///
/// A command carries the input of one mutation. Executing it validates the
/// input against the current state and applies the change to `data`.
/// Persistence and notification are left to the caller, see
/// [`crate::services::inventory::InventoryService`].
pub trait Command {
    /// Label used in logs and metrics.
    const NAME: &'static str;

    /// The return type of the command when executed successfully
    type Result;

    /// On error `data` is left exactly as it was.
    fn execute(&self, data: &mut AppData) -> Result<Self::Result, ServiceError>;

    /// True when the successful result changed nothing, so there is nothing
    /// to persist or announce.
    fn is_noop(_result: &Self::Result) -> bool {
        false
    }
}

pub mod depots;
pub mod products;
pub mod stock;
pub mod validation;

pub use depots::RenameDepotsCommand;
pub use products::{AddProductCommand, DeleteProductCommand};
pub use stock::MoveStockCommand;

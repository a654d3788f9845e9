// Core services
pub mod inventory;

pub use inventory::{InventoryOptions, InventoryService};

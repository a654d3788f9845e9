pub mod move_stock_command;

pub use move_stock_command::{MoveStockCommand, MoveStockResult};

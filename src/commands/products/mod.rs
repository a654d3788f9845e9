pub mod add_product_command;
pub mod delete_product_command;

pub use add_product_command::{AddProductCommand, AddProductResult};
pub use delete_product_command::{DeleteProductCommand, DeleteProductResult};

pub mod rename_depots_command;

pub use rename_depots_command::{RenameDepotsCommand, RenameDepotsResult};

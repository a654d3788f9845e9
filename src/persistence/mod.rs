//! Whole-document persistence of [`AppData`].
//!
//! A repository reads and writes the complete state. Loading never fails: an
//! absent or unreadable document yields [`AppData::seed`], and whatever was
//! read goes through normalization first.

pub mod document;
pub mod in_memory;
pub mod json_file;

use tracing::{info, warn};

use crate::{errors::ServiceError, models::AppData};

pub use in_memory::InMemoryRepository;
pub use json_file::JsonFileRepository;

pub trait StateRepository {
    /// Reads the stored document. `Ok(None)` means nothing has been stored yet.
    fn read(&self) -> Result<Option<AppData>, ServiceError>;

    /// Overwrites the stored document with `data`.
    fn write(&self, data: &AppData) -> Result<(), ServiceError>;

    /// Human-readable location, used in log output.
    fn describe(&self) -> String;

    fn load(&self) -> AppData {
        match self.read() {
            Ok(Some(data)) => {
                let data = data.normalized();
                info!(
                    source = %self.describe(),
                    products = data.products.len(),
                    stock_rows = data.stock.len(),
                    "State loaded"
                );
                data
            }
            Ok(None) => {
                info!(source = %self.describe(), "No stored state; starting from seed");
                AppData::seed()
            }
            Err(e) => {
                warn!(source = %self.describe(), error = %e, "Stored state unreadable; starting from seed");
                AppData::seed()
            }
        }
    }

    fn save(&self, data: &AppData) -> Result<(), ServiceError> {
        self.write(data)
    }
}

impl<R: StateRepository + ?Sized> StateRepository for Box<R> {
    fn read(&self) -> Result<Option<AppData>, ServiceError> {
        (**self).read()
    }

    fn write(&self, data: &AppData) -> Result<(), ServiceError> {
        (**self).write(data)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

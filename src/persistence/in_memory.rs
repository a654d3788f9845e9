use std::sync::{Arc, Mutex, PoisonError};

use super::{document, StateRepository};
use crate::{errors::ServiceError, models::AppData};

/// Keeps the encoded document in memory. Clones share the same storage, so
/// a test can hand one clone to the service and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    stored: Arc<Mutex<Option<String>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `text` as the stored document, valid JSON or not.
    pub fn with_document(text: impl Into<String>) -> Self {
        Self {
            stored: Arc::new(Mutex::new(Some(text.into()))),
        }
    }

    pub fn document(&self) -> Option<String> {
        self.stored
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl StateRepository for InMemoryRepository {
    fn read(&self) -> Result<Option<AppData>, ServiceError> {
        match self.document() {
            Some(text) => Ok(Some(document::decode(&text)?)),
            None => Ok(None),
        }
    }

    fn write(&self, data: &AppData) -> Result<(), ServiceError> {
        let json = document::encode(data)?;
        *self.stored.lock().unwrap_or_else(PoisonError::into_inner) = Some(json);
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

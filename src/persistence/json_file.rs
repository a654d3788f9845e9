use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, error};

use super::{document, StateRepository};
use crate::{errors::ServiceError, models::AppData};

/// Stores the state as one pretty-printed JSON file, rewritten in full on
/// every save. There is no atomic rename or backup.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateRepository for JsonFileRepository {
    fn read(&self) -> Result<Option<AppData>, ServiceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ServiceError::PersistenceError(e)),
        };
        Ok(Some(document::decode(&text)?))
    }

    fn write(&self, data: &AppData) -> Result<(), ServiceError> {
        let json = document::encode(data)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, json).map_err(|e| {
            error!(path = %self.path.display(), error = %e, "Failed to write state file");
            ServiceError::PersistenceError(e)
        })?;
        debug!(path = %self.path.display(), "State file written");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

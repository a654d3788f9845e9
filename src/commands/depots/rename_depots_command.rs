use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{
    commands::{validation::all_names_present, Command},
    errors::ServiceError,
    models::{AppData, DEPOT_COUNT},
};

/// Replaces all depot names at once. Stock rows are not migrated: rows
/// recorded under an old name keep that name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameDepotsCommand {
    pub names: [String; DEPOT_COUNT],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameDepotsResult {
    pub previous: Vec<String>,
    pub names: Vec<String>,
    /// Stock rows whose depot name is no longer among the current names.
    pub stale_rows: usize,
}

impl RenameDepotsCommand {
    pub fn new(names: [&str; DEPOT_COUNT]) -> Self {
        Self {
            names: names.map(String::from),
        }
    }
}

impl Command for RenameDepotsCommand {
    const NAME: &'static str = "rename_depots";
    type Result = RenameDepotsResult;

    #[instrument(skip(self, data))]
    fn execute(&self, data: &mut AppData) -> Result<Self::Result, ServiceError> {
        all_names_present(&self.names).map_err(|e| {
            let msg = format!("Invalid depot names: {}", e);
            warn!("{}", msg);
            ServiceError::ValidationError(msg)
        })?;

        let names: Vec<String> = self.names.iter().map(|n| n.trim().to_string()).collect();
        let previous = std::mem::replace(&mut data.depots, names.clone());

        let stale_rows = data
            .stock
            .iter()
            .filter(|row| !data.has_depot(&row.depot))
            .count();
        if stale_rows > 0 {
            warn!(
                stale_rows,
                "Stock rows still reference depot names that are no longer in use"
            );
        }

        info!(previous = ?previous, current = ?names, "Depots renamed");
        Ok(RenameDepotsResult {
            previous,
            names,
            stale_rows,
        })
    }
}

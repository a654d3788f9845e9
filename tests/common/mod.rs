#![allow(dead_code)]

use std::path::PathBuf;

use depot_stock::{
    events::{self, Event},
    InMemoryRepository, InventoryOptions, InventoryService, JsonFileRepository, NumberLocale,
};
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

/// Service over an in-memory document, wired to an event receiver.
pub struct TestApp {
    pub service: InventoryService<InMemoryRepository>,
    pub repository: InMemoryRepository,
    pub events: UnboundedReceiver<Event>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_locale(NumberLocale::TURKISH)
    }

    pub fn with_locale(locale: NumberLocale) -> Self {
        let repository = InMemoryRepository::new();
        Self::open(repository, locale)
    }

    pub fn from_document(document: &str) -> Self {
        Self::open(InMemoryRepository::with_document(document), NumberLocale::TURKISH)
    }

    fn open(repository: InMemoryRepository, locale: NumberLocale) -> Self {
        let (sender, events) = events::channel();
        let service = InventoryService::open(repository.clone(), options(locale)).with_events(sender);
        Self {
            service,
            repository,
            events,
        }
    }

    /// Reloads the service from whatever was last saved.
    pub fn reopen(&self) -> InventoryService<InMemoryRepository> {
        InventoryService::open(self.repository.clone(), options(self.service.locale()))
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}

pub fn options(locale: NumberLocale) -> InventoryOptions {
    InventoryOptions {
        locale,
        currency_symbol: "₺".to_string(),
    }
}

/// Temporary directory holding a data file path that does not exist yet.
pub fn temp_data_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("data.json");
    (dir, path)
}

pub fn file_service(path: &PathBuf) -> InventoryService<JsonFileRepository> {
    InventoryService::open(JsonFileRepository::new(path), options(NumberLocale::TURKISH))
}

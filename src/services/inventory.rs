use rust_decimal::Decimal;
use tracing::{error, instrument, warn};
use uuid::Uuid;

use crate::{
    commands::{
        depots::rename_depots_command::RenameDepotsResult,
        products::{
            add_product_command::AddProductResult, delete_product_command::DeleteProductResult,
        },
        stock::MoveStockResult,
        AddProductCommand, Command, DeleteProductCommand, MoveStockCommand, RenameDepotsCommand,
    },
    config::AppConfig,
    errors::ServiceError,
    events::{Event, EventSender},
    metrics,
    models::{AppData, MovementDirection, StockRow, DEFAULT_UNIT, DEPOT_COUNT},
    numeric::{parse_decimal, NumberLocale},
    persistence::StateRepository,
    queries::{
        ConsolidatedStockQuery, ProductCatalogQuery, ProductOption, Query, StaleStockQuery,
        StockViewRow,
    },
};

/// Presentation settings the service needs for parsing and display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryOptions {
    pub locale: NumberLocale,
    pub currency_symbol: String,
}

impl Default for InventoryOptions {
    fn default() -> Self {
        Self {
            locale: NumberLocale::default(),
            currency_symbol: crate::config::DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl From<&AppConfig> for InventoryOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            locale: config.number_locale(),
            currency_symbol: config.currency_symbol.clone(),
        }
    }
}

/// Service for managing depots, the product catalog and stock levels.
///
/// Owns the in-memory state. Every mutation runs its command, normalizes the
/// state, saves the whole document and then publishes an [`Event`].
pub struct InventoryService<R: StateRepository> {
    repository: R,
    data: AppData,
    options: InventoryOptions,
    events: Option<EventSender>,
}

impl<R: StateRepository> InventoryService<R> {
    /// Loads the stored state, falling back to the seed state.
    pub fn open(repository: R, options: InventoryOptions) -> Self {
        let data = repository.load();
        Self {
            repository,
            data,
            options,
            events: None,
        }
    }

    pub fn with_events(mut self, sender: EventSender) -> Self {
        self.events = Some(sender);
        self
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn locale(&self) -> NumberLocale {
        self.options.locale
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Replaces all three depot names.
    #[instrument(skip(self))]
    pub fn rename_depots(
        &mut self,
        names: [&str; DEPOT_COUNT],
    ) -> Result<RenameDepotsResult, ServiceError> {
        let result = self.run(&RenameDepotsCommand::new(names))?;
        self.publish(Event::DepotsRenamed {
            names: result.names.clone(),
        });
        Ok(result)
    }

    /// Adds a product; `price_text` is parsed with the configured locale.
    #[instrument(skip(self))]
    pub fn add_product(
        &mut self,
        name: &str,
        unit: &str,
        price_text: &str,
    ) -> Result<AddProductResult, ServiceError> {
        let price = self.parse_input::<AddProductCommand>("price", price_text)?;
        let result = self.run(&AddProductCommand::new(name, unit, price))?;
        self.publish(Event::ProductAdded {
            product_id: result.product.id,
            name: result.product.name.clone(),
            unit: result.product.unit.clone(),
        });
        Ok(result)
    }

    /// Removes a product and all of its stock rows. Unknown ids succeed with
    /// `removed == false`.
    #[instrument(skip(self))]
    pub fn delete_product(&mut self, product_id: Uuid) -> Result<DeleteProductResult, ServiceError> {
        let result = self.run(&DeleteProductCommand::new(product_id))?;
        if result.removed {
            self.publish(Event::ProductDeleted {
                product_id,
                purged_rows: result.purged_rows,
            });
        }
        Ok(result)
    }

    /// Books a movement; `amount_text` is parsed with the configured locale.
    #[instrument(skip(self))]
    pub fn move_stock(
        &mut self,
        depot: &str,
        product_id: Uuid,
        direction: MovementDirection,
        amount_text: &str,
    ) -> Result<MoveStockResult, ServiceError> {
        let amount = self.parse_input::<MoveStockCommand>("amount", amount_text)?;
        let result = self.run(&MoveStockCommand::new(depot, product_id, direction, amount))?;
        metrics::record_movement(direction);
        self.publish(Event::StockMoved {
            depot: result.depot.clone(),
            product_id,
            direction,
            amount,
            new_quantity: result.new_quantity,
        });
        Ok(result)
    }

    pub fn consolidated_view(&self, search: Option<&str>) -> Vec<StockViewRow> {
        ConsolidatedStockQuery::new(self.options.locale)
            .with_search(search)
            .execute(&self.data)
    }

    pub fn product_catalog(&self) -> Vec<ProductOption> {
        ProductCatalogQuery {
            locale: self.options.locale,
            currency_symbol: self.options.currency_symbol.clone(),
        }
        .execute(&self.data)
    }

    pub fn depot_list(&self) -> &[String] {
        &self.data.depots
    }

    pub fn quantity(&self, depot: &str, product_id: Uuid) -> Decimal {
        self.data.quantity(depot, product_id)
    }

    /// Rows left under depot names that are no longer current.
    pub fn stale_stock(&self) -> Vec<StockRow> {
        StaleStockQuery.execute(&self.data)
    }

    /// Renders an error for the operator. Quantities in a stock rejection are
    /// formatted with the configured locale and the product's unit.
    pub fn user_message(&self, err: &ServiceError) -> String {
        match err {
            ServiceError::InsufficientStock {
                depot,
                product_id,
                requested,
                available,
            } => {
                let (name, unit) = match self.data.product(*product_id) {
                    Some(product) => (product.name.as_str(), product.unit.as_str()),
                    None => ("unknown product", DEFAULT_UNIT),
                };
                let locale = self.options.locale;
                format!(
                    "Insufficient stock of '{}' at '{}': requested {} {}, available {} {}",
                    name,
                    depot,
                    locale.format_quantity(*requested, unit),
                    unit,
                    locale.format_quantity(*available, unit),
                    unit
                )
            }
            other => other.to_string(),
        }
    }

    fn parse_input<C: Command>(&self, field: &str, text: &str) -> Result<Decimal, ServiceError> {
        parse_decimal(field, text, self.options.locale).map_err(|e| {
            metrics::record_failure(C::NAME, &e);
            e
        })
    }

    fn run<C: Command>(&mut self, command: &C) -> Result<C::Result, ServiceError> {
        let outcome = match command.execute(&mut self.data) {
            Ok(result) if C::is_noop(&result) => Ok(result),
            Ok(result) => self.commit().map(|()| result),
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(_) => metrics::record_success(C::NAME),
            Err(e) => metrics::record_failure(C::NAME, e),
        }
        outcome
    }

    fn commit(&mut self) -> Result<(), ServiceError> {
        self.data = std::mem::take(&mut self.data).normalized();
        self.repository.save(&self.data).map_err(|e| {
            error!(location = %self.repository.describe(), error = %e, "Failed to save state");
            e
        })
    }

    fn publish(&self, event: Event) {
        if let Some(sender) = &self.events {
            if let Err(e) = sender.send(event) {
                warn!(error = %e, "Event receiver is gone; change was saved but not announced");
            }
        }
    }
}

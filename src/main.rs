use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use depot_stock::{
    commands::stock::MoveStockResult,
    config::{self, AppConfig},
    events::{self, Event},
    metrics,
    models::KnownUnit,
    InventoryOptions, InventoryService, JsonFileRepository, MovementDirection, NumberLocale,
    ServiceError,
};
use serde::Serialize;
use strum::IntoEnumIterator;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;
use uuid::Uuid;

fn main() -> Result<()> {
    let Cli {
        json,
        metrics: show_metrics,
        data_file,
        command,
    } = Cli::parse();
    let mut context = CliContext::initialize(data_file)?;

    let outcome = dispatch(&mut context, command, json);
    context.drain_events();
    // Counters only live for this process, so they are printed after the command ran.
    if show_metrics {
        eprint!("{}", metrics::gather_text()?);
    }

    if let Err(err) = outcome {
        if let Some(service_err) = err.downcast_ref::<ServiceError>() {
            if service_err.is_user_error() {
                eprintln!("rejected: {}", context.service.user_message(service_err));
                std::process::exit(1);
            }
        }
        return Err(err);
    }
    Ok(())
}

fn dispatch(context: &mut CliContext, command: Commands, json: bool) -> Result<()> {
    match command {
        Commands::Depots(command) => handle_depots_command(context, command, json),
        Commands::Products(command) => handle_products_command(context, command, json),
        Commands::Stock(command) => handle_stock_command(context, command, json),
    }
}

#[derive(Parser)]
#[command(
    name = "depot-stock",
    about = "Inventory tracker for three depots",
    version
)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    json: bool,
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Print this run's command counters in Prometheus text format to stderr"
    )]
    metrics: bool,
    #[arg(
        long,
        global = true,
        help = "Data file to use instead of the configured one"
    )]
    data_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    Depots(DepotsCommands),
    #[command(subcommand)]
    Products(ProductsCommands),
    #[command(subcommand)]
    Stock(StockCommands),
}

#[derive(Subcommand)]
enum DepotsCommands {
    Show,
    Rename(RenameDepotsArgs),
}

#[derive(Args)]
struct RenameDepotsArgs {
    first: String,
    second: String,
    third: String,
}

#[derive(Subcommand)]
enum ProductsCommands {
    List,
    Add(AddProductArgs),
    Delete(DeleteProductArgs),
    /// List the units offered for new products
    Units,
}

#[derive(Args)]
struct AddProductArgs {
    name: String,
    #[arg(long, default_value = "", help = "Unit of measure; defaults to unit-count")]
    unit: String,
    #[arg(long, allow_hyphen_values = true, help = "Unit price in the configured locale")]
    price: String,
}

#[derive(Args)]
struct DeleteProductArgs {
    id: Uuid,
    #[arg(
        long,
        action = ArgAction::SetTrue,
        help = "Confirm deletion of the product and all of its stock"
    )]
    yes: bool,
}

#[derive(Subcommand)]
enum StockCommands {
    In(MoveStockArgs),
    Out(MoveStockArgs),
    View(ViewStockArgs),
    /// Rows recorded under depot names that are no longer in use
    Stale,
}

#[derive(Args)]
struct MoveStockArgs {
    depot: String,
    product_id: Uuid,
    #[arg(allow_hyphen_values = true)]
    amount: String,
}

#[derive(Args)]
struct ViewStockArgs {
    #[arg(long, help = "Case-insensitive product name filter")]
    search: Option<String>,
}

struct CliContext {
    service: InventoryService<JsonFileRepository>,
    events: UnboundedReceiver<Event>,
}

impl CliContext {
    fn initialize(data_file: Option<PathBuf>) -> Result<Self> {
        let mut config: AppConfig =
            config::load_config().context("failed to load application config")?;
        config::init_tracing(&config.log_level, config.log_json);

        if let Some(path) = data_file {
            config.data_file = path;
        }

        let (sender, events) = events::channel();
        let service = InventoryService::open(
            JsonFileRepository::new(&config.data_file),
            InventoryOptions::from(&config),
        )
        .with_events(sender);

        Ok(Self { service, events })
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            debug!(target: "depot_stock_cli", event = ?event, "received event");
        }
    }
}

fn handle_depots_command(context: &mut CliContext, command: DepotsCommands, json: bool) -> Result<()> {
    match command {
        DepotsCommands::Show => {
            let depots = context.service.depot_list();
            if json {
                print_json(&depots)?;
            } else {
                for (i, depot) in depots.iter().enumerate() {
                    println!("{}. {}", i + 1, depot);
                }
            }
        }
        DepotsCommands::Rename(args) => {
            let result = context
                .service
                .rename_depots([args.first.as_str(), args.second.as_str(), args.third.as_str()])
                .context("failed to rename depots")?;
            if json {
                print_json(&result)?;
            } else {
                println!("Depots: {}", result.names.join(", "));
                if result.stale_rows > 0 {
                    println!(
                        "{} stock row(s) still use previous depot names; see `stock stale`",
                        result.stale_rows
                    );
                }
            }
        }
    }
    Ok(())
}

fn handle_products_command(
    context: &mut CliContext,
    command: ProductsCommands,
    json: bool,
) -> Result<()> {
    match command {
        ProductsCommands::List => {
            let catalog = context.service.product_catalog();
            if json {
                print_json(&catalog)?;
            } else if catalog.is_empty() {
                println!("No products");
            } else {
                for option in &catalog {
                    println!("{}  {}", option.id, option.label);
                }
            }
        }
        ProductsCommands::Add(args) => {
            let result = context
                .service
                .add_product(&args.name, &args.unit, &args.price)
                .context("failed to add product")?;
            if json {
                print_json(&result)?;
            } else {
                let product = &result.product;
                println!(
                    "Added {} ({}) at {} • id {}",
                    product.name,
                    product.unit,
                    context.service.locale().format_price(product.price),
                    product.id
                );
            }
        }
        ProductsCommands::Delete(args) => {
            if !args.yes {
                anyhow::bail!(
                    "deleting product {} removes all of its stock; pass --yes to confirm",
                    args.id
                );
            }
            let result = context
                .service
                .delete_product(args.id)
                .context("failed to delete product")?;
            if json {
                print_json(&result)?;
            } else if result.removed {
                println!(
                    "Deleted product {} and {} stock row(s)",
                    result.product_id, result.purged_rows
                );
            } else {
                println!("Product {} not found; nothing deleted", result.product_id);
            }
        }
        ProductsCommands::Units => {
            let units: Vec<KnownUnit> = KnownUnit::iter().collect();
            if json {
                print_json(&units)?;
            } else {
                for unit in units {
                    println!("{}", unit);
                }
            }
        }
    }
    Ok(())
}

fn handle_stock_command(context: &mut CliContext, command: StockCommands, json: bool) -> Result<()> {
    match command {
        StockCommands::In(args) => move_stock(context, args, MovementDirection::Inbound, json)?,
        StockCommands::Out(args) => move_stock(context, args, MovementDirection::Outbound, json)?,
        StockCommands::View(args) => {
            let rows = context.service.consolidated_view(args.search.as_deref());
            if json {
                print_json(&rows)?;
            } else {
                println!(
                    "{:<30} {:<16} {:>12} {:<12} {:>10}",
                    "PRODUCT", "DEPOT", "QTY", "UNIT", "PRICE"
                );
                for row in &rows {
                    println!(
                        "{:<30} {:<16} {:>12} {:<12} {:>10}",
                        row.product_name, row.depot, row.quantity_display, row.unit, row.price_display
                    );
                }
            }
        }
        StockCommands::Stale => {
            let rows = context.service.stale_stock();
            if json {
                print_json(&rows)?;
            } else if rows.is_empty() {
                println!("No stale stock rows");
            } else {
                for row in &rows {
                    println!("- {} • product {} • qty {}", row.depot, row.product_id, row.qty);
                }
            }
        }
    }
    Ok(())
}

fn move_stock(
    context: &mut CliContext,
    args: MoveStockArgs,
    direction: MovementDirection,
    json: bool,
) -> Result<()> {
    let result = context
        .service
        .move_stock(&args.depot, args.product_id, direction, &args.amount)
        .with_context(|| format!("failed to book {} movement", direction))?;
    if json {
        print_json(&result)?;
    } else {
        println!("{}", movement_line(context.service.locale(), &result));
    }
    Ok(())
}

fn movement_line(locale: NumberLocale, result: &MoveStockResult) -> String {
    format!(
        "{} • {} → {} {} at {}",
        result.direction,
        locale.format_quantity(result.previous_quantity, &result.unit),
        locale.format_quantity(result.new_quantity, &result.unit),
        result.unit,
        result.depot
    )
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

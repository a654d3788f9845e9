//! depot-stock library
//!
//! Data layer of a three-depot inventory tracker: the domain model and its
//! normalization, the mutation commands, the inventory service, whole-document
//! JSON persistence, locale-aware number handling and read-side queries.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod commands;
pub mod config;
pub mod errors;
pub mod events;
pub mod metrics;
pub mod models;
pub mod numeric;
pub mod persistence;
pub mod queries;
pub mod services;

pub use errors::ServiceError;
pub use models::{AppData, MovementDirection, Product, StockRow};
pub use numeric::NumberLocale;
pub use persistence::{InMemoryRepository, JsonFileRepository, StateRepository};
pub use services::{InventoryOptions, InventoryService};

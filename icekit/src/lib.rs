#![deny(missing_docs)]
//! Catalog access and table loading for the Iceberg table format
//!
//! A catalog maps table identifiers to the location of the table's current
//! metadata file. This crate resolves that location, reads the immutable metadata
//! file behind it and hands out [`table::Table`] values. New tables are assembled
//! with [`table::table_builder::TableBuilder`] before they are published anywhere.
//!
//! # Components
//!
//! * [`catalog`] - The [`catalog::Catalog`] trait and the in-memory catalog
//! * [`table`] - Tables and the table builder
//! * [`object_store`] - Resolving and using object storage for metadata files
//! * [`error`] - Error types and handling
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), icekit::error::Error> {
//! use icekit::catalog::{identifier::Identifier, memory::MemoryCatalog, Catalog};
//! use icekit::object_store::ObjectStoreBuilder;
//! use icekit::table::Table;
//!
//! let catalog = MemoryCatalog::new("local");
//! let identifier = Identifier::parse("sales.orders", None)?;
//! catalog
//!     .register_table(&identifier, "file:///warehouse/orders/metadata/00000-x.metadata.json")
//!     .await?;
//!
//! let table = Table::load(&catalog, &identifier, &ObjectStoreBuilder::filesystem("/")?).await?;
//! println!("{}", table.metadata_location());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod error;
pub mod object_store;
pub mod table;

pub use icekit_spec as spec;

//! Table metadata model for the Iceberg table format
//!
//! This crate contains the pure, I/O free part of icekit:
//!
//! - Identifiers and namespaces used to address tables in a catalog
//! - Schemas, partition specs, sort orders and snapshots
//! - The table metadata codec, which reads format version 1 and 2 documents
//!   into a single in-memory shape
//! - Generation of metadata file names
//!
//! The crate is organized into several modules:
//!
//! - `spec`: Metadata types and their JSON representation
//! - `error`: Error types and handling
//! - `util`: Common utility functions
//!
pub mod error;
pub mod spec;
pub mod util;

pub use spec::*;

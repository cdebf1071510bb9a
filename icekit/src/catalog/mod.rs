/*!
Defines the interface to a table catalog.

A catalog owns exactly one piece of state per table: the location of the table's
current metadata file. Everything else about the table lives in that immutable
file.
*/

use std::fmt::{self, Debug, Display};

use crate::error::Error;

use self::identifier::Identifier;
use self::namespace::Namespace;

pub mod memory;

/// Backend variant of a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogType {
    /// AWS Glue data catalog
    Glue,
    /// In-process catalog
    Memory,
}

impl Display for CatalogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogType::Glue => write!(f, "glue"),
            CatalogType::Memory => write!(f, "memory"),
        }
    }
}

/// Where a table's metadata currently lives, as reported by a catalog.
///
/// Created fresh by every catalog query and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogTable {
    /// Identifier as it was requested or listed
    pub identifier: Identifier,
    /// Location of the current metadata file
    pub metadata_location: String,
    /// Catalog that produced the entry
    pub catalog_type: CatalogType,
}

/// A catalog resolves table identifiers to metadata file locations.
///
/// Implementations must be Send + Sync for concurrent access and Debug for logging.
/// Every operation is a future; dropping it cancels the operation.
#[async_trait::async_trait]
pub trait Catalog: Send + Sync + Debug {
    /// Returns the name of this catalog.
    fn name(&self) -> &str;
    /// Returns the backend variant of this catalog.
    fn catalog_type(&self) -> CatalogType;
    /// Resolves an identifier to the location of the table's current metadata file.
    ///
    /// # Arguments
    /// * `identifier` - The table to look up
    ///
    /// # Returns
    /// * `Result<CatalogTable, Error>` - The identifier, its metadata location and the catalog type
    ///
    /// # Errors
    /// Returns an error if:
    /// * The identifier doesn't have the shape the backend requires (`InvalidIdentifier`)
    /// * The table doesn't exist (`NoSuchTable`)
    /// * The entry isn't an Iceberg table (`NotAnIcebergTable`)
    /// * The backend call fails (`Backend`)
    async fn get_table(&self, identifier: &Identifier) -> Result<CatalogTable, Error>;
    /// Lists the Iceberg tables of a namespace.
    ///
    /// Entries of the namespace that are not Iceberg tables are skipped.
    ///
    /// # Arguments
    /// * `namespace` - The namespace to list
    ///
    /// # Errors
    /// Returns an error if:
    /// * The namespace doesn't have the shape the backend requires (`InvalidIdentifier`)
    /// * The backend call fails (`Backend`)
    async fn list_tables(&self, namespace: &Namespace) -> Result<Vec<CatalogTable>, Error>;
    /// Publishes a new metadata file for a table.
    ///
    /// The swap only happens if the catalog still points to `expected`, the
    /// location the new metadata was derived from.
    ///
    /// # Arguments
    /// * `identifier` - The table to update
    /// * `expected` - Metadata location the commit is based on
    /// * `new` - Location of the already written new metadata file
    ///
    /// # Errors
    /// Returns an error if:
    /// * The catalog points to another location (`CommitConflict`)
    /// * The table doesn't exist (`NoSuchTable`)
    /// * The catalog doesn't support commits (`NotSupported`)
    async fn swap_metadata_location(
        &self,
        identifier: &Identifier,
        expected: &str,
        new: &str,
    ) -> Result<CatalogTable, Error> {
        let _ = (identifier, expected, new);
        Err(Error::NotSupported(format!(
            "Metadata commits for {} catalogs",
            self.catalog_type()
        )))
    }
}

/// Table identifiers
pub mod identifier {
    pub use icekit_spec::identifier::Identifier;
}

/// Namespaces
pub mod namespace {
    pub use icekit_spec::namespace::Namespace;
}

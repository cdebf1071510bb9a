/*!
In-process catalog.

Keeps the identifier to metadata location mapping in memory. Useful for tests and
for embedding, nothing is persisted.
*/

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use crate::error::Error;

use super::{identifier::Identifier, namespace::Namespace, Catalog, CatalogTable, CatalogType};

/// In memory catalog
#[derive(Debug)]
pub struct MemoryCatalog {
    name: String,
    tables: RwLock<HashMap<Identifier, String>>,
}

impl MemoryCatalog {
    /// Create an empty catalog
    pub fn new(name: &str) -> Self {
        MemoryCatalog {
            name: name.to_owned(),
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Adds a table whose metadata file already exists at `metadata_location`
    pub async fn register_table(
        &self,
        identifier: &Identifier,
        metadata_location: &str,
    ) -> Result<CatalogTable, Error> {
        let mut tables = self.tables.write().await;
        if tables.contains_key(identifier) {
            return Err(Error::AlreadyExists(identifier.to_string()));
        }
        tables.insert(identifier.clone(), metadata_location.to_owned());
        Ok(self.entry(identifier.clone(), metadata_location.to_owned()))
    }

    fn entry(&self, identifier: Identifier, metadata_location: String) -> CatalogTable {
        CatalogTable {
            identifier,
            metadata_location,
            catalog_type: CatalogType::Memory,
        }
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    fn catalog_type(&self) -> CatalogType {
        CatalogType::Memory
    }

    #[instrument(name = "icekit::memory::get_table", level = "debug", skip(self), fields(catalog = %self.name))]
    async fn get_table(&self, identifier: &Identifier) -> Result<CatalogTable, Error> {
        let tables = self.tables.read().await;
        let location = tables.get(identifier).ok_or(Error::NoSuchTable)?;
        Ok(self.entry(identifier.clone(), location.clone()))
    }

    #[instrument(name = "icekit::memory::list_tables", level = "debug", skip(self), fields(catalog = %self.name))]
    async fn list_tables(&self, namespace: &Namespace) -> Result<Vec<CatalogTable>, Error> {
        let tables = self.tables.read().await;
        let mut entries: Vec<_> = tables
            .iter()
            .filter(|(identifier, _)| identifier.namespace() == namespace)
            .map(|(identifier, location)| self.entry(identifier.clone(), location.clone()))
            .collect();
        entries.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        Ok(entries)
    }

    #[instrument(name = "icekit::memory::swap", level = "debug", skip(self), fields(catalog = %self.name))]
    async fn swap_metadata_location(
        &self,
        identifier: &Identifier,
        expected: &str,
        new: &str,
    ) -> Result<CatalogTable, Error> {
        let mut tables = self.tables.write().await;
        let current = tables.get_mut(identifier).ok_or(Error::NoSuchTable)?;
        if current != expected {
            warn!(found = %current, "commit conflict");
            return Err(Error::CommitConflict {
                expected: expected.to_owned(),
                found: current.clone(),
            });
        }
        *current = new.to_owned();
        debug!("swapped metadata location");
        Ok(self.entry(identifier.clone(), new.to_owned()))
    }
}

/*!
AWS Glue backed [Catalog].

Glue stores one record per table. Iceberg tables are marked with the parameter
`table_type = ICEBERG` and point to their current metadata file with the
`metadata_location` parameter.
*/

use std::{future::Future, sync::Arc, time::Duration};

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_glue::Client;
use icekit::{
    catalog::{
        identifier::Identifier, namespace::Namespace, Catalog, CatalogTable, CatalogType,
    },
    error::Error as IcebergError,
};
use tracing::{debug, instrument, warn};

use crate::{
    client::{GlueApi, GlueTable},
    error::Error,
    identifier::{glue_table_identifier, identifier_to_glue_table, namespace_to_glue_database},
    utils::{commit_parameters, is_iceberg, METADATA_LOCATION},
};

pub mod client;
pub mod error;
pub mod identifier;
mod utils;

/// Catalog backed by the AWS Glue data catalog
#[derive(Debug, Clone)]
pub struct GlueCatalog {
    name: String,
    client: Arc<dyn GlueApi>,
    operation_timeout: Option<Duration>,
}

impl GlueCatalog {
    /// Catalog using the Glue client configured by `config`
    pub fn new(config: &SdkConfig, name: &str) -> Self {
        Self::with_client(name, Arc::new(Client::new(config)))
    }
    /// Catalog on top of any [GlueApi] implementation
    pub fn with_client(name: &str, client: Arc<dyn GlueApi>) -> Self {
        GlueCatalog {
            name: name.to_owned(),
            client,
            operation_timeout: None,
        }
    }
    /// Bound every Glue call by `timeout`
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        future: impl Future<Output = T> + Send,
    ) -> Result<T, IcebergError> {
        match self.operation_timeout {
            Some(timeout) => tokio::time::timeout(timeout, future).await.map_err(|_| {
                warn!(operation, ?timeout, "glue call timed out");
                IcebergError::Timeout(operation.to_owned())
            }),
            None => Ok(future.await),
        }
    }

    async fn fetch_table(&self, database: &str, table: &str) -> Result<GlueTable, IcebergError> {
        self.bounded("GetTable", self.client.get_table(database, table))
            .await?
            .map_err(|err| match err {
                Error::EntityNotFound(_) => IcebergError::NoSuchTable,
                err => IcebergError::backend(format!("failed to get table {database}.{table}"), err),
            })
    }
}

/// Metadata location of an Iceberg table record
fn metadata_location<'t>(database: &str, table: &'t GlueTable) -> Result<&'t str, IcebergError> {
    if !is_iceberg(&table.parameters) {
        return Err(IcebergError::NotAnIcebergTable(format!(
            "{database}.{}",
            table.name
        )));
    }
    table
        .parameters
        .get(METADATA_LOCATION)
        .map(String::as_str)
        .ok_or(IcebergError::NotFound(
            "Metadata location".to_owned(),
            format!("of glue table {database}.{}", table.name),
        ))
}

#[async_trait]
impl Catalog for GlueCatalog {
    /// Catalog name
    fn name(&self) -> &str {
        &self.name
    }

    fn catalog_type(&self) -> CatalogType {
        CatalogType::Glue
    }

    #[instrument(name = "icekit::glue::get_table", level = "debug", skip(self), fields(catalog = %self.name))]
    async fn get_table(&self, identifier: &Identifier) -> Result<CatalogTable, IcebergError> {
        let (database, table_name) = identifier_to_glue_table(identifier)?;
        let table = self.fetch_table(database, table_name).await?;
        let location = metadata_location(database, &table)?;
        debug!(metadata_location = location, "resolved table");
        Ok(CatalogTable {
            identifier: identifier.clone(),
            metadata_location: location.to_owned(),
            catalog_type: CatalogType::Glue,
        })
    }

    #[instrument(name = "icekit::glue::list_tables", level = "debug", skip(self), fields(catalog = %self.name))]
    async fn list_tables(&self, namespace: &Namespace) -> Result<Vec<CatalogTable>, IcebergError> {
        let database = namespace_to_glue_database(namespace)?;
        let tables = self
            .bounded("GetTables", self.client.get_tables(database))
            .await?
            .map_err(|err| {
                IcebergError::backend(format!("failed to list tables in namespace {database}"), err)
            })?;

        Ok(tables
            .iter()
            .filter(|table| is_iceberg(&table.parameters))
            .filter_map(|table| match metadata_location(database, table) {
                Ok(location) => Some(CatalogTable {
                    identifier: glue_table_identifier(database, &table.name),
                    metadata_location: location.to_owned(),
                    catalog_type: CatalogType::Glue,
                }),
                Err(err) => {
                    warn!(table = %table.name, %err, "skipping iceberg table without metadata location");
                    None
                }
            })
            .collect())
    }

    #[instrument(name = "icekit::glue::swap", level = "debug", skip(self), fields(catalog = %self.name))]
    async fn swap_metadata_location(
        &self,
        identifier: &Identifier,
        expected: &str,
        new: &str,
    ) -> Result<CatalogTable, IcebergError> {
        let (database, table_name) = identifier_to_glue_table(identifier)?;
        let table = self.fetch_table(database, table_name).await?;
        let current = metadata_location(database, &table)?;
        if current != expected {
            return Err(IcebergError::CommitConflict {
                expected: expected.to_owned(),
                found: current.to_owned(),
            });
        }

        let update = GlueTable {
            parameters: commit_parameters(&table.parameters, expected, new),
            ..table.clone()
        };
        let result = self
            .bounded(
                "UpdateTable",
                self.client
                    .update_table(database, &update, table.version_id.as_deref()),
            )
            .await?;
        match result {
            Ok(()) => {
                debug!(version_id = ?table.version_id, "updated glue table");
                Ok(CatalogTable {
                    identifier: identifier.clone(),
                    metadata_location: new.to_owned(),
                    catalog_type: CatalogType::Glue,
                })
            }
            Err(Error::ConcurrentModification(_)) => {
                let found = self.get_table(identifier).await?.metadata_location;
                warn!(%found, "concurrent modification of glue table");
                Err(IcebergError::CommitConflict {
                    expected: expected.to_owned(),
                    found,
                })
            }
            Err(Error::EntityNotFound(_)) => Err(IcebergError::NoSuchTable),
            Err(err) => Err(IcebergError::backend(
                format!("failed to update table {database}.{table_name}"),
                err,
            )),
        }
    }
}

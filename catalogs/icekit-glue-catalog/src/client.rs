/*!
The narrow slice of the Glue API the catalog needs.

[GlueApi] is implemented for the AWS SDK [Client]. Other implementations can stand
in for Glue, which is how the catalog is tested.
*/

use std::{collections::HashMap, fmt::Debug};

use async_trait::async_trait;
use aws_sdk_glue::{
    types::{Column, StorageDescriptor, Table, TableInput},
    Client,
};

use crate::error::Error;

/// A Glue table record.
///
/// `UpdateTable` replaces the whole record, so everything the catalog doesn't
/// change is carried along and written back as it was read.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlueTable {
    /// Table name
    pub name: String,
    /// Table parameters, Iceberg tables carry `table_type` and `metadata_location`
    pub parameters: HashMap<String, String>,
    /// Version of the record, used for optimistic updates
    pub version_id: Option<String>,
    /// Glue table type, for example `EXTERNAL_TABLE`
    pub table_type: Option<String>,
    /// Description of the table
    pub description: Option<String>,
    /// Owner of the table
    pub owner: Option<String>,
    /// Partition columns
    pub partition_keys: Option<Vec<Column>>,
    /// Columns, location and formats
    pub storage_descriptor: Option<StorageDescriptor>,
}

impl GlueTable {
    /// Storage descriptor location
    pub fn location(&self) -> Option<&str> {
        self.storage_descriptor.as_ref().and_then(|x| x.location())
    }
}

impl From<Table> for GlueTable {
    fn from(value: Table) -> Self {
        GlueTable {
            name: value.name,
            parameters: value.parameters.unwrap_or_default(),
            version_id: value.version_id,
            table_type: value.table_type,
            description: value.description,
            owner: value.owner,
            partition_keys: value.partition_keys,
            storage_descriptor: value.storage_descriptor,
        }
    }
}

/// Input of `UpdateTable` that writes `table` back unchanged
pub(crate) fn table_input(table: &GlueTable) -> Result<TableInput, Error> {
    Ok(TableInput::builder()
        .name(&table.name)
        .set_parameters(Some(table.parameters.clone()))
        .set_table_type(table.table_type.clone())
        .set_description(table.description.clone())
        .set_owner(table.owner.clone())
        .set_partition_keys(table.partition_keys.clone())
        .set_storage_descriptor(table.storage_descriptor.clone())
        .build()?)
}

/// Glue operations used by the catalog
#[async_trait]
pub trait GlueApi: Send + Sync + Debug {
    /// Fetch one table record. Missing tables or databases yield [Error::EntityNotFound].
    async fn get_table(&self, database: &str, name: &str) -> Result<GlueTable, Error>;
    /// Fetch all table records of a database, following continuation tokens
    async fn get_tables(&self, database: &str) -> Result<Vec<GlueTable>, Error>;
    /// Replace a table record. With a `version_id` the update only succeeds if the
    /// record is still at that version, otherwise it fails with
    /// [Error::ConcurrentModification].
    async fn update_table(
        &self,
        database: &str,
        table: &GlueTable,
        version_id: Option<&str>,
    ) -> Result<(), Error>;
}

#[async_trait]
impl GlueApi for Client {
    async fn get_table(&self, database: &str, name: &str) -> Result<GlueTable, Error> {
        let result = self
            .get_table()
            .database_name(database)
            .name(name)
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(|err| err.is_entity_not_found_exception())
                {
                    Error::EntityNotFound(format!("{database}.{name}"))
                } else {
                    Error::from(err)
                }
            })?;
        result
            .table
            .map(GlueTable::from)
            .ok_or(Error::EntityNotFound(format!("{database}.{name}")))
    }

    async fn get_tables(&self, database: &str) -> Result<Vec<GlueTable>, Error> {
        let mut tables = Vec::new();
        let mut token = None;

        loop {
            let result = self
                .get_tables()
                .database_name(database)
                .set_next_token(token)
                .send()
                .await?;

            if let Some(new) = result.table_list {
                tables.extend(new.into_iter().map(GlueTable::from));
            }
            token = result.next_token;

            if token.is_none() {
                break;
            }
        }

        Ok(tables)
    }

    async fn update_table(
        &self,
        database: &str,
        table: &GlueTable,
        version_id: Option<&str>,
    ) -> Result<(), Error> {
        self.update_table()
            .database_name(database)
            .set_version_id(version_id.map(ToOwned::to_owned))
            .table_input(table_input(table)?)
            .send()
            .await
            .map_err(|err| match err.as_service_error() {
                Some(service) if service.is_concurrent_modification_exception() => {
                    Error::ConcurrentModification(format!("{database}.{}", table.name))
                }
                Some(service) if service.is_entity_not_found_exception() => {
                    Error::EntityNotFound(format!("{database}.{}", table.name))
                }
                _ => Error::from(err),
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders() -> GlueTable {
        GlueTable {
            name: "orders".to_owned(),
            parameters: HashMap::from([("table_type".to_owned(), "ICEBERG".to_owned())]),
            version_id: Some("4".to_owned()),
            table_type: Some("EXTERNAL_TABLE".to_owned()),
            description: Some("daily orders".to_owned()),
            owner: Some("etl".to_owned()),
            partition_keys: Some(vec![Column::builder()
                .name("day")
                .r#type("date")
                .build()
                .unwrap()]),
            storage_descriptor: Some(
                StorageDescriptor::builder()
                    .columns(
                        Column::builder()
                            .name("id")
                            .r#type("bigint")
                            .build()
                            .unwrap(),
                    )
                    .location("s3://warehouse/orders")
                    .input_format("org.apache.hadoop.mapred.FileInputFormat")
                    .build(),
            ),
        }
    }

    #[test]
    fn table_input_keeps_record() {
        let table = orders();
        let input = table_input(&table).unwrap();
        assert_eq!(input.name, "orders");
        assert_eq!(input.parameters.as_ref(), Some(&table.parameters));
        assert_eq!(input.table_type.as_deref(), Some("EXTERNAL_TABLE"));
        assert_eq!(input.description.as_deref(), Some("daily orders"));
        assert_eq!(input.owner.as_deref(), Some("etl"));
        assert_eq!(input.partition_keys, table.partition_keys);
        assert_eq!(input.storage_descriptor, table.storage_descriptor);
        assert_eq!(table.location(), Some("s3://warehouse/orders"));
    }
}

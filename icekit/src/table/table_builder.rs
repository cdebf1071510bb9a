/*!
Defining the [TableBuilder] struct for creating tables that have not been committed
to a catalog yet
*/

use std::collections::HashMap;

use tracing::{debug, instrument};
use uuid::Uuid;

use icekit_spec::spec::{
    partition::PartitionSpec, schema::Schema, sort::SortOrder, table_metadata::TableMetadata,
};

use crate::{catalog::identifier::Identifier, error::Error, object_store::ObjectStoreBuilder};

use super::Table;

/// Builder pattern to create a table.
///
/// Schema, base location and the location of the first metadata file are required,
/// everything else defaults to an unpartitioned, unsorted table without properties.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    identifier: Identifier,
    schema: Schema,
    location: String,
    metadata_location: String,
    partition_spec: PartitionSpec,
    sort_order: SortOrder,
    properties: HashMap<String, String>,
    object_store_builder: Option<ObjectStoreBuilder>,
}

impl TableBuilder {
    /// Creates a new [TableBuilder] from the required inputs
    pub fn new(
        identifier: Identifier,
        schema: Schema,
        location: &str,
        metadata_location: &str,
    ) -> Self {
        TableBuilder {
            identifier,
            schema,
            location: location.to_owned(),
            metadata_location: metadata_location.to_owned(),
            partition_spec: PartitionSpec::unpartitioned(),
            sort_order: SortOrder::unsorted(),
            properties: HashMap::new(),
            object_store_builder: None,
        }
    }
    /// Sets the partition spec
    pub fn with_partition_spec(&mut self, partition_spec: PartitionSpec) -> &mut Self {
        self.partition_spec = partition_spec;
        self
    }
    /// Sets the sort order
    pub fn with_sort_order(&mut self, sort_order: SortOrder) -> &mut Self {
        self.sort_order = sort_order;
        self
    }
    /// Sets the table properties
    pub fn with_properties(&mut self, properties: HashMap<String, String>) -> &mut Self {
        self.properties = properties;
        self
    }
    /// Uses the given template instead of deriving one from the table location
    pub fn with_object_store_builder(&mut self, builder: ObjectStoreBuilder) -> &mut Self {
        self.object_store_builder = Some(builder);
        self
    }
    /// Mints a table uuid, synthesizes format version 2 metadata and resolves the
    /// object store for the table location.
    ///
    /// Nothing is written and no catalog is involved.
    #[instrument(level = "debug", skip(self), fields(identifier = %self.identifier))]
    pub fn build(&self) -> Result<Table, Error> {
        let table_uuid = Uuid::new_v4();
        let metadata = TableMetadata::new_v2(
            self.schema.clone(),
            self.partition_spec.clone(),
            self.sort_order.clone(),
            &self.location,
            table_uuid,
            self.properties.clone(),
        )?;

        let object_store = match &self.object_store_builder {
            Some(builder) => builder.build_for_location(&self.location)?,
            None => ObjectStoreBuilder::from_location(&self.location)?
                .build_for_location(&self.location)?,
        };
        debug!(%table_uuid, location = %self.location, "built table");

        Ok(Table::new(
            self.identifier.clone(),
            metadata,
            &self.metadata_location,
            object_store,
        ))
    }
}

#[cfg(test)]
mod tests {
    use icekit_spec::spec::{
        partition::{PartitionField, Transform},
        sort::{NullOrder, SortDirection, SortField},
        table_metadata::FormatVersion,
        types::{PrimitiveType, StructField, Type},
    };

    use super::*;

    fn schema() -> Schema {
        Schema::new(
            0,
            vec![
                StructField::new(1, "id", true, Type::Primitive(PrimitiveType::Long), None),
                StructField::new(2, "ts", true, Type::Primitive(PrimitiveType::Timestamp), None),
            ],
        )
    }

    fn builder() -> TableBuilder {
        TableBuilder::new(
            Identifier::new(&["db".to_owned()], "events"),
            schema(),
            "memory:///warehouse/db/events",
            "memory:///warehouse/db/events/metadata/00000-a.metadata.json",
        )
    }

    #[test]
    fn required_fields_only() {
        let first = builder().build().unwrap();
        let second = builder().build().unwrap();

        let metadata = first.metadata();
        assert_eq!(metadata.format_version, FormatVersion::V2);
        assert!(metadata.properties.is_empty());
        assert!(metadata.snapshots.is_empty());
        assert_eq!(metadata.last_column_id, 2);
        assert_eq!(metadata.last_partition_id, 0);
        assert_eq!(metadata.location, "memory:///warehouse/db/events");
        assert_eq!(
            first.metadata_location(),
            "memory:///warehouse/db/events/metadata/00000-a.metadata.json"
        );
        assert_ne!(metadata.table_uuid, second.metadata().table_uuid);
        assert_ne!(first, second);
    }

    #[test]
    fn optional_fields() {
        let mut builder = builder();
        builder
            .with_partition_spec(
                PartitionSpec::builder()
                    .with_spec_id(1)
                    .with_partition_field(PartitionField::new(2, 1000, "ts_day", Transform::Day))
                    .build()
                    .unwrap(),
            )
            .with_sort_order(
                SortOrder::builder()
                    .with_order_id(1)
                    .with_sort_field(SortField::new(
                        1,
                        Transform::Identity,
                        SortDirection::Ascending,
                        NullOrder::First,
                    ))
                    .build()
                    .unwrap(),
            )
            .with_properties(HashMap::from_iter([(
                "owner".to_owned(),
                "analytics".to_owned(),
            )]));
        let table = builder.build().unwrap();

        assert_eq!(*table.partition_spec().unwrap().spec_id(), 1);
        assert_eq!(table.metadata().last_partition_id, 1000);
        assert_eq!(*table.sort_order().unwrap().order_id(), 1);
        assert_eq!(table.properties().get("owner").map(String::as_str), Some("analytics"));
    }

    #[test]
    fn rejects_invalid_inputs() {
        let mut builder = builder();
        builder.with_partition_spec(
            PartitionSpec::builder()
                .with_partition_field(PartitionField::new(7, 1000, "missing", Transform::Identity))
                .build()
                .unwrap(),
        );
        assert!(matches!(
            builder.build(),
            Err(Error::Iceberg(icekit_spec::error::Error::ColumnNotInSchema(_, _)))
        ));

        let empty_location = TableBuilder::new(
            Identifier::new(&["db".to_owned()], "events"),
            schema(),
            "",
            "/metadata/00000-a.metadata.json",
        );
        assert!(empty_location.build().is_err());
    }

    #[test]
    fn explicit_object_store() {
        let mut builder = TableBuilder::new(
            Identifier::new(&["db".to_owned()], "events"),
            schema(),
            "s3://bucket/db/events",
            "s3://bucket/db/events/metadata/00000-a.metadata.json",
        );
        assert!(builder
            .with_object_store_builder(ObjectStoreBuilder::memory())
            .build()
            .is_err());

        let mut builder = TableBuilder::new(
            Identifier::new(&["db".to_owned()], "events"),
            schema(),
            "/warehouse/db/events",
            "/warehouse/db/events/metadata/00000-a.metadata.json",
        );
        assert!(builder
            .with_object_store_builder(ObjectStoreBuilder::memory())
            .build()
            .is_ok());
    }
}

/*!
Defining the [Table] struct that represents an iceberg table.

A [Table] is the parsed form of one specific metadata file. It remembers which file
it was read from, so two tables are only equal if they were produced by the same
metadata version.
*/

use std::{collections::HashMap, fmt, sync::Arc};

use object_store::ObjectStore;
use tracing::{debug, instrument};

use icekit_spec::spec::{
    partition::PartitionSpec,
    schema::Schema,
    snapshot::Snapshot,
    sort::SortOrder,
    table_metadata::TableMetadata,
};

use crate::{
    catalog::{identifier::Identifier, Catalog},
    error::Error,
    object_store::{store::IcebergStore, ObjectStoreBuilder},
};

use self::table_builder::TableBuilder;

pub mod table_builder;

/// Iceberg table
#[derive(Clone)]
pub struct Table {
    identifier: Identifier,
    metadata: TableMetadata,
    metadata_location: String,
    object_store: Arc<dyn ObjectStore>,
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("identifier", &self.identifier)
            .field("metadata_location", &self.metadata_location)
            .field("metadata", &self.metadata)
            .field("object_store", &format_args!("{}", self.object_store))
            .finish()
    }
}

/// Tables are equal if they have the same identifier, were read from the same
/// metadata file and carry equal metadata. The object store is not compared.
impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
            && self.metadata_location == other.metadata_location
            && self.metadata == other.metadata
    }
}

impl Eq for Table {}

/// Public interface of the table.
impl Table {
    /// Start building a table that has never been committed to a catalog
    pub fn builder(
        identifier: Identifier,
        schema: Schema,
        location: &str,
        metadata_location: &str,
    ) -> TableBuilder {
        TableBuilder::new(identifier, schema, location, metadata_location)
    }

    /// Create a table from metadata that is already in memory
    pub fn new(
        identifier: Identifier,
        metadata: TableMetadata,
        metadata_location: &str,
        object_store: Arc<dyn ObjectStore>,
    ) -> Self {
        Table {
            identifier,
            metadata,
            metadata_location: metadata_location.to_owned(),
            object_store,
        }
    }

    /// Read the metadata file at `metadata_location` and create the table from it
    #[instrument(level = "debug", skip(object_store))]
    pub async fn from_location(
        identifier: Identifier,
        metadata_location: &str,
        object_store: Arc<dyn ObjectStore>,
    ) -> Result<Self, Error> {
        let metadata = object_store.get_metadata(metadata_location).await?;
        debug!(table_uuid = %metadata.table_uuid, "loaded table");
        Ok(Table::new(identifier, metadata, metadata_location, object_store))
    }

    /// Resolve the identifier through the catalog and read the metadata file it
    /// currently points to
    pub async fn load(
        catalog: &dyn Catalog,
        identifier: &Identifier,
        object_store_builder: &ObjectStoreBuilder,
    ) -> Result<Self, Error> {
        let entry = catalog.get_table(identifier).await?;
        let object_store = object_store_builder.build_for_location(&entry.metadata_location)?;
        Table::from_location(entry.identifier, &entry.metadata_location, object_store).await
    }

    #[inline]
    /// Get the table identifier in the catalog
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }
    #[inline]
    /// Get the metadata of the table
    pub fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }
    #[inline]
    /// Consume the table and return its metadata
    pub fn into_metadata(self) -> TableMetadata {
        self.metadata
    }
    #[inline]
    /// Location of the metadata file this table was read from or will be written to
    pub fn metadata_location(&self) -> &str {
        &self.metadata_location
    }
    #[inline]
    /// Get the object_store associated to the table
    pub fn object_store(&self) -> Arc<dyn ObjectStore> {
        self.object_store.clone()
    }
    #[inline]
    /// Get the current schema of the table
    pub fn current_schema(&self) -> Result<&Schema, Error> {
        self.metadata.current_schema().map_err(Error::from)
    }
    #[inline]
    /// All schemas of the table by schema id
    pub fn schemas(&self) -> &HashMap<i32, Schema> {
        &self.metadata.schemas
    }
    #[inline]
    /// Get the default partition spec of the table
    pub fn partition_spec(&self) -> Result<&PartitionSpec, Error> {
        self.metadata.default_partition_spec().map_err(Error::from)
    }
    #[inline]
    /// Get the default sort order of the table
    pub fn sort_order(&self) -> Result<&SortOrder, Error> {
        self.metadata.default_sort_order().map_err(Error::from)
    }
    #[inline]
    /// Table properties
    pub fn properties(&self) -> &HashMap<String, String> {
        &self.metadata.properties
    }
    #[inline]
    /// Base location of the table
    pub fn location(&self) -> &str {
        &self.metadata.location
    }
    #[inline]
    /// Current snapshot of the table, `None` if nothing was committed yet
    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.metadata.current_snapshot()
    }
    #[inline]
    /// Lookup a snapshot by id
    pub fn snapshot_by_id(&self, snapshot_id: i64) -> Option<&Snapshot> {
        self.metadata.snapshot_by_id(snapshot_id)
    }
    #[inline]
    /// Lookup the snapshot a branch or tag points to
    pub fn snapshot_by_name(&self, name: &str) -> Option<&Snapshot> {
        self.metadata.snapshot_by_ref(name)
    }
}

#[cfg(test)]
mod tests {
    use object_store::{memory::InMemory, path::Path, PutPayload};
    use uuid::Uuid;

    use icekit_spec::spec::types::{PrimitiveType, StructField, Type};

    use crate::catalog::memory::MemoryCatalog;

    use super::*;

    fn schema() -> Schema {
        Schema::new(
            0,
            vec![
                StructField::new(1, "id", true, Type::Primitive(PrimitiveType::Long), None),
                StructField::new(2, "name", false, Type::Primitive(PrimitiveType::String), None),
            ],
        )
    }

    fn metadata(uuid: Uuid) -> TableMetadata {
        TableMetadata::new_v2(
            schema(),
            PartitionSpec::unpartitioned(),
            SortOrder::unsorted(),
            "memory:///warehouse/db/orders",
            uuid,
            HashMap::new(),
        )
        .unwrap()
    }

    fn identifier() -> Identifier {
        Identifier::new(&["db".to_owned()], "orders")
    }

    #[test]
    fn equality() {
        let store: Arc<dyn ObjectStore> = Arc::new(InMemory::new());
        let uuid = Uuid::new_v4();
        let meta = metadata(uuid);
        let location = "memory:///warehouse/db/orders/metadata/00000-a.metadata.json";

        let table = Table::new(identifier(), meta.clone(), location, store.clone());
        let same = Table::new(identifier(), meta.clone(), location, Arc::new(InMemory::new()));
        assert_eq!(table, same);

        let moved = Table::new(
            identifier(),
            meta.clone(),
            "memory:///warehouse/db/orders/metadata/00001-b.metadata.json",
            store.clone(),
        );
        assert_ne!(table, moved);

        let mut changed = meta.clone();
        changed
            .properties
            .insert("owner".to_owned(), "analytics".to_owned());
        let changed = Table::new(identifier(), changed, location, store.clone());
        assert_ne!(table, changed);

        let renamed = Table::new(
            Identifier::new(&["db".to_owned()], "returns"),
            meta,
            location,
            store,
        );
        assert_ne!(table, renamed);
    }

    #[test]
    fn accessors() {
        let store: Arc<dyn ObjectStore> = Arc::new(InMemory::new());
        let table = Table::new(
            identifier(),
            metadata(Uuid::new_v4()),
            "memory:///warehouse/db/orders/metadata/00000-a.metadata.json",
            store,
        );
        assert_eq!(table.location(), "memory:///warehouse/db/orders");
        assert_eq!(*table.current_schema().unwrap().schema_id(), 0);
        assert_eq!(table.schemas().len(), 1);
        assert!(table.partition_spec().unwrap().is_unpartitioned());
        assert!(table.sort_order().unwrap().is_unsorted());
        assert!(table.properties().is_empty());
        assert!(table.current_snapshot().is_none());
        assert!(table.snapshot_by_id(1).is_none());
        assert!(table.snapshot_by_name("main").is_none());
        assert_eq!(
            table.metadata_location(),
            "memory:///warehouse/db/orders/metadata/00000-a.metadata.json"
        );
    }

    #[tokio::test]
    async fn load_through_catalog() {
        let store = Arc::new(InMemory::new());
        let meta = metadata(Uuid::new_v4());
        let location = "/warehouse/db/orders/metadata/00000-a.metadata.json";
        store
            .put(
                &Path::from(location),
                PutPayload::from(serde_json::to_vec(&meta).unwrap()),
            )
            .await
            .unwrap();

        let catalog = MemoryCatalog::new("test");
        catalog.register_table(&identifier(), location).await.unwrap();

        let builder = ObjectStoreBuilder::Memory(store);
        let table = Table::load(&catalog, &identifier(), &builder).await.unwrap();
        assert_eq!(table.metadata(), &meta);
        assert_eq!(table.metadata_location(), location);

        let missing = Identifier::new(&["db".to_owned()], "missing");
        assert!(matches!(
            Table::load(&catalog, &missing, &builder).await,
            Err(Error::NoSuchTable)
        ));
    }
}

use std::sync::Arc;

use icekit::{
    catalog::{identifier::Identifier, memory::MemoryCatalog, namespace::Namespace, Catalog},
    error::Error,
    object_store::{store::IcebergStore, ObjectStoreBuilder},
    spec::{
        schema::Schema,
        table_metadata::new_metadata_location,
        types::{PrimitiveType, StructField, Type},
    },
    table::Table,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn schema() -> Schema {
    Schema::new(
        0,
        vec![
            StructField::new(1, "id", true, Type::Primitive(PrimitiveType::Long), None),
            StructField::new(
                2,
                "amount",
                false,
                Type::Primitive(PrimitiveType::Decimal {
                    precision: 10,
                    scale: 2,
                }),
                None,
            ),
        ],
    )
}

#[tokio::test]
async fn create_register_load_and_commit() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let location = format!("{}/sales/orders", dir.path().display());
    let identifier = Identifier::new(&["sales".to_owned()], "orders");

    let first_location = new_metadata_location(&location, 0).unwrap();
    let table = Table::builder(identifier.clone(), schema(), &location, &first_location)
        .build()
        .unwrap();
    table
        .object_store()
        .put_metadata(table.metadata_location(), table.metadata())
        .await
        .unwrap();

    let catalog = MemoryCatalog::new("warehouse");
    catalog
        .register_table(&identifier, &first_location)
        .await
        .unwrap();

    let object_store_builder = ObjectStoreBuilder::filesystem("/").unwrap();
    let loaded = Table::load(&catalog, &identifier, &object_store_builder)
        .await
        .unwrap();
    assert_eq!(loaded, table);

    let mut metadata = loaded.metadata().clone();
    metadata
        .properties
        .insert("comment".to_owned(), "daily orders".to_owned());
    let second_location = new_metadata_location(&location, 1).unwrap();
    loaded
        .object_store()
        .put_metadata(&second_location, &metadata)
        .await
        .unwrap();
    catalog
        .swap_metadata_location(&identifier, &first_location, &second_location)
        .await
        .unwrap();

    let reloaded = Table::load(&catalog, &identifier, &object_store_builder)
        .await
        .unwrap();
    assert_ne!(reloaded, loaded);
    assert_eq!(reloaded.metadata(), &metadata);
    assert_eq!(reloaded.metadata_location(), second_location);

    let stale = catalog
        .swap_metadata_location(&identifier, &first_location, &second_location)
        .await;
    assert!(matches!(stale, Err(Error::CommitConflict { .. })));

    let listed = catalog
        .list_tables(&Namespace::try_new(&["sales".to_owned()]).unwrap())
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].metadata_location, second_location);
}

#[tokio::test]
async fn same_metadata_different_file() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let location = format!("{}/t", dir.path().display());
    let identifier = Identifier::new(&["db".to_owned()], "t");
    let table = Table::builder(
        identifier.clone(),
        schema(),
        &location,
        &new_metadata_location(&location, 0).unwrap(),
    )
    .build()
    .unwrap();

    let copy_location = new_metadata_location(&location, 0).unwrap();
    let store = table.object_store();
    store
        .put_metadata(table.metadata_location(), table.metadata())
        .await
        .unwrap();
    store
        .put_metadata(&copy_location, table.metadata())
        .await
        .unwrap();

    let original = Table::from_location(
        identifier.clone(),
        table.metadata_location(),
        Arc::clone(&store),
    )
    .await
    .unwrap();
    let copy = Table::from_location(identifier, &copy_location, store)
        .await
        .unwrap();
    assert_eq!(original.metadata(), copy.metadata());
    assert_ne!(original, copy);
}

/*! Reading and writing metadata files through an [ObjectStore]
*/
use std::io::BufReader;

use async_trait::async_trait;
use bytes::BytesMut;
use futures::TryStreamExt;
use icekit_spec::{table_metadata::TableMetadata, util::strip_prefix};
use object_store::{GetResultPayload, ObjectStore};
use tracing::{debug, instrument};

use crate::error::Error;

/// Simplify interaction with metadata files
#[async_trait]
pub trait IcebergStore {
    /// Read and parse the metadata file at `location`.
    ///
    /// Files served from the local filesystem are parsed straight from the file
    /// handle on the blocking thread pool. Everything else is parsed from the
    /// collected byte stream. The handle or stream is released when the read ends,
    /// successful or not.
    async fn get_metadata(&self, location: &str) -> Result<TableMetadata, Error>;
    /// Write metadata file to object_storage
    async fn put_metadata(&self, location: &str, metadata: &TableMetadata) -> Result<(), Error>;
}

#[async_trait]
impl<T: ObjectStore + ?Sized> IcebergStore for T {
    #[instrument(level = "debug", skip(self))]
    async fn get_metadata(&self, location: &str) -> Result<TableMetadata, Error> {
        let result = self.get(&strip_prefix(location).into()).await?;
        match result.payload {
            GetResultPayload::File(file, path) => {
                debug!(path = %path.display(), "reading metadata from local file");
                let metadata = tokio::task::spawn_blocking(move || {
                    TableMetadata::from_reader(BufReader::new(file))
                })
                .await??;
                Ok(metadata)
            }
            GetResultPayload::Stream(stream) => {
                let bytes = stream
                    .try_fold(BytesMut::new(), |mut acc, chunk| async move {
                        acc.extend_from_slice(&chunk);
                        Ok::<_, object_store::Error>(acc)
                    })
                    .await?;
                debug!(size = bytes.len(), "read metadata from stream");
                Ok(TableMetadata::from_slice(&bytes)?)
            }
        }
    }

    #[instrument(level = "debug", skip(self, metadata))]
    async fn put_metadata(&self, location: &str, metadata: &TableMetadata) -> Result<(), Error> {
        self.put(
            &strip_prefix(location).into(),
            serde_json::to_vec(metadata)?.into(),
        )
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Arc};

    use icekit_spec::{
        partition::PartitionSpec,
        schema::Schema,
        sort::SortOrder,
        types::{PrimitiveType, StructField, Type},
    };
    use object_store::{local::LocalFileSystem, memory::InMemory, ObjectStore};
    use uuid::Uuid;

    use super::*;

    fn metadata(location: &str) -> TableMetadata {
        TableMetadata::new_v2(
            Schema::new(
                0,
                vec![StructField::new(
                    1,
                    "id",
                    true,
                    Type::Primitive(PrimitiveType::Long),
                    None,
                )],
            ),
            PartitionSpec::unpartitioned(),
            SortOrder::unsorted(),
            location,
            Uuid::new_v4(),
            HashMap::new(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn stream_payload() {
        let store: Arc<dyn ObjectStore> = Arc::new(InMemory::new());
        let location = "memory:///warehouse/t/metadata/00000-a.metadata.json";
        let written = metadata("memory:///warehouse/t");
        store.put_metadata(location, &written).await.unwrap();
        let read = store.get_metadata(location).await.unwrap();
        assert_eq!(read, written);
    }

    #[tokio::test]
    async fn file_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileSystem::new_with_prefix(dir.path()).unwrap();
        let location = "/t/metadata/00000-a.metadata.json";
        let written = metadata("/t");
        store.put_metadata(location, &written).await.unwrap();
        let read = store.get_metadata(location).await.unwrap();
        assert_eq!(read, written);
    }

    #[tokio::test]
    async fn missing_and_malformed() {
        let store = InMemory::new();
        assert!(matches!(
            store.get_metadata("/nothing/here.metadata.json").await,
            Err(Error::ObjectStore(_))
        ));

        store
            .put(&"broken.metadata.json".into(), b"{]".to_vec().into())
            .await
            .unwrap();
        assert!(matches!(
            store.get_metadata("/broken.metadata.json").await,
            Err(Error::Iceberg(icekit_spec::error::Error::MalformedMetadata(_)))
        ));
    }
}

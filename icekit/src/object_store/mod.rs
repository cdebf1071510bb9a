/*!
Resolving object stores for table and metadata locations.

A [Bucket] is the part of a location that selects a store, an
[ObjectStoreBuilder] is a template that turns a bucket into a configured
[ObjectStore].
*/

use std::{fmt::Display, path::Path, sync::Arc};

use object_store::{
    aws::{AmazonS3Builder, AmazonS3ConfigKey, S3CopyIfNotExists},
    azure::{AzureConfigKey, MicrosoftAzureBuilder},
    gcp::{GoogleCloudStorageBuilder, GoogleConfigKey},
    local::LocalFileSystem,
    memory::InMemory,
    ObjectStore,
};
use url::Url;

use crate::error::Error;

pub mod store;

/// Type for buckets for different cloud providers
#[derive(Debug, PartialEq, Eq)]
pub enum Bucket<'s> {
    /// Aws S3 bucket
    S3(&'s str),
    /// GCS bucket
    GCS(&'s str),
    /// Azure container
    Azure(&'s str),
    /// No bucket
    Local,
}

impl Display for Bucket<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bucket::S3(s) => write!(f, "s3://{s}"),
            Bucket::GCS(s) => write!(f, "gs://{s}"),
            Bucket::Azure(s) => write!(f, "https://{s}"),
            Bucket::Local => write!(f, ""),
        }
    }
}

const AZURE_HOSTS: [&str; 4] = [
    "dfs.core.windows.net",
    "blob.core.windows.net",
    "dfs.fabric.microsoft.com",
    "blob.fabric.microsoft.com",
];

/// First path segment after `prefix`, rejecting empty bucket names
fn bucket_after<'s>(path: &'s str, prefix: &str) -> Result<&'s str, Error> {
    path[prefix.len()..]
        .split('/')
        .next()
        .filter(|bucket| !bucket.is_empty())
        .ok_or(Error::NotFound("Bucket in path".to_owned(), path.to_owned()))
}

impl Bucket<'_> {
    /// Get the bucket and cloud provider from the location string
    pub fn from_path(path: &str) -> Result<Bucket<'_>, Error> {
        if let Some(prefix) = ["s3://", "s3a://"].iter().find(|p| path.starts_with(**p)) {
            bucket_after(path, prefix).map(Bucket::S3)
        } else if let Some(prefix) = ["gcs://", "gs://"].iter().find(|p| path.starts_with(**p)) {
            bucket_after(path, prefix).map(Bucket::GCS)
        } else if path.starts_with("https://") && AZURE_HOSTS.iter().any(|h| path.contains(h)) {
            path.trim_start_matches("https://")
                .split('/')
                .nth(1)
                .filter(|container| !container.is_empty())
                .map(Bucket::Azure)
                .ok_or(Error::NotFound(
                    "Container in path".to_owned(),
                    path.to_owned(),
                ))
        } else {
            Ok(Bucket::Local)
        }
    }
}

/// A template for object stores that is turned into a store for a particular bucket.
#[derive(Debug, Clone)]
pub enum ObjectStoreBuilder {
    /// Microsoft Azure builder
    Azure(Box<MicrosoftAzureBuilder>),
    /// AWS s3 builder
    S3(Box<AmazonS3Builder>),
    /// Google Cloud Storage builder
    GCS(Box<GoogleCloudStorageBuilder>),
    /// Filesystem store
    Filesystem(Arc<LocalFileSystem>),
    /// In memory store
    Memory(Arc<InMemory>),
}

impl ObjectStoreBuilder {
    /// Create a new Microsoft Azure ObjectStoreBuilder
    pub fn azure() -> Self {
        ObjectStoreBuilder::Azure(Box::new(MicrosoftAzureBuilder::from_env()))
    }
    /// Create new AWS S3 Object Store builder
    pub fn s3() -> Self {
        ObjectStoreBuilder::S3(Box::new(AmazonS3Builder::from_env()))
    }
    /// Create new Google Cloud Storage builder
    pub fn gcs() -> Self {
        ObjectStoreBuilder::GCS(Box::new(GoogleCloudStorageBuilder::from_env()))
    }
    /// Create a new FileSystem ObjectStoreBuilder rooted at `prefix`
    pub fn filesystem(prefix: impl AsRef<Path>) -> Result<Self, Error> {
        Ok(ObjectStoreBuilder::Filesystem(Arc::new(
            LocalFileSystem::new_with_prefix(prefix)?,
        )))
    }
    /// Create a new InMemory ObjectStoreBuilder
    pub fn memory() -> Self {
        ObjectStoreBuilder::Memory(Arc::new(InMemory::new()))
    }
    /// Picks a builder from the scheme of `location`.
    ///
    /// `s3`, `s3a`, `gs`, `gcs` and Azure `https` locations use the cloud builders
    /// configured from the environment. Plain paths and `file` URLs use the local
    /// filesystem, `memory` URLs a fresh in-memory store.
    pub fn from_location(location: &str) -> Result<Self, Error> {
        match Bucket::from_path(location)? {
            Bucket::S3(_) => return Ok(Self::s3()),
            Bucket::GCS(_) => return Ok(Self::gcs()),
            Bucket::Azure(_) => return Ok(Self::azure()),
            Bucket::Local => (),
        }
        match Url::parse(location) {
            Ok(url) if url.scheme() == "file" => {
                Ok(ObjectStoreBuilder::Filesystem(Arc::new(LocalFileSystem::new())))
            }
            Ok(url) if url.scheme() == "memory" => Ok(Self::memory()),
            Ok(url) => Err(Error::NotSupported(format!(
                "Object store scheme {}",
                url.scheme()
            ))),
            Err(url::ParseError::RelativeUrlWithoutBase) if location.starts_with('/') => {
                Ok(ObjectStoreBuilder::Filesystem(Arc::new(LocalFileSystem::new())))
            }
            Err(err) => Err(err.into()),
        }
    }
    /// Set config value for builder
    pub fn with_config(
        self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, Error> {
        match self {
            ObjectStoreBuilder::Azure(azure) => {
                let key: AzureConfigKey = key.into().parse()?;
                Ok(ObjectStoreBuilder::Azure(Box::new(
                    azure.with_config(key, value),
                )))
            }
            ObjectStoreBuilder::S3(aws) => {
                let key: AmazonS3ConfigKey = key.into().parse()?;
                Ok(ObjectStoreBuilder::S3(Box::new(
                    aws.with_config(key, value),
                )))
            }
            ObjectStoreBuilder::GCS(gcs) => {
                let key: GoogleConfigKey = key.into().parse()?;
                Ok(ObjectStoreBuilder::GCS(Box::new(
                    gcs.with_config(key, value),
                )))
            }
            x => Ok(x),
        }
    }
    /// Create objectstore from template
    pub fn build(&self, bucket: Bucket) -> Result<Arc<dyn ObjectStore>, Error> {
        match (bucket, self) {
            (Bucket::Azure(bucket), Self::Azure(builder)) => Ok(Arc::new(
                (**builder).clone().with_container_name(bucket).build()?,
            )),
            (Bucket::S3(bucket), Self::S3(builder)) => Ok(Arc::new(
                (**builder)
                    .clone()
                    .with_bucket_name(bucket)
                    .with_copy_if_not_exists(S3CopyIfNotExists::Multipart)
                    .build()?,
            )),
            (Bucket::GCS(bucket), Self::GCS(builder)) => Ok(Arc::new(
                (**builder).clone().with_bucket_name(bucket).build()?,
            )),
            (Bucket::Local, Self::Filesystem(object_store)) => Ok(object_store.clone()),
            (Bucket::Local, Self::Memory(object_store)) => Ok(object_store.clone()),
            _ => Err(Error::NotSupported("Object store protocol".to_owned())),
        }
    }
    /// Store for the bucket of `location`
    pub fn build_for_location(&self, location: &str) -> Result<Arc<dyn ObjectStore>, Error> {
        self.build(Bucket::from_path(location)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_from_path() {
        assert_eq!(
            Bucket::from_path("s3://my-bucket/path/to/file").unwrap(),
            Bucket::S3("my-bucket")
        );
        assert_eq!(
            Bucket::from_path("s3a://my-bucket/path").unwrap(),
            Bucket::S3("my-bucket")
        );
        assert_eq!(
            Bucket::from_path("gs://my-bucket/path").unwrap(),
            Bucket::GCS("my-bucket")
        );
        assert_eq!(
            Bucket::from_path("gcs://my-bucket/path").unwrap(),
            Bucket::GCS("my-bucket")
        );
        assert_eq!(
            Bucket::from_path("https://account.dfs.core.windows.net/container/path").unwrap(),
            Bucket::Azure("container")
        );
        assert_eq!(
            Bucket::from_path("https://account.blob.fabric.microsoft.com/container/path")
                .unwrap(),
            Bucket::Azure("container")
        );
        assert_eq!(Bucket::from_path("/local/path").unwrap(), Bucket::Local);
        assert_eq!(
            Bucket::from_path("https://example.com/path").unwrap(),
            Bucket::Local
        );
    }

    #[test]
    fn empty_bucket() {
        assert!(Bucket::from_path("s3://").is_err());
        assert!(Bucket::from_path("gs:///path").is_err());
    }

    #[test]
    fn builder_from_location() {
        assert!(matches!(
            ObjectStoreBuilder::from_location("file:///tmp/warehouse").unwrap(),
            ObjectStoreBuilder::Filesystem(_)
        ));
        assert!(matches!(
            ObjectStoreBuilder::from_location("/tmp/warehouse").unwrap(),
            ObjectStoreBuilder::Filesystem(_)
        ));
        assert!(matches!(
            ObjectStoreBuilder::from_location("memory:///warehouse").unwrap(),
            ObjectStoreBuilder::Memory(_)
        ));
        assert!(matches!(
            ObjectStoreBuilder::from_location("hdfs://namenode/warehouse"),
            Err(Error::NotSupported(_))
        ));
    }

    #[test]
    fn protocol_mismatch() {
        let builder = ObjectStoreBuilder::memory();
        assert!(builder.build_for_location("/warehouse/t").is_ok());
        assert!(matches!(
            builder.build(Bucket::S3("bucket")),
            Err(Error::NotSupported(_))
        ));
    }
}

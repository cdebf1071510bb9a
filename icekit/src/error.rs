/*!
Error type for icekit
*/

use thiserror::Error;

#[derive(Error, Debug)]
/// icekit error
pub enum Error {
    /// The identifier doesn't have the shape the catalog requires
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
    /// The catalog has no entry for the identifier
    #[error("no such table")]
    NoSuchTable,
    /// The catalog entry exists but doesn't describe an Iceberg table
    #[error("table {0} is not an iceberg table")]
    NotAnIcebergTable(String),
    /// Failure reported by the catalog backend
    #[error("{context}: {source}")]
    Backend {
        /// What was being done, naming the affected entity
        context: String,
        /// The backend's own error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The catalog points to another metadata file than the one the commit was based on
    #[error("commit conflict: expected metadata location {expected}, found {found}")]
    CommitConflict {
        /// Location the commit was based on
        expected: String,
        /// Location the catalog currently points to
        found: String,
    },
    /// A table with this identifier is already registered
    #[error("table {0} already exists")]
    AlreadyExists(String),
    /// A catalog operation did not finish within its deadline
    #[error("{0} timed out")]
    Timeout(String),
    /// Not found
    #[error("{0} {1} not found.")]
    NotFound(String, String),
    /// Not supported
    #[error("Feature {0} is not supported.")]
    NotSupported(String),
    /// Metadata model error
    #[error(transparent)]
    Iceberg(#[from] icekit_spec::error::Error),
    /// Serde json
    #[error(transparent)]
    JSONSerde(#[from] serde_json::Error),
    /// Io error
    #[error(transparent)]
    IO(#[from] std::io::Error),
    /// Objectstore error
    #[error(transparent)]
    ObjectStore(#[from] object_store::Error),
    /// Url parse
    #[error(transparent)]
    Url(#[from] url::ParseError),
    /// Blocking task failed
    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
    /// Error from an external crate
    #[error(transparent)]
    External(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wraps a backend failure together with a description of the failed operation
    pub fn backend(
        context: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Backend {
            context: context.into(),
            source: source.into(),
        }
    }
}

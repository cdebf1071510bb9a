/*!
Error type for the table metadata model
*/

use thiserror::Error;

#[derive(Error, Debug)]
/// Metadata error
pub enum Error {
    /// Invalid format
    #[error("{0} doesn't have the right format")]
    InvalidFormat(String),
    /// Schema error
    #[error("Column {0} not in schema {1}.")]
    ColumnNotInSchema(String, String),
    /// Conversion error
    #[error("Failed to convert {0} to {1}.")]
    Conversion(String, String),
    /// Not found
    #[error("{0} not found.")]
    NotFound(String),
    /// The bytes of a metadata file could not be decoded into table metadata
    #[error("malformed table metadata: {0}")]
    MalformedMetadata(#[source] serde_json::Error),
    /// Metadata file versions start at zero
    #[error("invalid table version: {0} must be a non-negative integer")]
    InvalidVersion(i64),
    /// Serde json
    #[error(transparent)]
    JSONSerde(#[from] serde_json::Error),
    /// parse int
    #[error(transparent)]
    ParseInt(#[from] std::num::ParseIntError),
    /// Try from int error
    #[error(transparent)]
    TryFromInt(#[from] std::num::TryFromIntError),
    /// derive builder
    #[error(transparent)]
    DeriveBuilder(#[from] derive_builder::UninitializedFieldError),
}

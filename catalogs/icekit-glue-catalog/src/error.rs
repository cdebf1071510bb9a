use aws_sdk_glue::{
    config::http::HttpResponse,
    error::SdkError,
    operation::{get_table::GetTableError, get_tables::GetTablesError, update_table::UpdateTableError},
};
use icekit::error::Error as IcebergError;
use thiserror::Error;

/// Errors of the Glue backend calls
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Text(String),
    #[error("glue entity {0} not found")]
    EntityNotFound(String),
    #[error("glue table {0} was modified concurrently")]
    ConcurrentModification(String),
    #[error(transparent)]
    GetTableError(#[from] SdkError<GetTableError, HttpResponse>),
    #[error(transparent)]
    GetTablesError(#[from] SdkError<GetTablesError, HttpResponse>),
    #[error(transparent)]
    UpdateTableError(#[from] SdkError<UpdateTableError, HttpResponse>),
    #[error(transparent)]
    BuildError(#[from] aws_sdk_glue::error::BuildError),
}

impl From<Error> for IcebergError {
    fn from(value: Error) -> Self {
        match value {
            Error::EntityNotFound(_) => IcebergError::NoSuchTable,
            value => IcebergError::External(Box::new(value)),
        }
    }
}

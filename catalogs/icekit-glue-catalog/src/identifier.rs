/*!
Mapping between Iceberg identifiers and Glue databases and tables.

Glue has exactly one namespace level, the database. A table identifier is therefore
`[database, table]` and a namespace is `[database]`.
*/

use icekit::{
    catalog::{identifier::Identifier, namespace::Namespace},
    error::Error,
};

/// Splits a table identifier into Glue database and table name
pub fn identifier_to_glue_table(identifier: &Identifier) -> Result<(&str, &str), Error> {
    match identifier.namespace().levels() {
        [database] => Ok((database.as_str(), identifier.name())),
        _ => Err(Error::InvalidIdentifier(format!(
            "{identifier}, expected [database, table]"
        ))),
    }
}

/// Glue database of a namespace
pub fn namespace_to_glue_database(namespace: &Namespace) -> Result<&str, Error> {
    match namespace.levels() {
        [database] => Ok(database.as_str()),
        _ => Err(Error::InvalidIdentifier(format!(
            "{namespace}, expected [database]"
        ))),
    }
}

/// Identifier of a table in a Glue database
pub fn glue_table_identifier(database: &str, table: &str) -> Identifier {
    Identifier::new(&[database.to_owned()], table)
}

/// Namespace of a Glue database
pub fn glue_database_identifier(database: &str) -> Namespace {
    Namespace::new(&[database.to_owned()])
}

/*!
 * Model
*/
pub mod identifier;
pub mod namespace;
pub mod partition;
pub mod schema;
pub mod snapshot;
pub mod sort;
pub mod table_metadata;
pub mod types;

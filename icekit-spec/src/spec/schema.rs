/*!
 * Schemas
*/
use std::{fmt, ops::Deref, str};

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use crate::error::Error;

use super::types::{StructField, StructType};

/// Id given to the first schema of a table
pub static DEFAULT_SCHEMA_ID: i32 = 0;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Builder, Getters)]
#[serde(rename_all = "kebab-case")]
#[builder(setter(prefix = "with"), build_fn(error = "Error"))]
/// Names and types of fields in a table.
pub struct Schema {
    /// Identifier of the schema
    #[builder(default = "DEFAULT_SCHEMA_ID")]
    schema_id: i32,
    /// Set of primitive fields that identify rows in a table.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option), default)]
    identifier_field_ids: Option<Vec<i32>>,

    #[serde(flatten)]
    /// The struct fields
    fields: StructType,
}

impl Deref for Schema {
    type Target = StructType;
    fn deref(&self) -> &Self::Target {
        &self.fields
    }
}

impl Schema {
    /// Schema with the given id and top-level fields
    pub fn new(schema_id: i32, fields: Vec<StructField>) -> Self {
        Schema {
            schema_id,
            identifier_field_ids: None,
            fields: StructType::new(fields),
        }
    }
    /// Create schema builder
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }
    /// Highest field id used anywhere in the schema, nested fields included
    pub fn highest_field_id(&self) -> Option<i32> {
        self.fields.all_field_ids().into_iter().max()
    }
    /// Checks whether a field with this id exists at any depth
    pub fn contains_field_id(&self, id: i32) -> bool {
        self.fields.all_field_ids().contains(&id)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            &serde_json::to_string(self).map_err(|_| fmt::Error)?,
        )
    }
}

impl str::FromStr for Schema {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(Error::from)
    }
}

impl From<SchemaV2> for Schema {
    fn from(value: SchemaV2) -> Self {
        Schema {
            schema_id: value.schema_id,
            identifier_field_ids: value.identifier_field_ids,
            fields: value.fields,
        }
    }
}

impl From<SchemaV1> for Schema {
    fn from(value: SchemaV1) -> Self {
        Schema {
            schema_id: value.schema_id.unwrap_or(DEFAULT_SCHEMA_ID),
            identifier_field_ids: value.identifier_field_ids,
            fields: value.fields,
        }
    }
}

impl From<Schema> for SchemaV2 {
    fn from(value: Schema) -> Self {
        SchemaV2 {
            schema_id: value.schema_id,
            identifier_field_ids: value.identifier_field_ids,
            fields: value.fields,
        }
    }
}

impl From<Schema> for SchemaV1 {
    fn from(value: Schema) -> Self {
        SchemaV1 {
            schema_id: Some(value.schema_id),
            identifier_field_ids: value.identifier_field_ids,
            fields: value.fields,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
/// Schema as written by format version 2
pub struct SchemaV2 {
    /// Identifier of the schema
    pub schema_id: i32,
    /// Set of primitive fields that identify rows in a table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier_field_ids: Option<Vec<i32>>,

    #[serde(flatten)]
    /// The struct fields
    pub fields: StructType,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
/// Schema as written by format version 1, where the id is optional
pub struct SchemaV1 {
    /// Identifier of the schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_id: Option<i32>,
    /// Set of primitive fields that identify rows in a table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier_field_ids: Option<Vec<i32>>,

    #[serde(flatten)]
    /// The struct fields
    pub fields: StructType,
}

#[cfg(test)]
mod tests {
    use crate::spec::types::{PrimitiveType, Type};

    use super::*;

    #[test]
    fn schema() {
        let record = r#"
        {
            "type": "struct",
            "schema-id": 1,
            "fields": [ {
            "id": 1,
            "name": "id",
            "required": true,
            "type": "uuid"
            }, {
            "id": 2,
            "name": "data",
            "required": false,
            "type": "int"
            } ]
            }
        "#;

        let result: Schema = record.parse().unwrap();
        assert_eq!(1, *result.schema_id());
        assert_eq!(
            Type::Primitive(PrimitiveType::Uuid),
            result.fields()[0].field_type
        );
        assert!(result[0].required);
        assert!(!result[1].required);
        assert_eq!(result.highest_field_id(), Some(2));
        assert!(result.contains_field_id(2));
        assert!(!result.contains_field_id(3));
    }

    #[test]
    fn v1_schema_without_id() {
        let record = r#"
        {
            "type": "struct",
            "fields": [ {
            "id": 1,
            "name": "id",
            "required": true,
            "type": "long"
            } ]
        }
        "#;
        let v1: SchemaV1 = serde_json::from_str(record).unwrap();
        let schema = Schema::from(v1);
        assert_eq!(*schema.schema_id(), DEFAULT_SCHEMA_ID);
        assert_eq!(
            schema,
            Schema::new(
                0,
                vec![StructField::new(
                    1,
                    "id",
                    true,
                    Type::Primitive(PrimitiveType::Long),
                    None
                )]
            )
        );
    }
}

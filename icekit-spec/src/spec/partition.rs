/*!
 * Partitioning
 *
 * Partition specs are carried as metadata only. Transforms are named here but
 * never evaluated.
*/

use std::{
    fmt::{self, Display},
    str,
};

use derive_getters::Getters;
use serde::{
    de::{Error as SerdeError, IntoDeserializer},
    Deserialize, Deserializer, Serialize, Serializer,
};

use derive_builder::Builder;

use crate::error::Error;

/// Id of the partition spec created together with a table
pub static DEFAULT_PARTITION_SPEC_ID: i32 = 0;

/// Partition field ids of format version 1 tables start here
pub(crate) static PARTITION_FIELD_ID_START: i32 = 1000;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "lowercase", remote = "Self")]
/// A Transform that is applied to each source column to produce a partition value.
pub enum Transform {
    /// Source value, unmodified
    Identity,
    /// Hash of value, mod N
    Bucket(u32),
    /// Value truncated to width
    Truncate(u32),
    /// Extract a date or timestamp year as years from 1970
    Year,
    /// Extract a date or timestamp month as months from 1970-01-01
    Month,
    /// Extract a date or timestamp day as days from 1970-01-01
    Day,
    /// Extract a date or timestamp hour as hours from 1970-01-01 00:00:00
    Hour,
    /// Always produces `null`
    Void,
}

/// Parses the `[n]` argument of `bucket[n]` and `truncate[n]`
fn parse_width<E: SerdeError>(arg: &str) -> Result<u32, E> {
    arg.trim_start_matches('[')
        .trim_end_matches(']')
        .parse()
        .map_err(E::custom)
}

impl<'de> Deserialize<'de> for Transform {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if let Some(arg) = s.strip_prefix("bucket") {
            parse_width(arg).map(Transform::Bucket)
        } else if let Some(arg) = s.strip_prefix("truncate") {
            parse_width(arg).map(Transform::Truncate)
        } else {
            Transform::deserialize(s.into_deserializer())
        }
    }
}

impl Serialize for Transform {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Transform::Bucket(_) | Transform::Truncate(_) => {
                serializer.serialize_str(&self.to_string())
            }
            x => Transform::serialize(x, serializer),
        }
    }
}

impl Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Identity => write!(f, "identity"),
            Transform::Year => write!(f, "year"),
            Transform::Month => write!(f, "month"),
            Transform::Day => write!(f, "day"),
            Transform::Hour => write!(f, "hour"),
            Transform::Bucket(i) => write!(f, "bucket[{i}]"),
            Transform::Truncate(i) => write!(f, "truncate[{i}]"),
            Transform::Void => write!(f, "void"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Getters)]
#[serde(rename_all = "kebab-case")]
/// Partition fields capture the transform from table data to partition values.
pub struct PartitionField {
    /// A source column id from the table’s schema
    source_id: i32,
    /// Unique across all partition specs of a table
    field_id: i32,
    /// A partition name.
    name: String,
    /// A transform that is applied to the source column to produce a partition value.
    transform: Transform,
}

impl PartitionField {
    /// Create a new PartitionField
    pub fn new(source_id: i32, field_id: i32, name: &str, transform: Transform) -> Self {
        Self {
            source_id,
            field_id,
            name: name.to_string(),
            transform,
        }
    }
}

/// Partition field of a format version 1 spec, where the field id may be missing
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct PartitionFieldV1 {
    pub source_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_id: Option<i32>,
    pub name: String,
    pub transform: Transform,
}

impl PartitionFieldV1 {
    /// Assigns missing ids by position, the way version 1 writers did
    pub(crate) fn into_field(self, position: usize) -> Result<PartitionField, Error> {
        let field_id = match self.field_id {
            Some(id) => id,
            None => PARTITION_FIELD_ID_START + i32::try_from(position)?,
        };
        Ok(PartitionField {
            source_id: self.source_id,
            field_id,
            name: self.name,
            transform: self.transform,
        })
    }
}

impl From<PartitionField> for PartitionFieldV1 {
    fn from(value: PartitionField) -> Self {
        PartitionFieldV1 {
            source_id: value.source_id,
            field_id: Some(value.field_id),
            name: value.name,
            transform: value.transform,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default, Builder, Getters)]
#[serde(rename_all = "kebab-case")]
#[builder(setter(prefix = "with"), build_fn(error = "Error"))]
/// Partition spec that defines how to produce a tuple of partition values from a record.
pub struct PartitionSpec {
    /// Identifier for PartitionSpec
    #[builder(default = "DEFAULT_PARTITION_SPEC_ID")]
    spec_id: i32,
    /// Details of the partition spec
    #[builder(setter(each(name = "with_partition_field")), default)]
    fields: Vec<PartitionField>,
}

impl PartitionSpec {
    /// Create partition spec builder
    pub fn builder() -> PartitionSpecBuilder {
        PartitionSpecBuilder::default()
    }
    /// A spec without fields
    pub fn unpartitioned() -> Self {
        PartitionSpec::default()
    }
    /// True when the spec has no fields
    pub fn is_unpartitioned(&self) -> bool {
        self.fields.is_empty()
    }
    /// Highest partition field id of the spec
    pub fn highest_field_id(&self) -> Option<i32> {
        self.fields.iter().map(|field| field.field_id).max()
    }
}

impl fmt::Display for PartitionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            &serde_json::to_string(self).map_err(|_| fmt::Error)?,
        )
    }
}

impl str::FromStr for PartitionSpec {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_spec() {
        let spec = r#"
        {
        "spec-id": 1,
        "fields": [ {
            "source-id": 4,
            "field-id": 1000,
            "name": "ts_day",
            "transform": "day"
            }, {
            "source-id": 1,
            "field-id": 1001,
            "name": "id_bucket",
            "transform": "bucket[16]"
            }, {
            "source-id": 2,
            "field-id": 1002,
            "name": "id_truncate",
            "transform": "truncate[4]"
            } ]
        }
        "#;

        let partition_spec: PartitionSpec = spec.parse().unwrap();
        assert_eq!(*partition_spec.spec_id(), 1);
        assert_eq!(partition_spec.fields()[0].transform(), &Transform::Day);
        assert_eq!(partition_spec.fields()[1].transform(), &Transform::Bucket(16));
        assert_eq!(partition_spec.fields()[2].transform(), &Transform::Truncate(4));
        assert_eq!(partition_spec.fields()[2].name(), "id_truncate");
        assert_eq!(partition_spec.highest_field_id(), Some(1002));

        let written = serde_json::to_value(&partition_spec).unwrap();
        assert_eq!(written["fields"][1]["transform"], "bucket[16]");
    }

    #[test]
    fn builder_defaults() {
        let spec = PartitionSpec::builder()
            .with_partition_field(PartitionField::new(1, 1000, "id", Transform::Identity))
            .build()
            .unwrap();
        assert_eq!(*spec.spec_id(), DEFAULT_PARTITION_SPEC_ID);
        assert!(!spec.is_unpartitioned());
        assert!(PartitionSpec::unpartitioned().is_unpartitioned());
        assert_eq!(PartitionSpec::unpartitioned().highest_field_id(), None);
    }

    #[test]
    fn bad_transform() {
        assert!(serde_json::from_str::<Transform>(r#""bucket[x]""#).is_err());
        assert!(serde_json::from_str::<Transform>(r#""square""#).is_err());
    }

    #[test]
    fn v1_field_ids_by_position() {
        let field: PartitionFieldV1 =
            serde_json::from_str(r#"{"source-id": 3, "name": "x", "transform": "identity"}"#)
                .unwrap();
        assert_eq!(*field.into_field(2).unwrap().field_id(), 1002);
    }
}

//! Table metadata and its JSON codec
//!
//! [`TableMetadata`] is the immutable description of a table at one point in time.
//! Metadata files of format version 1 and 2 are both read into this single shape.
//! Writing uses the format version recorded in the value.
//!
//! The layout of metadata files is defined in the [Iceberg Table Spec](https://iceberg.apache.org/spec/#table-metadata)

use std::{collections::HashMap, fmt, io::Read, str};

use crate::{
    error::Error,
    spec::{
        partition::PartitionSpec,
        sort::{SortOrder, DEFAULT_SORT_ORDER_ID},
    },
};

use serde::{de::Error as _, ser::Error as _, Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use uuid::Uuid;

use super::{
    schema::Schema,
    snapshot::{Snapshot, SnapshotReference},
};

/// Name of the branch that tracks the current snapshot
pub static MAIN_BRANCH: &str = "main";

pub use _serde::{TableMetadataV1, TableMetadataV2};

use _serde::TableMetadataEnum;

#[derive(Debug, PartialEq, Eq, Clone)]
/// In-memory table metadata, independent of the format version it was read from.
pub struct TableMetadata {
    /// Integer Version for the format.
    pub format_version: FormatVersion,
    /// A UUID that identifies the table
    pub table_uuid: Uuid,
    /// Location tables base location
    pub location: String,
    /// The tables highest sequence number
    pub last_sequence_number: i64,
    /// Timestamp in milliseconds from the unix epoch when the table was last updated.
    pub last_updated_ms: i64,
    /// An integer; the highest assigned column ID for the table.
    pub last_column_id: i32,
    /// Schemas by schema id
    pub schemas: HashMap<i32, Schema>,
    /// ID of the table’s current schema.
    pub current_schema_id: i32,
    /// Partition specs by spec id
    pub partition_specs: HashMap<i32, PartitionSpec>,
    /// ID of the “current” spec that writers should use by default.
    pub default_spec_id: i32,
    /// An integer; the highest assigned partition field ID across all partition specs for the table.
    pub last_partition_id: i32,
    /// Table properties
    pub properties: HashMap<String, String>,
    /// Id of the current snapshot, `None` for a table without snapshots
    pub current_snapshot_id: Option<i64>,
    /// Snapshots by snapshot id
    pub snapshots: HashMap<i64, Snapshot>,
    /// Changes of the current snapshot over time
    pub snapshot_log: Vec<SnapshotLog>,
    /// Previous metadata files of the table
    pub metadata_log: Vec<MetadataLog>,
    /// Sort orders by order id
    pub sort_orders: HashMap<i32, SortOrder>,
    /// Default sort order id of the table.
    pub default_sort_order_id: i32,
    /// Named snapshot references, branches and tags
    pub refs: HashMap<String, SnapshotReference>,
}

impl TableMetadata {
    /// Synthesizes the metadata of a table that has never been committed.
    ///
    /// The result is format version 2, has no snapshots and uses the given schema,
    /// partition spec and sort order as its only and current entries.
    ///
    /// # Errors
    ///
    /// * the location is empty
    /// * a partition or sort field refers to a column that is not part of the schema
    /// * the sort order uses the reserved id `0` but has fields
    pub fn new_v2(
        schema: Schema,
        partition_spec: PartitionSpec,
        sort_order: SortOrder,
        location: &str,
        table_uuid: Uuid,
        properties: HashMap<String, String>,
    ) -> Result<Self, Error> {
        if location.is_empty() {
            return Err(Error::InvalidFormat("Table location".to_owned()));
        }
        for source_id in partition_spec
            .fields()
            .iter()
            .map(|field| *field.source_id())
            .chain(sort_order.fields().iter().map(|field| *field.source_id()))
        {
            if !schema.contains_field_id(source_id) {
                return Err(Error::ColumnNotInSchema(
                    source_id.to_string(),
                    schema.schema_id().to_string(),
                ));
            }
        }
        if *sort_order.order_id() == DEFAULT_SORT_ORDER_ID && !sort_order.is_unsorted() {
            return Err(Error::InvalidFormat(
                "Sort order with id 0".to_owned(),
            ));
        }

        let last_column_id = schema.highest_field_id().unwrap_or(0);
        let last_partition_id = partition_spec.highest_field_id().unwrap_or(0);

        Ok(TableMetadata {
            format_version: FormatVersion::V2,
            table_uuid,
            location: location.to_owned(),
            last_sequence_number: 0,
            last_updated_ms: chrono::Utc::now().timestamp_millis(),
            last_column_id,
            current_schema_id: *schema.schema_id(),
            schemas: HashMap::from_iter([(*schema.schema_id(), schema)]),
            default_spec_id: *partition_spec.spec_id(),
            partition_specs: HashMap::from_iter([(*partition_spec.spec_id(), partition_spec)]),
            last_partition_id,
            properties,
            current_snapshot_id: None,
            snapshots: HashMap::new(),
            snapshot_log: Vec::new(),
            metadata_log: Vec::new(),
            default_sort_order_id: *sort_order.order_id(),
            sort_orders: HashMap::from_iter([(*sort_order.order_id(), sort_order)]),
            refs: HashMap::new(),
        })
    }

    /// Parses a metadata document of either format version
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        serde_json::from_slice(bytes).map_err(Error::MalformedMetadata)
    }

    /// Parses a metadata document read from `reader`
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::MalformedMetadata)
    }

    /// The table's current schema
    #[inline]
    pub fn current_schema(&self) -> Result<&Schema, Error> {
        self.schemas
            .get(&self.current_schema_id)
            .ok_or_else(|| Error::NotFound(format!("Schema {}", self.current_schema_id)))
    }

    /// Gets the default partition specification for the table
    #[inline]
    pub fn default_partition_spec(&self) -> Result<&PartitionSpec, Error> {
        self.partition_specs
            .get(&self.default_spec_id)
            .ok_or_else(|| Error::NotFound(format!("Partition spec {}", self.default_spec_id)))
    }

    /// Gets the default sort order for the table
    #[inline]
    pub fn default_sort_order(&self) -> Result<&SortOrder, Error> {
        self.sort_orders
            .get(&self.default_sort_order_id)
            .ok_or_else(|| Error::NotFound(format!("Sort order {}", self.default_sort_order_id)))
    }

    /// Lookup snapshot by id.
    #[inline]
    pub fn snapshot_by_id(&self, snapshot_id: i64) -> Option<&Snapshot> {
        self.snapshots.get(&snapshot_id)
    }

    /// Snapshot a branch or tag points to. `None` if the reference doesn't exist or
    /// points to a snapshot that is no longer part of the metadata.
    #[inline]
    pub fn snapshot_by_ref(&self, ref_name: &str) -> Option<&Snapshot> {
        self.refs
            .get(ref_name)
            .and_then(|reference| self.snapshot_by_id(reference.snapshot_id))
    }

    /// The current snapshot, as tracked by the main branch
    #[inline]
    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.refs
            .get(MAIN_BRANCH)
            .map(|x| x.snapshot_id)
            .or(self.current_snapshot_id)
            .and_then(|snapshot_id| self.snapshots.get(&snapshot_id))
    }
}

/// File name of metadata version `version`: the zero padded version, a random
/// UUID and the `.metadata.json` suffix. Versions wider than five digits are not
/// truncated.
///
/// ```
/// use icekit_spec::table_metadata::generate_metadata_file_name;
/// let name = generate_metadata_file_name(3).unwrap();
/// assert!(name.starts_with("00003-"));
/// assert!(name.ends_with(".metadata.json"));
/// ```
pub fn generate_metadata_file_name(version: i64) -> Result<String, Error> {
    if version < 0 {
        return Err(Error::InvalidVersion(version));
    }
    Ok(format!(
        "{:05}-{}.metadata.json",
        version,
        Uuid::new_v4()
    ))
}

/// Location of metadata version `version` inside the `metadata` directory of the
/// table location
pub fn new_metadata_location(location: &str, version: i64) -> Result<String, Error> {
    Ok(format!(
        "{}/metadata/{}",
        location.trim_end_matches('/'),
        generate_metadata_file_name(version)?
    ))
}

impl Serialize for TableMetadata {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        TableMetadataEnum::try_from(self.clone())
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TableMetadata {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        TableMetadataEnum::deserialize(deserializer)?
            .try_into()
            .map_err(D::Error::custom)
    }
}

impl fmt::Display for TableMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            &serde_json::to_string(self).map_err(|_| fmt::Error)?,
        )
    }
}

impl str::FromStr for TableMetadata {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(s.as_bytes())
    }
}

pub mod _serde {
    use std::collections::HashMap;

    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    use crate::{
        error::Error,
        spec::{
            partition::{PartitionFieldV1, PartitionSpec, PARTITION_FIELD_ID_START},
            schema::{SchemaV1, SchemaV2},
            snapshot::{SnapshotReference, SnapshotRetention, SnapshotV1, SnapshotV2},
            sort::{SortOrder, DEFAULT_SORT_ORDER_ID},
        },
    };

    use super::{FormatVersion, MetadataLog, SnapshotLog, TableMetadata, VersionNumber, MAIN_BRANCH};

    /// Metadata document of either format version
    #[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(untagged)]
    pub(super) enum TableMetadataEnum {
        /// Version 2 of the table metadata
        V2(TableMetadataV2),
        /// Version 1 of the table metadata
        V1(TableMetadataV1),
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "kebab-case")]
    /// Metadata document of format version 2
    pub struct TableMetadataV2 {
        /// Always `2`
        pub format_version: VersionNumber<2>,
        /// A UUID that identifies the table
        pub table_uuid: Uuid,
        /// Location tables base location
        pub location: String,
        /// The tables highest sequence number
        pub last_sequence_number: i64,
        /// Timestamp in milliseconds from the unix epoch when the table was last updated.
        pub last_updated_ms: i64,
        /// An integer; the highest assigned column ID for the table.
        pub last_column_id: i32,
        /// A list of schemas, stored as objects with schema-id.
        pub schemas: Vec<SchemaV2>,
        /// ID of the table’s current schema.
        pub current_schema_id: i32,
        /// A list of partition specs, stored as full partition spec objects.
        pub partition_specs: Vec<PartitionSpec>,
        /// ID of the “current” spec that writers should use by default.
        pub default_spec_id: i32,
        /// An integer; the highest assigned partition field ID across all partition specs for the table.
        pub last_partition_id: i32,
        /// Table properties
        #[serde(skip_serializing_if = "HashMap::is_empty", default)]
        pub properties: HashMap<String, String>,
        /// `-1` or missing when the table has no snapshots
        #[serde(skip_serializing_if = "Option::is_none", default)]
        pub current_snapshot_id: Option<i64>,
        /// Valid snapshots of the table
        #[serde(skip_serializing_if = "Option::is_none", default)]
        pub(crate) snapshots: Option<Vec<SnapshotV2>>,
        /// Changes of the current snapshot over time
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub snapshot_log: Vec<SnapshotLog>,
        /// Previous metadata files of the table
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub metadata_log: Vec<MetadataLog>,
        /// A list of sort orders, stored as full sort order objects.
        pub sort_orders: Vec<SortOrder>,
        /// Default sort order id of the table.
        pub default_sort_order_id: i32,
        /// Named snapshot references
        #[serde(skip_serializing_if = "HashMap::is_empty", default)]
        pub refs: HashMap<String, SnapshotReference>,
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "kebab-case")]
    /// Metadata document of format version 1
    pub struct TableMetadataV1 {
        /// Always `1`
        pub format_version: VersionNumber<1>,
        /// A UUID that identifies the table
        #[serde(skip_serializing_if = "Option::is_none", default)]
        pub table_uuid: Option<Uuid>,
        /// Location tables base location
        pub location: String,
        /// Timestamp in milliseconds from the unix epoch when the table was last updated.
        pub last_updated_ms: i64,
        /// An integer; the highest assigned column ID for the table.
        pub last_column_id: i32,
        /// The table’s current schema.
        pub schema: SchemaV1,
        /// A list of schemas, stored as objects with schema-id.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        pub schemas: Option<Vec<SchemaV1>>,
        /// ID of the table’s current schema.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        pub current_schema_id: Option<i32>,
        /// The table’s current partition spec, stored as only fields.
        pub(crate) partition_spec: Vec<PartitionFieldV1>,
        /// A list of partition specs, stored as full partition spec objects.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        pub partition_specs: Option<Vec<PartitionSpec>>,
        /// ID of the “current” spec that writers should use by default.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        pub default_spec_id: Option<i32>,
        /// An integer; the highest assigned partition field ID across all partition specs for the table.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        pub last_partition_id: Option<i32>,
        /// Table properties
        #[serde(skip_serializing_if = "HashMap::is_empty", default)]
        pub properties: HashMap<String, String>,
        /// `-1` or missing when the table has no snapshots
        #[serde(skip_serializing_if = "Option::is_none", default)]
        pub current_snapshot_id: Option<i64>,
        /// Valid snapshots of the table
        #[serde(skip_serializing_if = "Option::is_none", default)]
        pub(crate) snapshots: Option<Vec<SnapshotV1>>,
        /// Changes of the current snapshot over time
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub snapshot_log: Vec<SnapshotLog>,
        /// Previous metadata files of the table
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub metadata_log: Vec<MetadataLog>,
        /// A list of sort orders, stored as full sort order objects.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        pub sort_orders: Option<Vec<SortOrder>>,
        /// Default sort order id of the table.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        pub default_sort_order_id: Option<i32>,
    }

    /// `-1` is the on-disk marker for "no current snapshot"
    fn current_snapshot(id: Option<i64>) -> Option<i64> {
        id.filter(|id| *id != -1)
    }

    /// Refs always contain the main branch when the table has a current snapshot
    fn with_main_branch(
        mut refs: HashMap<String, SnapshotReference>,
        current_snapshot_id: Option<i64>,
    ) -> HashMap<String, SnapshotReference> {
        if let Some(snapshot_id) = current_snapshot_id {
            refs.entry(MAIN_BRANCH.to_string())
                .or_insert(SnapshotReference {
                    snapshot_id,
                    retention: SnapshotRetention::default(),
                });
        }
        refs
    }

    fn check_current_schema(metadata: TableMetadata) -> Result<TableMetadata, Error> {
        if metadata.schemas.contains_key(&metadata.current_schema_id) {
            Ok(metadata)
        } else {
            Err(Error::NotFound(format!(
                "Current schema {}",
                metadata.current_schema_id
            )))
        }
    }

    impl TryFrom<TableMetadataEnum> for TableMetadata {
        type Error = Error;
        fn try_from(value: TableMetadataEnum) -> Result<Self, Error> {
            match value {
                TableMetadataEnum::V2(value) => value.try_into(),
                TableMetadataEnum::V1(value) => value.try_into(),
            }
        }
    }

    impl TryFrom<TableMetadata> for TableMetadataEnum {
        type Error = Error;
        fn try_from(value: TableMetadata) -> Result<Self, Error> {
            Ok(match value.format_version {
                FormatVersion::V2 => TableMetadataEnum::V2(value.into()),
                FormatVersion::V1 => TableMetadataEnum::V1(value.try_into()?),
            })
        }
    }

    impl TryFrom<TableMetadataV2> for TableMetadata {
        type Error = Error;
        fn try_from(value: TableMetadataV2) -> Result<Self, Error> {
            let current_snapshot_id = current_snapshot(value.current_snapshot_id);
            check_current_schema(TableMetadata {
                format_version: FormatVersion::V2,
                table_uuid: value.table_uuid,
                location: value.location,
                last_sequence_number: value.last_sequence_number,
                last_updated_ms: value.last_updated_ms,
                last_column_id: value.last_column_id,
                schemas: value
                    .schemas
                    .into_iter()
                    .map(|schema| (schema.schema_id, schema.into()))
                    .collect(),
                current_schema_id: value.current_schema_id,
                partition_specs: value
                    .partition_specs
                    .into_iter()
                    .map(|x| (*x.spec_id(), x))
                    .collect(),
                default_spec_id: value.default_spec_id,
                last_partition_id: value.last_partition_id,
                properties: value.properties,
                current_snapshot_id,
                snapshots: value
                    .snapshots
                    .unwrap_or_default()
                    .into_iter()
                    .map(|x| (x.snapshot_id, x.into()))
                    .collect(),
                snapshot_log: value.snapshot_log,
                metadata_log: value.metadata_log,
                sort_orders: value
                    .sort_orders
                    .into_iter()
                    .map(|x| (*x.order_id(), x))
                    .collect(),
                default_sort_order_id: value.default_sort_order_id,
                refs: with_main_branch(value.refs, current_snapshot_id),
            })
        }
    }

    impl TryFrom<TableMetadataV1> for TableMetadata {
        type Error = Error;
        fn try_from(value: TableMetadataV1) -> Result<Self, Error> {
            let schemas: HashMap<_, _> = match value.schemas {
                Some(schemas) => schemas
                    .into_iter()
                    .enumerate()
                    .map(|(i, schema)| {
                        let id = match schema.schema_id {
                            Some(id) => id,
                            None => i32::try_from(i)?,
                        };
                        let schema = SchemaV1 {
                            schema_id: Some(id),
                            ..schema
                        };
                        Ok((id, schema.into()))
                    })
                    .collect::<Result<_, Error>>()?,
                None => {
                    let schema: crate::spec::schema::Schema = value.schema.into();
                    HashMap::from_iter([(*schema.schema_id(), schema)])
                }
            };
            let current_schema_id = match value.current_schema_id {
                Some(id) => id,
                None => schemas.keys().copied().max().unwrap_or_default(),
            };

            let partition_specs: HashMap<_, _> = match value.partition_specs {
                Some(specs) => specs.into_iter().map(|x| (*x.spec_id(), x)).collect(),
                None => {
                    let fields = value
                        .partition_spec
                        .into_iter()
                        .enumerate()
                        .map(|(i, field)| field.into_field(i))
                        .collect::<Result<Vec<_>, Error>>()?;
                    let spec = PartitionSpec::builder().with_fields(fields).build()?;
                    HashMap::from_iter([(*spec.spec_id(), spec)])
                }
            };
            let default_spec_id = match value.default_spec_id {
                Some(id) => id,
                None => partition_specs.keys().copied().max().unwrap_or_default(),
            };
            let last_partition_id = match value.last_partition_id {
                Some(id) => id,
                None => partition_specs
                    .values()
                    .filter_map(PartitionSpec::highest_field_id)
                    .max()
                    .unwrap_or(PARTITION_FIELD_ID_START - 1),
            };

            let sort_orders = match value.sort_orders {
                Some(sort_orders) => sort_orders.into_iter().map(|x| (*x.order_id(), x)).collect(),
                None => HashMap::from_iter([(DEFAULT_SORT_ORDER_ID, SortOrder::unsorted())]),
            };

            let current_snapshot_id = current_snapshot(value.current_snapshot_id);

            check_current_schema(TableMetadata {
                format_version: FormatVersion::V1,
                table_uuid: value.table_uuid.unwrap_or_default(),
                location: value.location,
                last_sequence_number: 0,
                last_updated_ms: value.last_updated_ms,
                last_column_id: value.last_column_id,
                schemas,
                current_schema_id,
                partition_specs,
                default_spec_id,
                last_partition_id,
                properties: value.properties,
                current_snapshot_id,
                snapshots: value
                    .snapshots
                    .unwrap_or_default()
                    .into_iter()
                    .map(|x| (x.snapshot_id, x.into()))
                    .collect(),
                snapshot_log: value.snapshot_log,
                metadata_log: value.metadata_log,
                sort_orders,
                default_sort_order_id: value.default_sort_order_id.unwrap_or(DEFAULT_SORT_ORDER_ID),
                refs: with_main_branch(HashMap::new(), current_snapshot_id),
            })
        }
    }

    impl From<TableMetadata> for TableMetadataV2 {
        fn from(v: TableMetadata) -> Self {
            TableMetadataV2 {
                format_version: VersionNumber::<2>,
                table_uuid: v.table_uuid,
                location: v.location,
                last_sequence_number: v.last_sequence_number,
                last_updated_ms: v.last_updated_ms,
                last_column_id: v.last_column_id,
                schemas: v.schemas.into_values().map(Into::into).collect(),
                current_schema_id: v.current_schema_id,
                partition_specs: v.partition_specs.into_values().collect(),
                default_spec_id: v.default_spec_id,
                last_partition_id: v.last_partition_id,
                properties: v.properties,
                current_snapshot_id: v.current_snapshot_id.or(Some(-1)),
                snapshots: Some(v.snapshots.into_values().map(Into::into).collect()),
                snapshot_log: v.snapshot_log,
                metadata_log: v.metadata_log,
                sort_orders: v.sort_orders.into_values().collect(),
                default_sort_order_id: v.default_sort_order_id,
                refs: v.refs,
            }
        }
    }

    impl TryFrom<TableMetadata> for TableMetadataV1 {
        type Error = Error;
        fn try_from(v: TableMetadata) -> Result<Self, Error> {
            let schema = v
                .schemas
                .get(&v.current_schema_id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("Schema {}", v.current_schema_id)))?;
            Ok(TableMetadataV1 {
                format_version: VersionNumber::<1>,
                table_uuid: Some(v.table_uuid),
                location: v.location,
                last_updated_ms: v.last_updated_ms,
                last_column_id: v.last_column_id,
                schema: schema.into(),
                schemas: Some(v.schemas.into_values().map(Into::into).collect()),
                current_schema_id: Some(v.current_schema_id),
                partition_spec: v
                    .partition_specs
                    .get(&v.default_spec_id)
                    .map(|x| x.fields().iter().cloned().map(Into::into).collect())
                    .unwrap_or_default(),
                partition_specs: Some(v.partition_specs.into_values().collect()),
                default_spec_id: Some(v.default_spec_id),
                last_partition_id: Some(v.last_partition_id),
                properties: v.properties,
                current_snapshot_id: v.current_snapshot_id.or(Some(-1)),
                snapshots: Some(v.snapshots.into_values().map(Into::into).collect()),
                snapshot_log: v.snapshot_log,
                metadata_log: v.metadata_log,
                sort_orders: Some(v.sort_orders.into_values().collect()),
                default_sort_order_id: Some(v.default_sort_order_id),
            })
        }
    }
}

/// Helper to serialize and deserialize the format version.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct VersionNumber<const V: u8>;

impl<const V: u8> Serialize for VersionNumber<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(V)
    }
}

impl<'de, const V: u8> Deserialize<'de> for VersionNumber<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        if value == V {
            Ok(VersionNumber::<V>)
        } else {
            Err(D::Error::custom(format!(
                "expected format version {V}, found {value}"
            )))
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
/// Encodes changes to the previous metadata files for the table
pub struct MetadataLog {
    /// The file for the log.
    pub metadata_file: String,
    /// Time new metadata was created
    pub timestamp_ms: i64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
/// A log of when each snapshot was made.
pub struct SnapshotLog {
    /// Id of the snapshot.
    pub snapshot_id: i64,
    /// Last updated timestamp
    pub timestamp_ms: i64,
}

#[derive(Debug, Serialize_repr, Deserialize_repr, PartialEq, Eq, Clone, Copy, Default)]
#[repr(u8)]
/// Table format version
pub enum FormatVersion {
    /// Format version 1
    V1 = 1,
    /// Format version 2
    #[default]
    V2 = 2,
}

impl TryFrom<u8> for FormatVersion {
    type Error = Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(FormatVersion::V1),
            2 => Ok(FormatVersion::V2),
            _ => Err(Error::Conversion(
                "u8".to_string(),
                "format version".to_string(),
            )),
        }
    }
}

impl From<FormatVersion> for u8 {
    fn from(value: FormatVersion) -> Self {
        value as u8
    }
}

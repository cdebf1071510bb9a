//! Snapshots and named snapshot references.
//!
//! A [`Snapshot`] is the state of a table at one point in time. Branches and tags
//! ([`SnapshotReference`]) give snapshots names. Snapshots are read and carried
//! along with the table metadata. Their manifest lists are never opened here.

use std::{collections::HashMap, fmt, str};

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

pub(crate) use _serde::{SnapshotV1, SnapshotV2};

use _serde::SnapshotEnum;

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Builder, Getters)]
#[serde(from = "SnapshotEnum", into = "SnapshotEnum")]
#[builder(build_fn(error = "Error"), setter(prefix = "with"))]
/// A snapshot represents the state of a table at some time and is used to access the complete set of data files in the table.
pub struct Snapshot {
    /// A unique long ID
    #[builder(default = "generate_snapshot_id()")]
    snapshot_id: i64,
    /// The snapshot ID of the snapshot’s parent.
    /// Omitted for any snapshot with no parent
    #[builder(setter(strip_option), default)]
    parent_snapshot_id: Option<i64>,
    /// A monotonically increasing long that tracks the order of
    /// changes to a table.
    #[builder(default)]
    sequence_number: i64,
    /// Creation time in milliseconds since the epoch
    #[builder(default = "chrono::Utc::now().timestamp_millis()")]
    timestamp_ms: i64,
    /// The location of a manifest list for this snapshot
    manifest_list: String,
    /// A string map that summarizes the snapshot changes, including operation.
    #[builder(default)]
    summary: Summary,
    /// ID of the table’s current schema when the snapshot was created.
    #[builder(setter(strip_option), default)]
    schema_id: Option<i32>,
}

impl Snapshot {
    /// Create snapshot builder
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }
}

/// Random positive snapshot id
pub fn generate_snapshot_id() -> i64 {
    let (high, low) = Uuid::new_v4().as_u64_pair();
    ((high ^ low) & i64::MAX as u64) as i64
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            &serde_json::to_string(self).map_err(|_| fmt::Error)?,
        )
    }
}

impl str::FromStr for Snapshot {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(Error::from)
    }
}

pub(crate) mod _serde {
    use serde::{Deserialize, Serialize};

    use super::{Snapshot, Summary};

    #[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(untagged)]
    pub(super) enum SnapshotEnum {
        V2(SnapshotV2),
        V1(SnapshotV1),
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
    #[serde(rename_all = "kebab-case")]
    /// Snapshot as written by format version 2
    pub(crate) struct SnapshotV2 {
        pub snapshot_id: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub parent_snapshot_id: Option<i64>,
        pub sequence_number: i64,
        pub timestamp_ms: i64,
        pub manifest_list: String,
        pub summary: Summary,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub schema_id: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
    #[serde(rename_all = "kebab-case")]
    /// Snapshot as written by format version 1. Sequence numbers do not exist and
    /// the summary is optional.
    pub(crate) struct SnapshotV1 {
        pub snapshot_id: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub parent_snapshot_id: Option<i64>,
        pub timestamp_ms: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub manifest_list: Option<String>,
        /// Must be omitted if manifest-list is present
        #[serde(skip_serializing_if = "Option::is_none")]
        pub manifests: Option<Vec<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub summary: Option<Summary>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub schema_id: Option<i32>,
    }

    impl From<SnapshotEnum> for Snapshot {
        fn from(value: SnapshotEnum) -> Self {
            match value {
                SnapshotEnum::V2(value) => value.into(),
                SnapshotEnum::V1(value) => value.into(),
            }
        }
    }

    impl From<Snapshot> for SnapshotEnum {
        fn from(value: Snapshot) -> Self {
            SnapshotEnum::V2(value.into())
        }
    }

    impl From<SnapshotV1> for Snapshot {
        fn from(v1: SnapshotV1) -> Self {
            Snapshot {
                snapshot_id: v1.snapshot_id,
                parent_snapshot_id: v1.parent_snapshot_id,
                sequence_number: 0,
                timestamp_ms: v1.timestamp_ms,
                manifest_list: v1.manifest_list.unwrap_or_default(),
                summary: v1.summary.unwrap_or_default(),
                schema_id: v1.schema_id,
            }
        }
    }

    impl From<Snapshot> for SnapshotV1 {
        fn from(value: Snapshot) -> Self {
            SnapshotV1 {
                snapshot_id: value.snapshot_id,
                parent_snapshot_id: value.parent_snapshot_id,
                timestamp_ms: value.timestamp_ms,
                manifest_list: Some(value.manifest_list),
                manifests: None,
                summary: Some(value.summary),
                schema_id: value.schema_id,
            }
        }
    }

    impl From<SnapshotV2> for Snapshot {
        fn from(value: SnapshotV2) -> Self {
            Snapshot {
                snapshot_id: value.snapshot_id,
                parent_snapshot_id: value.parent_snapshot_id,
                sequence_number: value.sequence_number,
                timestamp_ms: value.timestamp_ms,
                manifest_list: value.manifest_list,
                summary: value.summary,
                schema_id: value.schema_id,
            }
        }
    }

    impl From<Snapshot> for SnapshotV2 {
        fn from(value: Snapshot) -> Self {
            SnapshotV2 {
                snapshot_id: value.snapshot_id,
                parent_snapshot_id: value.parent_snapshot_id,
                sequence_number: value.sequence_number,
                timestamp_ms: value.timestamp_ms,
                manifest_list: value.manifest_list,
                summary: value.summary,
                schema_id: value.schema_id,
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "lowercase")]
/// Kind of change that produced a snapshot
pub enum Operation {
    /// Only data files were added and no files were removed.
    #[default]
    Append,
    /// Files were rewritten without changing table data
    Replace,
    /// Data and delete files were added and removed in a logical overwrite operation.
    Overwrite,
    /// Data files were removed or delete files were added
    Delete,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
/// Summarises the changes in the snapshot.
pub struct Summary {
    /// The type of operation in the snapshot
    pub operation: Operation,
    /// Other summary data.
    #[serde(flatten)]
    pub other: HashMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
/// Named reference to a snapshot, either a branch or a tag
pub struct SnapshotReference {
    /// The tagged snapshot or the head of a branch
    pub snapshot_id: i64,
    #[serde(flatten)]
    /// Snapshot retention policy
    pub retention: SnapshotRetention,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "lowercase", tag = "type")]
/// Retention policy attached to a snapshot reference
pub enum SnapshotRetention {
    #[serde(rename_all = "kebab-case")]
    /// Mutable named reference, moved forward by commits
    Branch {
        /// Minimum number of snapshots to keep in the branch
        #[serde(skip_serializing_if = "Option::is_none")]
        min_snapshots_to_keep: Option<i32>,
        /// Max age of snapshots to keep, including the latest snapshot
        #[serde(skip_serializing_if = "Option::is_none")]
        max_snapshot_age_ms: Option<i64>,
        /// Max age of the reference itself. The main branch never expires.
        #[serde(skip_serializing_if = "Option::is_none")]
        max_ref_age_ms: Option<i64>,
    },
    #[serde(rename_all = "kebab-case")]
    /// Label for an individual snapshot
    Tag {
        /// Max age of the reference
        #[serde(skip_serializing_if = "Option::is_none")]
        max_ref_age_ms: Option<i64>,
    },
}

impl Default for SnapshotRetention {
    fn default() -> Self {
        SnapshotRetention::Branch {
            max_ref_age_ms: None,
            max_snapshot_age_ms: None,
            min_snapshots_to_keep: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v2_snapshot() {
        let json = r#"
        {
            "snapshot-id": 3055729675574597004,
            "parent-snapshot-id": 3051729675574597004,
            "sequence-number": 1,
            "timestamp-ms": 1555100955770,
            "summary": { "operation": "append", "added-files": "4" },
            "manifest-list": "s3://bucket/metadata/snap-3055729675574597004-1.avro",
            "schema-id": 1
        }
        "#;
        let snapshot: Snapshot = json.parse().unwrap();
        assert_eq!(*snapshot.sequence_number(), 1);
        assert_eq!(*snapshot.parent_snapshot_id(), Some(3051729675574597004));
        assert_eq!(snapshot.summary().operation, Operation::Append);
        assert_eq!(
            snapshot.summary().other.get("added-files").map(String::as_str),
            Some("4")
        );
    }

    #[test]
    fn v1_snapshot_defaults() {
        let json = r#"
        {
            "snapshot-id": 7,
            "timestamp-ms": 1515100955770,
            "manifests": ["s3://bucket/metadata/m0.avro"]
        }
        "#;
        let snapshot: Snapshot = json.parse().unwrap();
        assert_eq!(*snapshot.sequence_number(), 0);
        assert_eq!(snapshot.manifest_list(), "");
        assert_eq!(snapshot.summary(), &Summary::default());
    }

    #[test]
    fn builder_generates_ids() {
        let a = Snapshot::builder()
            .with_manifest_list("s3://bucket/a.avro".to_string())
            .build()
            .unwrap();
        let b = Snapshot::builder()
            .with_manifest_list("s3://bucket/b.avro".to_string())
            .build()
            .unwrap();
        assert!(*a.snapshot_id() >= 0);
        assert_ne!(a.snapshot_id(), b.snapshot_id());
    }

    #[test]
    fn references() {
        let branch: SnapshotReference =
            serde_json::from_str(r#"{"snapshot-id": 1, "type": "branch"}"#).unwrap();
        assert_eq!(branch.retention, SnapshotRetention::default());
        let tag: SnapshotReference = serde_json::from_str(
            r#"{"snapshot-id": 2, "type": "tag", "max-ref-age-ms": 1000}"#,
        )
        .unwrap();
        assert_eq!(
            tag.retention,
            SnapshotRetention::Tag {
                max_ref_age_ms: Some(1000)
            }
        );
    }
}

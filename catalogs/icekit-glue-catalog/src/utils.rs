use std::collections::HashMap;

/// Parameter key `metadata_location` for `TableInput`
pub(crate) const METADATA_LOCATION: &str = "metadata_location";
/// Parameter key `previous_metadata_location` for `TableInput`
pub(crate) const PREVIOUS_METADATA_LOCATION: &str = "previous_metadata_location";
/// Parameter key `table_type` for `TableInput`
pub(crate) const TABLE_TYPE: &str = "table_type";
/// Parameter value `table_type` for `TableInput`
pub(crate) const ICEBERG: &str = "ICEBERG";

/// Whether a Glue parameter map marks an Iceberg table
pub(crate) fn is_iceberg(parameters: &HashMap<String, String>) -> bool {
    parameters.get(TABLE_TYPE).map(String::as_str) == Some(ICEBERG)
}

/// Parameters of a record after a commit from `previous` to `metadata_location`.
/// Unrelated parameters of the existing record are kept.
pub(crate) fn commit_parameters(
    existing: &HashMap<String, String>,
    previous: &str,
    metadata_location: &str,
) -> HashMap<String, String> {
    let mut parameters = existing.clone();
    parameters.insert(TABLE_TYPE.to_string(), ICEBERG.to_string());
    parameters.insert(METADATA_LOCATION.to_string(), metadata_location.to_string());
    parameters.insert(PREVIOUS_METADATA_LOCATION.to_string(), previous.to_string());
    parameters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_type_marker() {
        let mut parameters = HashMap::new();
        assert!(!is_iceberg(&parameters));
        parameters.insert(TABLE_TYPE.to_string(), "iceberg".to_string());
        assert!(!is_iceberg(&parameters));
        parameters.insert(TABLE_TYPE.to_string(), ICEBERG.to_string());
        assert!(is_iceberg(&parameters));
    }

    #[test]
    fn commit_keeps_other_parameters() {
        let existing = HashMap::from([
            (TABLE_TYPE.to_string(), ICEBERG.to_string()),
            (METADATA_LOCATION.to_string(), "s3://b/t/metadata/00000-a.metadata.json".to_string()),
            ("owner".to_string(), "etl".to_string()),
        ]);
        let parameters = commit_parameters(
            &existing,
            "s3://b/t/metadata/00000-a.metadata.json",
            "s3://b/t/metadata/00001-b.metadata.json",
        );
        assert_eq!(parameters["owner"], "etl");
        assert_eq!(
            parameters[METADATA_LOCATION],
            "s3://b/t/metadata/00001-b.metadata.json"
        );
        assert_eq!(
            parameters[PREVIOUS_METADATA_LOCATION],
            "s3://b/t/metadata/00000-a.metadata.json"
        );
    }
}

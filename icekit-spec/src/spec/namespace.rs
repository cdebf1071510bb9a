/*!
Defining the [Namespace] struct for handling namespaces in the catalog.
*/

use core::fmt::{self, Display};
use itertools::Itertools;
use serde_derive::{Deserialize, Serialize};
use std::ops::Deref;

use crate::{error::Error, identifier::SEPARATOR};

/// Ordered list of namespace levels
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Namespace(pub(crate) Vec<String>);

impl Namespace {
    /// Create a namespace from its levels without validating them
    pub fn new(levels: &[String]) -> Self {
        Namespace(levels.to_vec())
    }
    /// Try to create new namespace with sequence of strings.
    pub fn try_new(levels: &[String]) -> Result<Self, Error> {
        if levels.iter().any(|x| x.is_empty()) {
            Err(Error::InvalidFormat("namespace sequence".to_string()))
        } else {
            Ok(Namespace(levels.to_vec()))
        }
    }
    /// Create empty namespace
    pub fn empty() -> Self {
        Namespace(vec![])
    }
    /// Levels of the namespace
    pub fn levels(&self) -> &[String] {
        &self.0
    }
}

impl Deref for Namespace {
    type Target = [String];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            Itertools::intersperse(self.0.iter().map(|x| x as &str), SEPARATOR).collect::<String>()
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::Namespace;

    #[test]
    fn test_new() {
        let namespace = Namespace::try_new(&[
            "level1".to_string(),
            "level2".to_string(),
            "level3".to_string(),
        ])
        .unwrap();
        assert_eq!(&format!("{namespace}"), "level1.level2.level3");
        assert_eq!(namespace.len(), 3);
    }
    #[test]
    fn test_empty_level() {
        assert!(Namespace::try_new(&["".to_string(), "level2".to_string()]).is_err());
    }

    #[test]
    fn test_namespace_json() {
        let namespace = Namespace::try_new(&["foo".to_string(), "bar".to_string()]).unwrap();
        assert_eq!(serde_json::to_string(&namespace).unwrap(), r#"["foo","bar"]"#);

        let json_value: Value = json!(["foo", "bar"]);
        let parsed: Namespace = serde_json::from_value(json_value).unwrap();
        assert_eq!(parsed, namespace);
    }
}

/*!
Defining the [Identifier] struct for addressing tables in a catalog.

An identifier is an ordered sequence of name components: the levels of its
[Namespace] followed by the table name. How many components a backend accepts is
decided by the backend, not by this type.
*/

use core::fmt::{self, Display};

use serde_derive::{Deserialize, Serialize};

use crate::error::Error;

use super::namespace::Namespace;

/// Seperator of different namespace levels.
pub static SEPARATOR: &str = ".";

/// Identifies a table in a catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Identifier {
    namespace: Namespace,
    name: String,
}

impl Identifier {
    /// Create new Identifier
    pub fn new(namespace: &[String], name: &str) -> Self {
        Self {
            namespace: Namespace(namespace.to_vec()),
            name: name.to_owned(),
        }
    }

    /// Create an identifier from its components. The last component is the table name,
    /// the preceding ones form the namespace. A lone table name falls back to
    /// `default_namespace`.
    pub fn try_new(names: &[String], default_namespace: Option<&[String]>) -> Result<Self, Error> {
        let (table_name, namespace) = names.split_last().ok_or(Error::InvalidFormat(format!(
            "Identifier {names:?} is empty"
        )))?;
        if table_name.is_empty() {
            return Err(Error::InvalidFormat(format!(
                "Table name {table_name:?} is empty"
            )));
        }
        let namespace = if namespace.is_empty() {
            default_namespace
                .ok_or(Error::NotFound("Default namespace".to_owned()))?
                .to_vec()
        } else {
            namespace.to_vec()
        };
        Ok(Identifier {
            namespace: Namespace::try_new(&namespace)?,
            name: table_name.to_owned(),
        })
    }

    /// Parse a dot separated identifier
    pub fn parse(identifier: &str, default_namespace: Option<&[String]>) -> Result<Self, Error> {
        let names = identifier
            .split(SEPARATOR)
            .map(ToOwned::to_owned)
            .collect::<Vec<String>>();
        Identifier::try_new(&names, default_namespace)
    }
    /// Return namespace of table
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }
    /// Return name of table
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Number of components, namespace levels plus the table name
    pub fn len(&self) -> usize {
        self.namespace.len() + 1
    }
    /// An identifier always has a table name
    pub fn is_empty(&self) -> bool {
        false
    }
    /// All components in order, namespace levels first
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.namespace
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.name.as_str()))
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}{}{}", self.namespace, SEPARATOR, self.name)
        }
    }
}

impl TryFrom<&str> for Identifier {
    type Error = Error;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value, None)
    }
}

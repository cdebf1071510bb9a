/*!
 * Column types of a table schema
 *
 * Every column is either a primitive or one of the nested types struct, list and
 * map. Nested types carry the ids of their children, which are unique across the
 * whole schema.
 */

use std::{collections::HashMap, fmt, ops::Index, slice::Iter};

use derive_builder::Builder;

use serde::{
    de::{self, Error as SerdeError, IntoDeserializer, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(untagged)]
/// All data types are either primitives or nested types, which are maps, lists, or structs.
pub enum Type {
    /// Primitive types
    Primitive(PrimitiveType),
    /// Struct type
    Struct(StructType),
    /// List type.
    List(ListType),
    /// Map type
    Map(MapType),
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Type::Primitive(primitive) => write!(f, "{primitive}"),
            Type::Struct(_) => write!(f, "struct"),
            Type::List(_) => write!(f, "list"),
            Type::Map(_) => write!(f, "map"),
        }
    }
}

impl Type {
    /// Ids of all fields nested inside this type, not including the type itself
    pub fn nested_field_ids(&self) -> Vec<i32> {
        match self {
            Type::Primitive(_) => Vec::new(),
            Type::Struct(struct_type) => struct_type.all_field_ids(),
            Type::List(list) => {
                let mut ids = vec![list.element_id];
                ids.extend(list.element.nested_field_ids());
                ids
            }
            Type::Map(map) => {
                let mut ids = vec![map.key_id, map.value_id];
                ids.extend(map.key.nested_field_ids());
                ids.extend(map.value.nested_field_ids());
                ids
            }
        }
    }
}

/// Primitive data types
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "lowercase", remote = "Self")]
pub enum PrimitiveType {
    /// True or False
    Boolean,
    /// 32-bit signed integer
    Int,
    /// 64-bit signed integer
    Long,
    /// 32-bit IEEE 753 floating bit.
    Float,
    /// 64-bit IEEE 753 floating bit.
    Double,
    /// Fixed point decimal
    Decimal {
        /// Precision
        precision: u32,
        /// Scale
        scale: u32,
    },
    /// Calendar date without timezone or time.
    Date,
    /// Time of day without date or timezone.
    Time,
    /// Timestamp without timezone
    Timestamp,
    /// Timestamp with timezone
    Timestamptz,
    /// Arbitrary-length character sequences
    String,
    /// Universally Unique Identifiers
    Uuid,
    /// Fixed length byte array
    Fixed(u64),
    /// Arbitrary-length byte array.
    Binary,
}

impl<'de> Deserialize<'de> for PrimitiveType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if let Some(args) = s.strip_prefix("decimal") {
            parse_decimal(args).map_err(D::Error::custom)
        } else if let Some(length) = s.strip_prefix("fixed") {
            length
                .trim_start_matches('[')
                .trim_end_matches(']')
                .parse()
                .map(PrimitiveType::Fixed)
                .map_err(D::Error::custom)
        } else {
            PrimitiveType::deserialize(s.into_deserializer())
        }
    }
}

impl Serialize for PrimitiveType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PrimitiveType::Decimal { precision, scale } => {
                serializer.serialize_str(&format!("decimal({precision},{scale})"))
            }
            PrimitiveType::Fixed(length) => serializer.serialize_str(&format!("fixed[{length}]")),
            _ => PrimitiveType::serialize(self, serializer),
        }
    }
}

/// Parses the `(precision, scale)` suffix of a decimal type name
fn parse_decimal(args: &str) -> Result<PrimitiveType, Error> {
    let args = args.replace(' ', "");
    let (precision, scale) = args
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split_once(',')
        .ok_or_else(|| Error::InvalidFormat(format!("decimal{args}")))?;
    Ok(PrimitiveType::Decimal {
        precision: precision.parse()?,
        scale: scale.parse()?,
    })
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PrimitiveType::Boolean => write!(f, "boolean"),
            PrimitiveType::Int => write!(f, "int"),
            PrimitiveType::Long => write!(f, "long"),
            PrimitiveType::Float => write!(f, "float"),
            PrimitiveType::Double => write!(f, "double"),
            PrimitiveType::Decimal { precision, scale } => {
                write!(f, "decimal({precision},{scale})")
            }
            PrimitiveType::Date => write!(f, "date"),
            PrimitiveType::Time => write!(f, "time"),
            PrimitiveType::Timestamp => write!(f, "timestamp"),
            PrimitiveType::Timestamptz => write!(f, "timestamptz"),
            PrimitiveType::String => write!(f, "string"),
            PrimitiveType::Uuid => write!(f, "uuid"),
            PrimitiveType::Fixed(length) => write!(f, "fixed[{length}]"),
            PrimitiveType::Binary => write!(f, "binary"),
        }
    }
}

/// DataType for a specific struct
#[derive(Debug, Serialize, Clone, Builder)]
#[serde(rename = "struct", tag = "type")]
#[builder(build_fn(error = "Error"))]
pub struct StructType {
    /// Struct fields
    #[builder(setter(each(name = "with_struct_field")))]
    fields: Vec<StructField>,
    /// Position of each field by field id
    #[serde(skip_serializing)]
    #[builder(
        default = "self.fields.iter().flatten().enumerate().map(|(idx, field)| (field.id, idx)).collect()"
    )]
    lookup: HashMap<i32, usize>,
}

// The lookup is derived from the fields and takes no part in equality.
impl PartialEq for StructType {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for StructType {}

impl<'de> Deserialize<'de> for StructType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(field_identifier, rename_all = "lowercase")]
        enum Field {
            Type,
            Fields,
        }

        struct StructTypeVisitor;

        impl<'de> Visitor<'de> for StructTypeVisitor {
            type Value = StructType;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("struct")
            }

            fn visit_map<V>(self, mut map: V) -> std::result::Result<StructType, V::Error>
            where
                V: MapAccess<'de>,
            {
                let mut fields = None;
                while let Some(key) = map.next_key()? {
                    match key {
                        Field::Type => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                        Field::Fields => {
                            if fields.is_some() {
                                return Err(de::Error::duplicate_field("fields"));
                            }
                            fields = Some(map.next_value()?);
                        }
                    }
                }
                let fields: Vec<StructField> =
                    fields.ok_or_else(|| de::Error::missing_field("fields"))?;

                Ok(StructType::new(fields))
            }
        }

        const FIELDS: &[&str] = &["type", "fields"];
        deserializer.deserialize_struct("struct", FIELDS, StructTypeVisitor)
    }
}

impl StructType {
    /// Creates a new StructType with the given fields
    pub fn new(fields: Vec<StructField>) -> Self {
        let lookup = fields
            .iter()
            .enumerate()
            .map(|(idx, field)| (field.id, idx))
            .collect();
        StructType { fields, lookup }
    }

    /// Creates a new StructTypeBuilder
    pub fn builder() -> StructTypeBuilder {
        StructTypeBuilder::default()
    }

    /// Gets the top-level field with the given field id
    #[inline]
    pub fn get(&self, id: i32) -> Option<&StructField> {
        self.lookup.get(&id).map(|idx| &self.fields[*idx])
    }

    /// Gets a field by name. Dotted names descend into nested structs.
    pub fn get_name(&self, name: &str) -> Option<&StructField> {
        if let Some(field) = self.fields.iter().find(|field| field.name == name) {
            return Some(field);
        }
        let (head, rest) = name.split_once('.')?;
        match &self.fields.iter().find(|field| field.name == head)?.field_type {
            Type::Struct(nested) => nested.get_name(rest),
            _ => None,
        }
    }

    /// Number of top-level fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the struct contains no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterator over the top-level fields in declaration order
    pub fn iter(&self) -> Iter<'_, StructField> {
        self.fields.iter()
    }

    /// Top-level field ids in ascending order
    pub fn field_ids(&self) -> impl Iterator<Item = i32> {
        let mut ids: Vec<i32> = self.lookup.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter()
    }

    /// Ids of every field of the struct, including those of nested types
    pub fn all_field_ids(&self) -> Vec<i32> {
        self.fields
            .iter()
            .flat_map(|field| {
                std::iter::once(field.id).chain(field.field_type.nested_field_ids())
            })
            .collect()
    }
}

impl Index<usize> for StructType {
    type Output = StructField;

    fn index(&self, index: usize) -> &Self::Output {
        &self.fields[index]
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
/// A named, typed member of a struct. The id is unique in the table schema.
pub struct StructField {
    /// Id unique in table schema
    pub id: i32,
    /// Field Name
    pub name: String,
    /// Optional or required
    pub required: bool,
    /// Datatype
    #[serde(rename = "type")]
    pub field_type: Type,
    /// Fields may have an optional comment or doc string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl StructField {
    /// Creates a new StructField
    pub fn new(id: i32, name: &str, required: bool, field_type: Type, doc: Option<String>) -> Self {
        Self {
            id,
            name: name.to_owned(),
            required,
            field_type,
            doc,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename = "list", rename_all = "kebab-case", tag = "type")]
/// A collection of values of one element type
pub struct ListType {
    /// Id unique in table schema
    pub element_id: i32,
    /// Elements can be either optional or required.
    pub element_required: bool,
    /// Datatype
    pub element: Box<Type>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename = "map", rename_all = "kebab-case", tag = "type")]
/// Key-value pairs. Keys are always required.
pub struct MapType {
    /// Key Id that is unique in table schema
    pub key_id: i32,
    /// Datatype of key
    pub key: Box<Type>,
    /// Value Id that is unique in table schema
    pub value_id: i32,
    /// If value is optional or required
    pub value_required: bool,
    /// Datatype of value
    pub value: Box<Type>,
}

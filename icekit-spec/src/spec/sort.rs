/*!
 * Sort orders
 *
 * A sort order lists the columns data files are sorted by. Order id `0` is
 * reserved for the unsorted order, which has no fields.
 */

use std::{fmt, str};

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use crate::error::Error;

use super::partition::Transform;

/// Id of the unsorted order
pub static DEFAULT_SORT_ORDER_ID: i32 = 0;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
/// Sort direction, either ascending or descending
pub enum SortDirection {
    /// Ascending
    #[serde(rename = "asc")]
    Ascending,
    /// Descending
    #[serde(rename = "desc")]
    Descending,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
/// Describes the order of null values when sorted.
pub enum NullOrder {
    #[serde(rename = "nulls-first")]
    /// Nulls are stored first
    First,
    #[serde(rename = "nulls-last")]
    /// Nulls are stored last
    Last,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Getters)]
#[serde(rename_all = "kebab-case")]
/// Entry for every column that is to be sorted
pub struct SortField {
    /// A source column id from the table’s schema
    source_id: i32,
    /// Produces the values to sort on from the source column
    transform: Transform,
    /// asc or desc
    direction: SortDirection,
    /// Placement of null values
    null_order: NullOrder,
}

impl SortField {
    /// Create a new sort field
    pub fn new(
        source_id: i32,
        transform: Transform,
        direction: SortDirection,
        null_order: NullOrder,
    ) -> Self {
        SortField {
            source_id,
            transform,
            direction,
            null_order,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default, Builder, Getters)]
#[serde(rename_all = "kebab-case")]
#[builder(setter(prefix = "with"), build_fn(error = "Error"))]
/// A sort order is defined by a sort order id and a list of sort fields.
/// The order of the sort fields within the list defines the order in which the sort is applied to the data.
pub struct SortOrder {
    /// Identifier for SortOrder, order_id `0` is no sort order.
    #[builder(default = "DEFAULT_SORT_ORDER_ID")]
    order_id: i32,
    #[builder(setter(each(name = "with_sort_field")), default)]
    /// Details of the sort
    fields: Vec<SortField>,
}

impl SortOrder {
    /// Create sort order builder
    pub fn builder() -> SortOrderBuilder {
        SortOrderBuilder::default()
    }
    /// The unsorted order
    pub fn unsorted() -> Self {
        SortOrder::default()
    }
    /// True for an order without fields
    pub fn is_unsorted(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            &serde_json::to_string(self).map_err(|_| fmt::Error)?,
        )
    }
}

impl str::FromStr for SortOrder {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_order() {
        let sort_order = r#"
        {
        "order-id": 1,
        "fields": [ {
            "transform": "identity",
            "source-id": 2,
            "direction": "asc",
            "null-order": "nulls-first"
         }, {
            "transform": "bucket[4]",
            "source-id": 3,
            "direction": "desc",
            "null-order": "nulls-last"
         } ]
        }
        "#;

        let order: SortOrder = sort_order.parse().unwrap();
        assert_eq!(
            order.fields()[0],
            SortField::new(2, Transform::Identity, SortDirection::Ascending, NullOrder::First)
        );
        assert_eq!(
            order.fields()[1],
            SortField::new(
                3,
                Transform::Bucket(4),
                SortDirection::Descending,
                NullOrder::Last
            )
        );
        assert!(!order.is_unsorted());
    }

    #[test]
    fn builder() {
        let order = SortOrder::builder()
            .with_order_id(1)
            .with_sort_field(SortField::new(
                1,
                Transform::Identity,
                SortDirection::Descending,
                NullOrder::Last,
            ))
            .build()
            .unwrap();
        assert_eq!(*order.order_id(), 1);
        assert!(SortOrder::unsorted().is_unsorted());
        assert_eq!(*SortOrder::unsorted().order_id(), DEFAULT_SORT_ORDER_ID);
    }
}

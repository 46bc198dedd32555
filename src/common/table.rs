use crate::{common, error};

use aws_sdk_dynamodb::types;
use serde::Serialize;
use serde_dynamo::to_attribute_value;

/// Names that identify a table and its primary key.
///
/// Bound once when a repository is constructed and never changed afterwards.
///
/// ```rust
/// use dynamodb_repository::common::table;
///
/// let schema = table::TableSchema::new("data-items", "pk", Some("sk"));
/// let key = schema.primary_key("TENANT#1", Some("item-1")).unwrap();
/// assert_eq!(key.len(), 2);
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct TableSchema {
    /// The name of the table.
    pub table_name: String,
    /// The attribute name of the partition key.
    pub partition_key_name: String,
    /// The attribute name of the sort key, for tables with a composite primary key.
    pub sort_key_name: Option<String>,
}

impl TableSchema {
    /// Create a schema.
    pub fn new(
        table_name: impl Into<String>,
        partition_key_name: impl Into<String>,
        sort_key_name: Option<impl Into<String>>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            partition_key_name: partition_key_name.into(),
            sort_key_name: sort_key_name.map(Into::into),
        }
    }

    /// Whether `name` is one of the primary key attributes.
    pub fn is_key_attribute(&self, name: &str) -> bool {
        name == self.partition_key_name || self.sort_key_name.as_deref() == Some(name)
    }

    /// Store key from values that are already attribute values.
    ///
    /// Fails if the table defines a sort key and no value was supplied for it. A sort key
    /// value is dropped when the table has none.
    pub(crate) fn key_record(
        &self,
        partition_key_value: types::AttributeValue,
        sort_key_value: Option<types::AttributeValue>,
    ) -> error::Result<common::Record> {
        let mut record =
            common::Record::from([(self.partition_key_name.clone(), partition_key_value)]);
        if let Some(sort_key_name) = &self.sort_key_name {
            let value = sort_key_value
                .ok_or_else(|| error::Error::MissingSortKey(sort_key_name.clone()))?;
            record.insert(sort_key_name.clone(), value);
        }
        Ok(record)
    }

    /// Build the primary key of an item.
    pub fn primary_key<T: Serialize>(
        &self,
        partition_key_value: T,
        sort_key_value: Option<T>,
    ) -> error::Result<common::Record> {
        let partition_key_value = to_attribute_value(partition_key_value)?;
        let sort_key_value = sort_key_value.map(to_attribute_value).transpose()?;
        self.key_record(partition_key_value, sort_key_value)
    }
}

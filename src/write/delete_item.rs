use crate::{common, error};

use aws_sdk_dynamodb::types;
use serde::Serialize;

/// A delete item request ready to be sent.
///
/// The request asks for the deleted attributes back, so callers can tell a deletion from a
/// miss.
#[derive(Clone, Debug, PartialEq)]
pub struct DeleteItemInput {
    /// The primary key of the item to delete.
    pub key: common::Record,
    /// Which attributes the store returns.
    pub return_values: types::ReturnValue,
    /// The name of the table to delete from.
    pub table_name: String,
}

impl common::table::TableSchema {
    /// Build a deletion of one item by primary key.
    pub fn delete_item_input<T: Serialize>(
        &self,
        partition_key_value: T,
        sort_key_value: Option<T>,
    ) -> error::Result<DeleteItemInput> {
        let key = self.primary_key(partition_key_value, sort_key_value)?;
        Ok(DeleteItemInput {
            key,
            return_values: types::ReturnValue::AllOld,
            table_name: self.table_name.clone(),
        })
    }
}

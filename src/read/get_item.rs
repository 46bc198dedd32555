use crate::{common, error};

use serde::Serialize;

/// A get item request ready to be sent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetItemInput {
    /// The primary key of the item to retrieve.
    pub key: common::Record,
    /// The name of the table to read from.
    pub table_name: String,
}

impl common::table::TableSchema {
    /// Build a lookup of one item by primary key.
    pub fn get_item_input<T: Serialize>(
        &self,
        partition_key_value: T,
        sort_key_value: Option<T>,
    ) -> error::Result<GetItemInput> {
        let key = self.primary_key(partition_key_value, sort_key_value)?;
        Ok(GetItemInput {
            key,
            table_name: self.table_name.clone(),
        })
    }
}

use crate::{common, error};

use aws_sdk_dynamodb::types;
use serde::Serialize;

/// One operation of a transactional write.
#[derive(Clone, Debug, PartialEq)]
pub enum TransactionItem<T> {
    /// Store the full record, replacing any item with the same key.
    Put(T),
    /// Partially update the record identified by the key attributes it carries.
    Update(T),
    /// Delete the item with the given key.
    Delete {
        /// The partition key value of the item.
        partition_key_value: String,
        /// The sort key value of the item, for tables with a composite primary key.
        sort_key_value: Option<String>,
    },
}

/// A transactional write request ready to be sent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactWriteInput {
    /// The operations, in the order they were given.
    pub transact_items: Vec<types::TransactWriteItem>,
}

impl common::table::TableSchema {
    fn get_transact_write_item<T: Serialize>(
        &self,
        item: &TransactionItem<T>,
    ) -> error::Result<types::TransactWriteItem> {
        let builder = types::TransactWriteItem::builder();
        let builder = match item {
            TransactionItem::Put(record) => {
                let put_item = self.put_item_input(record)?;
                let put = types::Put::builder()
                    .set_item(Some(put_item.item))
                    .table_name(put_item.table_name)
                    .build()?;
                builder.put(put)
            }
            TransactionItem::Update(record) => {
                let update_item = self.update_item_input(record)?;
                // a transaction only reports failure, never the written attributes
                let update = types::Update::builder()
                    .set_key(Some(update_item.key))
                    .set_update_expression(update_item.update_expression)
                    .set_expression_attribute_names(update_item.expression_attribute_names)
                    .set_expression_attribute_values(update_item.expression_attribute_values)
                    .table_name(update_item.table_name)
                    .build()?;
                builder.update(update)
            }
            TransactionItem::Delete {
                partition_key_value,
                sort_key_value,
            } => {
                let delete_item =
                    self.delete_item_input(partition_key_value.as_str(), sort_key_value.as_deref())?;
                let delete = types::Delete::builder()
                    .set_key(Some(delete_item.key))
                    .table_name(delete_item.table_name)
                    .build()?;
                builder.delete(delete)
            }
        };
        Ok(builder.build())
    }

    /// Build one atomic request out of `items`, keeping their order.
    ///
    /// An update without any assigned attribute cannot be part of a transaction and fails
    /// with [`error::Error::Build`].
    pub fn transact_write_input<T: Serialize>(
        &self,
        items: &[TransactionItem<T>],
    ) -> error::Result<TransactWriteInput> {
        let transact_items = items
            .iter()
            .map(|item| self.get_transact_write_item(item))
            .collect::<error::Result<_>>()?;
        Ok(TransactWriteInput { transact_items })
    }
}

//! The seam between the repository and DynamoDB.
//!
//! Builders in [`crate::read`] and [`crate::write`] produce plain request values. A
//! [`RecordStore`] sends them and hands back plain records, which keeps the repository
//! testable without a network.

#[cfg(test)]
pub(crate) mod mock;

use crate::{common, error, read, write};

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;

/// Backend able to execute the requests built by this crate.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch one item by primary key.
    async fn get_item(
        &self,
        input: read::get_item::GetItemInput,
    ) -> error::Result<Option<common::Record>>;

    /// Store a full record.
    async fn put_item(&self, input: write::put_item::PutItemInput) -> error::Result<()>;

    /// Apply a partial update, returning the attributes the request asked for.
    async fn update_item(
        &self,
        input: write::update_item::UpdateItemInput,
    ) -> error::Result<Option<common::Record>>;

    /// Delete one item, returning the attributes the request asked for.
    async fn delete_item(
        &self,
        input: write::delete_item::DeleteItemInput,
    ) -> error::Result<Option<common::Record>>;

    /// Fetch one page of a query.
    async fn query(&self, input: read::query::QueryInput) -> error::Result<read::common::Page>;

    /// Fetch one page of a scan.
    async fn scan(&self, input: read::scan::ScanInput) -> error::Result<read::common::Page>;

    /// Apply every operation of the request atomically.
    async fn transact_write_items(
        &self,
        input: write::transact_write_items::TransactWriteInput,
    ) -> error::Result<()>;

    /// The status of a table, if the store reports one.
    async fn describe_table(&self, table_name: String) -> error::Result<Option<String>>;
}

macro_rules! apply_filter_input {
    ($builder:expr, $filter_input:expr) => {
        $builder
            .set_exclusive_start_key($filter_input.exclusive_start_key)
            .set_expression_attribute_names($filter_input.expression_attribute_names)
            .set_expression_attribute_values($filter_input.expression_attribute_values)
            .set_filter_expression($filter_input.filter_expression)
            .set_index_name($filter_input.index_name)
            .set_projection_expression($filter_input.projection_expression)
            .table_name($filter_input.table_name)
    };
}

#[async_trait]
impl RecordStore for Client {
    async fn get_item(
        &self,
        input: read::get_item::GetItemInput,
    ) -> error::Result<Option<common::Record>> {
        let output = self
            .get_item()
            .set_key(Some(input.key))
            .table_name(input.table_name)
            .send()
            .await?;
        Ok(output.item)
    }

    async fn put_item(&self, input: write::put_item::PutItemInput) -> error::Result<()> {
        self.put_item()
            .set_item(Some(input.item))
            .table_name(input.table_name)
            .send()
            .await?;
        Ok(())
    }

    async fn update_item(
        &self,
        input: write::update_item::UpdateItemInput,
    ) -> error::Result<Option<common::Record>> {
        let output = self
            .update_item()
            .set_key(Some(input.key))
            .set_update_expression(input.update_expression)
            .set_expression_attribute_names(input.expression_attribute_names)
            .set_expression_attribute_values(input.expression_attribute_values)
            .set_return_values(input.return_values)
            .table_name(input.table_name)
            .send()
            .await?;
        Ok(output.attributes)
    }

    async fn delete_item(
        &self,
        input: write::delete_item::DeleteItemInput,
    ) -> error::Result<Option<common::Record>> {
        let output = self
            .delete_item()
            .set_key(Some(input.key))
            .return_values(input.return_values)
            .table_name(input.table_name)
            .send()
            .await?;
        Ok(output.attributes)
    }

    async fn query(&self, input: read::query::QueryInput) -> error::Result<read::common::Page> {
        let builder = self
            .query()
            .key_condition_expression(input.key_condition_expression);
        let output = apply_filter_input!(builder, input.filter_input)
            .send()
            .await?;
        Ok(read::common::Page {
            items: output.items.unwrap_or_default(),
            last_evaluated_key: output.last_evaluated_key,
        })
    }

    async fn scan(&self, input: read::scan::ScanInput) -> error::Result<read::common::Page> {
        let builder = self.scan();
        let output = apply_filter_input!(builder, input.filter_input)
            .send()
            .await?;
        Ok(read::common::Page {
            items: output.items.unwrap_or_default(),
            last_evaluated_key: output.last_evaluated_key,
        })
    }

    async fn transact_write_items(
        &self,
        input: write::transact_write_items::TransactWriteInput,
    ) -> error::Result<()> {
        self.transact_write_items()
            .set_transact_items(Some(input.transact_items))
            .send()
            .await?;
        Ok(())
    }

    async fn describe_table(&self, table_name: String) -> error::Result<Option<String>> {
        let output = self.describe_table().table_name(table_name).send().await?;
        let table_status = output
            .table
            .and_then(|table| table.table_status)
            .map(|table_status| table_status.as_str().to_string());
        Ok(table_status)
    }
}

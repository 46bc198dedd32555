//! Generic record repository bound to one table.

use crate::{common, error, read, store, write};

use serde::{Serialize, de::DeserializeOwned};
use serde_dynamo::{from_item, from_items};

const ACTIVE_TABLE_STATUS: &str = "ACTIVE";

/// CRUD, query and scan operations on one table.
///
/// The schema is fixed at construction. Every multi-page read is followed to its last page.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_repository::{common, repository};
/// use serde_json::Value;
///
/// # async fn example(client: Client) -> Result<(), Box<dyn std::error::Error>> {
/// let schema = common::table::TableSchema::new("data-items", "pk", Some("sk"));
/// let repository = repository::Repository::new(client, schema);
/// let record: Option<Value> = repository.get("TENANT#1", Some("item-1")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Repository<S> {
    schema: common::table::TableSchema,
    store: S,
}

impl<S: store::RecordStore> Repository<S> {
    /// Bind `store` to the table described by `schema`.
    pub fn new(store: S, schema: common::table::TableSchema) -> Self {
        Self { schema, store }
    }

    /// The table this repository operates on.
    pub fn schema(&self) -> &common::table::TableSchema {
        &self.schema
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch one record by primary key.
    #[tracing::instrument(
        name = "dynamodb_repository.get",
        skip(self),
        fields(table_name = %self.schema.table_name),
        err
    )]
    pub async fn get<R: DeserializeOwned>(
        &self,
        partition_key_value: &str,
        sort_key_value: Option<&str>,
    ) -> error::Result<Option<R>> {
        let input = self
            .schema
            .get_item_input(partition_key_value, sort_key_value)?;
        let record = match self.store.get_item(input).await? {
            Some(item) => Some(from_item(item)?),
            None => None,
        };
        Ok(record)
    }

    /// Store `record` unconditionally and return it.
    #[tracing::instrument(
        name = "dynamodb_repository.put",
        skip_all,
        fields(table_name = %self.schema.table_name),
        err
    )]
    pub async fn put<T: Serialize>(&self, record: T) -> error::Result<T> {
        let input = self.schema.put_item_input(&record)?;
        self.store.put_item(input).await?;
        Ok(record)
    }

    /// Apply a partial update and return the record as stored afterwards.
    ///
    /// `updates` must carry the primary key attributes. Attributes it leaves out keep their
    /// stored value.
    #[tracing::instrument(
        name = "dynamodb_repository.update",
        skip_all,
        fields(table_name = %self.schema.table_name),
        err
    )]
    pub async fn update<T: Serialize, R: DeserializeOwned>(
        &self,
        updates: T,
    ) -> error::Result<Option<R>> {
        let input = self.schema.update_item_input(updates)?;
        let record = match self.store.update_item(input).await? {
            Some(item) => Some(from_item(item)?),
            None => None,
        };
        Ok(record)
    }

    /// Delete one record and return it as it was, or `None` if nothing was stored.
    #[tracing::instrument(
        name = "dynamodb_repository.delete",
        skip(self),
        fields(table_name = %self.schema.table_name),
        err
    )]
    pub async fn delete<R: DeserializeOwned>(
        &self,
        partition_key_value: &str,
        sort_key_value: Option<&str>,
    ) -> error::Result<Option<R>> {
        let input = self
            .schema
            .delete_item_input(partition_key_value, sort_key_value)?;
        let record = match self.store.delete_item(input).await? {
            Some(item) if !item.is_empty() => Some(from_item(item)?),
            _ => None,
        };
        Ok(record)
    }

    /// Fetch every record matching the keys and the filters.
    #[tracing::instrument(
        name = "dynamodb_repository.query",
        skip_all,
        fields(table_name = %self.schema.table_name, index_name = ?query_params.index_name),
        err
    )]
    pub async fn query_with_filters<T: Serialize, R: DeserializeOwned>(
        &self,
        query_params: read::query::QueryParams,
        filter_params: common::filter::FilterParams<T>,
    ) -> error::Result<Vec<R>> {
        let input = self
            .schema
            .filtered_query_input(query_params, filter_params)?;
        let store = &self.store;
        let items =
            read::common::get_paginated_items(input, move |input| store.query(input)).await?;
        Ok(from_items(items)?)
    }

    /// Fetch every record of the table matching the filters.
    #[tracing::instrument(
        name = "dynamodb_repository.scan",
        skip_all,
        fields(table_name = %self.schema.table_name),
        err
    )]
    pub async fn scan_with_filters<T: Serialize, R: DeserializeOwned>(
        &self,
        filter_params: common::filter::FilterParams<T>,
    ) -> error::Result<Vec<R>> {
        let input = self.schema.scan_input(filter_params)?;
        let store = &self.store;
        let items =
            read::common::get_paginated_items(input, move |input| store.scan(input)).await?;
        Ok(from_items(items)?)
    }

    /// Fetch the first page of a query on a local secondary index.
    ///
    /// The index shares the table's partition key; only the sort key differs.
    #[tracing::instrument(
        name = "dynamodb_repository.query_local_secondary_index",
        skip(self),
        fields(table_name = %self.schema.table_name),
        err
    )]
    pub async fn query_local_secondary_index(
        &self,
        index_name: &str,
        partition_key_value: &str,
        sort_key_name: &str,
        sort_key_value: Option<&str>,
    ) -> error::Result<read::common::Page> {
        let input = self.schema.query_input(read::query::QueryParams {
            index_name: Some(index_name.to_string()),
            partition_key_value: partition_key_value.to_string(),
            sort_key_name: Some(sort_key_name.to_string()),
            sort_key_value: sort_key_value.map(str::to_string),
            ..Default::default()
        });
        self.store.query(input).await
    }

    /// Fetch the first page of a query on a global secondary index.
    #[tracing::instrument(
        name = "dynamodb_repository.query_global_secondary_index",
        skip(self),
        fields(table_name = %self.schema.table_name),
        err
    )]
    pub async fn query_global_secondary_index(
        &self,
        index_name: &str,
        partition_key_name: &str,
        partition_key_value: &str,
        sort_key_name: Option<&str>,
        sort_key_value: Option<&str>,
    ) -> error::Result<read::common::Page> {
        let input = self.schema.query_input(read::query::QueryParams {
            index_name: Some(index_name.to_string()),
            partition_key_name: Some(partition_key_name.to_string()),
            partition_key_value: partition_key_value.to_string(),
            sort_key_name: sort_key_name.map(str::to_string),
            sort_key_value: sort_key_value.map(str::to_string),
        });
        self.store.query(input).await
    }

    /// Apply `items` atomically, in order, and hand them back.
    #[tracing::instrument(
        name = "dynamodb_repository.transactional_write",
        skip_all,
        fields(table_name = %self.schema.table_name, count = items.len()),
        err
    )]
    pub async fn transactional_write<T: Serialize>(
        &self,
        items: Vec<write::transact_write_items::TransactionItem<T>>,
    ) -> error::Result<Vec<write::transact_write_items::TransactionItem<T>>> {
        let input = self.schema.transact_write_input(&items)?;
        self.store.transact_write_items(input).await?;
        Ok(items)
    }

    /// Check that the table is ready to serve requests.
    ///
    /// Returns the table status, which is always `ACTIVE`; any other status fails with
    /// [`error::Error::TableNotActive`].
    #[tracing::instrument(
        name = "dynamodb_repository.describe_table",
        skip(self),
        fields(table_name = %self.schema.table_name),
        err
    )]
    pub async fn describe_table(&self) -> error::Result<String> {
        let table_status = self
            .store
            .describe_table(self.schema.table_name.clone())
            .await?;
        match table_status {
            Some(table_status) if table_status == ACTIVE_TABLE_STATUS => Ok(table_status),
            Some(table_status) => Err(error::Error::TableNotActive(table_status)),
            None => Err(error::Error::TableNotActive("UNKNOWN".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_dynamodb::types;
    use indexmap::IndexMap;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::collections;

    fn schema() -> common::table::TableSchema {
        common::table::TableSchema::new("t", "pk", Some("sk"))
    }

    fn record(pk: &str, sk: &str) -> common::Record {
        collections::HashMap::from([
            ("pk".to_string(), types::AttributeValue::S(pk.to_string())),
            ("sk".to_string(), types::AttributeValue::S(sk.to_string())),
        ])
    }

    #[tokio::test]
    async fn test_query_with_filters_follows_every_page() {
        let token = record("a", "K1");
        let store = store::mock::MockStore::with_pages(vec![
            read::common::Page {
                items: vec![record("a", "A"), record("a", "B")],
                last_evaluated_key: Some(token.clone()),
            },
            read::common::Page {
                items: vec![record("a", "C")],
                last_evaluated_key: None,
            },
        ]);
        let repository = Repository::new(store, schema());
        let actual: Vec<Value> = repository
            .query_with_filters(
                read::query::QueryParams {
                    partition_key_value: "a".to_string(),
                    ..Default::default()
                },
                common::filter::FilterParams::<Value>::default(),
            )
            .await
            .unwrap();
        let sort_keys: Vec<_> = actual.iter().map(|record| record["sk"].clone()).collect();
        assert_eq!(sort_keys, vec![json!("A"), json!("B"), json!("C")]);

        let requests = repository.store().requests();
        assert_eq!(requests.len(), 2);
        let store::mock::Request::Query(second) = &requests[1] else {
            panic!("expected a query, got {:?}", requests[1]);
        };
        assert_eq!(second.filter_input.exclusive_start_key, Some(token));
    }

    #[tokio::test]
    async fn test_scan_with_filters_sends_filter_expression() {
        let store = store::mock::MockStore::with_pages(vec![read::common::Page {
            items: vec![record("a", "b")],
            last_evaluated_key: None,
        }]);
        let repository = Repository::new(store, schema());
        let filter_params = common::filter::FilterParams {
            filters: IndexMap::from([("status".to_string(), vec![json!("active")])]),
            ..Default::default()
        };
        let actual: Vec<Value> = repository.scan_with_filters(filter_params).await.unwrap();
        assert_eq!(actual, vec![json!({"pk": "a", "sk": "b"})]);

        let requests = repository.store().requests();
        let [store::mock::Request::Scan(scan)] = requests.as_slice() else {
            panic!("expected a single scan, got {requests:?}");
        };
        assert_eq!(
            scan.filter_input.filter_expression.as_deref(),
            Some("(#status = :status0)")
        );
    }

    #[tokio::test]
    async fn test_get_returns_none_when_missing() {
        let repository = Repository::new(store::mock::MockStore::default(), schema());
        let actual: Option<Value> = repository.get("a", Some("b")).await.unwrap();
        assert_eq!(actual, None);
    }

    #[tokio::test]
    async fn test_get_without_sort_key_fails_before_sending() {
        let repository = Repository::new(store::mock::MockStore::default(), schema());
        let actual = repository.get::<Value>("a", None).await;
        assert!(matches!(actual, Err(error::Error::MissingSortKey(_))));
        assert!(repository.store().requests().is_empty());
    }

    #[tokio::test]
    async fn test_put_returns_record() {
        let repository = Repository::new(store::mock::MockStore::default(), schema());
        let record = json!({"pk": "a", "sk": "b", "name": "c"});
        let actual = repository.put(record.clone()).await.unwrap();
        assert_eq!(actual, record);
        assert_eq!(repository.store().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_update_returns_stored_record() {
        let store = store::mock::MockStore::with_record(record("a", "b"));
        let repository = Repository::new(store, schema());
        let actual: Option<Value> = repository
            .update(json!({"pk": "a", "sk": "b", "name": "c"}))
            .await
            .unwrap();
        assert_eq!(actual, Some(json!({"pk": "a", "sk": "b"})));
    }

    #[tokio::test]
    async fn test_update_without_partition_key_sends_nothing() {
        let repository = Repository::new(store::mock::MockStore::default(), schema());
        let actual = repository
            .update::<_, Value>(json!({"sk": "b", "name": "c"}))
            .await;
        assert!(matches!(actual, Err(error::Error::MissingPartitionKey(_))));
        assert!(repository.store().requests().is_empty());
    }

    #[rstest]
    #[case::deleted(Some(record("a", "b")), Some(json!({"pk": "a", "sk": "b"})))]
    #[case::missing(None, None)]
    #[case::empty_attributes(Some(collections::HashMap::new()), None)]
    #[tokio::test]
    async fn test_delete(#[case] stored: Option<common::Record>, #[case] expected: Option<Value>) {
        let store = store::mock::MockStore {
            record: stored,
            ..Default::default()
        };
        let repository = Repository::new(store, schema());
        let actual: Option<Value> = repository.delete("a", Some("b")).await.unwrap();
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_query_global_secondary_index_returns_single_page() {
        let token = record("x", "y");
        let store = store::mock::MockStore::with_pages(vec![
            read::common::Page {
                items: vec![record("a", "b")],
                last_evaluated_key: Some(token.clone()),
            },
            read::common::Page::default(),
        ]);
        let repository = Repository::new(store, schema());
        let actual = repository
            .query_global_secondary_index("gsi1", "email", "a@b.c", None, None)
            .await
            .unwrap();
        assert_eq!(actual.items.len(), 1);
        assert_eq!(actual.last_evaluated_key, Some(token));

        let requests = repository.store().requests();
        let [store::mock::Request::Query(query)] = requests.as_slice() else {
            panic!("expected a single query, got {requests:?}");
        };
        assert_eq!(query.key_condition_expression, "#email = :email_key");
        assert_eq!(query.filter_input.index_name.as_deref(), Some("gsi1"));
    }

    #[tokio::test]
    async fn test_query_local_secondary_index_uses_table_partition_key() {
        let repository = Repository::new(store::mock::MockStore::default(), schema());
        repository
            .query_local_secondary_index("lsi1", "a", "created", Some("2024"))
            .await
            .unwrap();
        let requests = repository.store().requests();
        let [store::mock::Request::Query(query)] = requests.as_slice() else {
            panic!("expected a single query, got {requests:?}");
        };
        assert_eq!(
            query.key_condition_expression,
            "#pk = :pk_key AND #created = :created_key"
        );
    }

    #[tokio::test]
    async fn test_transactional_write_keeps_order() {
        let repository = Repository::new(store::mock::MockStore::default(), schema());
        let items = vec![
            write::transact_write_items::TransactionItem::Put(json!({"pk": "a", "sk": "b"})),
            write::transact_write_items::TransactionItem::Delete {
                partition_key_value: "pk2".to_string(),
                sort_key_value: Some("sk2".to_string()),
            },
        ];
        let actual = repository.transactional_write(items.clone()).await.unwrap();
        assert_eq!(actual, items);

        let requests = repository.store().requests();
        let [store::mock::Request::TransactWriteItems(input)] = requests.as_slice() else {
            panic!("expected a single transaction, got {requests:?}");
        };
        assert_eq!(input.transact_items.len(), 2);
        assert!(input.transact_items[0].put.is_some());
        assert!(input.transact_items[1].delete.is_some());
    }

    #[tokio::test]
    async fn test_transactional_write_propagates_store_rejection() {
        let repository = Repository::new(store::mock::MockStore::rejecting(), schema());
        let items = vec![write::transact_write_items::TransactionItem::Put(
            json!({"pk": "a", "sk": "b"}),
        )];
        let actual = repository.transactional_write(items).await;
        assert!(matches!(actual, Err(error::Error::Store(_))));
    }

    #[rstest]
    #[case::active(Some("ACTIVE"), Ok("ACTIVE"))]
    #[case::creating(Some("CREATING"), Err("CREATING"))]
    #[case::unknown(None, Err("UNKNOWN"))]
    #[tokio::test]
    async fn test_describe_table(
        #[case] table_status: Option<&str>,
        #[case] expected: Result<&str, &str>,
    ) {
        let store = store::mock::MockStore {
            table_status: table_status.map(str::to_string),
            ..Default::default()
        };
        let repository = Repository::new(store, schema());
        let actual = repository.describe_table().await;
        match (actual, expected) {
            (Ok(actual), Ok(expected)) => assert_eq!(actual, expected),
            (Err(error::Error::TableNotActive(actual)), Err(expected)) => {
                assert_eq!(actual, expected)
            }
            (actual, expected) => panic!("expected {expected:?}, got {actual:?}"),
        }
    }
}

//! Repository for the data item table.
//!
//! Records are partitioned by tenant (`pk = TENANT#<id>`) and identified within the tenant
//! by their item id (`sk`).

use crate::{common, config, error, repository, store};

use serde::{Deserialize, Serialize};

/// Partition key attribute of the data item table.
pub const PARTITION_KEY_NAME: &str = "pk";

/// Sort key attribute of the data item table.
pub const SORT_KEY_NAME: &str = "sk";

/// Partition key value holding every record of `tenant_id`.
pub fn tenant_partition_key(tenant_id: &str) -> String {
    format!("TENANT#{tenant_id}")
}

/// Postal address of a data item.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// First address line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    /// Second address line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State or province.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_or_province: Option<String>,
    /// Zip or postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_or_postal_code: Option<String>,
    /// Country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// A data item as stored in the table.
///
/// Attributes left as `None` are not written, so a partial record passed to
/// [`DataItemRepository::update_partial_record`] leaves them untouched.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataItemRecord {
    /// Tenant partition, see [`tenant_partition_key`].
    pub pk: String,
    /// Item identifier within the tenant.
    pub sk: String,
    /// Item identifier exposed to clients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Free numeric attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_number: Option<f64>,
    /// Postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// RFC 3339 creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_timestamp: Option<String>,
    /// RFC 3339 time of the last change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_timestamp: Option<String>,
    /// User who created the item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// User who last changed the item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

/// Data item operations, with missing records reported as [`error::Error::NotFound`].
#[derive(Clone, Debug)]
pub struct DataItemRepository<S> {
    repository: repository::Repository<S>,
}

impl DataItemRepository<aws_sdk_dynamodb::Client> {
    /// Connect to the table named by `config`.
    pub async fn from_config(config: &config::EnvironmentConfig) -> Self {
        let client = config.load_client().await;
        Self::new(client, config.db_table_name.clone())
    }
}

impl<S: store::RecordStore> DataItemRepository<S> {
    /// Bind `store` to the data item table `table_name`.
    pub fn new(store: S, table_name: impl Into<String>) -> Self {
        let schema =
            common::table::TableSchema::new(table_name, PARTITION_KEY_NAME, Some(SORT_KEY_NAME));
        Self {
            repository: repository::Repository::new(store, schema),
        }
    }

    /// The generic repository this one delegates to.
    pub fn repository(&self) -> &repository::Repository<S> {
        &self.repository
    }

    /// Verify connectivity and configuration, returning the table status.
    pub async fn ping_table(&self) -> error::Result<String> {
        tracing::trace!("ping_table called");
        self.repository.describe_table().await
    }

    /// Every record of the table.
    ///
    /// Reads the whole table page by page, which gets slow on large tables.
    pub async fn get_all_records(&self) -> error::Result<Vec<DataItemRecord>> {
        tracing::trace!("get_all_records called");
        self.repository
            .scan_with_filters(common::filter::FilterParams::<String>::default())
            .await
    }

    /// One record by primary key.
    pub async fn get_record(
        &self,
        partition_key_value: &str,
        sort_key_value: &str,
    ) -> error::Result<DataItemRecord> {
        tracing::trace!(partition_key_value, sort_key_value, "get_record called");
        self.repository
            .get(partition_key_value, Some(sort_key_value))
            .await?
            .ok_or_else(|| not_found(partition_key_value))
    }

    /// Delete one record by primary key, returning it as it was.
    pub async fn delete_record(
        &self,
        partition_key_value: &str,
        sort_key_value: &str,
    ) -> error::Result<DataItemRecord> {
        tracing::trace!(partition_key_value, sort_key_value, "delete_record called");
        self.repository
            .delete(partition_key_value, Some(sort_key_value))
            .await?
            .ok_or_else(|| not_found(partition_key_value))
    }

    /// Create or fully replace a record.
    ///
    /// Use [`Self::update_partial_record`] to change some attributes only.
    pub async fn put_record(&self, record: DataItemRecord) -> error::Result<DataItemRecord> {
        tracing::trace!(pk = %record.pk, sk = %record.sk, "put_record called");
        self.repository.put(record).await
    }

    /// Overwrite the attributes set on `record`, leaving the others unchanged.
    ///
    /// Returns the record as stored after the update.
    pub async fn update_partial_record(
        &self,
        record: DataItemRecord,
    ) -> error::Result<DataItemRecord> {
        tracing::trace!(pk = %record.pk, sk = %record.sk, "update_partial_record called");
        let partition_key_value = record.pk.clone();
        self.repository
            .update(record)
            .await?
            .ok_or_else(|| not_found(&partition_key_value))
    }
}

fn not_found(partition_key_value: &str) -> error::Error {
    error::Error::NotFound(format!("No item found with ID {partition_key_value}"))
}

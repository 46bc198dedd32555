#![deny(missing_docs)]

//! # DynamoDB Repository
//!
//! A base repository for services that keep their records in one DynamoDB table.
//!
//! ## Overview
//!
//! The repository is bound to a table schema (table name, partition key and optional sort
//! key) and offers:
//! - Get, put, partial update and delete of single records
//! - Queries and scans with OR/AND equality filters, negation filters and projections
//! - Single-page queries on local and global secondary indexes
//! - Atomic multi-record writes
//! - A table health check
//!
//! Every expression is built with `#name` and `:value` placeholders, so reserved words and
//! special characters in attribute names are never a problem. Multi-page reads are always
//! followed to their last page.
//!
//! ## Quick Example
//!
//! ```no_run
//! use dynamodb_repository::{common, config, read, repository};
//! use indexmap::IndexMap;
//! use serde_json::Value;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = config::EnvironmentConfig::from_env()?;
//! let client = config.load_client().await;
//! let schema = common::table::TableSchema::new(config.db_table_name.clone(), "pk", Some("sk"));
//! let repository = repository::Repository::new(client, schema);
//!
//! // every active or pending record of the tenant, except the archived ones
//! let records: Vec<Value> = repository
//!     .query_with_filters(
//!         read::query::QueryParams {
//!             partition_key_value: "TENANT#1".to_string(),
//!             ..Default::default()
//!         },
//!         common::filter::FilterParams {
//!             filters: IndexMap::from([(
//!                 "status".to_string(),
//!                 vec!["active".to_string(), "pending".to_string()],
//!             )]),
//!             negation_filters: IndexMap::from([(
//!                 "archived".to_string(),
//!                 vec!["true".to_string()],
//!             )]),
//!             fields: None,
//!         },
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@common`] - Table schema, keys, filters and projections
//! - [`mod@read`] - GetItem, Query and Scan requests and pagination
//! - [`mod@write`] - PutItem, UpdateItem, DeleteItem and TransactWriteItems requests
//! - [`mod@store`] - The backend seam, implemented for the SDK client
//! - [`mod@repository`] - The generic repository
//! - [`mod@data_item`] - The data item table repository

/// Table schema, keys, filters and attribute selection.
pub mod common;

/// Environment configuration and client construction.
pub mod config;

/// Repository for the data item table.
pub mod data_item;

/// Error taxonomy.
pub mod error;

/// Tracing subscriber setup.
pub mod logging;

/// Read requests for retrieving records.
///
/// This module provides requests for:
/// - Getting single records by primary key
/// - Querying records by key
/// - Scanning entire tables
pub mod read;

/// Generic repository bound to one table.
pub mod repository;

/// Backend executing the requests.
pub mod store;

/// Write requests for modifying records.
///
/// This module provides requests for:
/// - Putting new records or replacing existing ones
/// - Partially updating records
/// - Deleting records by primary key
/// - Writing several records atomically
pub mod write;

pub use error::{Error, Result};

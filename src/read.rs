//! Read requests for retrieving records from DynamoDB tables.
//!
//! Builders on [`crate::common::table::TableSchema`] turn caller parameters into plain
//! request values, which a [`crate::store::RecordStore`] sends.

/// Filter input, pages and the pagination driver shared by queries and scans.
pub mod common;

/// Get item request for retrieving a single record by primary key.
pub mod get_item;

/// Query request for retrieving records by key.
pub mod query;

/// Scan request for retrieving every record of a table.
pub mod scan;

//! Write requests for modifying records in DynamoDB tables.
//!
//! This module provides requests for:
//! - Putting new records or replacing existing ones
//! - Partially updating records
//! - Deleting records by primary key
//! - Writing several records atomically

/// Delete item request for removing records.
pub mod delete_item;

/// Put item request for creating or replacing records.
pub mod put_item;

/// Transactional write of several records.
pub mod transact_write_items;

/// Update item request for partially modifying records.
pub mod update_item;

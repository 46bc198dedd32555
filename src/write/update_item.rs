use crate::{common, error};

use aws_sdk_dynamodb::types;
use serde::Serialize;
use serde_dynamo::to_item;
use std::collections;

/// An update item request ready to be sent.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateItemInput {
    /// The primary key of the item to update.
    pub key: common::Record,
    /// `SET` expression assigning every non-key attribute. `None` when nothing is assigned.
    pub update_expression: Option<String>,
    /// Aliases for the assigned attribute names.
    pub expression_attribute_names: Option<common::ExpressionAttributeNames>,
    /// Aliases for the assigned attribute values.
    pub expression_attribute_values: Option<common::ExpressionAttributeValues>,
    /// Which attributes the store returns.
    pub return_values: Option<types::ReturnValue>,
    /// The name of the table to write to.
    pub table_name: String,
}

fn is_null(value: &types::AttributeValue) -> bool {
    matches!(value, types::AttributeValue::Null(_))
}

fn get_key_value(record: &common::Record, name: &str) -> Option<types::AttributeValue> {
    record.get(name).filter(|value| !is_null(value)).cloned()
}

fn get_assignment_operation(name: String, value: types::AttributeValue) -> common::ExpressionInput {
    let placeholder = common::name_placeholder(&name);
    let value_placeholder = format!(":{name}");
    common::ExpressionInput {
        expression: format!("{placeholder} = {value_placeholder}"),
        expression_attribute_names: collections::HashMap::from([(placeholder, name)]),
        expression_attribute_values: collections::HashMap::from([(value_placeholder, value)]),
    }
}

impl common::table::TableSchema {
    /// Build a partial update from `updates`.
    ///
    /// The key attributes are taken out of the payload and every other attribute is
    /// assigned, in attribute name order. Null attributes are skipped, they never erase a
    /// stored value. The updated record is returned by the store.
    pub fn update_item_input<T: Serialize>(&self, updates: T) -> error::Result<UpdateItemInput> {
        let record: common::Record = to_item(updates)?;
        let partition_key_value = get_key_value(&record, &self.partition_key_name)
            .ok_or_else(|| error::Error::MissingPartitionKey(self.partition_key_name.clone()))?;
        let sort_key_value = self
            .sort_key_name
            .as_deref()
            .and_then(|sort_key_name| get_key_value(&record, sort_key_name));
        let key = self.key_record(partition_key_value, sort_key_value)?;

        let mut assignments: Vec<_> = record
            .into_iter()
            .filter(|(name, value)| !self.is_key_attribute(name) && !is_null(value))
            .collect();
        assignments.sort_by(|(left, _), (right, _)| left.cmp(right));
        tracing::trace!(count = assignments.len(), "generating update expression");
        let operations = assignments
            .into_iter()
            .map(|(name, value)| get_assignment_operation(name, value))
            .collect();
        let mut operation = common::ExpressionInput::merge(", ", operations);
        if !operation.expression.is_empty() {
            operation.expression = format!("SET {}", operation.expression);
        }
        let operation = operation.finalize();
        Ok(UpdateItemInput {
            key,
            update_expression: operation.expression,
            expression_attribute_names: operation.expression_attribute_names,
            expression_attribute_values: operation.expression_attribute_values,
            return_values: Some(types::ReturnValue::AllNew),
            table_name: self.table_name.clone(),
        })
    }
}

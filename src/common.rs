//! Common utilities for repository operations.
//!
//! This module provides the shared expression accumulator used by every builder, the
//! table schema, key handling, filters and attribute selection.

/// Filter expression building for queries and scans.
pub mod filter;

/// Attribute selection for projection expressions.
pub mod selection;

/// Table schema and primary key generation.
pub mod table;

use aws_sdk_dynamodb::types;
use std::collections;

/// A stored record, as exchanged with the store.
pub type Record = collections::HashMap<String, types::AttributeValue>;

/// Alias map from `#name` placeholders to attribute names.
pub type ExpressionAttributeNames = collections::HashMap<String, String>;

/// Alias map from `:value` placeholders to attribute values.
pub type ExpressionAttributeValues = collections::HashMap<String, types::AttributeValue>;

pub(crate) fn name_placeholder(name: &str) -> String {
    format!("#{name}")
}

fn get_expression(left: String, operator: &str, right: String) -> String {
    if left.is_empty() {
        right
    } else if right.is_empty() {
        left
    } else {
        format!("{left}{operator}{right}")
    }
}

fn non_empty<K, V>(map: collections::HashMap<K, V>) -> Option<collections::HashMap<K, V>> {
    (!map.is_empty()).then_some(map)
}

/// expression with its alias tables
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ExpressionInput {
    pub(crate) expression: String,
    pub(crate) expression_attribute_names: ExpressionAttributeNames,
    pub(crate) expression_attribute_values: ExpressionAttributeValues,
}

/// Expression with empty parts pruned, ready to be set on a request.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct FinalExpression {
    pub(crate) expression: Option<String>,
    pub(crate) expression_attribute_names: Option<ExpressionAttributeNames>,
    pub(crate) expression_attribute_values: Option<ExpressionAttributeValues>,
}

impl ExpressionInput {
    pub(crate) fn merge(operator: &str, items: Vec<Self>) -> Self {
        let mut operation = Self::default();
        for item in items {
            operation.absorb_aliases(
                item.expression_attribute_names,
                item.expression_attribute_values,
            );
            operation.expression = get_expression(operation.expression, operator, item.expression);
        }
        operation
    }

    pub(crate) fn absorb_aliases(
        &mut self,
        names: ExpressionAttributeNames,
        values: ExpressionAttributeValues,
    ) {
        self.expression_attribute_names.extend(names);
        self.expression_attribute_values.extend(values);
    }

    pub(crate) fn merge_into(
        self,
        names: &mut Option<ExpressionAttributeNames>,
        values: &mut Option<ExpressionAttributeValues>,
    ) -> String {
        match names {
            Some(existing) => existing.extend(self.expression_attribute_names),
            None => *names = non_empty(self.expression_attribute_names),
        }
        match values {
            Some(existing) => existing.extend(self.expression_attribute_values),
            None => *values = non_empty(self.expression_attribute_values),
        }
        self.expression
    }

    /// The store rejects empty-but-present expressions and alias maps.
    pub(crate) fn finalize(self) -> FinalExpression {
        let expression = if self.expression.is_empty() {
            None
        } else {
            Some(self.expression)
        };
        FinalExpression {
            expression,
            expression_attribute_names: non_empty(self.expression_attribute_names),
            expression_attribute_values: non_empty(self.expression_attribute_values),
        }
    }
}

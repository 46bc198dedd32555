use crate::{common, error, read};

use aws_sdk_dynamodb::types;
use serde::Serialize;
use std::collections;

/// Key selection of a query.
///
/// The key names default to the table's own key names. Override them to query a global
/// secondary index whose key attributes differ from the table's.
///
/// ```rust
/// use dynamodb_repository::{common, read};
///
/// let schema = common::table::TableSchema::new("data-items", "pk", Some("sk"));
/// let query = schema.query_input(read::query::QueryParams {
///     partition_key_value: "TENANT#1".to_string(),
///     ..Default::default()
/// });
/// assert_eq!(query.key_condition_expression, "#pk = :pk_key");
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct QueryParams {
    /// Secondary index to query.
    pub index_name: Option<String>,
    /// Partition key name override.
    pub partition_key_name: Option<String>,
    /// The partition key value to match.
    pub partition_key_value: String,
    /// Sort key name override.
    pub sort_key_name: Option<String>,
    /// The sort key value to match. The sort key is left out of the condition when `None`.
    pub sort_key_value: Option<String>,
}

/// A query request ready to be sent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryInput {
    /// Equality condition on the partition key and, optionally, the sort key.
    pub key_condition_expression: String,
    /// Filter, projection and paging arguments.
    pub filter_input: read::common::FilterInput,
}

impl read::common::Paginated for QueryInput {
    fn set_exclusive_start_key(&mut self, key: Option<common::Record>) {
        self.filter_input.exclusive_start_key = key;
    }
}

fn get_key_operation(name: String, value: String) -> common::ExpressionInput {
    let placeholder = common::name_placeholder(&name);
    let value_placeholder = format!(":{name}_key");
    common::ExpressionInput {
        expression: format!("{placeholder} = {value_placeholder}"),
        expression_attribute_names: collections::HashMap::from([(placeholder, name)]),
        expression_attribute_values: collections::HashMap::from([(
            value_placeholder,
            types::AttributeValue::S(value),
        )]),
    }
}

impl common::table::TableSchema {
    /// Build a query matching the given keys.
    pub fn query_input(&self, query_params: QueryParams) -> QueryInput {
        let partition_key_name = query_params
            .partition_key_name
            .unwrap_or_else(|| self.partition_key_name.clone());
        let mut operations = vec![get_key_operation(
            partition_key_name,
            query_params.partition_key_value,
        )];
        let sort_key_name = query_params
            .sort_key_name
            .or_else(|| self.sort_key_name.clone());
        if let (Some(sort_key_name), Some(sort_key_value)) =
            (sort_key_name, query_params.sort_key_value)
        {
            operations.push(get_key_operation(sort_key_name, sort_key_value));
        }
        let operation =
            common::ExpressionInput::merge(&common::filter::LogicalOperator::And, operations);
        let mut filter_input = read::common::FilterInput {
            index_name: query_params.index_name,
            table_name: self.table_name.clone(),
            ..Default::default()
        };
        let key_condition_expression = operation.merge_into(
            &mut filter_input.expression_attribute_names,
            &mut filter_input.expression_attribute_values,
        );
        QueryInput {
            key_condition_expression,
            filter_input,
        }
    }

    /// Build a query matching the given keys, with filters and projection on top.
    pub fn filtered_query_input<T: Serialize>(
        &self,
        query_params: QueryParams,
        filter_params: common::filter::FilterParams<T>,
    ) -> error::Result<QueryInput> {
        let mut query = self.query_input(query_params);
        let filter_input = self.filter_input(filter_params)?;
        if let Some(expression_attribute_names) = filter_input.expression_attribute_names {
            query
                .filter_input
                .expression_attribute_names
                .get_or_insert_with(Default::default)
                .extend(expression_attribute_names);
        }
        if let Some(expression_attribute_values) = filter_input.expression_attribute_values {
            query
                .filter_input
                .expression_attribute_values
                .get_or_insert_with(Default::default)
                .extend(expression_attribute_values);
        }
        query.filter_input.filter_expression = filter_input.filter_expression;
        query.filter_input.projection_expression = filter_input.projection_expression;
        Ok(query)
    }
}

use crate::common;

use indexmap::IndexMap;
use serde::Serialize;
use serde_dynamo::{Result, to_attribute_value};
use std::{collections, ops};

/// Logical operator for combining conditions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum LogicalOperator {
    And,
    Or,
}

impl ops::Deref for LogicalOperator {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

/// Filter parameters for queries and scans.
///
/// Values listed for the same attribute are OR-combined, distinct attributes are
/// AND-combined. Negation filters have the same shape and exclude whatever they match.
///
/// ```rust
/// use dynamodb_repository::common::filter;
/// use indexmap::IndexMap;
///
/// let params = filter::FilterParams {
///     // only records with status "active" or "pending"
///     filters: IndexMap::from([(
///         "status".to_string(),
///         vec!["active".to_string(), "pending".to_string()],
///     )]),
///     // but not the deleted ones
///     negation_filters: IndexMap::from([("deleted".to_string(), vec!["true".to_string()])]),
///     // and only the score, plus the primary key
///     fields: Some(vec!["score".to_string()]),
/// };
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterParams<T> {
    /// Attribute name to the values it may equal.
    pub filters: IndexMap<String, Vec<T>>,
    /// Attribute name to the values it must not equal.
    pub negation_filters: IndexMap<String, Vec<T>>,
    /// Attributes to return. `None` returns every attribute.
    pub fields: Option<Vec<String>>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum FilterKind {
    Positive,
    Negation,
}

impl FilterKind {
    fn value_placeholder(self, name: &str, index: usize) -> String {
        match self {
            Self::Positive => format!(":{name}{index}"),
            Self::Negation => format!(":{name}_not{index}"),
        }
    }
}

/// Value aliases issued so far for one filter expression.
///
/// An alias already taken by another attribute gets a `_<n>` suffix, so `a` at index 10
/// and `a1` at index 0 never share `:a10`.
#[derive(Debug, Default)]
struct ValuePlaceholders {
    issued: collections::HashSet<String>,
}

impl ValuePlaceholders {
    fn issue(&mut self, placeholder: String) -> String {
        let mut candidate = placeholder.clone();
        let mut suffix = 0;
        while self.issued.contains(&candidate) {
            suffix += 1;
            candidate = format!("{placeholder}_{suffix}");
        }
        self.issued.insert(candidate.clone());
        candidate
    }
}

fn get_attribute_operation<T: Serialize>(
    name: String,
    values: Vec<T>,
    kind: FilterKind,
    placeholders: &mut ValuePlaceholders,
) -> Result<common::ExpressionInput> {
    let placeholder = common::name_placeholder(&name);
    let mut expressions = Vec::with_capacity(values.len());
    let mut expression_attribute_values = collections::HashMap::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        let value = to_attribute_value(value)?;
        let value_placeholder = placeholders.issue(kind.value_placeholder(&name, index));
        expressions.push(format!("{placeholder} = {value_placeholder}"));
        expression_attribute_values.insert(value_placeholder, value);
    }
    let expression = format!("({})", expressions.join(&*LogicalOperator::Or));
    let operation = common::ExpressionInput {
        expression,
        expression_attribute_names: collections::HashMap::from([(placeholder, name)]),
        expression_attribute_values,
    };
    Ok(operation)
}

fn get_filter_operation<T: Serialize>(
    filters: IndexMap<String, Vec<T>>,
    kind: FilterKind,
    placeholders: &mut ValuePlaceholders,
) -> Result<common::ExpressionInput> {
    let mut operations = Vec::with_capacity(filters.len());
    for (name, values) in filters {
        if values.is_empty() {
            continue;
        }
        operations.push(get_attribute_operation(name, values, kind, placeholders)?);
    }
    // a single attribute group must stay bare: the store's parser rejects the extra parentheses
    let is_composite = operations.len() > 1;
    let mut operation = common::ExpressionInput::merge(&LogicalOperator::And, operations);
    if is_composite {
        operation.expression = format!("({})", operation.expression);
    }
    Ok(operation)
}

/// Build the filter expression of positive and negated filters.
pub(crate) fn get_condition_operation<T: Serialize>(
    filters: IndexMap<String, Vec<T>>,
    negation_filters: IndexMap<String, Vec<T>>,
) -> Result<common::ExpressionInput> {
    let mut placeholders = ValuePlaceholders::default();
    let mut operation = get_filter_operation(filters, FilterKind::Positive, &mut placeholders)?;
    let negation_operation =
        get_filter_operation(negation_filters, FilterKind::Negation, &mut placeholders)?;
    if !negation_operation.expression.is_empty() {
        let negated = format!("NOT {}", negation_operation.expression);
        operation.expression = if operation.expression.is_empty() {
            negated
        } else {
            format!("{}{}({negated})", operation.expression, &*LogicalOperator::And)
        };
        operation.absorb_aliases(
            negation_operation.expression_attribute_names,
            negation_operation.expression_attribute_values,
        );
    }
    Ok(operation)
}

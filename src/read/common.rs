use crate::{common, error};

use serde::Serialize;
use std::future::Future;

/// Arguments shared by Query and Scan requests.
///
/// Empty expressions and alias maps are left as `None`: the store rejects them when present
/// but empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterInput {
    /// Continuation token of the previous page.
    pub exclusive_start_key: Option<common::Record>,
    /// Aliases for attribute names used in any expression of the request.
    pub expression_attribute_names: Option<common::ExpressionAttributeNames>,
    /// Aliases for attribute values used in any expression of the request.
    pub expression_attribute_values: Option<common::ExpressionAttributeValues>,
    /// Filter applied to the matching items.
    pub filter_expression: Option<String>,
    /// Secondary index to read instead of the base table.
    pub index_name: Option<String>,
    /// Attributes to return.
    pub projection_expression: Option<String>,
    /// The name of the table to read from.
    pub table_name: String,
}

/// One page of results.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    /// Items of this page, in store order.
    pub items: Vec<common::Record>,
    /// Continuation token, present when more pages follow.
    pub last_evaluated_key: Option<common::Record>,
}

/// Requests that can be resumed from a continuation token.
pub trait Paginated {
    /// Resume the request after `key`.
    fn set_exclusive_start_key(&mut self, key: Option<common::Record>);
}

impl Paginated for FilterInput {
    fn set_exclusive_start_key(&mut self, key: Option<common::Record>) {
        self.exclusive_start_key = key;
    }
}

impl common::table::TableSchema {
    /// Build the filter and projection parts of a query or scan.
    pub fn filter_input<T: Serialize>(
        &self,
        filter_params: common::filter::FilterParams<T>,
    ) -> error::Result<FilterInput> {
        tracing::trace!(table_name = %self.table_name, "generating filter input");
        let mut operation = common::filter::get_condition_operation(
            filter_params.filters,
            filter_params.negation_filters,
        )?;
        let projection_expression = filter_params.fields.map(|fields| {
            let selection_operation = self.get_selection_operation(fields);
            operation.absorb_aliases(
                selection_operation.expression_attribute_names,
                selection_operation.expression_attribute_values,
            );
            selection_operation.expression
        });
        let operation = operation.finalize();
        let filter_input = FilterInput {
            expression_attribute_names: operation.expression_attribute_names,
            expression_attribute_values: operation.expression_attribute_values,
            filter_expression: operation.expression,
            projection_expression,
            table_name: self.table_name.clone(),
            ..Default::default()
        };
        Ok(filter_input)
    }
}

/// Fetch every page of a query or scan.
///
/// Each continuation token is copied into the next request until the store stops returning
/// one, so the result is never truncated. Pages are fetched one after the other and their
/// items are concatenated in page order.
pub(crate) async fn get_paginated_items<I, F, Fut>(
    mut input: I,
    mut fetch: F,
) -> error::Result<Vec<common::Record>>
where
    I: Paginated + Clone,
    F: FnMut(I) -> Fut,
    Fut: Future<Output = error::Result<Page>>,
{
    let mut items = Vec::new();
    let mut page_number = 0_usize;
    loop {
        let page = fetch(input.clone()).await?;
        page_number += 1;
        tracing::debug!(
            page = page_number,
            count = page.items.len(),
            has_more = page.last_evaluated_key.is_some(),
            "results returned"
        );
        items.extend(page.items);
        match page.last_evaluated_key {
            Some(last_evaluated_key) => input.set_exclusive_start_key(Some(last_evaluated_key)),
            None => return Ok(items),
        }
    }
}

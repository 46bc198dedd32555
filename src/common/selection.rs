use crate::common;

use indexmap::IndexSet;
use std::collections;

impl common::table::TableSchema {
    /// Attributes to project, with the primary key attributes appended when missing.
    ///
    /// The store always needs the key in the projection and rejects an attribute listed
    /// twice, so duplicates are removed keeping the first occurrence.
    pub fn projection_fields<I, S>(&self, fields: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields: IndexSet<String> = fields.into_iter().map(Into::into).collect();
        fields.insert(self.partition_key_name.clone());
        if let Some(sort_key_name) = &self.sort_key_name {
            fields.insert(sort_key_name.clone());
        }
        fields.into_iter().collect()
    }

    pub(crate) fn get_selection_operation(&self, fields: Vec<String>) -> common::ExpressionInput {
        let operations = self
            .projection_fields(fields)
            .into_iter()
            .map(|field| {
                let placeholder = common::name_placeholder(&field);
                common::ExpressionInput {
                    expression: placeholder.clone(),
                    expression_attribute_names: collections::HashMap::from([(placeholder, field)]),
                    ..Default::default()
                }
            })
            .collect();
        common::ExpressionInput::merge(", ", operations)
    }
}

use crate::{common, error};

use serde::Serialize;
use serde_dynamo::to_item;

/// A put item request ready to be sent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PutItemInput {
    /// The full record to store, primary key included.
    pub item: common::Record,
    /// The name of the table to write to.
    pub table_name: String,
}

impl common::table::TableSchema {
    /// Build an unconditional put of `record`, replacing any item with the same key.
    pub fn put_item_input<T: Serialize>(&self, record: &T) -> error::Result<PutItemInput> {
        let item: common::Record = to_item(record)?;
        Ok(PutItemInput {
            item,
            table_name: self.table_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_dynamodb::types;
    use serde_json::json;
    use std::collections;

    #[test]
    fn test_put_item_input() {
        let schema = common::table::TableSchema::new("t", "pk", Some("sk"));
        let record = json!({"pk": "a", "sk": "b", "count": 2, "tags": ["x"]});
        let actual = schema.put_item_input(&record).unwrap();
        let expected = PutItemInput {
            item: collections::HashMap::from([
                ("pk".to_string(), types::AttributeValue::S("a".to_string())),
                ("sk".to_string(), types::AttributeValue::S("b".to_string())),
                ("count".to_string(), types::AttributeValue::N("2".to_string())),
                (
                    "tags".to_string(),
                    types::AttributeValue::L(vec![types::AttributeValue::S("x".to_string())]),
                ),
            ]),
            table_name: "t".to_string(),
        };
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_put_item_input_rejects_non_map_records() {
        let schema = common::table::TableSchema::new("t", "pk", None::<String>);
        let actual = schema.put_item_input(&"not a record");
        assert!(matches!(actual, Err(error::Error::Serialization(_))));
    }
}

//! Forward conversion: `Item` → AWS SDK request types.

use crate::value::{AttributeValue, Item};
use aws_sdk_dynamodb::error::BuildError;
use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::{AttributeValue as DynamoValue, PutRequest, WriteRequest};
use std::collections::HashMap;

impl From<AttributeValue> for DynamoValue {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::S(s) => DynamoValue::S(s),
            AttributeValue::N(n) => DynamoValue::N(n),
            AttributeValue::B(b) => DynamoValue::B(Blob::new(b)),
        }
    }
}

/// Convert an item to the attribute map used by PutItem / BatchWriteItem.
pub fn to_attribute_map(item: Item) -> HashMap<String, DynamoValue> {
    item.into_attributes()
        .into_iter()
        .map(|(name, value)| (name, value.into()))
        .collect()
}

/// Wrap an item in a put `WriteRequest`.
pub fn to_write_request(item: Item) -> Result<WriteRequest, BuildError> {
    let put_request = PutRequest::builder()
        .set_item(Some(to_attribute_map(item)))
        .build()?;
    Ok(WriteRequest::builder().put_request(put_request).build())
}

//! Reverse conversion: AWS SDK table description → `TableDescription`.

use crate::schema::{AttributeDefinitionEntry, KeySchemaEntry, TableDescription};
use aws_sdk_dynamodb::types::TableDescription as DynamoTableDescription;

impl From<&DynamoTableDescription> for TableDescription {
    fn from(table: &DynamoTableDescription) -> Self {
        let key_schema = table
            .key_schema()
            .iter()
            .map(|element| KeySchemaEntry {
                attribute_name: element.attribute_name().to_string(),
                key_type: element.key_type().as_str().to_string(),
            })
            .collect();

        let attribute_definitions = table
            .attribute_definitions()
            .iter()
            .map(|definition| AttributeDefinitionEntry {
                attribute_name: definition.attribute_name().to_string(),
                attribute_type: definition.attribute_type().as_str().to_string(),
            })
            .collect();

        Self {
            key_schema,
            attribute_definitions,
        }
    }
}

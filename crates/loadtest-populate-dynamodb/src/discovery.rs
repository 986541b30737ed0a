//! Key schema discovery.

use crate::service::TableService;
use dynamodb_types::{KeySchema, SchemaError};
use tracing::info;

/// Describe the table once and resolve its key schema.
///
/// Runs before any worker starts; the result is immutable afterwards.
pub async fn discover_schema(
    service: &dyn TableService,
    table_name: &str,
) -> Result<KeySchema, SchemaError> {
    info!("Discovering key schema for table: {}", table_name);

    let description =
        service
            .describe_table(table_name)
            .await
            .map_err(|e| SchemaError::Describe {
                table: table_name.to_string(),
                message: e.to_string(),
            })?;

    let schema = KeySchema::from_description(&description)?;
    info!("Table {}: {}", table_name, schema);
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTableService;
    use dynamodb_types::{KeyAttributeType, TableDescription};

    #[tokio::test]
    async fn test_discover_composite_key() {
        let service = MockTableService::new(
            TableDescription::new()
                .with_key("pk", "HASH")
                .with_key("sk", "RANGE")
                .with_attribute("pk", "N")
                .with_attribute("sk", "B")
                .with_attribute("gsi_pk", "S"),
        );

        let schema = discover_schema(&service, "orders").await.unwrap();
        assert_eq!(
            schema,
            KeySchema::partition_only("pk", KeyAttributeType::Number)
                .with_sort_key("sk", KeyAttributeType::Binary)
        );
        assert_eq!(service.describe_calls(), 1);
    }

    #[tokio::test]
    async fn test_describe_failure() {
        let service = MockTableService::failing_describe(
            Some("ResourceNotFoundException"),
            "Requested resource not found: Table: missing not found",
        );

        let err = discover_schema(&service, "missing").await.unwrap_err();
        assert!(matches!(err, SchemaError::Describe { ref table, .. } if table == "missing"));
    }

    #[tokio::test]
    async fn test_missing_definition_is_schema_error() {
        let service = MockTableService::new(TableDescription::new().with_key("pk", "HASH"));

        let err = discover_schema(&service, "orders").await.unwrap_err();
        assert_eq!(err, SchemaError::MissingAttributeDefinition("pk".to_string()));
    }
}

//! Batched write execution.

use crate::error::WriteError;
use crate::service::{BatchWriteAck, TableService};
use dynamodb_types::Item;
use tracing::debug;

/// Submit one batch as a single BatchWriteItem request.
///
/// Failures are classified into a [`WriteError`]. Unprocessed items in a
/// successful response are reported in the ack and are not retried.
pub async fn execute_batch(
    service: &dyn TableService,
    table_name: &str,
    batch: Vec<Item>,
) -> Result<BatchWriteAck, WriteError> {
    let ack = service.batch_write(table_name, batch).await?;
    if ack.unprocessed_items > 0 {
        debug!(
            "Batch write to {} left {} items unprocessed",
            table_name, ack.unprocessed_items
        );
    }
    Ok(ack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WriteErrorKind;
    use crate::testing::MockTableService;
    use dynamodb_types::{AttributeValue, TableDescription};

    fn batch(size: usize) -> Vec<Item> {
        (0..size)
            .map(|i| {
                [("id".to_string(), AttributeValue::S(format!("item-{i}")))]
                    .into_iter()
                    .collect()
            })
            .collect()
    }

    fn description() -> TableDescription {
        TableDescription::new()
            .with_key("id", "HASH")
            .with_attribute("id", "S")
    }

    #[tokio::test]
    async fn test_execute_batch_success() {
        let service = MockTableService::new(description()).with_unprocessed(2);

        let ack = execute_batch(&service, "events", batch(25)).await.unwrap();
        assert_eq!(ack.unprocessed_items, 2);
        assert_eq!(service.write_calls(), 1);
        assert_eq!(service.items_received(), 25);
    }

    #[tokio::test]
    async fn test_execute_batch_classifies_failure() {
        let service = MockTableService::new(description()).fail_on_write(
            1,
            Some("ItemCollectionSizeLimitExceededException"),
            "Item collection too large",
        );

        let err = execute_batch(&service, "events", batch(25)).await.unwrap_err();
        assert_eq!(err.kind, WriteErrorKind::ItemCollectionSizeExceeded);
        assert_eq!(err.message, "Item collection too large");
    }
}

//! DynamoDB populator tying discovery and the worker pool together.

use crate::args::DynamoDBPopulateArgs;
use crate::discovery::discover_schema;
use crate::error::LoadError;
use crate::pool::{run_pool, PoolConfig, PoolReport};
use crate::service::{AwsTableService, TableService};
use dynamodb_types::KeySchema;
use std::sync::Arc;
use tracing::info;

/// Generates write load against one DynamoDB table.
pub struct DynamoDBPopulator {
    service: Arc<dyn TableService>,
    table_name: String,
}

impl DynamoDBPopulator {
    /// Create a populator backed by the AWS SDK.
    pub async fn connect(args: &DynamoDBPopulateArgs) -> Self {
        let service = AwsTableService::connect(&args.connect_options()).await;
        Self::with_service(Arc::new(service), &args.table_name)
    }

    /// Create a populator over any table service.
    pub fn with_service(service: Arc<dyn TableService>, table_name: &str) -> Self {
        Self {
            service,
            table_name: table_name.to_string(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Resolve the table's key schema.
    pub async fn discover_schema(&self) -> Result<KeySchema, LoadError> {
        Ok(discover_schema(self.service.as_ref(), &self.table_name).await?)
    }

    /// Drive write load with the given schema until the pool stops.
    pub async fn populate(
        &self,
        schema: KeySchema,
        config: &PoolConfig,
    ) -> Result<PoolReport, LoadError> {
        info!(
            "Populating table '{}' with {} workers for {:?}",
            self.table_name, config.worker_count, config.deadline
        );
        run_pool(
            self.service.clone(),
            &self.table_name,
            Arc::new(schema),
            config,
        )
        .await
    }

    /// Discover the schema, then populate.
    pub async fn run(&self, config: &PoolConfig) -> Result<PoolReport, LoadError> {
        let schema = self.discover_schema().await?;
        self.populate(schema, config).await
    }
}

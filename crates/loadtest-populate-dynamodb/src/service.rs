//! Remote table service used by discovery and the write path.
//!
//! `TableService` is the narrow surface the load generator needs from
//! DynamoDB. `AwsTableService` backs it with the AWS SDK; tests use
//! [`crate::testing::MockTableService`].

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use dynamodb_types::{to_write_request, Item, TableDescription};
use std::fmt::Debug;
use thiserror::Error;
use tracing::debug;

/// An error reported by the remote service.
///
/// `code` is the service error code (e.g. `ResourceNotFoundException`)
/// when the service returned one; transport failures carry none.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ServiceError {
    pub code: Option<String>,
    pub message: String,
}

impl ServiceError {
    pub fn new(code: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            code: code.map(str::to_string),
            message: message.into(),
        }
    }
}

/// Acknowledgement of a BatchWriteItem call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchWriteAck {
    /// Put requests the service handed back unprocessed
    pub unprocessed_items: usize,
}

/// The two table operations the load generator depends on.
#[async_trait]
pub trait TableService: Send + Sync {
    /// Describe the table's key schema and attribute definitions.
    async fn describe_table(&self, table_name: &str) -> Result<TableDescription, ServiceError>;

    /// Put every item in one batch write request.
    async fn batch_write(
        &self,
        table_name: &str,
        items: Vec<Item>,
    ) -> Result<BatchWriteAck, ServiceError>;
}

/// Connection options for the AWS-backed service.
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    /// Overrides the region from the environment / profile
    pub region: Option<String>,
    /// Custom endpoint, e.g. DynamoDB Local
    pub endpoint_url: Option<String>,
}

/// `TableService` backed by the AWS SDK DynamoDB client.
#[derive(Debug, Clone)]
pub struct AwsTableService {
    client: aws_sdk_dynamodb::Client,
}

impl AwsTableService {
    /// Create a client from the default AWS provider chain.
    ///
    /// Credentials come from environment variables, the shared config
    /// files, or the instance role.
    pub async fn connect(options: &ConnectOptions) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &options.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(endpoint_url) = &options.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        let sdk_config = loader.load().await;
        Self::from_client(aws_sdk_dynamodb::Client::new(&sdk_config))
    }

    /// Wrap an existing client.
    pub fn from_client(client: aws_sdk_dynamodb::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TableService for AwsTableService {
    async fn describe_table(&self, table_name: &str) -> Result<TableDescription, ServiceError> {
        let output = self
            .client
            .describe_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(service_error)?;

        let table = output.table().ok_or_else(|| {
            ServiceError::new(
                None,
                format!("DescribeTable returned no description for '{table_name}'"),
            )
        })?;
        Ok(TableDescription::from(table))
    }

    async fn batch_write(
        &self,
        table_name: &str,
        items: Vec<Item>,
    ) -> Result<BatchWriteAck, ServiceError> {
        let requests = items
            .into_iter()
            .map(to_write_request)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ServiceError::new(None, format!("Failed to build put request: {e}")))?;

        let output = self
            .client
            .batch_write_item()
            .request_items(table_name, requests)
            .send()
            .await
            .map_err(service_error)?;

        let unprocessed_items = output
            .unprocessed_items()
            .and_then(|tables| tables.get(table_name))
            .map(Vec::len)
            .unwrap_or(0);
        if unprocessed_items > 0 {
            debug!("{} unprocessed items returned for {}", unprocessed_items, table_name);
        }

        Ok(BatchWriteAck { unprocessed_items })
    }
}

/// Extract the service error code and message from an SDK error.
fn service_error<E, R>(err: SdkError<E, R>) -> ServiceError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    let service_err = err.as_service_error();
    let code = service_err.and_then(|e| e.code()).map(str::to_string);
    let message = service_err
        .and_then(|e| e.message())
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
    ServiceError { code, message }
}

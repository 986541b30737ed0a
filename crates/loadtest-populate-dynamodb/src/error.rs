//! Error types for the DynamoDB populator.

use crate::service::ServiceError;
use dynamodb_types::SchemaError;
use loadtest_generator::SynthesisError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a failed BatchWriteItem call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteErrorKind {
    ThroughputExceeded,
    ResourceNotFound,
    ItemCollectionSizeExceeded,
    InternalServerError,
    /// Any other service error, or a transport failure with no error code
    Other,
}

impl WriteErrorKind {
    /// Classify a remote error code.
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("ProvisionedThroughputExceededException") => WriteErrorKind::ThroughputExceeded,
            Some("ResourceNotFoundException") => WriteErrorKind::ResourceNotFound,
            Some("ItemCollectionSizeLimitExceededException") => {
                WriteErrorKind::ItemCollectionSizeExceeded
            }
            Some("InternalServerError") => WriteErrorKind::InternalServerError,
            _ => WriteErrorKind::Other,
        }
    }

    /// The service error code this kind was classified from.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            WriteErrorKind::ThroughputExceeded => Some("ProvisionedThroughputExceededException"),
            WriteErrorKind::ResourceNotFound => Some("ResourceNotFoundException"),
            WriteErrorKind::ItemCollectionSizeExceeded => {
                Some("ItemCollectionSizeLimitExceededException")
            }
            WriteErrorKind::InternalServerError => Some("InternalServerError"),
            WriteErrorKind::Other => None,
        }
    }

    fn prefix(&self) -> String {
        self.code().map(|code| format!("{code}: ")).unwrap_or_default()
    }
}

/// A failed batch write, tagged with its classified kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}{}", .kind.prefix(), .message)]
pub struct WriteError {
    pub kind: WriteErrorKind,
    pub message: String,
}

impl From<ServiceError> for WriteError {
    fn from(err: ServiceError) -> Self {
        Self {
            kind: WriteErrorKind::from_code(err.code.as_deref()),
            message: err.message,
        }
    }
}

/// Errors that can occur during a load run.
#[derive(Error, Debug, Clone)]
pub enum LoadError {
    /// Key schema discovery failed
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Item synthesis failed
    #[error("Generator error: {0}")]
    Synthesis(#[from] SynthesisError),

    /// Batch write failed
    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    /// Invalid run configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LoadError {
    /// The write classification, when this is a write failure.
    pub fn write_kind(&self) -> Option<WriteErrorKind> {
        match self {
            LoadError::Write(err) => Some(err.kind),
            _ => None,
        }
    }
}

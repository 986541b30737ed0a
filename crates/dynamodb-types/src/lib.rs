//! DynamoDB key schema and item types for dynamo-loadtest.
//!
//! This crate holds the data model shared by the generator and the populator:
//!
//! - [`schema`] - `KeySchema` resolved from a table description
//! - [`value`] - `AttributeValue` and `Item` produced by the generator
//! - [`forward`] - `Item` → AWS SDK attribute map conversion
//! - [`reverse`] - AWS SDK table description → `TableDescription` conversion
//!
//! # Example
//!
//! ```rust
//! use dynamodb_types::{KeySchema, TableDescription};
//!
//! let description = TableDescription::new()
//!     .with_key("id", "HASH")
//!     .with_attribute("id", "S");
//!
//! let schema = KeySchema::from_description(&description).unwrap();
//! assert_eq!(schema.partition_key.name, "id");
//! assert!(schema.sort_key.is_none());
//! ```

pub mod forward;
pub mod reverse;
pub mod schema;
pub mod value;

pub use forward::{to_attribute_map, to_write_request};
pub use schema::{
    AttributeDefinitionEntry, KeyAttribute, KeyAttributeType, KeySchema, KeySchemaEntry,
    SchemaError, TableDescription,
};
pub use value::{AttributeValue, Item};

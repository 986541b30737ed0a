//! Key schema types resolved from a DynamoDB table description.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Key role for a partition key in a table description.
pub const HASH_KEY_TYPE: &str = "HASH";
/// Key role for a sort key in a table description.
pub const RANGE_KEY_TYPE: &str = "RANGE";

/// Errors raised while resolving the key schema of a table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The describe-table call failed
    #[error("Failed to describe table '{table}': {message}")]
    Describe { table: String, message: String },

    /// The table description has no HASH key
    #[error("Table description has no HASH key")]
    MissingPartitionKey,

    /// The same key role appears more than once
    #[error("Key role {0} appears more than once in the key schema")]
    DuplicateKeyRole(String),

    /// A key role other than HASH or RANGE
    #[error("Unknown key role '{role}' for attribute '{attribute}'")]
    UnknownKeyRole { attribute: String, role: String },

    /// A key attribute is not listed in the attribute definitions
    #[error("Key attribute '{0}' has no attribute definition")]
    MissingAttributeDefinition(String),
}

/// One entry of a table's key schema, as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySchemaEntry {
    pub attribute_name: String,
    /// `HASH` or `RANGE`
    pub key_type: String,
}

/// One attribute definition, as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinitionEntry {
    pub attribute_name: String,
    /// `S`, `N` or `B`
    pub attribute_type: String,
}

/// The subset of a table description needed to resolve its key schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescription {
    pub key_schema: Vec<KeySchemaEntry>,
    pub attribute_definitions: Vec<AttributeDefinitionEntry>,
}

impl TableDescription {
    /// Create an empty description.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key schema entry.
    pub fn with_key(mut self, attribute_name: impl Into<String>, key_type: impl Into<String>) -> Self {
        self.key_schema.push(KeySchemaEntry {
            attribute_name: attribute_name.into(),
            key_type: key_type.into(),
        });
        self
    }

    /// Add an attribute definition.
    pub fn with_attribute(
        mut self,
        attribute_name: impl Into<String>,
        attribute_type: impl Into<String>,
    ) -> Self {
        self.attribute_definitions.push(AttributeDefinitionEntry {
            attribute_name: attribute_name.into(),
            attribute_type: attribute_type.into(),
        });
        self
    }

    fn attribute_type_of(&self, name: &str) -> Option<&str> {
        self.attribute_definitions
            .iter()
            .find(|def| def.attribute_name == name)
            .map(|def| def.attribute_type.as_str())
    }
}

/// Declared value type of a key attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAttributeType {
    String,
    Number,
    Binary,
    /// A type tag outside `S` / `N` / `B`
    Unsupported(String),
}

impl KeyAttributeType {
    /// Parse a DynamoDB scalar type tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "S" => KeyAttributeType::String,
            "N" => KeyAttributeType::Number,
            "B" => KeyAttributeType::Binary,
            other => KeyAttributeType::Unsupported(other.to_string()),
        }
    }

    /// The DynamoDB scalar type tag.
    pub fn tag(&self) -> &str {
        match self {
            KeyAttributeType::String => "S",
            KeyAttributeType::Number => "N",
            KeyAttributeType::Binary => "B",
            KeyAttributeType::Unsupported(tag) => tag,
        }
    }
}

impl fmt::Display for KeyAttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAttributeType::String => write!(f, "String"),
            KeyAttributeType::Number => write!(f, "Number"),
            KeyAttributeType::Binary => write!(f, "Binary"),
            KeyAttributeType::Unsupported(tag) => write!(f, "Unsupported({tag})"),
        }
    }
}

/// A named key attribute with its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: KeyAttributeType,
}

impl KeyAttribute {
    pub fn new(name: impl Into<String>, attribute_type: KeyAttributeType) -> Self {
        Self {
            name: name.into(),
            attribute_type,
        }
    }
}

/// Key schema of a table: a partition key and an optional sort key.
///
/// Built once before any worker starts and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySchema {
    pub partition_key: KeyAttribute,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<KeyAttribute>,
}

impl KeySchema {
    /// Schema with only a partition key.
    pub fn partition_only(name: impl Into<String>, attribute_type: KeyAttributeType) -> Self {
        Self {
            partition_key: KeyAttribute::new(name, attribute_type),
            sort_key: None,
        }
    }

    /// Add a sort key.
    pub fn with_sort_key(mut self, name: impl Into<String>, attribute_type: KeyAttributeType) -> Self {
        self.sort_key = Some(KeyAttribute::new(name, attribute_type));
        self
    }

    /// Resolve the key schema from a table description.
    ///
    /// Key roles come from the key schema entries, value types from the
    /// attribute definitions. A key attribute without a definition is an
    /// error rather than a default.
    pub fn from_description(description: &TableDescription) -> Result<Self, SchemaError> {
        let mut partition_name: Option<&str> = None;
        let mut sort_name: Option<&str> = None;

        for entry in &description.key_schema {
            let slot = match entry.key_type.as_str() {
                HASH_KEY_TYPE => &mut partition_name,
                RANGE_KEY_TYPE => &mut sort_name,
                other => {
                    return Err(SchemaError::UnknownKeyRole {
                        attribute: entry.attribute_name.clone(),
                        role: other.to_string(),
                    })
                }
            };
            if slot.is_some() {
                return Err(SchemaError::DuplicateKeyRole(entry.key_type.clone()));
            }
            *slot = Some(entry.attribute_name.as_str());
        }

        let partition_name = partition_name.ok_or(SchemaError::MissingPartitionKey)?;
        let partition_key = resolve_key(description, partition_name)?;
        let sort_key = sort_name
            .map(|name| resolve_key(description, name))
            .transpose()?;

        Ok(Self {
            partition_key,
            sort_key,
        })
    }

    /// Key attributes in partition, sort order.
    pub fn keys(&self) -> impl Iterator<Item = &KeyAttribute> {
        std::iter::once(&self.partition_key).chain(self.sort_key.as_ref())
    }
}

fn resolve_key(description: &TableDescription, name: &str) -> Result<KeyAttribute, SchemaError> {
    let tag = description
        .attribute_type_of(name)
        .ok_or_else(|| SchemaError::MissingAttributeDefinition(name.to_string()))?;
    let attribute_type = KeyAttributeType::from_tag(tag);
    if let KeyAttributeType::Unsupported(tag) = &attribute_type {
        warn!("Key attribute '{}' has unsupported type '{}'", name, tag);
    }
    Ok(KeyAttribute::new(name, attribute_type))
}

impl fmt::Display for KeySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "partition key {} ({})",
            self.partition_key.name, self.partition_key.attribute_type
        )?;
        if let Some(sort_key) = &self.sort_key {
            write!(f, ", sort key {} ({})", sort_key.name, sort_key.attribute_type)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_only() {
        let description = TableDescription::new()
            .with_key("id", "HASH")
            .with_attribute("id", "S");

        let schema = KeySchema::from_description(&description).unwrap();
        assert_eq!(
            schema,
            KeySchema::partition_only("id", KeyAttributeType::String)
        );
        assert_eq!(schema.keys().count(), 1);
    }

    #[test]
    fn test_partition_and_sort() {
        // Key schema order in the description does not matter
        let description = TableDescription::new()
            .with_key("created_at", "RANGE")
            .with_key("user", "HASH")
            .with_attribute("user", "B")
            .with_attribute("created_at", "N");

        let schema = KeySchema::from_description(&description).unwrap();
        assert_eq!(schema.partition_key.name, "user");
        assert_eq!(schema.partition_key.attribute_type, KeyAttributeType::Binary);
        let sort_key = schema.sort_key.as_ref().unwrap();
        assert_eq!(sort_key.name, "created_at");
        assert_eq!(sort_key.attribute_type, KeyAttributeType::Number);
        assert_eq!(schema.keys().count(), 2);

        let names: Vec<_> = schema.keys().map(|k| k.name.as_str()).collect();
        assert_eq!(names, vec!["user", "created_at"]);
    }

    #[test]
    fn test_missing_attribute_definition() {
        let description = TableDescription::new()
            .with_key("id", "HASH")
            .with_key("sk", "RANGE")
            .with_attribute("id", "S");

        let err = KeySchema::from_description(&description).unwrap_err();
        assert_eq!(err, SchemaError::MissingAttributeDefinition("sk".to_string()));
    }

    #[test]
    fn test_missing_partition_key() {
        let description = TableDescription::new()
            .with_key("sk", "RANGE")
            .with_attribute("sk", "S");

        assert_eq!(
            KeySchema::from_description(&description).unwrap_err(),
            SchemaError::MissingPartitionKey
        );
    }

    #[test]
    fn test_duplicate_and_unknown_roles() {
        let duplicate = TableDescription::new()
            .with_key("a", "HASH")
            .with_key("b", "HASH");
        assert_eq!(
            KeySchema::from_description(&duplicate).unwrap_err(),
            SchemaError::DuplicateKeyRole("HASH".to_string())
        );

        let unknown = TableDescription::new().with_key("a", "LOCAL");
        assert!(matches!(
            KeySchema::from_description(&unknown),
            Err(SchemaError::UnknownKeyRole { .. })
        ));
    }

    #[test]
    fn test_unsupported_type_is_kept() {
        let description = TableDescription::new()
            .with_key("id", "HASH")
            .with_attribute("id", "SS");

        let schema = KeySchema::from_description(&description).unwrap();
        assert_eq!(
            schema.partition_key.attribute_type,
            KeyAttributeType::Unsupported("SS".to_string())
        );
        assert_eq!(schema.partition_key.attribute_type.tag(), "SS");
    }

    #[test]
    fn test_display() {
        let schema = KeySchema::partition_only("pk", KeyAttributeType::String)
            .with_sort_key("sk", KeyAttributeType::Number);
        assert_eq!(
            schema.to_string(),
            "partition key pk (String), sort key sk (Number)"
        );
    }
}

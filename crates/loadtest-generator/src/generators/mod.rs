//! Individual value generators for key attribute types.
//!
//! This module provides the generation logic for each DynamoDB scalar type
//! a key attribute can declare.

pub mod binary;
pub mod numeric;
pub mod text;

use dynamodb_types::{AttributeValue, KeyAttributeType};
use rand::Rng;

/// Length of generated string keys.
pub const STRING_LENGTH: usize = 20;
/// Lower bound (inclusive) of generated number keys.
pub const NUMBER_MIN: f64 = 1.0;
/// Upper bound (exclusive) of generated number keys.
pub const NUMBER_MAX: f64 = 100.0;
/// Length of generated binary keys.
pub const BINARY_LENGTH: usize = 256;

/// Generate a random value for the declared key type.
///
/// Returns `None` for types outside `S` / `N` / `B`.
pub fn generate_key_value<R: Rng>(
    attribute_type: &KeyAttributeType,
    rng: &mut R,
) -> Option<AttributeValue> {
    match attribute_type {
        KeyAttributeType::String => Some(text::generate_alphanumeric(rng, STRING_LENGTH)),
        KeyAttributeType::Number => Some(numeric::generate_number_range(rng, NUMBER_MIN, NUMBER_MAX)),
        KeyAttributeType::Binary => Some(binary::generate_bytes(rng, BINARY_LENGTH)),
        KeyAttributeType::Unsupported(_) => None,
    }
}

//! Numeric value generators.

use dynamodb_types::AttributeValue;
use rand::Rng;

/// Generate a random decimal in `[min, max)`.
///
/// The number is stored in its shortest round-trip string form.
pub fn generate_number_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> AttributeValue {
    let value: f64 = rng.gen_range(min..max);
    AttributeValue::N(value.to_string())
}

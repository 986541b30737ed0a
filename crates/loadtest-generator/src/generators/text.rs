//! String value generator.

use dynamodb_types::AttributeValue;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate a string of `length` characters drawn uniformly from `[A-Za-z0-9]`.
pub fn generate_alphanumeric<R: Rng>(rng: &mut R, length: usize) -> AttributeValue {
    let value: String = rng
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect();
    AttributeValue::S(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_alphanumeric() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let value = generate_alphanumeric(&mut rng, 20);
            if let AttributeValue::S(s) = value {
                assert_eq!(s.len(), 20);
                assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
            } else {
                panic!("Expected S value");
            }
        }
    }
}

//! Binary value generator.

use dynamodb_types::AttributeValue;
use rand::Rng;

/// Generate `length` random bytes.
pub fn generate_bytes<R: Rng>(rng: &mut R, length: usize) -> AttributeValue {
    let mut bytes = vec![0u8; length];
    rng.fill_bytes(&mut bytes);
    AttributeValue::B(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_bytes() {
        let mut rng = StdRng::seed_from_u64(42);

        let first = generate_bytes(&mut rng, 256);
        let second = generate_bytes(&mut rng, 256);

        assert_eq!(first.as_b().map(<[u8]>::len), Some(256));
        assert_eq!(second.as_b().map(<[u8]>::len), Some(256));
        assert_ne!(first, second);
    }
}

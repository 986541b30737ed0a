//! Item generator producing random records for a key schema.

use crate::generators::generate_key_value;
use dynamodb_types::{Item, KeyAttribute, KeySchema};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum number of put requests in a single BatchWriteItem call.
pub const BATCH_WRITE_SIZE: usize = 25;

/// Error type for item synthesis.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    /// The key attribute declares a type the generator cannot produce
    #[error("Unsupported type '{type_tag}' for key attribute '{attribute}'")]
    UnsupportedType { attribute: String, type_tag: String },
}

/// Generator that produces random items conforming to a key schema.
///
/// The RNG is seeded once at construction and never reseeded, so successive
/// items are independent draws from the same stream.
pub struct ItemGenerator {
    /// Key schema shared with the other workers
    schema: Arc<KeySchema>,
    rng: StdRng,
    /// Number of items produced so far
    generated: u64,
}

impl ItemGenerator {
    /// Create a new generator with an explicit seed.
    pub fn new(schema: Arc<KeySchema>, seed: u64) -> Self {
        Self {
            schema,
            rng: StdRng::seed_from_u64(seed),
            generated: 0,
        }
    }

    /// Create the generator for one worker of a pool.
    ///
    /// With a base seed the stream is reproducible; without one the base is
    /// taken from the wall-clock nanosecond counter. The worker id is mixed
    /// in either way so workers started in the same tick do not collide.
    pub fn for_worker(schema: Arc<KeySchema>, worker_id: usize, base_seed: Option<u64>) -> Self {
        let base = base_seed.unwrap_or_else(clock_seed);
        Self::new(schema, worker_seed(base, worker_id))
    }

    /// Generate the next item.
    pub fn next_item(&mut self) -> Result<Item, SynthesisError> {
        let mut item = Item::new();
        for key in self.schema.keys() {
            let value = generate_key_value(&key.attribute_type, &mut self.rng)
                .ok_or_else(|| unsupported(key))?;
            item.insert(key.name.clone(), value);
        }
        self.generated += 1;
        Ok(item)
    }

    /// Generate a batch of `size` items.
    ///
    /// The first synthesis failure is returned and no partial batch is kept.
    pub fn next_batch(&mut self, size: usize) -> Result<Vec<Item>, SynthesisError> {
        let mut batch = Vec::with_capacity(size);
        for _ in 0..size {
            batch.push(self.next_item()?);
        }
        Ok(batch)
    }

    /// Number of items generated so far.
    pub fn items_generated(&self) -> u64 {
        self.generated
    }
}

fn unsupported(key: &KeyAttribute) -> SynthesisError {
    SynthesisError::UnsupportedType {
        attribute: key.name.clone(),
        type_tag: key.attribute_type.tag().to_string(),
    }
}

/// Combine a base seed with a worker id.
fn worker_seed(base: u64, worker_id: usize) -> u64 {
    base.wrapping_add((worker_id as u64).wrapping_add(1).wrapping_mul(0x9E3779B97F4A7C15))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

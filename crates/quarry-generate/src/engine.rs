use std::time::Instant;

use quarry_core::Value;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::errors::GenerationError;
use crate::generators::{DrawContext, Gen};
use crate::model::{DrawStats, GenerateOptions, SampleReport};

/// Result of a sampling run.
#[derive(Debug, Clone)]
pub struct SampleResult {
    pub values: Vec<Value>,
    pub report: SampleReport,
}

/// Draws batches of values reproducibly.
///
/// Sample `i` of a run is drawn from its own `ChaCha8Rng` seeded from the
/// base seed and `i`, so a single failing sample can be replayed without
/// regenerating the ones before it.
#[derive(Debug, Clone)]
pub struct SampleEngine {
    options: GenerateOptions,
}

impl SampleEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn run(&self, generator: &Gen, count: u64) -> Result<SampleResult, GenerationError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let mut report = SampleReport::new(run_id.clone(), self.options.seed, generator.id(), count);
        let mut values = Vec::new();

        info!(
            run_id = %run_id,
            generator = generator.id(),
            samples = count,
            seed = self.options.seed,
            "sampling started"
        );

        for index in 0..count {
            match self.draw_sample(generator, index) {
                Ok((value, stats)) => {
                    report.record_sample(&stats);
                    values.push(value);
                }
                Err(err) => {
                    warn!(run_id = %run_id, index, error = %err, "sampling failed");
                    return Err(err);
                }
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            run_id = %run_id,
            samples_generated = report.samples_generated,
            filter_rejections = report.stats.filter_rejections,
            omission_retries = report.stats.omission_retries,
            levels_built = report.stats.levels_built,
            duration_ms = report.duration_ms,
            "sampling finished"
        );

        Ok(SampleResult { values, report })
    }

    /// Redraws sample `index` of a run with the same seed.
    pub fn replay(&self, generator: &Gen, index: u64) -> Result<Value, GenerationError> {
        self.draw_sample(generator, index).map(|(value, _)| value)
    }

    fn draw_sample(
        &self,
        generator: &Gen,
        index: u64,
    ) -> Result<(Value, DrawStats), GenerationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(hash_sample_seed(self.options.seed, index));
        let mut ctx = DrawContext::new(&mut rng, &self.options);
        let value = generator.draw(&mut ctx)?.ok_or(GenerationError::NoValue)?;
        Ok((value, ctx.stats))
    }
}

fn hash_sample_seed(seed: u64, index: u64) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    hash ^= index.wrapping_mul(0x9e3779b97f4a7c15);
    hash = hash.wrapping_mul(0x100000001b3);
    hash
}

use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

/// Options shared by every draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Base seed for `SampleEngine` runs.
    pub seed: u64,
    /// Maximum attempts for retry loops (`filter`, omission-aware `any`).
    pub max_attempts: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            max_attempts: 10_000,
        }
    }
}

impl GenerateOptions {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Parses options from TOML; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, GenerationError> {
        let options: GenerateOptions = toml::from_str(content)?;
        options.validate()
    }

    pub fn to_toml_string(&self) -> Result<String, GenerationError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(self) -> Result<Self, GenerationError> {
        if self.max_attempts == 0 {
            return Err(GenerationError::InvalidConfiguration(
                "max_attempts must be > 0".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Counters collected while drawing a single value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawStats {
    /// Values discarded by `filter` predicates (omissions included).
    pub filter_rejections: u64,
    /// Options re-picked by `any` because the chosen one omitted.
    pub omission_retries: u64,
    /// Recursion levels constructed on first use.
    pub levels_built: u64,
}

impl DrawStats {
    pub fn merge(&mut self, other: &DrawStats) {
        self.filter_rejections += other.filter_rejections;
        self.omission_retries += other.omission_retries;
        self.levels_built += other.levels_built;
    }
}

/// Report for a sampling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleReport {
    pub run_id: String,
    pub seed: u64,
    pub generator_id: String,
    pub samples_requested: u64,
    pub samples_generated: u64,
    pub duration_ms: u64,
    pub stats: DrawStats,
}

impl SampleReport {
    pub fn new(run_id: String, seed: u64, generator_id: &str, samples_requested: u64) -> Self {
        Self {
            run_id,
            seed,
            generator_id: generator_id.to_string(),
            samples_requested,
            samples_generated: 0,
            duration_ms: 0,
            stats: DrawStats::default(),
        }
    }

    pub fn record_sample(&mut self, stats: &DrawStats) {
        self.samples_generated += 1;
        self.stats.merge(stats);
    }
}

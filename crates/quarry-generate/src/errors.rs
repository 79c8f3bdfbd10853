use thiserror::Error;

/// Errors emitted while building or drawing generators.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Rejected at construction time: empty option lists, inverted ranges,
    /// all-zero weights, empty charsets, duplicate record fields.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A retry loop (`filter`, omission-aware `any`) hit its ceiling.
    #[error("{generator} gave up after {attempts} attempts")]
    ExhaustedRetries {
        generator: &'static str,
        attempts: u32,
    },
    /// The outermost generator omitted its value.
    #[error("generator produced no value")]
    NoValue,
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("config encode error: {0}")]
    ConfigEncode(#[from] toml::ser::Error),
}

impl From<quarry_core::Error> for GenerationError {
    fn from(err: quarry_core::Error) -> Self {
        GenerationError::InvalidConfiguration(err.to_string())
    }
}

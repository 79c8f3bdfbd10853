use thiserror::Error;

/// Core error type shared across Quarry crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A range violates `min <= max` or a non-negativity requirement.
    #[error("invalid range: {0}")]
    InvalidRange(String),
    /// A character table is empty or contains invalid code points.
    #[error("invalid charset: {0}")]
    InvalidCharset(String),
}

/// Convenience alias for results returned by Quarry crates.
pub type Result<T> = std::result::Result<T, Error>;

//! Core contracts for Quarry.
//!
//! This crate defines the value model, integer ranges, and the fixed
//! character tables consumed by the generator combinators.

pub mod charset;
pub mod error;
pub mod range;

pub use charset::Charset;
pub use error::{Error, Result};
pub use range::{MAX_SAFE_INTEGER, Range};

/// Values produced by generators: null, booleans, integers, strings, arrays
/// and string-keyed objects (insertion ordered).
pub type Value = serde_json::Value;

/// Ordered map used for generated objects and records.
pub type Map = serde_json::Map<String, Value>;

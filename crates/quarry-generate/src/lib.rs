//! Combinators for randomized test data.
//!
//! Every constructor returns a [`Gen`]: an immutable, shareable description
//! that produces one random JSON-like value per draw. Leaves (`bool`, `int`,
//! `ascii`, `unicode`, `symbol`, ...) are composed with selection (`any`,
//! `weighted`), structure (`array`, `object`, `record`), optionality and
//! acceptance (`maybe`, `filter`) and bounded recursion (`recurse`).
//!
//! Constructors never touch randomness; the random source is injected on each
//! draw, so seeded runs are reproducible.
//!
//! ```
//! use quarry_generate::{any, array, constant, recurse};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let tree = recurse(3, |node| any([constant("leaf"), array(1..=2, node)?])).unwrap();
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let value = tree.generate(&mut rng).unwrap();
//! assert!(value.is_string() || value.is_array());
//! ```

pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;

pub use engine::{SampleEngine, SampleResult};
pub use errors::GenerationError;
pub use generators::acceptance::{filter, map, maybe};
pub use generators::primitives::{
    ascii, bool, constant, int, null, pattern, string, symbol, unicode,
};
pub use generators::recursive::{Recur, recurse};
pub use generators::selection::{any, weighted};
pub use generators::structure::{ObjectSpec, array, object, record};
pub use generators::{Draw, DrawContext, Gen, Generator, IntoGen};
pub use model::{DrawStats, GenerateOptions, SampleReport};
pub use quarry_core::{Charset, MAX_SAFE_INTEGER, Range, Value};

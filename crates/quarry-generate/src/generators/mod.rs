use std::fmt;
use std::sync::Arc;

use quarry_core::Value;
use rand::RngCore;

use crate::errors::GenerationError;
use crate::model::{DrawStats, GenerateOptions};

pub mod acceptance;
pub mod primitives;
pub mod recursive;
pub mod selection;
pub mod structure;

/// Outcome of one draw: `Some(value)`, or `None` when the generator omitted
/// its value (a `maybe` that skipped, an exhausted recursion budget).
pub type Draw = Result<Option<Value>, GenerationError>;

/// Per-draw state threaded through every generator.
pub struct DrawContext<'a> {
    pub rng: &'a mut dyn RngCore,
    pub options: &'a GenerateOptions,
    pub stats: DrawStats,
}

impl<'a> DrawContext<'a> {
    pub fn new(rng: &'a mut dyn RngCore, options: &'a GenerateOptions) -> Self {
        Self {
            rng,
            options,
            stats: DrawStats::default(),
        }
    }

    pub(crate) fn max_attempts(&self) -> u32 {
        self.options.max_attempts.max(1)
    }
}

/// A value generator.
///
/// Implementations are immutable once built; all randomness comes from the
/// context's random source at draw time.
pub trait Generator: Send + Sync {
    fn id(&self) -> &'static str;

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Draw;
}

/// Shared handle to a generator. Cloning is cheap and clones share state.
#[derive(Clone)]
pub struct Gen {
    inner: Arc<dyn Generator>,
}

impl Gen {
    pub fn new(generator: impl Generator + 'static) -> Self {
        Self {
            inner: Arc::new(generator),
        }
    }

    pub fn id(&self) -> &'static str {
        self.inner.id()
    }

    /// Draws one value, surfacing omission as `None`.
    pub fn draw(&self, ctx: &mut DrawContext<'_>) -> Draw {
        self.inner.draw(ctx)
    }

    /// Draws one value with default options.
    pub fn generate(&self, rng: &mut dyn RngCore) -> Result<Value, GenerationError> {
        self.generate_with(rng, &GenerateOptions::default())
    }

    pub fn generate_with(
        &self,
        rng: &mut dyn RngCore,
        options: &GenerateOptions,
    ) -> Result<Value, GenerationError> {
        let mut ctx = DrawContext::new(rng, options);
        self.draw(&mut ctx)?.ok_or(GenerationError::NoValue)
    }

    /// Post-processes every produced value with `f`.
    pub fn map<F>(self, f: F) -> Gen
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        acceptance::map(self, f)
    }

    /// True when both handles point at the same generator.
    pub fn ptr_eq(a: &Gen, b: &Gen) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Debug for Gen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Gen").field(&self.id()).finish()
    }
}

/// Normalizes combinator arguments into generators.
///
/// Generators pass through unchanged; plain values become constants.
pub trait IntoGen {
    fn into_gen(self) -> Gen;
}

impl IntoGen for Gen {
    fn into_gen(self) -> Gen {
        self
    }
}

impl IntoGen for &Gen {
    fn into_gen(self) -> Gen {
        self.clone()
    }
}

macro_rules! constant_into_gen {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoGen for $ty {
                fn into_gen(self) -> Gen {
                    primitives::constant(self)
                }
            }
        )*
    };
}

constant_into_gen!(bool, i32, i64, u32, u64, f64, &str, String, Value);

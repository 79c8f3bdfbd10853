use quarry_core::Value;
use rand::Rng;

use crate::errors::GenerationError;
use crate::generators::{Draw, DrawContext, Gen, Generator, IntoGen};

/// Draws the inner generator half of the time and omits otherwise.
///
/// Omission is consumed by `record` (field dropped) and `any` (re-pick); a
/// bare `maybe` at the top level makes `Gen::generate` fail with `NoValue`.
pub fn maybe(inner: impl IntoGen) -> Gen {
    Gen::new(MaybeGenerator {
        inner: inner.into_gen(),
    })
}

/// Redraws until `predicate` accepts a value.
///
/// Omitted draws count as rejections. Gives up with `ExhaustedRetries` after
/// `GenerateOptions::max_attempts` draws.
pub fn filter<P>(inner: impl IntoGen, predicate: P) -> Gen
where
    P: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Gen::new(FilterGenerator {
        inner: inner.into_gen(),
        predicate: Box::new(predicate),
    })
}

pub fn map<F>(inner: impl IntoGen, f: F) -> Gen
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    Gen::new(MapGenerator {
        inner: inner.into_gen(),
        f: Box::new(f),
    })
}

struct MaybeGenerator {
    inner: Gen,
}

impl Generator for MaybeGenerator {
    fn id(&self) -> &'static str {
        "maybe"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Draw {
        if ctx.rng.random_bool(0.5) {
            self.inner.draw(ctx)
        } else {
            Ok(None)
        }
    }
}

struct FilterGenerator {
    inner: Gen,
    predicate: Box<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl Generator for FilterGenerator {
    fn id(&self) -> &'static str {
        "filter"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Draw {
        let attempts = ctx.max_attempts();
        for _ in 0..attempts {
            if let Some(value) = self.inner.draw(ctx)?
                && (self.predicate)(&value)
            {
                return Ok(Some(value));
            }
            ctx.stats.filter_rejections += 1;
        }
        Err(GenerationError::ExhaustedRetries {
            generator: "filter",
            attempts,
        })
    }
}

struct MapGenerator {
    inner: Gen,
    f: Box<dyn Fn(Value) -> Value + Send + Sync>,
}

impl Generator for MapGenerator {
    fn id(&self) -> &'static str {
        "map"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Draw {
        Ok(self.inner.draw(ctx)?.map(|value| (self.f)(value)))
    }
}

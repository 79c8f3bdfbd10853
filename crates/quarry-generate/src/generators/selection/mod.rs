use rand::Rng;
use tracing::trace;

use crate::errors::GenerationError;
use crate::generators::{Draw, DrawContext, Gen, Generator, IntoGen};

/// Picks one option uniformly per draw. Options that omit are re-picked.
pub fn any<I, T>(options: I) -> Result<Gen, GenerationError>
where
    I: IntoIterator<Item = T>,
    T: IntoGen,
{
    let options: Vec<Gen> = options.into_iter().map(IntoGen::into_gen).collect();
    if options.is_empty() {
        return Err(GenerationError::InvalidConfiguration(
            "any requires at least one option".to_string(),
        ));
    }
    Ok(Gen::new(ChoiceGenerator { id: "any", options }))
}

/// Picks options with probability proportional to their weight.
///
/// Each option is repeated `weight` times and the expansion is drawn
/// uniformly, so the proportion is exact. A weight of zero excludes the
/// option.
pub fn weighted<I, T>(pairs: I) -> Result<Gen, GenerationError>
where
    I: IntoIterator<Item = (T, u32)>,
    T: IntoGen,
{
    let mut options = Vec::new();
    for (option, weight) in pairs {
        let option = option.into_gen();
        options.extend(std::iter::repeat_n(option, weight as usize));
    }
    if options.is_empty() {
        return Err(GenerationError::InvalidConfiguration(
            "weighted requires at least one option with weight > 0".to_string(),
        ));
    }
    Ok(Gen::new(ChoiceGenerator {
        id: "weighted",
        options,
    }))
}

struct ChoiceGenerator {
    id: &'static str,
    options: Vec<Gen>,
}

impl Generator for ChoiceGenerator {
    fn id(&self) -> &'static str {
        self.id
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Draw {
        let attempts = ctx.max_attempts();
        for attempt in 1..=attempts {
            let idx = ctx.rng.random_range(0..self.options.len());
            let option = &self.options[idx];
            if let Some(value) = option.draw(ctx)? {
                return Ok(Some(value));
            }
            ctx.stats.omission_retries += 1;
            trace!(generator = self.id, option = option.id(), attempt, "option omitted");
        }
        Err(GenerationError::ExhaustedRetries {
            generator: self.id,
            attempts,
        })
    }
}

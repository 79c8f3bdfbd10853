use quarry_core::{Charset, Range, Value};
use rand::{Rng, RngCore};
use rand::distr::Distribution;
use rand_regex::Regex as RandRegex;

use crate::errors::GenerationError;
use crate::generators::{Draw, DrawContext, Gen, Generator};

/// Generator that always yields a clone of the captured value.
pub fn constant(value: impl Into<Value>) -> Gen {
    Gen::new(ConstantGenerator {
        value: value.into(),
    })
}

pub fn null() -> Gen {
    constant(Value::Null)
}

pub fn bool() -> Gen {
    Gen::new(BoolGenerator)
}

/// Uniform integer in the closed range.
pub fn int(range: impl Into<Range>) -> Result<Gen, GenerationError> {
    let range = range.into().validate("int")?;
    Ok(Gen::new(IntGenerator { range }))
}

/// String whose length is drawn from `length` and whose characters are drawn
/// uniformly from `charset`.
pub fn string(length: impl Into<Range>, charset: Charset) -> Result<Gen, GenerationError> {
    let length = length.into().validate_length("string")?;
    if charset.is_empty() {
        return Err(GenerationError::InvalidConfiguration(
            "string: charset must not be empty".to_string(),
        ));
    }
    Ok(Gen::new(StringGenerator {
        id: "string",
        length,
        charset,
    }))
}

pub fn ascii(length: impl Into<Range>) -> Result<Gen, GenerationError> {
    let length = length.into().validate_length("ascii")?;
    Ok(Gen::new(StringGenerator {
        id: "ascii",
        length,
        charset: Charset::ascii(),
    }))
}

pub fn unicode(length: impl Into<Range>) -> Result<Gen, GenerationError> {
    let length = length.into().validate_length("unicode")?;
    Ok(Gen::new(StringGenerator {
        id: "unicode",
        length,
        charset: Charset::unicode(),
    }))
}

/// Identifier-shaped string: a letter, `$` or `_`, then `length - 1` letters,
/// digits, `$` or `_`. Always at least one character long.
pub fn symbol(length: impl Into<Range>) -> Result<Gen, GenerationError> {
    let length = length.into().validate_length("symbol")?;
    Ok(Gen::new(SymbolGenerator {
        head: Charset::symbol_head(),
        tail: Charset::symbol_tail(),
        tail_length: length.shrink_by(1),
    }))
}

/// String matching a regular expression; unbounded repetitions are capped at
/// `max_repeat`.
pub fn pattern(regex: &str, max_repeat: u32) -> Result<Gen, GenerationError> {
    if max_repeat == 0 {
        return Err(GenerationError::InvalidConfiguration(
            "pattern: max_repeat must be > 0".to_string(),
        ));
    }
    let compiled = RandRegex::compile(regex, max_repeat).map_err(|err| {
        GenerationError::InvalidConfiguration(format!("pattern: invalid regex '{regex}': {err}"))
    })?;
    Ok(Gen::new(PatternGenerator { regex: compiled }))
}

/// Uniform draw from a validated range.
pub(crate) fn draw_in(range: Range, rng: &mut dyn RngCore) -> i64 {
    if range.min == range.max {
        range.min
    } else {
        rng.random_range(range.min..=range.max)
    }
}

/// Uniform draw of a length from a range validated with `validate_length`.
pub(crate) fn draw_len(range: Range, rng: &mut dyn RngCore) -> usize {
    usize::try_from(draw_in(range, rng)).unwrap_or(0)
}

fn push_chars(
    out: &mut String,
    count: usize,
    charset: &Charset,
    rng: &mut dyn RngCore,
) -> Result<(), GenerationError> {
    for _ in 0..count {
        let idx = rng.random_range(0..charset.len());
        let ch = charset.nth(idx).ok_or_else(|| {
            GenerationError::InvalidConfiguration(format!("charset has no character at {idx}"))
        })?;
        out.push(ch);
    }
    Ok(())
}

struct ConstantGenerator {
    value: Value,
}

impl Generator for ConstantGenerator {
    fn id(&self) -> &'static str {
        "constant"
    }

    fn draw(&self, _ctx: &mut DrawContext<'_>) -> Draw {
        Ok(Some(self.value.clone()))
    }
}

struct BoolGenerator;

impl Generator for BoolGenerator {
    fn id(&self) -> &'static str {
        "bool"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Draw {
        Ok(Some(Value::Bool(ctx.rng.random_bool(0.5))))
    }
}

struct IntGenerator {
    range: Range,
}

impl Generator for IntGenerator {
    fn id(&self) -> &'static str {
        "int"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Draw {
        Ok(Some(Value::from(draw_in(self.range, ctx.rng))))
    }
}

struct StringGenerator {
    id: &'static str,
    length: Range,
    charset: Charset,
}

impl Generator for StringGenerator {
    fn id(&self) -> &'static str {
        self.id
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Draw {
        let len = draw_len(self.length, ctx.rng);
        let mut value = String::new();
        push_chars(&mut value, len, &self.charset, ctx.rng)?;
        Ok(Some(Value::String(value)))
    }
}

struct SymbolGenerator {
    head: Charset,
    tail: Charset,
    tail_length: Range,
}

impl Generator for SymbolGenerator {
    fn id(&self) -> &'static str {
        "symbol"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Draw {
        let mut value = String::new();
        push_chars(&mut value, 1, &self.head, ctx.rng)?;
        let rest = draw_len(self.tail_length, ctx.rng);
        push_chars(&mut value, rest, &self.tail, ctx.rng)?;
        Ok(Some(Value::String(value)))
    }
}

struct PatternGenerator {
    regex: RandRegex,
}

impl Generator for PatternGenerator {
    fn id(&self) -> &'static str {
        "pattern"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Draw {
        let value: String = self.regex.sample(&mut *ctx.rng);
        Ok(Some(Value::String(value)))
    }
}
